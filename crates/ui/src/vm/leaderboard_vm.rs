use services::LeaderboardScreen;

pub const EMPTY_LEADERBOARD: &str =
    "No scores yet! Play the game to be the first on the leaderboard.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub rank_label: String,
    pub name: String,
    pub score_label: String,
    /// Row belongs to the player who just finished.
    pub is_current: bool,
}

impl LeaderboardRowVm {
    /// Single-line form, e.g. `#1 Alice: 20 points`.
    #[must_use]
    pub fn line(&self) -> String {
        format!("{} {}: {}", self.rank_label, self.name, self.score_label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardVm {
    pub rows: Vec<LeaderboardRowVm>,
    pub warning: Option<String>,
    pub session_line: Option<String>,
}

impl LeaderboardVm {
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.rows.is_empty() && self.warning.is_none()).then_some(EMPTY_LEADERBOARD)
    }
}

#[must_use]
pub fn points_label(score: u32) -> String {
    if score == 1 {
        "1 point".to_owned()
    } else {
        format!("{score} points")
    }
}

#[must_use]
pub fn map_leaderboard(screen: &LeaderboardScreen, player: Option<&str>) -> LeaderboardVm {
    let rows = screen
        .rows
        .iter()
        .map(|row| LeaderboardRowVm {
            rank_label: format!("#{}", row.rank),
            name: row.name.clone(),
            score_label: points_label(row.score),
            is_current: player == Some(row.name.as_str()),
        })
        .collect();

    LeaderboardVm {
        rows,
        warning: screen.warning.clone(),
        session_line: screen
            .session_score
            .map(|score| format!("You earned {} this round.", points_label(score))),
    }
}
