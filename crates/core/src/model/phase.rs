use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one quiz step.
///
/// Ordering follows the phase number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseId {
    Phase1,
    Phase2,
    Phase3,
    Phase4,
    Phase5,
    Phase6,
}

impl PhaseId {
    pub const ALL: [PhaseId; 6] = [
        PhaseId::Phase1,
        PhaseId::Phase2,
        PhaseId::Phase3,
        PhaseId::Phase4,
        PhaseId::Phase5,
        PhaseId::Phase6,
    ];

    /// Human-facing phase number, starting at 1.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            PhaseId::Phase1 => 1,
            PhaseId::Phase2 => 2,
            PhaseId::Phase3 => 3,
            PhaseId::Phase4 => 4,
            PhaseId::Phase5 => 5,
            PhaseId::Phase6 => 6,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseId::Phase1 => "phase1",
            PhaseId::Phase2 => "phase2",
            PhaseId::Phase3 => "phase3",
            PhaseId::Phase4 => "phase4",
            PhaseId::Phase5 => "phase5",
            PhaseId::Phase6 => "phase6",
        }
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a phase hands over once an answer is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Successor {
    Phase(PhaseId),
    Leaderboard,
}
