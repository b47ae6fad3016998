use services::PhaseScreen;
use trials_core::model::PhaseId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOptionVm {
    pub index: usize,
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseVm {
    pub phase: PhaseId,
    pub title: String,
    pub scenario: String,
    pub prompt: String,
    pub options: Vec<AnswerOptionVm>,
    pub progress_percent: u8,
    pub progress_label: String,
}

impl PhaseVm {
    /// Text of the option at `index`, if there is one.
    #[must_use]
    pub fn choice(&self, index: Option<usize>) -> Option<String> {
        let index = index?;
        self.options.get(index).map(|option| option.label.clone())
    }
}

impl From<&PhaseScreen> for PhaseVm {
    fn from(screen: &PhaseScreen) -> Self {
        let options = screen
            .options
            .iter()
            .enumerate()
            .map(|(index, label)| AnswerOptionVm {
                index,
                id: format!("{}-option-{index}", screen.phase),
                label: label.clone(),
            })
            .collect();

        Self {
            phase: screen.phase,
            title: screen.title.clone(),
            scenario: screen.scenario.clone(),
            prompt: screen.prompt.clone(),
            options,
            progress_percent: progress_percent(screen.progress),
            progress_label: format!("Phase {} of {}", screen.number, screen.total),
        }
    }
}

/// Progress fraction as a whole percentage, clamped to 0..=100.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_percent(progress: f64) -> u8 {
    if progress.is_nan() {
        return 0;
    }
    (progress.clamp(0.0, 1.0) * 100.0).round() as u8
}
