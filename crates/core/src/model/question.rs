use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const OPTIONS_PER_QUESTION: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt must not be empty")]
    EmptyPrompt,

    #[error("option {index} must not be empty")]
    EmptyOption { index: usize },

    #[error("option {option:?} is listed more than once")]
    DuplicateOption { option: String },

    #[error("correct option index {index} is out of range")]
    CorrectOutOfRange { index: usize },
}

/// The text asked of the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionPrompt {
    /// Written into the catalog.
    Fixed(String),
    /// Produced at render time by a question generator from `instruction`.
    Generated { instruction: String },
}

/// What the player is told after answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: String,
    pub incorrect: String,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            correct: "Correct!".to_owned(),
            incorrect: "Not quite.".to_owned(),
        }
    }
}

/// A multiple-choice question with exactly three options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    scenario: String,
    prompt: QuestionPrompt,
    options: [String; OPTIONS_PER_QUESTION],
    correct: usize,
    #[serde(default)]
    feedback: Feedback,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for blank text, repeated options, or an
    /// out-of-range correct index.
    pub fn new(
        scenario: impl Into<String>,
        prompt: QuestionPrompt,
        options: [String; OPTIONS_PER_QUESTION],
        correct: usize,
    ) -> Result<Self, QuestionError> {
        let question = Self::from_parts(scenario, prompt, options, correct);
        question.validate()?;
        Ok(question)
    }

    pub(crate) fn from_parts(
        scenario: impl Into<String>,
        prompt: QuestionPrompt,
        options: [String; OPTIONS_PER_QUESTION],
        correct: usize,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            prompt,
            options,
            correct,
            feedback: Feedback::default(),
        }
    }

    /// Replace the default feedback lines.
    #[must_use]
    pub fn with_feedback(mut self, correct: impl Into<String>, incorrect: impl Into<String>) -> Self {
        self.feedback = Feedback {
            correct: correct.into(),
            incorrect: incorrect.into(),
        };
        self
    }

    pub(crate) fn validate(&self) -> Result<(), QuestionError> {
        let prompt_blank = match &self.prompt {
            QuestionPrompt::Fixed(text) => text.trim().is_empty(),
            QuestionPrompt::Generated { instruction } => instruction.trim().is_empty(),
        };
        if prompt_blank {
            return Err(QuestionError::EmptyPrompt);
        }

        for (index, option) in self.options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            if self.options[..index].contains(option) {
                return Err(QuestionError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }

        if self.correct >= OPTIONS_PER_QUESTION {
            return Err(QuestionError::CorrectOutOfRange {
                index: self.correct,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    #[must_use]
    pub fn prompt(&self) -> &QuestionPrompt {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }

    #[must_use]
    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|option| option == choice)
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Explanation shown after a correct or an incorrect answer.
    #[must_use]
    pub fn feedback_for(&self, correct: bool) -> &str {
        if correct {
            &self.feedback.correct
        } else {
            &self.feedback.incorrect
        }
    }

    /// Exact value equality against the correct option.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_option() == choice
    }
}
