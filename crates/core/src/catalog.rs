use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::model::{PhaseId, Question, QuestionError, QuestionPrompt, Successor};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no phases")]
    Empty,

    #[error("{0} appears more than once")]
    DuplicatePhase(PhaseId),

    #[error("{phase} must hand over to {expected:?}, found {found:?}")]
    BrokenChain {
        phase: PhaseId,
        expected: Successor,
        found: Successor,
    },

    #[error("{phase}: {source}")]
    InvalidQuestion {
        phase: PhaseId,
        #[source]
        source: QuestionError,
    },

    #[error("unknown quiz variant: {0}")]
    UnknownVariant(String),
}

//
// ─── VARIANTS ──────────────────────────────────────────────────────────────────
//

/// Which phase table a playthrough runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizVariant {
    /// Four fixed questions.
    #[default]
    Standard,
    /// The four fixed questions plus two phases with generated prompts.
    Extended,
}

impl QuizVariant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizVariant::Standard => "standard",
            QuizVariant::Extended => "extended",
        }
    }
}

impl FromStr for QuizVariant {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(QuizVariant::Standard),
            "extended" => Ok(QuizVariant::Extended),
            other => Err(CatalogError::UnknownVariant(other.to_owned())),
        }
    }
}

//
// ─── PHASE TABLE ───────────────────────────────────────────────────────────────
//

/// One row of the transition table: `phase -> (question, successor)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSpec {
    id: PhaseId,
    question: Question,
    successor: Successor,
}

impl PhaseSpec {
    #[must_use]
    pub fn new(id: PhaseId, question: Question, successor: Successor) -> Self {
        Self {
            id,
            question,
            successor,
        }
    }

    #[must_use]
    pub fn id(&self) -> PhaseId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn successor(&self) -> Successor {
        self.successor
    }
}

/// Ordered, validated phase table.
///
/// Every phase hands over to the next row and the last one to the leaderboard,
/// so walking successors can only move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    variant: QuizVariant,
    phases: Vec<PhaseSpec>,
}

impl Catalog {
    /// Build the built-in table for a variant.
    #[must_use]
    pub fn for_variant(variant: QuizVariant) -> Self {
        let mut phases = standard_phases();
        if variant == QuizVariant::Extended {
            if let Some(last) = phases.last_mut() {
                last.successor = Successor::Phase(PhaseId::Phase5);
            }
            phases.extend(extended_phases());
        }
        Self { variant, phases }
    }

    /// Build a custom table.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the table is empty, repeats a phase, does not
    /// chain in order, or carries an invalid question.
    pub fn from_phases(variant: QuizVariant, phases: Vec<PhaseSpec>) -> Result<Self, CatalogError> {
        let catalog = Self { variant, phases };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the chaining and question invariants.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_phases`].
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.phases.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (idx, spec) in self.phases.iter().enumerate() {
            if self.phases[..idx].iter().any(|p| p.id == spec.id) {
                return Err(CatalogError::DuplicatePhase(spec.id));
            }

            spec.question
                .validate()
                .map_err(|source| CatalogError::InvalidQuestion {
                    phase: spec.id,
                    source,
                })?;

            let expected = self
                .phases
                .get(idx + 1)
                .map_or(Successor::Leaderboard, |next| Successor::Phase(next.id));
            if spec.successor != expected {
                return Err(CatalogError::BrokenChain {
                    phase: spec.id,
                    expected,
                    found: spec.successor,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn variant(&self) -> QuizVariant {
        self.variant
    }

    /// Entry phase of the quiz. Tables are never empty.
    #[must_use]
    pub fn first(&self) -> PhaseId {
        self.phases[0].id
    }

    #[must_use]
    pub fn get(&self, id: PhaseId) -> Option<&PhaseSpec> {
        self.phases.iter().find(|spec| spec.id == id)
    }

    #[must_use]
    pub fn position(&self, id: PhaseId) -> Option<usize> {
        self.phases.iter().position(|spec| spec.id == id)
    }

    /// `(position + 1) / len`, or `None` if `id` is not in this table.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_of(&self, id: PhaseId) -> Option<f64> {
        let position = self.position(id)?;
        Some((position + 1) as f64 / self.phases.len() as f64)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhaseSpec> {
        self.phases.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::for_variant(QuizVariant::Standard)
    }
}

//
// ─── BUILT-IN CONTENT ──────────────────────────────────────────────────────────
//

fn fixed(
    id: PhaseId,
    scenario: &str,
    prompt: &str,
    options: [&str; 3],
    correct: usize,
    feedback: (&str, &str),
    successor: Successor,
) -> PhaseSpec {
    PhaseSpec::new(
        id,
        Question::from_parts(
            scenario,
            QuestionPrompt::Fixed(prompt.to_owned()),
            options.map(str::to_owned),
            correct,
        )
        .with_feedback(feedback.0, feedback.1),
        successor,
    )
}

fn generated(
    id: PhaseId,
    scenario: &str,
    instruction: &str,
    options: [&str; 3],
    correct: usize,
    feedback: (&str, &str),
    successor: Successor,
) -> PhaseSpec {
    PhaseSpec::new(
        id,
        Question::from_parts(
            scenario,
            QuestionPrompt::Generated {
                instruction: instruction.to_owned(),
            },
            options.map(str::to_owned),
            correct,
        )
        .with_feedback(feedback.0, feedback.1),
        successor,
    )
}

fn standard_phases() -> Vec<PhaseSpec> {
    vec![
        fixed(
            PhaseId::Phase1,
            "You have just discovered a new medicine that could help people with a rare disease. \
             Before giving it to sick people, you need to test it on a small group of healthy volunteers \
             to see if it is safe for human use.",
            "What is the main goal of Phase 1 trials?",
            [
                "To find out if the medicine works",
                "To test if the medicine is safe",
                "To sell the medicine in stores",
            ],
            1,
            (
                "Correct! 🎉 Safety first!",
                "Oops! The main goal is to test safety first.",
            ),
            Successor::Phase(PhaseId::Phase2),
        ),
        fixed(
            PhaseId::Phase2,
            "Your medicine passed the safety test! Now, you must test it on a larger group of patients \
             who actually have the disease. This helps you understand if the medicine works and what dosage is best.",
            "What is the primary goal of Phase 2 trials?",
            [
                "To test if the medicine is safe",
                "To check how well the medicine works",
                "To distribute the medicine worldwide",
            ],
            1,
            (
                "Correct! 🎯 Effectiveness is key in Phase 2.",
                "Not quite! Phase 2 focuses on effectiveness.",
            ),
            Successor::Phase(PhaseId::Phase3),
        ),
        fixed(
            PhaseId::Phase3,
            "Your medicine is showing promise! Now, you need to test it on thousands of patients across different locations. \
             This helps confirm its effectiveness and detect any rare side effects.",
            "What is a key aspect of Phase 3 trials?",
            [
                "To confirm the medicine\u{2019}s effectiveness on a large scale",
                "To test on a few people",
                "To stop testing and sell the medicine",
            ],
            0,
            (
                "Correct! ✅ Large-scale testing is crucial.",
                "Try again! Phase 3 is about large-scale confirmation.",
            ),
            Successor::Phase(PhaseId::Phase4),
        ),
        fixed(
            PhaseId::Phase4,
            "Congratulations! Your medicine has been approved. But your work is not over. \
             Now, you need to keep monitoring patients who take the medicine in real life \
             to detect any long-term side effects.",
            "What is the purpose of Phase 4 trials?",
            [
                "To test if the medicine is safe",
                "To monitor long-term effects and safety",
                "To stop research and move on",
            ],
            1,
            (
                "Correct! 📊 Monitoring is essential.",
                "Phase 4 is all about long-term monitoring!",
            ),
            Successor::Leaderboard,
        ),
    ]
}

/// Phases 5 and 6; phase 4 of the standard table is relinked to phase 5.
fn extended_phases() -> Vec<PhaseSpec> {
    vec![
        generated(
            PhaseId::Phase5,
            "You are investigating rare side effects that might show up years later.",
            "Generate a clinical trial-related question for Phase 5 testing.",
            [
                "To check for side effects",
                "To distribute worldwide",
                "To stop monitoring",
            ],
            0,
            (
                "Correct!",
                "Not quite! This phase watches for side effects that appear years later.",
            ),
            Successor::Phase(PhaseId::Phase6),
        ),
        generated(
            PhaseId::Phase6,
            "You are evaluating real-world patient outcomes years after approval.",
            "Generate a clinical trial-related question for Phase 6 real-world impact.",
            [
                "To improve future medicine",
                "To stop trials",
                "To focus only on profits",
            ],
            0,
            (
                "Correct!",
                "Not quite! Real-world outcomes are studied to improve future medicine.",
            ),
            Successor::Leaderboard,
        ),
    ]
}
