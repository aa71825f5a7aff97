use serde::Serialize;
use thiserror::Error;

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizQuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least {MIN_OPTIONS} options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct index {correct} is out of range for {len} options")]
    CorrectIndexOutOfRange { correct: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Immutable once constructed; the correct index is guaranteed to point at
/// one of the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    prompt: String,
    options: Vec<String>,
    correct: usize,
}

impl QuizQuestion {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuizQuestionError` if the prompt or any option is blank,
    /// fewer than [`MIN_OPTIONS`] options are given, or `correct` does not
    /// index into `options`.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: usize,
    ) -> Result<Self, QuizQuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuizQuestionError::EmptyPrompt);
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuizQuestionError::TooFewOptions {
                len: options.len(),
            });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuizQuestionError::EmptyOption { index });
        }
        if correct >= options.len() {
            return Err(QuizQuestionError::CorrectIndexOutOfRange {
                correct,
                len: options.len(),
            });
        }
        Ok(Self {
            prompt,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    /// Returns true if `option` is the correct choice.
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
