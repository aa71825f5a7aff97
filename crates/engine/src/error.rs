//! Shared error types for the engine crate.

use thiserror::Error;

use lesson_core::model::LessonConfigError;

/// Errors emitted by lesson session operations.
///
/// All of these leave the session state untouched; callers driving the
/// engine from trusted UI handlers may ignore them and the lesson simply
/// carries on.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("unknown scenario id: {id}")]
    InvalidScenario { id: String },

    #[error(
        "answer out of range: question {question} of {question_count}, option {option} of {option_count}"
    )]
    InvalidAnswerIndex {
        question: usize,
        option: usize,
        question_count: usize,
        option_count: usize,
    },

    #[error("quiz already completed")]
    QuizAlreadyComplete,

    #[error(transparent)]
    Config(#[from] LessonConfigError),
}
