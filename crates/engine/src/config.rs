//! Loading authored lesson content.
//!
//! Lesson configuration arrives as static JSON from content authoring; it
//! is parsed into a draft and validated into a [`LessonConfig`] before any
//! session is started.

use thiserror::Error;

use lesson_core::model::{LessonConfig, LessonConfigDraft, LessonConfigError};

/// Errors emitted while loading lesson content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigLoadError {
    #[error("invalid lesson JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] LessonConfigError),
}

/// Parses and validates one lesson's authored JSON.
///
/// # Errors
///
/// Returns `ConfigLoadError::Parse` for malformed JSON and
/// `ConfigLoadError::Invalid` for content that breaks lesson invariants.
pub fn load_lesson_config(json: &str) -> Result<LessonConfig, ConfigLoadError> {
    let draft: LessonConfigDraft = serde_json::from_str(json)?;
    Ok(draft.validate()?)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
