use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::{LessonId, ScenarioId, ScenarioIdError};
use crate::model::metrics::{MetricBound, MetricError, MetricProfile, MetricSpec};
use crate::model::quiz::{QuizQuestion, QuizQuestionError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum LessonConfigError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson must define at least one scenario")]
    NoScenarios,

    #[error("duplicate scenario id: {id}")]
    DuplicateScenario { id: String },

    #[error("lesson must define at least one question")]
    NoQuestions,

    #[error(transparent)]
    ScenarioId(#[from] ScenarioIdError),

    #[error(transparent)]
    Metric(#[from] MetricError),

    #[error(transparent)]
    Question(#[from] QuizQuestionError),
}

//
// ─── LESSON CONFIG ─────────────────────────────────────────────────────────────
//

/// One scenario together with its metric profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioProfile {
    pub id: ScenarioId,
    pub profile: MetricProfile,
}

/// Static configuration for one lesson: its scenario table and quiz.
///
/// Built once from authored content and shared read-only across the lesson
/// session; nothing mutates it at runtime. The first scenario in the list is
/// the initially active one.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonConfig {
    id: LessonId,
    title: String,
    scenarios: Vec<ScenarioProfile>,
    questions: Vec<QuizQuestion>,
}

impl LessonConfig {
    /// Creates a validated lesson configuration.
    ///
    /// # Errors
    ///
    /// Returns `LessonConfigError` for a blank title, an empty scenario or
    /// question list, or duplicate scenario ids.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        scenarios: Vec<ScenarioProfile>,
        questions: Vec<QuizQuestion>,
    ) -> Result<Self, LessonConfigError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LessonConfigError::EmptyTitle);
        }
        if scenarios.is_empty() {
            return Err(LessonConfigError::NoScenarios);
        }
        let mut seen = HashSet::new();
        for scenario in &scenarios {
            if !seen.insert(scenario.id.as_str().to_string()) {
                return Err(LessonConfigError::DuplicateScenario {
                    id: scenario.id.as_str().to_string(),
                });
            }
        }
        if questions.is_empty() {
            return Err(LessonConfigError::NoQuestions);
        }
        Ok(Self {
            id,
            title,
            scenarios,
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn scenarios(&self) -> &[ScenarioProfile] {
        &self.scenarios
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// The scenario that is active when a session starts.
    #[must_use]
    pub fn default_scenario(&self) -> &ScenarioId {
        &self.scenarios[0].id
    }

    /// Looks up a scenario profile by id.
    #[must_use]
    pub fn scenario(&self, id: &str) -> Option<&ScenarioProfile> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Position of a scenario in the authored order.
    #[must_use]
    pub fn scenario_position(&self, id: &str) -> Option<usize> {
        self.scenarios.iter().position(|s| s.id == id)
    }
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Unvalidated lesson content as authored (e.g. parsed from JSON).
///
/// `validate` turns a draft into a [`LessonConfig`], rejecting content that
/// breaks the lesson invariants.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonConfigDraft {
    pub id: u64,
    pub title: String,
    pub scenarios: Vec<ScenarioProfileDraft>,
    pub questions: Vec<QuizQuestionDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioProfileDraft {
    pub id: String,
    pub profile: MetricProfileDraft,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricProfileDraft {
    #[serde(default)]
    pub bound: Option<MetricBoundDraft>,
    pub overhead_pct: f64,
    pub metrics: Vec<MetricSpecDraft>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MetricBoundDraft {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricSpecDraft {
    pub name: String,
    pub base: f64,
    #[serde(default)]
    pub amplitude: f64,
    #[serde(default = "default_frequency")]
    pub frequency_hz: f64,
    #[serde(default)]
    pub phase: f64,
}

fn default_frequency() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
}

impl LessonConfigDraft {
    /// Validates the draft into a [`LessonConfig`].
    ///
    /// # Errors
    ///
    /// Returns the first `LessonConfigError` encountered, in authored order.
    pub fn validate(self) -> Result<LessonConfig, LessonConfigError> {
        let mut scenarios = Vec::with_capacity(self.scenarios.len());
        for draft in self.scenarios {
            scenarios.push(draft.validate()?);
        }

        let mut questions = Vec::with_capacity(self.questions.len());
        for draft in self.questions {
            questions.push(QuizQuestion::new(draft.prompt, draft.options, draft.correct)?);
        }

        LessonConfig::new(LessonId::new(self.id), self.title, scenarios, questions)
    }
}

impl ScenarioProfileDraft {
    fn validate(self) -> Result<ScenarioProfile, LessonConfigError> {
        let id = ScenarioId::new(self.id)?;
        let bound = match self.profile.bound {
            Some(b) => MetricBound::new(b.min, b.max)?,
            None => MetricBound::percent(),
        };
        let mut metrics = Vec::with_capacity(self.profile.metrics.len());
        for spec in self.profile.metrics {
            metrics.push(MetricSpec::new(
                spec.name,
                spec.base,
                spec.amplitude,
                spec.frequency_hz,
                spec.phase,
            )?);
        }
        let profile = MetricProfile::new(bound, self.profile.overhead_pct, metrics)?;
        Ok(ScenarioProfile { id, profile })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
