use serde::Serialize;

use lesson_core::model::{LessonId, MetricSnapshot, ScenarioId};

use super::progress::QuizProgress;
use super::quiz::QuestionResult;

/// Owned, read-only snapshot of a lesson session for the presentation layer.
///
/// Built in one synchronous call, so it can never mix a metric snapshot
/// from one scenario with quiz state from another moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonView {
    pub lesson_id: LessonId,
    pub title: String,
    pub active_scenario: ScenarioId,
    pub is_animating: bool,
    pub snapshot: Option<MetricSnapshot>,
    pub questions: Vec<QuestionResult>,
    pub progress: QuizProgress,
    pub score: Option<f64>,
}
