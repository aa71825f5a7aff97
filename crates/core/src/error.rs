use thiserror::Error;

use crate::model::{LessonConfigError, MetricError, QuizQuestionError, ScenarioIdError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ScenarioId(#[from] ScenarioIdError),
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error(transparent)]
    Question(#[from] QuizQuestionError),
    #[error(transparent)]
    Config(#[from] LessonConfigError),
}
