mod ids;
mod lesson;
mod metrics;
mod quiz;

pub use ids::{LessonId, ParseIdError, ScenarioId, ScenarioIdError};
pub use lesson::{
    LessonConfig, LessonConfigDraft, LessonConfigError, MetricBoundDraft, MetricProfileDraft,
    MetricSpecDraft, QuizQuestionDraft, ScenarioProfile, ScenarioProfileDraft,
};
pub use metrics::{MetricBound, MetricError, MetricProfile, MetricSnapshot, MetricSpec, MetricValue};
pub use quiz::{MIN_OPTIONS, QuizQuestion, QuizQuestionError};
