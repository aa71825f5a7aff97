#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod lessons;
pub mod ticker;

pub use lesson_core::{Clock, Sampler};

pub use config::{ConfigLoadError, load_lesson_config};
pub use error::LessonError;
pub use lessons::{
    AnimationDriver, AnswerOutcome, CompletionNotifier, DriverState, LessonSession, LessonView,
    QuestionResult, QuizEngine, QuizProgress,
};
pub use ticker::{Ticker, TickerHandle};
