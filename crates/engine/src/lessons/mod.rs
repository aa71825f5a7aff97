mod driver;
mod progress;
mod quiz;
mod state;
mod view;

pub use driver::{AnimationDriver, DriverState};
pub use progress::QuizProgress;
pub use quiz::{AnswerOutcome, QuestionResult, QuizEngine};
pub use state::{CompletionNotifier, LessonSession};
pub use view::LessonView;
