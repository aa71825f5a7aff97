use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use lesson_core::Sampler;
use lesson_core::model::{LessonConfig, MetricSnapshot, QuizQuestion, ScenarioId};

use crate::error::LessonError;
use super::driver::AnimationDriver;
use super::progress::QuizProgress;
use super::quiz::{AnswerOutcome, QuestionResult, QuizEngine};
use super::view::LessonView;

/// Callback invoked at most once with the final percentage score.
pub type CompletionNotifier = Box<dyn FnMut(f64) + Send>;

//
// ─── LESSON SESSION ────────────────────────────────────────────────────────────
//

/// In-memory state for one interactive lesson run.
///
/// The session is the single owner of all mutable lesson state: the active
/// scenario, the latest metric snapshot, the quiz answer set, and the
/// completion flag. Configuration is shared read-only via `Arc` and never
/// mutated. All operations are synchronous `&mut self` calls, so a user
/// selection and a frame tick arriving together resolve in call order:
/// selection first, then sampling.
pub struct LessonSession {
    config: Arc<LessonConfig>,
    sampler: Sampler,
    active: usize,
    snapshot: Option<MetricSnapshot>,
    driver: AnimationDriver,
    quiz: QuizEngine,
    on_complete: Option<CompletionNotifier>,
    completion_notified: bool,
}

impl LessonSession {
    /// Creates a session with the lesson's first scenario active, animation
    /// stopped, and an empty answer set.
    #[must_use]
    pub fn new(config: Arc<LessonConfig>, sampler: Sampler) -> Self {
        let questions: Arc<[QuizQuestion]> = config.questions().to_vec().into();
        Self {
            config,
            sampler,
            active: 0,
            snapshot: None,
            driver: AnimationDriver::new(),
            quiz: QuizEngine::new(questions),
            on_complete: None,
            completion_notified: false,
        }
    }

    /// Installs the completion notifier, invoked at most once per session.
    #[must_use]
    pub fn with_on_complete(mut self, notifier: CompletionNotifier) -> Self {
        self.on_complete = Some(notifier);
        self
    }

    #[must_use]
    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    #[must_use]
    pub fn active_scenario(&self) -> &ScenarioId {
        &self.config.scenarios()[self.active].id
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&MetricSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.driver.is_running()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.quiz.is_complete()
    }

    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.quiz.score()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.quiz.progress()
    }

    #[must_use]
    pub fn question_results(&self) -> Vec<QuestionResult> {
        self.quiz.question_results()
    }

    /// Builds the renderer-facing view of the whole session.
    #[must_use]
    pub fn view(&self) -> LessonView {
        LessonView {
            lesson_id: self.config.id(),
            title: self.config.title().to_string(),
            active_scenario: self.active_scenario().clone(),
            is_animating: self.is_animating(),
            snapshot: self.snapshot.clone(),
            questions: self.question_results(),
            progress: self.progress(),
            score: self.score(),
        }
    }

    /// Switches the active scenario.
    ///
    /// The snapshot is left untouched; the next tick samples the new
    /// scenario's profile. Re-selecting the active scenario is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::InvalidScenario` for an unknown id; the
    /// previous scenario stays active.
    pub fn select_scenario(&mut self, id: &str) -> Result<(), LessonError> {
        match self.config.scenario_position(id) {
            Some(position) => {
                self.active = position;
                Ok(())
            }
            None => Err(LessonError::InvalidScenario { id: id.to_string() }),
        }
    }

    /// Starts the animation. Idempotent.
    pub fn start_animation(&mut self, now: DateTime<Utc>) {
        self.driver.start(now);
    }

    /// Stops the animation. Idempotent; every tick delivered afterwards is
    /// dropped without sampling.
    pub fn stop_animation(&mut self) {
        self.driver.stop();
    }

    /// Handles one host frame callback.
    ///
    /// While animating, samples the active scenario at the elapsed time and
    /// replaces the snapshot wholesale; while stopped, returns `None` and
    /// changes nothing.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<&MetricSnapshot> {
        let elapsed = self.driver.elapsed(now)?;
        let scenario = &self.config.scenarios()[self.active];
        self.snapshot = Some(self.sampler.sample(&scenario.id, &scenario.profile, elapsed));
        self.snapshot.as_ref()
    }

    /// Records a quiz answer and fires the completion notifier when the
    /// answer set becomes full.
    ///
    /// The notifier is taken out of the session on first completion and the
    /// notified flag is checked besides, so it runs exactly once even if
    /// the finalizing call is somehow duplicated.
    ///
    /// # Errors
    ///
    /// Propagates `LessonError::InvalidAnswerIndex` and
    /// `LessonError::QuizAlreadyComplete` from the quiz engine; the session
    /// is unchanged in both cases.
    pub fn answer(&mut self, question: usize, option: usize) -> Result<AnswerOutcome, LessonError> {
        let outcome = self.quiz.answer(question, option)?;

        if outcome.finalized && !self.completion_notified {
            self.completion_notified = true;
            if let (Some(mut notifier), Some(score)) = (self.on_complete.take(), outcome.score) {
                notifier(score);
            }
        }

        Ok(outcome)
    }
}

impl fmt::Debug for LessonSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LessonSession")
            .field("lesson_id", &self.config.id())
            .field("active_scenario", &self.active_scenario())
            .field("is_animating", &self.is_animating())
            .field("answered", &self.quiz.answered_count())
            .field("is_complete", &self.is_complete())
            .field("score", &self.score())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
