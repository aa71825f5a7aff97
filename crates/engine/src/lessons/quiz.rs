use std::sync::Arc;

use serde::Serialize;

use lesson_core::model::QuizQuestion;

use crate::error::LessonError;
use super::progress::QuizProgress;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of recording one answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerOutcome {
    pub question: usize,
    pub option: usize,
    /// True only for the call that completed the quiz.
    pub finalized: bool,
    pub score: Option<f64>,
}

/// Per-question state exposed to the presentation layer.
///
/// `is_correct` stays `None` until the quiz is finalized so a renderer
/// cannot leak correctness mid-quiz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuestionResult {
    pub chosen: Option<usize>,
    pub is_correct: Option<bool>,
}

//
// ─── QUIZ ENGINE ───────────────────────────────────────────────────────────────
//

/// Collects ordered answers and computes the final percentage score.
///
/// Questions are shared read-only configuration; all mutable quiz state
/// lives here. The engine finalizes the moment every question has an
/// answer: the score is computed once, the completion flag is set, and
/// later answers are rejected.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: Arc<[QuizQuestion]>,
    answers: Vec<Option<usize>>,
    completed: bool,
    score: Option<f64>,
}

impl QuizEngine {
    #[must_use]
    pub fn new(questions: Arc<[QuizQuestion]>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            completed: false,
            score: None,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Final percentage score, `None` until the quiz is finalized.
    ///
    /// The score is derived from the answer set exactly once at
    /// finalization; reading it is idempotent.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Returns a summary of the current quiz progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.question_count();
        let answered = self.answered_count();
        QuizProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.completed,
        }
    }

    /// Per-question answered/correct flags for rendering.
    #[must_use]
    pub fn question_results(&self) -> Vec<QuestionResult> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(question, chosen)| QuestionResult {
                chosen: *chosen,
                is_correct: if self.completed {
                    chosen.map(|c| question.is_correct(c))
                } else {
                    None
                },
            })
            .collect()
    }

    /// Records the learner's choice for one question.
    ///
    /// Re-answering before finalization overwrites the prior choice. The
    /// call that fills the last open question finalizes the quiz and
    /// computes the score, guarded by the completion flag so a duplicated
    /// call can never finalize twice.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::QuizAlreadyComplete` after finalization and
    /// `LessonError::InvalidAnswerIndex` for out-of-range indices; in both
    /// cases the answer set is unchanged.
    pub fn answer(&mut self, question: usize, option: usize) -> Result<AnswerOutcome, LessonError> {
        if self.completed {
            return Err(LessonError::QuizAlreadyComplete);
        }
        let question_count = self.questions.len();
        let Some(spec) = self.questions.get(question) else {
            return Err(LessonError::InvalidAnswerIndex {
                question,
                option,
                question_count,
                option_count: 0,
            });
        };
        if option >= spec.option_count() {
            return Err(LessonError::InvalidAnswerIndex {
                question,
                option,
                question_count,
                option_count: spec.option_count(),
            });
        }

        self.answers[question] = Some(option);

        let mut finalized = false;
        if !self.completed && self.answers.iter().all(Option::is_some) {
            self.completed = true;
            self.score = Some(self.compute_score());
            finalized = true;
        }

        Ok(AnswerOutcome {
            question,
            option,
            finalized,
            score: self.score,
        })
    }

    fn compute_score(&self) -> f64 {
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, chosen)| **chosen == Some(question.correct_index()))
            .count();
        // question_count is positive by construction of LessonConfig
        (correct as f64 / self.questions.len() as f64) * 100.0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(correct: &[usize]) -> Arc<[QuizQuestion]> {
        correct
            .iter()
            .map(|&c| {
                QuizQuestion::new(
                    "Q?",
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    c,
                )
                .unwrap()
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn five_question_quiz_scores_eighty() {
        let mut quiz = QuizEngine::new(questions(&[1, 0, 2, 3, 0]));
        for (i, &choice) in [1, 1, 2, 3, 0].iter().enumerate() {
            let outcome = quiz.answer(i, choice).unwrap();
            assert_eq!(outcome.finalized, i == 4);
        }
        assert_eq!(quiz.score(), Some(80.0));
        assert!(quiz.is_complete());
    }

    #[test]
    fn all_correct_scores_hundred() {
        let mut quiz = QuizEngine::new(questions(&[0, 1, 2]));
        quiz.answer(0, 0).unwrap();
        quiz.answer(1, 1).unwrap();
        quiz.answer(2, 2).unwrap();
        assert_eq!(quiz.score(), Some(100.0));
    }

    #[test]
    fn all_wrong_scores_zero() {
        let mut quiz = QuizEngine::new(questions(&[0, 1]));
        quiz.answer(0, 1).unwrap();
        quiz.answer(1, 0).unwrap();
        assert_eq!(quiz.score(), Some(0.0));
    }

    #[test]
    fn out_of_range_question_is_rejected_without_state_change() {
        let mut quiz = QuizEngine::new(questions(&[0, 1]));
        quiz.answer(0, 0).unwrap();
        let err = quiz.answer(5, 0).unwrap_err();
        assert!(matches!(err, LessonError::InvalidAnswerIndex { .. }));
        assert_eq!(quiz.answers(), &[Some(0), None]);
    }

    #[test]
    fn out_of_range_option_is_rejected_without_state_change() {
        let mut quiz = QuizEngine::new(questions(&[0, 1]));
        let err = quiz.answer(1, 9).unwrap_err();
        assert!(matches!(
            err,
            LessonError::InvalidAnswerIndex {
                question: 1,
                option: 9,
                option_count: 4,
                ..
            }
        ));
        assert_eq!(quiz.answered_count(), 0);
    }

    #[test]
    fn reanswering_overwrites_before_finalization() {
        let mut quiz = QuizEngine::new(questions(&[0, 1, 2]));
        quiz.answer(1, 0).unwrap();
        quiz.answer(1, 1).unwrap();
        assert_eq!(quiz.answers(), &[None, Some(1), None]);
        assert!(!quiz.is_complete());
    }

    #[test]
    fn answers_after_completion_are_rejected() {
        let mut quiz = QuizEngine::new(questions(&[0, 1]));
        quiz.answer(0, 0).unwrap();
        quiz.answer(1, 1).unwrap();
        let err = quiz.answer(0, 1).unwrap_err();
        assert_eq!(err, LessonError::QuizAlreadyComplete);
        // score stays what finalization computed
        assert_eq!(quiz.score(), Some(100.0));
        assert_eq!(quiz.answers(), &[Some(0), Some(1)]);
    }

    #[test]
    fn correctness_flags_hidden_until_finalized() {
        let mut quiz = QuizEngine::new(questions(&[0, 1]));
        quiz.answer(0, 0).unwrap();
        assert!(quiz.question_results().iter().all(|r| r.is_correct.is_none()));

        quiz.answer(1, 0).unwrap();
        let results = quiz.question_results();
        assert_eq!(results[0].is_correct, Some(true));
        assert_eq!(results[1].is_correct, Some(false));
    }

    #[test]
    fn progress_tracks_answered_count() {
        let mut quiz = QuizEngine::new(questions(&[0, 1, 2]));
        quiz.answer(2, 0).unwrap();
        let progress = quiz.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.remaining, 2);
        assert!(!progress.is_complete);
    }
}
