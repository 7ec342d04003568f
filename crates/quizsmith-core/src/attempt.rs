//! Attempt lifecycle: not-started → in-progress → completed.
//!
//! The pure transitions live in [`start_attempt`] and [`submit_attempt`];
//! [`AttemptManager`] layers the repository on top for the persistent path.
//! Completion is one-way: lifecycle violations are rejected before any
//! state mutation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AttemptError;
use crate::model::{Attempt, AttemptStatus, Quiz};
use crate::scoring::score_submission;
use crate::store::{AttemptStore, QuizStore};
use crate::traits::Clock;

/// Create an in-progress attempt for a student on a quiz.
///
/// The attempt starts with an empty answer list, a score of zero, and the
/// quiz's total points copied as `max_score`. The id is assigned by the
/// store on create.
pub fn start_attempt(quiz: &Quiz, student_id: &str, clock: &dyn Clock) -> Attempt {
    Attempt {
        id: String::new(),
        quiz_id: quiz.id.clone(),
        student_id: student_id.to_string(),
        course_id: quiz.course_id.clone(),
        answers: Vec::new(),
        score: 0,
        max_score: quiz.total_points,
        started_at: clock.now(),
        completed_at: None,
        status: AttemptStatus::InProgress,
    }
}

/// Submit final answers for an attempt, transitioning it to completed.
///
/// Rejects attempts that are already completed and quizzes with no
/// questions (which would make every percentage display divide by zero)
/// before touching the attempt.
pub fn submit_attempt(
    attempt: Attempt,
    quiz: &Quiz,
    answers: &HashMap<String, String>,
    clock: &dyn Clock,
) -> Result<Attempt, AttemptError> {
    if attempt.status == AttemptStatus::Completed {
        return Err(AttemptError::AttemptAlreadyCompleted(attempt.id));
    }
    if quiz.questions.is_empty() {
        return Err(AttemptError::QuizHasNoQuestions(quiz.id.clone()));
    }

    let scored = score_submission(&quiz.questions, answers);
    tracing::info!(
        attempt = %attempt.id,
        quiz = %quiz.id,
        score = scored.score,
        max_score = attempt.max_score,
        "attempt submitted"
    );

    Ok(Attempt {
        answers: scored.answers,
        score: scored.score,
        completed_at: Some(clock.now()),
        status: AttemptStatus::Completed,
        ..attempt
    })
}

/// Store-backed attempt lifecycle.
pub struct AttemptManager {
    quizzes: Arc<dyn QuizStore>,
    attempts: Arc<dyn AttemptStore>,
    clock: Arc<dyn Clock>,
}

impl AttemptManager {
    pub fn new(
        quizzes: Arc<dyn QuizStore>,
        attempts: Arc<dyn AttemptStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            clock,
        }
    }

    /// Begin a new attempt on a quiz.
    pub async fn start(&self, quiz_id: &str, student_id: &str) -> Result<Attempt, AttemptError> {
        let quiz = self
            .quizzes
            .get(quiz_id)
            .await
            .map_err(AttemptError::Store)?
            .ok_or_else(|| AttemptError::QuizNotFound(quiz_id.to_string()))?;

        self.attempts
            .create(start_attempt(&quiz, student_id, self.clock.as_ref()))
            .await
            .map_err(AttemptError::Store)
    }

    /// Submit final answers for a stored attempt.
    ///
    /// The status check runs against the stored record immediately before
    /// the transition, making submission at-most-once: a concurrent second
    /// submit observing a completed record fails instead of overwriting the
    /// graded result.
    pub async fn submit(
        &self,
        attempt_id: &str,
        answers: &HashMap<String, String>,
    ) -> Result<Attempt, AttemptError> {
        let attempt = self
            .attempts
            .get(attempt_id)
            .await
            .map_err(AttemptError::Store)?
            .ok_or_else(|| AttemptError::AttemptNotFound(attempt_id.to_string()))?;

        let quiz = self
            .quizzes
            .get(&attempt.quiz_id)
            .await
            .map_err(AttemptError::Store)?
            .ok_or_else(|| AttemptError::QuizNotFound(attempt.quiz_id.clone()))?;

        let completed = submit_attempt(attempt, &quiz, answers, self.clock.as_ref())?;

        self.attempts
            .update(attempt_id, completed)
            .await
            .map_err(AttemptError::Store)?
            .ok_or_else(|| AttemptError::AttemptNotFound(attempt_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CorrectAnswer, Difficulty, Question, QuestionType};
    use crate::store::{InMemoryAttemptStore, InMemoryQuizStore};
    use crate::traits::FixedClock;
    use chrono::{TimeZone, Utc};

    fn question(id: &str, correct: &str, points: u32) -> Question {
        Question {
            id: id.into(),
            question_text: "State the expected answer for this question.".into(),
            question_type: QuestionType::ShortAnswer,
            options: None,
            correct_answer: CorrectAnswer::Single(correct.into()),
            explanation: "The expected answer follows from the material.".into(),
            points,
            topic: "General".into(),
        }
    }

    fn four_question_quiz() -> Quiz {
        let mut quiz = Quiz::assemble(
            "course-1",
            "Checkpoint",
            "",
            vec![
                question("q1", "a", 2),
                question("q2", "b", 2),
                question("q3", "c", 2),
                question("q4", "d", 2),
            ],
            "teacher-1",
            Difficulty::Easy,
            Utc::now(),
        );
        quiz.id = "quiz-1".into();
        quiz
    }

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn start_creates_in_progress_attempt() {
        let clock = fixed_clock();
        let quiz = four_question_quiz();
        let attempt = start_attempt(&quiz, "student-1", &clock);

        assert_eq!(attempt.status, AttemptStatus::InProgress);
        assert_eq!(attempt.score, 0);
        assert_eq!(attempt.max_score, 8);
        assert_eq!(attempt.course_id, "course-1");
        assert!(attempt.answers.is_empty());
        assert_eq!(attempt.started_at, clock.0);
        assert!(attempt.completed_at.is_none());
    }

    #[test]
    fn submit_grades_and_completes() {
        let clock = fixed_clock();
        let quiz = four_question_quiz();
        let attempt = start_attempt(&quiz, "student-1", &clock);

        // 3 of 4 correct, 2 points each.
        let submitted = answers(&[("q1", "a"), ("q2", "b"), ("q3", "c"), ("q4", "x")]);
        let completed = submit_attempt(attempt, &quiz, &submitted, &clock).unwrap();

        assert_eq!(completed.score, 6);
        assert_eq!(completed.max_score, 8);
        assert_eq!(completed.status, AttemptStatus::Completed);
        assert_eq!(completed.completed_at, Some(clock.0));
        assert_eq!(completed.answers.len(), 4);
    }

    #[test]
    fn resubmission_is_rejected_without_touching_the_score() {
        let clock = fixed_clock();
        let quiz = four_question_quiz();
        let attempt = start_attempt(&quiz, "student-1", &clock);

        let completed =
            submit_attempt(attempt, &quiz, &answers(&[("q1", "a")]), &clock).unwrap();
        let original_score = completed.score;

        let err = submit_attempt(completed.clone(), &quiz, &answers(&[]), &clock).unwrap_err();
        assert!(matches!(err, AttemptError::AttemptAlreadyCompleted(_)));
        assert_eq!(completed.score, original_score);
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let clock = fixed_clock();
        let mut quiz = four_question_quiz();
        quiz.questions.clear();
        let attempt = start_attempt(&quiz, "student-1", &clock);

        let err = submit_attempt(attempt, &quiz, &HashMap::new(), &clock).unwrap_err();
        assert!(matches!(err, AttemptError::QuizHasNoQuestions(_)));
    }

    fn manager() -> (Arc<InMemoryQuizStore>, Arc<InMemoryAttemptStore>, AttemptManager) {
        let quizzes = Arc::new(InMemoryQuizStore::new());
        let attempts = Arc::new(InMemoryAttemptStore::new());
        let manager = AttemptManager::new(
            quizzes.clone(),
            attempts.clone(),
            Arc::new(fixed_clock()),
        );
        (quizzes, attempts, manager)
    }

    #[tokio::test]
    async fn manager_round_trip() {
        let (quizzes, _, manager) = manager();
        let quiz = quizzes.create(four_question_quiz()).await.unwrap();

        let attempt = manager.start(&quiz.id, "student-1").await.unwrap();
        assert!(!attempt.id.is_empty());
        assert_eq!(attempt.status, AttemptStatus::InProgress);

        let submitted = answers(&[("q1", "a"), ("q2", "b"), ("q3", "c"), ("q4", "x")]);
        let completed = manager.submit(&attempt.id, &submitted).await.unwrap();
        assert_eq!(completed.score, 6);
        assert_eq!(completed.status, AttemptStatus::Completed);
    }

    #[tokio::test]
    async fn manager_rejects_unknown_records() {
        let (quizzes, _, manager) = manager();

        let err = manager.start("missing-quiz", "student-1").await.unwrap_err();
        assert!(matches!(err, AttemptError::QuizNotFound(_)));

        quizzes.create(four_question_quiz()).await.unwrap();
        let err = manager
            .submit("missing-attempt", &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AttemptError::AttemptNotFound(_)));
    }

    #[tokio::test]
    async fn manager_double_submit_fails_and_preserves_the_record() {
        let (quizzes, attempts, manager) = manager();
        let quiz = quizzes.create(four_question_quiz()).await.unwrap();
        let attempt = manager.start(&quiz.id, "student-1").await.unwrap();

        let first = manager
            .submit(&attempt.id, &answers(&[("q1", "a")]))
            .await
            .unwrap();
        assert_eq!(first.score, 2);

        // A second submit with different answers must fail, not regrade.
        let err = manager
            .submit(&attempt.id, &answers(&[("q1", "a"), ("q2", "b")]))
            .await
            .unwrap_err();
        assert!(matches!(err, AttemptError::AttemptAlreadyCompleted(_)));

        let stored = attempts.get(&attempt.id).await.unwrap().unwrap();
        assert_eq!(stored.score, 2);
    }
}
