//! Repository traits for quiz and attempt records, plus in-memory
//! implementations.
//!
//! The core consumes these interfaces; it does not own persistence. The
//! in-memory stores exist for tests and the CLI. They are injected values,
//! never process-wide singletons, and must not be treated as a system of
//! record. Cascade-invalidating attempts when a quiz is deleted is the
//! backing store's responsibility and is not implemented here.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{Attempt, Quiz};
use crate::traits::{Clock, SystemClock};

/// Storage for quiz documents. Quizzes are replaced wholesale on update,
/// never patched question-by-question.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Persist a new quiz, assigning its id and creation timestamp.
    async fn create(&self, quiz: Quiz) -> Result<Quiz>;

    async fn get(&self, id: &str) -> Result<Option<Quiz>>;

    async fn list(&self) -> Result<Vec<Quiz>>;

    async fn by_course(&self, course_id: &str) -> Result<Vec<Quiz>>;

    async fn by_teacher(&self, teacher_id: &str) -> Result<Vec<Quiz>>;

    /// Replace an existing quiz document. Returns the stored quiz, or
    /// `None` if the id is unknown.
    async fn update(&self, id: &str, quiz: Quiz) -> Result<Option<Quiz>>;

    /// Returns whether a quiz was deleted.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Storage for attempt records.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Persist a new attempt, assigning its id.
    async fn create(&self, attempt: Attempt) -> Result<Attempt>;

    async fn get(&self, id: &str) -> Result<Option<Attempt>>;

    async fn by_quiz(&self, quiz_id: &str) -> Result<Vec<Attempt>>;

    async fn by_student(&self, student_id: &str) -> Result<Vec<Attempt>>;

    async fn by_quiz_and_student(&self, quiz_id: &str, student_id: &str)
        -> Result<Vec<Attempt>>;

    /// Replace an existing attempt record. Returns the stored attempt, or
    /// `None` if the id is unknown.
    async fn update(&self, id: &str, attempt: Attempt) -> Result<Option<Attempt>>;

    async fn delete(&self, id: &str) -> Result<bool>;
}

/// In-memory quiz store backed by a `HashMap`.
pub struct InMemoryQuizStore {
    quizzes: RwLock<HashMap<String, Quiz>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryQuizStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for InMemoryQuizStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizStore for InMemoryQuizStore {
    async fn create(&self, mut quiz: Quiz) -> Result<Quiz> {
        quiz.id = Uuid::new_v4().to_string();
        quiz.created_at = self.clock.now();
        self.quizzes
            .write()
            .unwrap()
            .insert(quiz.id.clone(), quiz.clone());
        tracing::debug!(id = %quiz.id, questions = quiz.questions.len(), "stored quiz");
        Ok(quiz)
    }

    async fn get(&self, id: &str) -> Result<Option<Quiz>> {
        Ok(self.quizzes.read().unwrap().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = self.quizzes.read().unwrap().values().cloned().collect();
        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes)
    }

    async fn by_course(&self, course_id: &str) -> Result<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = self
            .quizzes
            .read()
            .unwrap()
            .values()
            .filter(|q| q.course_id == course_id)
            .cloned()
            .collect();
        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes)
    }

    async fn by_teacher(&self, teacher_id: &str) -> Result<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = self
            .quizzes
            .read()
            .unwrap()
            .values()
            .filter(|q| q.created_by == teacher_id)
            .cloned()
            .collect();
        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes)
    }

    async fn update(&self, id: &str, mut quiz: Quiz) -> Result<Option<Quiz>> {
        let mut quizzes = self.quizzes.write().unwrap();
        if !quizzes.contains_key(id) {
            return Ok(None);
        }
        quiz.id = id.to_string();
        quizzes.insert(id.to_string(), quiz.clone());
        Ok(Some(quiz))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.quizzes.write().unwrap().remove(id).is_some())
    }
}

/// In-memory attempt store backed by a `HashMap`.
pub struct InMemoryAttemptStore {
    attempts: RwLock<HashMap<String, Attempt>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self {
            attempts: RwLock::new(HashMap::new()),
        }
    }

    fn filtered(&self, predicate: impl Fn(&Attempt) -> bool) -> Vec<Attempt> {
        let mut attempts: Vec<Attempt> = self
            .attempts
            .read()
            .unwrap()
            .values()
            .filter(|a| predicate(a))
            .cloned()
            .collect();
        // Most recent first, matching how attempt histories are displayed.
        attempts.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        attempts
    }
}

impl Default for InMemoryAttemptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn create(&self, mut attempt: Attempt) -> Result<Attempt> {
        attempt.id = Uuid::new_v4().to_string();
        self.attempts
            .write()
            .unwrap()
            .insert(attempt.id.clone(), attempt.clone());
        Ok(attempt)
    }

    async fn get(&self, id: &str) -> Result<Option<Attempt>> {
        Ok(self.attempts.read().unwrap().get(id).cloned())
    }

    async fn by_quiz(&self, quiz_id: &str) -> Result<Vec<Attempt>> {
        Ok(self.filtered(|a| a.quiz_id == quiz_id))
    }

    async fn by_student(&self, student_id: &str) -> Result<Vec<Attempt>> {
        Ok(self.filtered(|a| a.student_id == student_id))
    }

    async fn by_quiz_and_student(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> Result<Vec<Attempt>> {
        Ok(self.filtered(|a| a.quiz_id == quiz_id && a.student_id == student_id))
    }

    async fn update(&self, id: &str, mut attempt: Attempt) -> Result<Option<Attempt>> {
        let mut attempts = self.attempts.write().unwrap();
        if !attempts.contains_key(id) {
            return Ok(None);
        }
        attempt.id = id.to_string();
        attempts.insert(id.to_string(), attempt.clone());
        Ok(Some(attempt))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.attempts.write().unwrap().remove(id).is_some())
    }
}
