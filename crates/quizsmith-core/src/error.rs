//! Domain error taxonomies for generation and attempt submission.
//!
//! Per-candidate validation rejections are deliberately absent here: they
//! are absorbed by the quality gate (logged and counted) and never escalate
//! to callers. See [`crate::validate::RejectReason`].

use thiserror::Error;

use crate::generation::{MAX_QUESTIONS, MIN_QUESTIONS};

/// Errors that abort a quiz generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The requested question count is outside the supported bounds.
    #[error("number of questions must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}, got {0}")]
    InvalidQuestionCount(u32),

    /// The model provider call failed. The provider's detail is surfaced
    /// verbatim; no internal retries are attempted.
    #[error("model provider unavailable: {0:#}")]
    ModelUnavailable(anyhow::Error),

    /// The model returned candidates but none survived the quality gate.
    /// The caller must re-request, possibly with adjusted parameters.
    #[error(
        "no questions passed validation ({generated} generated, all rejected); \
         check the course content and try again"
    )]
    Exhausted { generated: usize },
}

/// Errors on the scoring/submission path. Each is distinct and rejected
/// before any state mutation.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// The referenced quiz does not exist.
    #[error("quiz not found: {0}")]
    QuizNotFound(String),

    /// The referenced attempt does not exist.
    #[error("attempt not found: {0}")]
    AttemptNotFound(String),

    /// The attempt was already submitted; completion is one-way.
    #[error("attempt {0} is already completed and cannot be resubmitted")]
    AttemptAlreadyCompleted(String),

    /// The quiz has no questions to score.
    #[error("quiz {0} has no questions")]
    QuizHasNoQuestions(String),

    /// The record store failed.
    #[error("storage error: {0:#}")]
    Store(anyhow::Error),
}
