//! The quality gate applied to every candidate question.
//!
//! This is a structural/shape check only: it filters out malformed model
//! output but does not verify factual correctness against the course
//! material. Checks run in a fixed order and the first failure wins, so a
//! candidate is always rejected for one specific reason.

use thiserror::Error;

use crate::model::{Question, QuestionType};

/// Minimum length, in characters, for question text and explanations.
const MIN_TEXT_CHARS: usize = 10;

/// Why a candidate question was rejected by the quality gate.
///
/// Rejections are absorbed by the generation engine (logged and counted),
/// never surfaced individually to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("question text is too short")]
    QuestionTextTooShort,

    #[error("multiple-choice question has fewer than 2 options")]
    InsufficientOptions,

    #[error("missing or insufficient explanation")]
    MissingExplanation,

    #[error("missing correct answer")]
    MissingCorrectAnswer,
}

/// Validate a single candidate question. Pure and deterministic.
pub fn validate_question(question: &Question) -> Result<(), RejectReason> {
    // Character counts, not byte lengths: non-ASCII text must not pass
    // the gate just because its UTF-8 encoding is wide.
    if question.question_text.chars().count() < MIN_TEXT_CHARS {
        return Err(RejectReason::QuestionTextTooShort);
    }

    if question.question_type == QuestionType::MultipleChoice
        && question.options.as_ref().is_none_or(|opts| opts.len() < 2)
    {
        return Err(RejectReason::InsufficientOptions);
    }

    if question.explanation.chars().count() < MIN_TEXT_CHARS {
        return Err(RejectReason::MissingExplanation);
    }

    if question.correct_answer.is_empty() {
        return Err(RejectReason::MissingCorrectAnswer);
    }

    Ok(())
}
