//! Deterministic answer scoring.
//!
//! Scoring is a pure function of the quiz's question list and the
//! submitted answer map: no I/O, no clock, no randomness. Comparison is
//! normalized exact string equality (trimmed, case-folded); list-valued
//! correct answers are joined with ", " in stored order before comparison.
//! This is deliberately strict for short-answer questions: semantically
//! correct paraphrases score zero. That is a known MVP limitation, not a
//! bug to be fixed with fuzzy matching here.

use std::collections::HashMap;

use crate::model::{Answer, Question};

/// The result of scoring one submission: graded answers in quiz question
/// order plus the accumulated score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSubmission {
    pub answers: Vec<Answer>,
    pub score: u32,
}

/// Normalized form used on both sides of the comparison.
fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Score a submission against a quiz's question list.
///
/// Questions absent from the answer map are treated as answered with the
/// empty string. Each question awards either its full point value or zero;
/// there is no partial credit.
pub fn score_submission(
    questions: &[Question],
    submitted: &HashMap<String, String>,
) -> ScoredSubmission {
    let mut score = 0;
    let mut answers = Vec::with_capacity(questions.len());

    for question in questions {
        let student_answer = submitted
            .get(&question.id)
            .cloned()
            .unwrap_or_default();

        let is_correct =
            normalize(&student_answer) == normalize(&question.correct_answer.canonical());
        let points_earned = if is_correct { question.points } else { 0 };
        score += points_earned;

        answers.push(Answer {
            question_id: question.id.clone(),
            student_answer,
            is_correct,
            points_earned,
        });
    }

    ScoredSubmission { answers, score }
}
