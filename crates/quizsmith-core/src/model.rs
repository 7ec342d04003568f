//! Core data model types for quizsmith.
//!
//! These are the fundamental types that the entire quizsmith system uses
//! to represent quizzes, questions, and student attempts. Field names are
//! serialized in camelCase to match the generation contract and the record
//! store's document shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple-choice"),
            QuestionType::TrueFalse => write!(f, "true-false"),
            QuestionType::ShortAnswer => write!(f, "short-answer"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple-choice" | "mc" => Ok(QuestionType::MultipleChoice),
            "true-false" | "tf" => Ok(QuestionType::TrueFalse),
            "short-answer" | "sa" => Ok(QuestionType::ShortAnswer),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Quiz difficulty level, used to calibrate question point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// The inclusive per-question point range for this difficulty.
    pub fn point_range(&self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (1, 2),
            Difficulty::Medium => (3, 4),
            Difficulty::Hard => (5, 6),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A question's correct answer: a single string or an ordered list.
///
/// List-valued answers are compared as a single ", "-joined string during
/// scoring, so the order of entries is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl CorrectAnswer {
    /// Canonical string form used for comparison: list answers are joined
    /// with ", " in their stored order.
    pub fn canonical(&self) -> String {
        match self {
            CorrectAnswer::Single(s) => s.clone(),
            CorrectAnswer::Multiple(parts) => parts.join(", "),
        }
    }

    /// Whether the answer is effectively absent (empty string after
    /// trimming, or an empty list).
    pub fn is_empty(&self) -> bool {
        match self {
            CorrectAnswer::Single(s) => s.trim().is_empty(),
            CorrectAnswer::Multiple(parts) => parts.is_empty(),
        }
    }
}

impl From<&str> for CorrectAnswer {
    fn from(s: &str) -> Self {
        CorrectAnswer::Single(s.to_string())
    }
}

/// A single quiz question.
///
/// Questions belong to exactly one quiz and are immutable once persisted;
/// edits replace the owning quiz document wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Identifier, unique within the owning quiz (e.g. "q1".."qN").
    pub id: String,
    /// The question text shown to the student.
    pub question_text: String,
    /// The type of question.
    pub question_type: QuestionType,
    /// Answer options. Present (with at least 2 entries) iff the question
    /// is multiple-choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// The correct answer(s).
    pub correct_answer: CorrectAnswer,
    /// Explanation of the correct answer, grounded in the course material.
    pub explanation: String,
    /// Points awarded for a correct answer.
    pub points: u32,
    /// The topic from the course material this question covers.
    pub topic: String,
}

/// A graded quiz assembled from generated questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Server-assigned identifier.
    pub id: String,
    /// The owning course.
    pub course_id: String,
    /// Quiz title.
    pub title: String,
    /// Quiz description.
    #[serde(default)]
    pub description: String,
    /// Questions in presentation order.
    pub questions: Vec<Question>,
    /// The teacher who created this quiz.
    pub created_by: String,
    /// Creation timestamp (server-assigned).
    pub created_at: DateTime<Utc>,
    /// Sum of all question point values.
    pub total_points: u32,
    /// Difficulty the quiz was generated at.
    pub difficulty: Difficulty,
    /// Distinct topic labels across the questions.
    pub topics: Vec<String>,
}

impl Quiz {
    /// Assemble a quiz from its questions, deriving `total_points` and the
    /// deduplicated `topics` set so the document invariants hold by
    /// construction. The id and timestamp are assigned by the store on
    /// create.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        course_id: &str,
        title: &str,
        description: &str,
        questions: Vec<Question>,
        created_by: &str,
        difficulty: Difficulty,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total_points = questions.iter().map(|q| q.points).sum();
        let mut topics: Vec<String> = Vec::new();
        for q in &questions {
            if !topics.contains(&q.topic) {
                topics.push(q.topic.clone());
            }
        }
        Self {
            id: String::new(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            questions,
            created_by: created_by.to_string(),
            created_at,
            total_points,
            difficulty,
            topics,
        }
    }
}

/// A student's graded answer to one question.
///
/// Always produced by the scoring engine, never hand-constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// The question this answers.
    pub question_id: String,
    /// The raw submitted answer (empty string when unanswered).
    pub student_answer: String,
    /// Whether the normalized answer matched the correct answer exactly.
    pub is_correct: bool,
    /// Points awarded: the full question value or zero.
    pub points_earned: u32,
}

/// Lifecycle state of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttemptStatus {
    InProgress,
    Completed,
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptStatus::InProgress => write!(f, "in-progress"),
            AttemptStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One student's pass at answering a quiz. Terminal once completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    /// Server-assigned identifier.
    pub id: String,
    /// The quiz being attempted.
    pub quiz_id: String,
    /// The student taking the quiz.
    pub student_id: String,
    /// Denormalized from the quiz at attempt creation.
    pub course_id: String,
    /// Graded answers in quiz question order. Empty until submission.
    pub answers: Vec<Answer>,
    /// Sum of `points_earned` across answers.
    pub score: u32,
    /// Copied from the quiz's `total_points` at attempt creation.
    pub max_score: u32,
    /// When the student started the attempt.
    pub started_at: DateTime<Utc>,
    /// When the attempt was submitted. Present iff completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: AttemptStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, topic: &str, points: u32) -> Question {
        Question {
            id: id.into(),
            question_text: "What is ownership in Rust?".into(),
            question_type: QuestionType::ShortAnswer,
            options: None,
            correct_answer: "a memory management model".into(),
            explanation: "Ownership is Rust's core memory model.".into(),
            points,
            topic: topic.into(),
        }
    }

    #[test]
    fn question_type_display_and_parse() {
        assert_eq!(QuestionType::MultipleChoice.to_string(), "multiple-choice");
        assert_eq!(
            "multiple-choice".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert_eq!(
            "True-False".parse::<QuestionType>().unwrap(),
            QuestionType::TrueFalse
        );
        assert_eq!(
            "sa".parse::<QuestionType>().unwrap(),
            QuestionType::ShortAnswer
        );
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn difficulty_point_ranges() {
        assert_eq!(Difficulty::Easy.point_range(), (1, 2));
        assert_eq!(Difficulty::Medium.point_range(), (3, 4));
        assert_eq!(Difficulty::Hard.point_range(), (5, 6));
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn correct_answer_canonical_joins_lists() {
        let single: CorrectAnswer = "Paris".into();
        assert_eq!(single.canonical(), "Paris");

        let multi = CorrectAnswer::Multiple(vec!["A".into(), "B".into()]);
        assert_eq!(multi.canonical(), "A, B");
    }

    #[test]
    fn correct_answer_emptiness() {
        assert!(CorrectAnswer::Single("   ".into()).is_empty());
        assert!(CorrectAnswer::Multiple(vec![]).is_empty());
        assert!(!CorrectAnswer::Single("42".into()).is_empty());
    }

    #[test]
    fn quiz_assemble_derives_totals_and_topics() {
        let quiz = Quiz::assemble(
            "course-1",
            "Rust Basics",
            "",
            vec![
                question("q1", "Ownership", 3),
                question("q2", "Borrowing", 4),
                question("q3", "Ownership", 3),
            ],
            "teacher-1",
            Difficulty::Medium,
            Utc::now(),
        );
        assert_eq!(quiz.total_points, 10);
        assert_eq!(quiz.topics, vec!["Ownership", "Borrowing"]);
    }

    #[test]
    fn question_serde_uses_wire_shape() {
        let q = Question {
            id: "q1".into(),
            question_text: "Is Rust memory safe?".into(),
            question_type: QuestionType::TrueFalse,
            options: None,
            correct_answer: "true".into(),
            explanation: "Safe Rust prevents data races and use-after-free.".into(),
            points: 2,
            topic: "Memory Safety".into(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["questionText"], "Is Rust memory safe?");
        assert_eq!(json["questionType"], "true-false");
        assert_eq!(json["correctAnswer"], "true");
        assert!(json.get("options").is_none());

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back.question_type, QuestionType::TrueFalse);
    }

    #[test]
    fn correct_answer_deserializes_both_shapes() {
        let single: Question = serde_json::from_str(
            r#"{"id":"q1","questionText":"Name the planet we live on.","questionType":"short-answer",
                "correctAnswer":"Earth","explanation":"It is the third planet from the sun.",
                "points":1,"topic":"Astronomy"}"#,
        )
        .unwrap();
        assert_eq!(single.correct_answer, "Earth".into());

        let multi: Question = serde_json::from_str(
            r#"{"id":"q2","questionText":"List the first two primes in order.","questionType":"short-answer",
                "correctAnswer":["2","3"],"explanation":"Two and three are the smallest primes.",
                "points":1,"topic":"Number Theory"}"#,
        )
        .unwrap();
        assert_eq!(multi.correct_answer.canonical(), "2, 3");
    }
}
