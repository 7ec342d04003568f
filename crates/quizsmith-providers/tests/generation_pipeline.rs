//! End-to-end generation pipeline tests using the mock generator.
//!
//! These exercise the full pipeline (topic derivation → over-request →
//! provider call → quality gate → trim) without any network access.

use std::sync::Arc;

use quizsmith_core::error::GenerationError;
use quizsmith_core::generation::{GenerationConfig, GenerationEngine, QuizRequest};
use quizsmith_core::model::{CorrectAnswer, Difficulty, Question, QuestionType};
use quizsmith_providers::mock::MockGenerator;

fn mc_question(id: &str, topic: &str) -> Question {
    Question {
        id: id.into(),
        question_text: "Which of the following stores quiz documents?".into(),
        question_type: QuestionType::MultipleChoice,
        options: Some(vec![
            "the record store".into(),
            "the scoring engine".into(),
            "the topic extractor".into(),
            "the quality gate".into(),
        ]),
        correct_answer: "the record store".into(),
        explanation: "Persistence is owned by the record store collaborator.".into(),
        points: 3,
        topic: topic.into(),
    }
}

fn broken_question(id: &str) -> Question {
    Question {
        id: id.into(),
        question_text: "Which of the following is broken?".into(),
        question_type: QuestionType::MultipleChoice,
        options: None, // fails the quality gate
        correct_answer: CorrectAnswer::Single("nothing".into()),
        explanation: "A multiple-choice question needs options to choose from.".into(),
        points: 3,
        topic: "Broken".into(),
    }
}

fn request(n: u32, topics: Option<Vec<String>>) -> QuizRequest {
    QuizRequest {
        course_content: "The record store persists quizzes and attempts.".into(),
        learning_objectives: "Understand system components. Identify storage boundaries.".into(),
        number_of_questions: n,
        difficulty: Difficulty::Medium,
        topics,
    }
}

fn engine(generator: MockGenerator) -> (Arc<MockGenerator>, GenerationEngine) {
    let generator = Arc::new(generator);
    let engine = GenerationEngine::new(generator.clone(), GenerationConfig::default());
    (generator, engine)
}

#[tokio::test]
async fn pipeline_trims_to_requested_count() {
    // 9 candidates, 3 invalid: 6 survivors trimmed to the requested 5.
    let mut candidates: Vec<Question> = (1..=6)
        .map(|i| mc_question(&format!("q{i}"), "Storage"))
        .collect();
    for i in 7..=9 {
        candidates.push(broken_question(&format!("q{i}")));
    }

    let (generator, engine) = engine(MockGenerator::with_questions(candidates));
    let outcome = engine
        .generate(&request(5, Some(vec!["Storage".into()])))
        .await
        .unwrap();

    assert_eq!(outcome.questions.len(), 5);
    assert_eq!(outcome.candidates, 9);
    assert_eq!(outcome.rejected, 3);
    assert!(!outcome.is_partial());
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn pipeline_inflates_the_upstream_request() {
    let (generator, engine) = engine(MockGenerator::with_questions(vec![mc_question(
        "q1", "Storage",
    )]));
    engine
        .generate(&request(10, Some(vec!["Storage".into()])))
        .await
        .unwrap();

    // ceil(10 * 1.8)
    assert_eq!(generator.last_request().unwrap().number_of_questions, 18);
}

#[tokio::test]
async fn pipeline_derives_topics_and_forwards_them() {
    let (generator, engine) = engine(MockGenerator::with_questions(vec![mc_question(
        "q1", "Storage",
    )]));
    let outcome = engine.generate(&request(1, None)).await.unwrap();

    assert!(outcome
        .topics
        .contains(&"Understand system components".to_string()));
    assert_eq!(generator.last_request().unwrap().topics, outcome.topics);
}

#[tokio::test]
async fn pipeline_reports_partial_results() {
    let (_, engine) = engine(MockGenerator::with_questions(vec![
        mc_question("q1", "Storage"),
        mc_question("q2", "Storage"),
        broken_question("q3"),
    ]));
    let outcome = engine
        .generate(&request(8, Some(vec!["Storage".into()])))
        .await
        .unwrap();

    assert_eq!(outcome.questions.len(), 2);
    assert!(outcome.is_partial());
    assert_eq!(outcome.shortfall(), 6);
}

#[tokio::test]
async fn pipeline_exhaustion_when_everything_is_rejected() {
    let (_, engine) = engine(MockGenerator::with_questions(vec![
        broken_question("q1"),
        broken_question("q2"),
    ]));
    let err = engine
        .generate(&request(4, Some(vec!["Storage".into()])))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Exhausted { generated: 2 }));
}

#[tokio::test]
async fn pipeline_surfaces_provider_outages() {
    let (generator, engine) = engine(MockGenerator::failing("backend is down"));
    let err = engine
        .generate(&request(4, Some(vec!["Storage".into()])))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::ModelUnavailable(_)));
    assert!(err.to_string().contains("backend is down"));
    // One call, no internal retries.
    assert_eq!(generator.call_count(), 1);
}
