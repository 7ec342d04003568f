//! Mock generator for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizsmith_core::model::Question;
use quizsmith_core::traits::{
    GenerationRequest, GenerationResponse, QuizGenerator, TokenUsage,
};

/// A mock quiz generator for testing the generation engine without real
/// API calls. Returns a fixed candidate set, or a configured error.
pub struct MockGenerator {
    questions: Vec<Question>,
    failure: Option<String>,
    call_count: AtomicU32,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockGenerator {
    /// Create a mock that always returns the given candidates.
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions,
            failure: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock whose generate call always fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            questions: Vec::new(),
            failure: Some(message.to_string()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this generator.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this generator.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuizGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<GenerationResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }

        Ok(GenerationResponse {
            questions: self.questions.clone(),
            model: "mock-model".to_string(),
            token_usage: TokenUsage {
                prompt_tokens: (request.course_content.len() / 4) as u32,
                completion_tokens: (self.questions.len() * 40) as u32,
                total_tokens: (request.course_content.len() / 4) as u32
                    + (self.questions.len() * 40) as u32,
            },
            latency_ms: 1,
        })
    }
}
