//! The quiz generation pipeline.
//!
//! Coordinates topic derivation, over-request sizing, the single model
//! invocation, and quality-gate filtering. The engine never returns more
//! questions than requested; it may return fewer (a partial result,
//! signaled through counts on the outcome), but never zero; that case is
//! [`GenerationError::Exhausted`].

use std::sync::Arc;

use crate::error::GenerationError;
use crate::model::{Difficulty, Question};
use crate::topics::extract_key_topics;
use crate::traits::{GenerationRequest, QuizGenerator, TokenUsage};
use crate::validate::validate_question;

/// Smallest allowed question count per request.
pub const MIN_QUESTIONS: u32 = 1;

/// Largest allowed question count per request.
pub const MAX_QUESTIONS: u32 = 50;

/// Configuration for the generation engine.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Multiplier applied to the requested count to absorb expected
    /// quality-gate losses. The 1.8 default is an empirical constant with
    /// no adaptive feedback; it is exposed here as a tunable.
    pub inflation_factor: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            inflation_factor: 1.8,
        }
    }
}

/// What a caller asks the engine for. Topics are optional; the engine
/// derives them from the learning objectives when absent.
#[derive(Debug, Clone)]
pub struct QuizRequest {
    pub course_content: String,
    pub learning_objectives: String,
    pub number_of_questions: u32,
    pub difficulty: Difficulty,
    pub topics: Option<Vec<String>>,
}

/// A successful generation, annotated with enough counts for the caller to
/// detect a shortfall without digging through logs.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Accepted questions, trimmed to at most the requested count.
    pub questions: Vec<Question>,
    /// How many questions the caller asked for.
    pub requested: u32,
    /// How many raw candidates the model returned.
    pub candidates: usize,
    /// How many candidates the quality gate discarded.
    pub rejected: usize,
    /// The topics the request was generated against (caller-supplied or
    /// derived).
    pub topics: Vec<String>,
    /// Model that produced the candidates.
    pub model: String,
    /// Token usage for the generation call.
    pub token_usage: TokenUsage,
    /// Wall-clock latency of the provider call, in milliseconds.
    pub latency_ms: u64,
}

impl GenerationOutcome {
    /// True when fewer questions survived than the caller requested. The
    /// caller decides whether to accept the shortfall or regenerate.
    pub fn is_partial(&self) -> bool {
        self.questions.len() < self.requested as usize
    }

    /// How many questions short of the request this outcome is.
    pub fn shortfall(&self) -> usize {
        (self.requested as usize).saturating_sub(self.questions.len())
    }
}

/// The generation engine: a narrow orchestrator over one generator.
pub struct GenerationEngine {
    generator: Arc<dyn QuizGenerator>,
    config: GenerationConfig,
}

impl GenerationEngine {
    /// Build an engine over a generator.
    ///
    /// The inflation factor must be finite and at least 1.0; anything else
    /// would under-request (a NaN or negative factor saturates the ceil
    /// cast to zero candidates). Invalid factors are replaced with the
    /// default and logged.
    pub fn new(generator: Arc<dyn QuizGenerator>, mut config: GenerationConfig) -> Self {
        if !config.inflation_factor.is_finite() || config.inflation_factor < 1.0 {
            tracing::warn!(
                factor = config.inflation_factor,
                "invalid inflation factor, using the default"
            );
            config.inflation_factor = GenerationConfig::default().inflation_factor;
        }
        Self { generator, config }
    }

    /// Run the full pipeline for one request.
    ///
    /// The provider call is single-shot: a transport failure or timeout
    /// propagates as [`GenerationError::ModelUnavailable`] with the
    /// provider's detail intact, and is never retried here.
    pub async fn generate(
        &self,
        request: &QuizRequest,
    ) -> Result<GenerationOutcome, GenerationError> {
        let requested = request.number_of_questions;
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&requested) {
            return Err(GenerationError::InvalidQuestionCount(requested));
        }

        let topics = match &request.topics {
            Some(topics) if !topics.is_empty() => topics.clone(),
            _ => {
                let derived =
                    extract_key_topics(&request.course_content, &request.learning_objectives);
                tracing::info!(topics = ?derived, "derived topics from learning objectives");
                derived
            }
        };

        // Over-request to compensate for expected quality-gate loss.
        let inflated = (requested as f64 * self.config.inflation_factor).ceil() as u32;
        tracing::info!(
            requested,
            inflated,
            difficulty = %request.difficulty,
            "requesting candidate questions from {}",
            self.generator.name()
        );

        let response = self
            .generator
            .generate(&GenerationRequest {
                course_content: request.course_content.clone(),
                learning_objectives: request.learning_objectives.clone(),
                number_of_questions: inflated,
                difficulty: request.difficulty,
                topics: topics.clone(),
            })
            .await
            .map_err(GenerationError::ModelUnavailable)?;

        let candidates = response.questions.len();
        let mut accepted = Vec::with_capacity(candidates);
        for (index, question) in response.questions.into_iter().enumerate() {
            match validate_question(&question) {
                Ok(()) => accepted.push(question),
                Err(reason) => {
                    tracing::warn!(
                        candidate = index + 1,
                        id = %question.id,
                        %reason,
                        "discarding candidate question"
                    );
                }
            }
        }
        let rejected = candidates - accepted.len();

        if accepted.is_empty() {
            return Err(GenerationError::Exhausted {
                generated: candidates,
            });
        }

        if (accepted.len() as f64) < requested as f64 * 0.5 {
            tracing::warn!(
                accepted = accepted.len(),
                requested,
                "fewer than half of the requested questions passed validation"
            );
        }

        accepted.truncate(requested as usize);

        Ok(GenerationOutcome {
            questions: accepted,
            requested,
            candidates,
            rejected,
            topics,
            model: response.model,
            token_usage: response.token_usage,
            latency_ms: response.latency_ms,
        })
    }
}
