//! Core trait definitions for quiz generators and clocks, plus the prompt
//! and response-parsing helpers shared by every provider.
//!
//! The generator trait is the narrow seam that isolates the one genuinely
//! non-deterministic dependency (the model provider) behind a mockable
//! interface; the `quizsmith-providers` crate implements it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::model::{Difficulty, Question};

// ---------------------------------------------------------------------------
// Quiz generator trait
// ---------------------------------------------------------------------------

/// Trait for model backends that generate candidate quiz questions.
///
/// Implementations must surface transport failures and malformed model
/// output as errors, never hide them. A call is single-shot: timeouts are
/// owned by the implementation and there is no internal retry.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate candidate questions from course material.
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<GenerationResponse>;
}

/// Request to generate candidate questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// The course material to draw questions from.
    pub course_content: String,
    /// The learning objectives the questions should assess.
    pub learning_objectives: String,
    /// How many questions to request from the model.
    pub number_of_questions: u32,
    /// Difficulty level, which also calibrates point values.
    pub difficulty: Difficulty,
    /// Topics to focus on. Never empty by the time a provider sees it; the
    /// engine derives topics when the caller supplies none.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Candidate questions returned by a generator, before the quality gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The candidate questions.
    pub questions: Vec<Question>,
    /// Model that actually generated the response.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting for one generation call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ---------------------------------------------------------------------------
// Clock trait
// ---------------------------------------------------------------------------

/// Injectable time source so attempt and store tests stay deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant, for tests.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

/// System prompt shared by all generation providers.
pub const SYSTEM_PROMPT: &str = "You are an expert educational assessment creator specializing in \
generating high-quality quiz questions from course materials. Respond ONLY with a JSON object of \
the form {\"questions\": [...]} and no surrounding prose.";

/// Render the user prompt for a generation request.
///
/// Encodes the generation contract: questions grounded strictly in the
/// supplied content, an approximate 60/20/20 type mix, and point values
/// calibrated to the difficulty level.
pub fn build_quiz_prompt(request: &GenerationRequest) -> String {
    let (min_points, max_points) = request.difficulty.point_range();
    let difficulty_guidance = match request.difficulty {
        Difficulty::Easy => "Focus on definitions, basic concepts, and recall.",
        Difficulty::Medium => "Require understanding and application of concepts.",
        Difficulty::Hard => "Require analysis, synthesis, and critical thinking.",
    };

    let mut prompt = format!(
        "Generate {count} quiz questions at {difficulty} difficulty level based on the provided \
         course content and learning objectives.\n\n\
         **Course Content:**\n{content}\n\n\
         **Learning Objectives:**\n{objectives}\n\n",
        count = request.number_of_questions,
        difficulty = request.difficulty,
        content = request.course_content,
        objectives = request.learning_objectives,
    );

    if !request.topics.is_empty() {
        prompt.push_str("**Focus Topics:**\n");
        for topic in &request.topics {
            let _ = writeln!(prompt, "- {topic}");
        }
        prompt.push('\n');
    }

    let _ = write!(
        prompt,
        "**Requirements:**\n\
         1. Questions MUST be directly based on the provided course content - do not add \
         information not present in the materials.\n\
         2. Include a mix of question types: multiple-choice (4 options each, ~60%), \
         true-false (~20%), and short-answer (~20%).\n\
         3. For {difficulty} difficulty: {guidance}\n\
         4. Each question needs clear unambiguous text, a detailed explanation referencing the \
         course material, a point value between {min_points} and {max_points}, and the topic it covers.\n\
         5. Ensure questions test understanding, not just memorization; avoid ambiguous or trick \
         questions.\n\n\
         Respond with JSON of the form:\n\
         {{\"questions\": [{{\"id\": \"q1\", \"questionText\": \"...\", \
         \"questionType\": \"multiple-choice\" | \"true-false\" | \"short-answer\", \
         \"options\": [\"...\"], \"correctAnswer\": \"...\", \"explanation\": \"...\", \
         \"points\": {min_points}, \"topic\": \"...\"}}]}}\n\
         Question ids must be unique (\"q1\", \"q2\", ...). Include \"options\" only for \
         multiple-choice questions.",
        difficulty = request.difficulty,
        guidance = difficulty_guidance,
        min_points = min_points,
        max_points = max_points,
    );

    prompt
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Extract the JSON payload from a model response.
///
/// Handles:
/// - ```json fenced blocks (first block wins)
/// - generic ``` fenced blocks
/// - truncated (unclosed) fenced blocks
/// - raw responses with surrounding prose (outermost `{...}` is taken)
/// - clean JSON (returned as-is)
pub fn extract_json_from_markdown(response: &str) -> String {
    let mut in_block = false;
    let mut block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();

        if !in_block && trimmed.starts_with("```") {
            in_block = true;
            block.clear();
            continue;
        }

        if in_block {
            if trimmed == "```" {
                return block.trim().to_string();
            }
            if !block.is_empty() {
                block.push('\n');
            }
            block.push_str(line);
        }
    }

    // Truncated (unclosed) block: treat the accumulated content as the payload.
    if in_block && !block.is_empty() {
        return block.trim().to_string();
    }

    // No fences. Trim any prose around the outermost JSON object.
    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if start < end {
            return response[start..=end].to_string();
        }
    }

    response.trim().to_string()
}

#[derive(Deserialize)]
struct QuestionsEnvelope {
    questions: Vec<Question>,
}

/// Parse candidate questions out of a raw model response.
///
/// Accepts the `{"questions": [...]}` envelope from the generation
/// contract, with or without markdown fencing. Malformed output is an
/// error for the caller to surface, never an empty success.
pub fn parse_candidate_questions(content: &str) -> anyhow::Result<Vec<Question>> {
    let payload = extract_json_from_markdown(content);
    let envelope: QuestionsEnvelope = serde_json::from_str(&payload)
        .map_err(|e| anyhow::anyhow!("model returned malformed question JSON: {e}"))?;
    Ok(envelope.questions)
}
