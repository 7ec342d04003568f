//! The `quizsmith generate` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use quizsmith_core::generation::{GenerationConfig, GenerationEngine, QuizRequest};
use quizsmith_core::model::{Difficulty, Quiz};
use quizsmith_core::traits::{Clock, SystemClock};
use quizsmith_providers::config::load_config_from;
use quizsmith_providers::create_provider;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    content_path: PathBuf,
    objectives_path: PathBuf,
    count: u32,
    difficulty_str: String,
    topics_str: Option<String>,
    title: String,
    description: String,
    course: String,
    teacher: String,
    provider_name: Option<String>,
    model_name: Option<String>,
    output: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let difficulty: Difficulty = difficulty_str
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let course_content = std::fs::read_to_string(&content_path)
        .with_context(|| format!("reading course content from {}", content_path.display()))?;
    let learning_objectives = std::fs::read_to_string(&objectives_path)
        .with_context(|| format!("reading learning objectives from {}", objectives_path.display()))?;

    let topics = topics_str.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
    });

    let config = load_config_from(config_path.as_deref())?;
    let provider_name = provider_name.unwrap_or_else(|| config.default_provider.clone());
    let model = model_name.unwrap_or_else(|| config.default_model.clone());

    let provider_config = config.providers.get(&provider_name).ok_or_else(|| {
        anyhow::anyhow!(
            "provider '{}' not found in config. Available: {:?}",
            provider_name,
            config.providers.keys().collect::<Vec<_>>()
        )
    })?;
    let generator = create_provider(provider_config, &model)?;

    let engine = GenerationEngine::new(
        Arc::from(generator),
        GenerationConfig {
            inflation_factor: config.inflation_factor,
        },
    );

    eprintln!("Generating {count} {difficulty} questions with {provider_name}/{model}...");

    let outcome = engine
        .generate(&QuizRequest {
            course_content,
            learning_objectives,
            number_of_questions: count,
            difficulty,
            topics,
        })
        .await?;

    let quiz = Quiz::assemble(
        &course,
        &title,
        &description,
        outcome.questions.clone(),
        &teacher,
        difficulty,
        SystemClock.now(),
    );

    std::fs::write(&output, serde_json::to_string_pretty(&quiz)?)
        .with_context(|| format!("writing quiz to {}", output.display()))?;

    print_summary(&outcome);

    if outcome.is_partial() {
        eprintln!(
            "Warning: only {} of {} requested questions survived the quality gate \
             ({} short). Regenerate if you need the full count.",
            outcome.questions.len(),
            outcome.requested,
            outcome.shortfall()
        );
    }
    eprintln!("Quiz saved to: {}", output.display());

    Ok(())
}

fn print_summary(outcome: &quizsmith_core::generation::GenerationOutcome) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Model",
        "Requested",
        "Candidates",
        "Rejected",
        "Kept",
        "Tokens",
        "Latency",
    ]);
    table.add_row(vec![
        Cell::new(&outcome.model),
        Cell::new(outcome.requested),
        Cell::new(outcome.candidates),
        Cell::new(outcome.rejected),
        Cell::new(outcome.questions.len()),
        Cell::new(outcome.token_usage.total_tokens),
        Cell::new(format!("{}ms", outcome.latency_ms)),
    ]);

    eprintln!("\n{table}");
    eprintln!("Topics: {}", outcome.topics.join(", "));
}
