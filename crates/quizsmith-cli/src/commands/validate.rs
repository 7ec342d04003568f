//! The `quizsmith validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizsmith_core::model::Quiz;
use quizsmith_core::validate::validate_question;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quiz_json = std::fs::read_to_string(&quiz_path)
        .with_context(|| format!("reading quiz from {}", quiz_path.display()))?;
    let quiz: Quiz = serde_json::from_str(&quiz_json)
        .with_context(|| format!("parsing quiz from {}", quiz_path.display()))?;

    println!("Quiz: {} ({} questions)", quiz.title, quiz.questions.len());

    let mut warnings = 0;

    for question in &quiz.questions {
        if let Err(reason) = validate_question(question) {
            println!("  [{}] WARNING: {reason}", question.id);
            warnings += 1;
        }
    }

    let expected_points: u32 = quiz.questions.iter().map(|q| q.points).sum();
    if quiz.total_points != expected_points {
        println!(
            "  WARNING: totalPoints is {} but the questions sum to {expected_points}",
            quiz.total_points
        );
        warnings += 1;
    }

    for question in &quiz.questions {
        if !quiz.topics.contains(&question.topic) {
            println!(
                "  [{}] WARNING: topic '{}' is missing from the quiz topic list",
                question.id, question.topic
            );
            warnings += 1;
        }
    }

    if warnings == 0 {
        println!("Quiz is valid.");
    } else {
        println!("\n{warnings} warning(s) found.");
    }

    Ok(())
}
