//! The `quizsmith grade` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizsmith_core::attempt::{start_attempt, submit_attempt};
use quizsmith_core::model::{Attempt, Quiz};
use quizsmith_core::traits::SystemClock;

pub fn execute(
    quiz_path: PathBuf,
    answers_path: PathBuf,
    student: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let quiz_json = std::fs::read_to_string(&quiz_path)
        .with_context(|| format!("reading quiz from {}", quiz_path.display()))?;
    let quiz: Quiz = serde_json::from_str(&quiz_json)
        .with_context(|| format!("parsing quiz from {}", quiz_path.display()))?;

    let answers_json = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("reading answers from {}", answers_path.display()))?;
    let answers: HashMap<String, String> = serde_json::from_str(&answers_json)
        .with_context(|| format!("parsing answers from {}", answers_path.display()))?;

    let clock = SystemClock;
    let attempt = start_attempt(&quiz, &student, &clock);
    let graded = submit_attempt(attempt, &quiz, &answers, &clock)?;

    print_results(&quiz, &graded);

    if let Some(path) = output {
        std::fs::write(&path, serde_json::to_string_pretty(&graded)?)
            .with_context(|| format!("writing attempt to {}", path.display()))?;
        eprintln!("Attempt saved to: {}", path.display());
    }

    Ok(())
}

fn print_results(quiz: &Quiz, attempt: &Attempt) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Answer", "Correct", "Points"]);

    for answer in &attempt.answers {
        let points = quiz
            .questions
            .iter()
            .find(|q| q.id == answer.question_id)
            .map(|q| q.points)
            .unwrap_or(0);
        table.add_row(vec![
            Cell::new(&answer.question_id),
            Cell::new(&answer.student_answer),
            Cell::new(if answer.is_correct { "yes" } else { "no" }),
            Cell::new(format!("{}/{}", answer.points_earned, points)),
        ]);
    }

    println!("{table}");
    let percentage = if attempt.max_score > 0 {
        attempt.score as f64 / attempt.max_score as f64 * 100.0
    } else {
        0.0
    };
    println!(
        "Score: {}/{} ({percentage:.1}%)",
        attempt.score, attempt.max_score
    );
}
