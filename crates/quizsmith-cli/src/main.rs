//! quizsmith CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizsmith", version, about = "AI quiz generation and grading")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a quiz from course material
    Generate {
        /// Path to a file with the course content
        #[arg(long)]
        content: PathBuf,

        /// Path to a file with the learning objectives
        #[arg(long)]
        objectives: PathBuf,

        /// Number of questions to generate (1-50)
        #[arg(long, default_value = "10")]
        count: u32,

        /// Difficulty: easy, medium, hard
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// Comma-separated focus topics (derived from objectives if omitted)
        #[arg(long)]
        topics: Option<String>,

        /// Quiz title
        #[arg(long)]
        title: String,

        /// Quiz description
        #[arg(long, default_value = "")]
        description: String,

        /// Owning course identifier
        #[arg(long)]
        course: String,

        /// Creating teacher identifier
        #[arg(long)]
        teacher: String,

        /// Provider to use (defaults to the configured default)
        #[arg(long)]
        provider: Option<String>,

        /// Model to use (defaults to the configured default)
        #[arg(long)]
        model: Option<String>,

        /// Where to write the quiz JSON
        #[arg(long, default_value = "quiz.json")]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a student's answers against a quiz
    Grade {
        /// Path to the quiz JSON
        #[arg(long)]
        quiz: PathBuf,

        /// Path to a JSON object mapping question ids to answers
        #[arg(long)]
        answers: PathBuf,

        /// Student identifier
        #[arg(long)]
        student: String,

        /// Where to write the attempt JSON (skipped if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check a quiz file against the structural quality gate
    Validate {
        /// Path to the quiz JSON
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizsmith=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            content,
            objectives,
            count,
            difficulty,
            topics,
            title,
            description,
            course,
            teacher,
            provider,
            model,
            output,
            config,
        } => {
            commands::generate::execute(
                content, objectives, count, difficulty, topics, title, description, course,
                teacher, provider, model, output, config,
            )
            .await
        }
        Commands::Grade {
            quiz,
            answers,
            student,
            output,
        } => commands::grade::execute(quiz, answers, student, output),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
