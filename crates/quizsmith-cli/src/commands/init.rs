//! The `quizsmith init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizsmith.toml").exists() {
        println!("quizsmith.toml already exists, skipping.");
    } else {
        std::fs::write("quizsmith.toml", SAMPLE_CONFIG)?;
        println!("Created quizsmith.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizsmith.toml with your API keys");
    println!("  2. Run: quizsmith generate --content notes.md --objectives goals.md \\");
    println!("            --title \"Week 1 Quiz\" --course course-1 --teacher teacher-1");
    println!("  3. Run: quizsmith grade --quiz quiz.json --answers answers.json --student student-1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizsmith configuration

default_provider = "gemini"
default_model = "gemini-2.0-flash"
inflation_factor = 1.8

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"
"#;
