//! quizsmith-providers — Model provider integrations.
//!
//! Implements the `QuizGenerator` trait for Gemini and OpenAI-compatible
//! APIs, allowing quizsmith to generate quiz questions from multiple model
//! backends.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod openai;

pub use config::{create_provider, load_config, ProviderConfig, QuizsmithConfig};
pub use error::ProviderError;
