//! Provider configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizsmith_core::traits::QuizGenerator;

use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;

/// Configuration for a single model provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
        }
    }
}

/// Top-level quizsmith configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizsmithConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Default provider to use.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Default model to use.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Inflation factor applied to requested question counts to absorb
    /// quality-gate losses.
    #[serde(default = "default_inflation_factor")]
    pub inflation_factor: f64,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_inflation_factor() -> f64 {
    1.8
}

impl Default for QuizsmithConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            inflation_factor: default_inflation_factor(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            org_id: org_id.as_ref().map(|o| resolve_env_vars(o)),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizsmith.toml` in the current directory
/// 2. `~/.config/quizsmith/config.toml`
///
/// Environment variable overrides: `QUIZSMITH_GEMINI_KEY`, `QUIZSMITH_OPENAI_KEY`.
pub fn load_config() -> Result<QuizsmithConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizsmithConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizsmith.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizsmithConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizsmithConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("QUIZSMITH_GEMINI_KEY") {
        config
            .providers
            .entry("gemini".into())
            .or_insert(ProviderConfig::Gemini {
                api_key: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::Gemini { api_key, .. }) = config.providers.get_mut("gemini") {
            *api_key = key;
        }
    }

    if let Ok(key) = std::env::var("QUIZSMITH_OPENAI_KEY") {
        config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let Some(ProviderConfig::OpenAI { api_key, .. }) = config.providers.get_mut("openai") {
            *api_key = key;
        }
    }

    // Resolve env vars in all provider configs
    let resolved: HashMap<String, ProviderConfig> = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();
    config.providers = resolved;

    anyhow::ensure!(
        config.inflation_factor.is_finite() && config.inflation_factor >= 1.0,
        "inflation_factor must be a finite number >= 1.0, got {}",
        config.inflation_factor
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizsmith"))
}

/// Create a generator instance from its configuration.
pub fn create_provider(config: &ProviderConfig, model: &str) -> Result<Box<dyn QuizGenerator>> {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => Ok(Box::new(GeminiProvider::new(
            api_key,
            model,
            base_url.clone(),
        ))),
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Ok(Box::new(OpenAiProvider::new(
            api_key,
            model,
            base_url.clone(),
            org_id.clone(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZSMITH_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZSMITH_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZSMITH_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_QUIZSMITH_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizsmithConfig::default();
        assert_eq!(config.default_provider, "gemini");
        assert_eq!(config.default_model, "gemini-2.0-flash");
        assert!((config.inflation_factor - 1.8).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_provider_config() {
        let toml_str = r#"
default_provider = "gemini"
default_model = "gemini-2.0-flash"
inflation_factor = 2.0

[providers.gemini]
type = "gemini"
api_key = "sk-test"

[providers.openai]
type = "openai"
api_key = "sk-openai"
base_url = "https://proxy.example.com"
"#;
        let config: QuizsmithConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.len(), 2);
        assert!(matches!(
            config.providers.get("gemini"),
            Some(ProviderConfig::Gemini { .. })
        ));
        assert!((config.inflation_factor - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn debug_masks_api_keys() {
        let config = ProviderConfig::Gemini {
            api_key: "sk-very-secret".into(),
            base_url: None,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn load_config_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizsmith.toml");
        std::fs::write(
            &path,
            r#"
default_provider = "openai"
default_model = "gpt-4.1"

[providers.openai]
type = "openai"
api_key = "sk-file"
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.default_model, "gpt-4.1");
    }

    #[test]
    fn rejects_out_of_range_inflation_factor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizsmith.toml");
        std::fs::write(
            &path,
            r#"
inflation_factor = 0.2

[providers.gemini]
type = "gemini"
api_key = "sk-test"
"#,
        )
        .unwrap();

        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("inflation_factor"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizsmith.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
