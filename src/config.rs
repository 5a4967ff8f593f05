use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_MAX_CONTENT_LENGTH: u64 = 10 * 1024 * 1024;

/// Process-wide configuration: environment settings plus the rules file.
/// Loaded once at startup and treated as immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub endpoint: String,
    pub upload_dir: PathBuf,
    pub max_content_length: u64,
    pub port: u16,
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    pub file_types: Vec<String>,
    #[serde(default)]
    pub translation_rules: TranslationRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRules {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for TranslationRules {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Config {
    /// Load environment settings and the rules file. A missing or malformed
    /// rules file is fatal at startup.
    pub fn from_env() -> Result<Self> {
        let rules_path = std::env::var("RULES_PATH").unwrap_or_else(|_| "rules.yaml".to_string());
        let rules = RulesConfig::load(&rules_path)?;

        let max_content_length = match std::env::var("MAX_CONTENT_LENGTH") {
            Ok(v) => v
                .parse::<u64>()
                .with_context(|| format!("invalid MAX_CONTENT_LENGTH: {v}"))?,
            Err(_) => DEFAULT_MAX_CONTENT_LENGTH,
        };

        let port = match std::env::var("PORT") {
            Ok(v) => v
                .parse::<u16>()
                .with_context(|| format!("invalid PORT: {v}"))?,
            Err(_) => 5000,
        };

        Ok(Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            endpoint: std::env::var("TRANSLATION_API_ENDPOINT").unwrap_or_default(),
            upload_dir: PathBuf::from(
                std::env::var("UPLOAD_FOLDER").unwrap_or_else(|_| "uploads".to_string()),
            ),
            max_content_length,
            port,
            rules,
        })
    }
}

impl RulesConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("could not read rules file: {path}"))?;
        let rules: RulesConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("malformed rules file: {path}"))?;
        Ok(rules)
    }
}
