use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::scoring::engine::DEFAULT_MAX_INPUT_BYTES;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Replaces the embedded skill taxonomy when set.
    pub skill_taxonomy_path: Option<PathBuf>,
    /// Replaces the embedded weight tables when set.
    pub weight_tables_path: Option<PathBuf>,
    /// Per-document truncation limit applied before analysis.
    pub max_input_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            skill_taxonomy_path: None,
            weight_tables_path: None,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => 8080,
        };

        let max_input_bytes = match lookup("ATS_MAX_INPUT_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .context("ATS_MAX_INPUT_BYTES must be a positive integer")?,
            None => DEFAULT_MAX_INPUT_BYTES,
        };
        if max_input_bytes == 0 {
            bail!("ATS_MAX_INPUT_BYTES must be greater than zero");
        }

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            skill_taxonomy_path: optional_path(&lookup, "ATS_SKILL_TAXONOMY_PATH"),
            weight_tables_path: optional_path(&lookup, "ATS_WEIGHT_TABLES_PATH"),
            max_input_bytes,
        })
    }
}

fn optional_path(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
