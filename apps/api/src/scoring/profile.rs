#![allow(dead_code)]

//! Caller-supplied analysis options and their normalized form.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAREER_LEVEL: &str = "entry";
pub const UNSPECIFIED_ROLE: &str = "UNSPECIFIED";

/// Options accepted by both scoring entry points. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreOptions {
    #[serde(default)]
    pub career_level: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl ScoreOptions {
    pub fn new(career_level: &str, role: &str) -> Self {
        Self {
            career_level: Some(career_level.to_string()),
            role: Some(role.to_string()),
        }
    }
}

/// Normalized career level (lower-case) and role (upper-case).
///
/// Values are kept as strings: the weight tables are data, so a level or role
/// added to the tables needs no code change. Unknown values simply have no
/// multiplier entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisProfile {
    pub career_level: String,
    pub role: String,
}

impl AnalysisProfile {
    pub fn from_options(options: &ScoreOptions) -> Self {
        let career_level = options
            .career_level
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_CAREER_LEVEL.to_string(), str::to_lowercase);

        let role = options
            .role
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| UNSPECIFIED_ROLE.to_string(), str::to_uppercase);

        Self { career_level, role }
    }
}
