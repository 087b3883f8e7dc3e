#![allow(dead_code)]

//! Weight Profile Builder.
//!
//! Base weights × career-level multipliers × role multipliers, renormalized so
//! the profile sums to exactly 1.0. The tables are data (`data/weight_tables.json`,
//! overridable via `ATS_WEIGHT_TABLES_PATH`); a level or role missing from the
//! tables, and any dimension missing from a multiplier row, is a ×1 identity.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::TablesError;
use crate::scoring::profile::AnalysisProfile;

pub const EMBEDDED_WEIGHT_TABLES: &str = include_str!("../../data/weight_tables.json");

/// A scored dimension of the general ATS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Sections,
    Formatting,
    Parseability,
    Length,
    Readability,
    Contact,
    Richness,
    Keywords,
    Balance,
}

impl Dimension {
    /// The eight analyzer-derived dimensions that feed the balance calculator.
    pub const BASE: [Dimension; 8] = [
        Dimension::Sections,
        Dimension::Formatting,
        Dimension::Parseability,
        Dimension::Length,
        Dimension::Readability,
        Dimension::Contact,
        Dimension::Richness,
        Dimension::Keywords,
    ];

    pub const ALL: [Dimension; 9] = [
        Dimension::Sections,
        Dimension::Formatting,
        Dimension::Parseability,
        Dimension::Length,
        Dimension::Readability,
        Dimension::Contact,
        Dimension::Richness,
        Dimension::Keywords,
        Dimension::Balance,
    ];
}

type Multipliers = BTreeMap<Dimension, f64>;

/// Versioned weight configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTables {
    pub version: String,
    pub base: BTreeMap<Dimension, f64>,
    #[serde(default)]
    pub career_level: BTreeMap<String, Multipliers>,
    #[serde(default)]
    pub role: BTreeMap<String, Multipliers>,
}

/// Final per-dimension weights. Always sums to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightProfile(BTreeMap<Dimension, f64>);

impl WeightProfile {
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(&dimension).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0.iter().map(|(d, w)| (*d, *w))
    }
}

impl WeightTables {
    pub fn embedded() -> Result<Self, TablesError> {
        Self::from_json(EMBEDDED_WEIGHT_TABLES, "embedded weight tables")
    }

    pub fn from_path(path: &Path) -> Result<Self, TablesError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw, &path.display().to_string())
    }

    pub fn from_json(raw: &str, source_name: &str) -> Result<Self, TablesError> {
        let mut tables: WeightTables =
            serde_json::from_str(raw).map_err(|source| TablesError::Json {
                name: source_name.to_string(),
                source,
            })?;
        // Roles are matched upper-case, career levels lower-case.
        tables.role = std::mem::take(&mut tables.role)
            .into_iter()
            .map(|(k, v)| (k.trim().to_uppercase(), v))
            .collect();
        tables.career_level = std::mem::take(&mut tables.career_level)
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v))
            .collect();
        tables.validate()?;
        Ok(tables)
    }

    fn validate(&self) -> Result<(), TablesError> {
        for dimension in Dimension::ALL {
            match self.base.get(&dimension) {
                Some(w) if w.is_finite() && *w >= 0.0 => {}
                Some(w) => {
                    return Err(invalid(format!("base weight for {dimension:?} is {w}")));
                }
                None => return Err(invalid(format!("missing base weight for {dimension:?}"))),
            }
        }
        let base_total: f64 = self.base.values().sum();
        if !base_total.is_finite() || base_total <= 0.0 {
            return Err(invalid(format!(
                "base weights must sum to a positive finite value, got {base_total}"
            )));
        }

        let rows = self
            .career_level
            .iter()
            .map(|(k, v)| ("career level", k, v))
            .chain(self.role.iter().map(|(k, v)| ("role", k, v)));
        for (kind, key, multipliers) in rows {
            for (dimension, m) in multipliers {
                if !m.is_finite() || *m <= 0.0 {
                    return Err(invalid(format!(
                        "{kind} '{key}' multiplier for {dimension:?} must be positive, got {m}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Builds the normalized weight profile for a career level and role.
    pub fn build_profile(&self, profile: &AnalysisProfile) -> WeightProfile {
        let level = self.career_level.get(&profile.career_level);
        let role = self.role.get(&profile.role);

        // Base weights are rescaled first so large multipliers stay in range.
        let base_total: f64 = self.base.values().sum();
        let adjusted: BTreeMap<Dimension, f64> = Dimension::ALL
            .iter()
            .map(|&d| {
                let base = self.base.get(&d).copied().unwrap_or(0.0) / base_total;
                (d, base * multiplier(level, d) * multiplier(role, d))
            })
            .collect();

        let total: f64 = adjusted.values().sum();
        if !total.is_finite() || total <= 0.0 {
            // Only reachable through overflowing multipliers; fall back to equal weights.
            let equal = 1.0 / Dimension::ALL.len() as f64;
            return WeightProfile(Dimension::ALL.iter().map(|&d| (d, equal)).collect());
        }

        let weights = WeightProfile(adjusted.into_iter().map(|(d, w)| (d, w / total)).collect());
        debug_assert!((weights.sum() - 1.0).abs() < 1e-9);
        weights
    }
}

fn multiplier(row: Option<&Multipliers>, dimension: Dimension) -> f64 {
    row.and_then(|r| r.get(&dimension)).copied().unwrap_or(1.0)
}

fn invalid(reason: String) -> TablesError {
    TablesError::Invalid {
        table: "weight tables",
        reason,
    }
}
