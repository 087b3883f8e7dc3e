//! Skill taxonomy: a versioned `category → [skill]` table loaded from JSON,
//! matched against text with case-insensitive whole-word patterns.
//!
//! The default table ships in `data/skill_taxonomy.json`; a replacement can be
//! supplied at startup via `ATS_SKILL_TAXONOMY_PATH`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::TablesError;

pub const EMBEDDED_TAXONOMY: &str = include_str!("../../data/skill_taxonomy.json");

/// On-disk shape of the taxonomy file. Also returned by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyCatalog {
    pub version: String,
    pub categories: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
struct SkillPattern {
    name: String,
    pattern: Regex,
}

#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    version: String,
    categories: BTreeMap<String, Vec<SkillPattern>>,
}

/// Hard skills found in a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    pub flat: BTreeSet<String>,
    /// Only categories with at least one hit appear here.
    pub categories: BTreeMap<String, BTreeSet<String>>,
}

impl ExtractedSkills {
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

impl SkillTaxonomy {
    pub fn embedded() -> Result<Self, TablesError> {
        Self::from_json(EMBEDDED_TAXONOMY, "embedded skill taxonomy")
    }

    pub fn from_path(path: &Path) -> Result<Self, TablesError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw, &path.display().to_string())
    }

    pub fn from_json(raw: &str, source_name: &str) -> Result<Self, TablesError> {
        let catalog: TaxonomyCatalog =
            serde_json::from_str(raw).map_err(|source| TablesError::Json {
                name: source_name.to_string(),
                source,
            })?;
        Self::from_catalog(catalog)
    }

    fn from_catalog(catalog: TaxonomyCatalog) -> Result<Self, TablesError> {
        if catalog.categories.is_empty() {
            return Err(TablesError::Invalid {
                table: "skill taxonomy",
                reason: "no categories defined".to_string(),
            });
        }

        let mut categories = BTreeMap::new();
        for (category, skills) in catalog.categories {
            let mut patterns = Vec::with_capacity(skills.len());
            for skill in skills {
                let name = skill.trim().to_lowercase();
                if name.is_empty() {
                    return Err(TablesError::Invalid {
                        table: "skill taxonomy",
                        reason: format!("empty skill name in category '{category}'"),
                    });
                }
                let pattern = skill_pattern(&name).map_err(|source| TablesError::Pattern {
                    skill: name.clone(),
                    source,
                })?;
                patterns.push(SkillPattern { name, pattern });
            }
            categories.insert(category, patterns);
        }

        Ok(Self {
            version: catalog.version,
            categories,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn skill_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn catalog(&self) -> TaxonomyCatalog {
        TaxonomyCatalog {
            version: self.version.clone(),
            categories: self
                .categories
                .iter()
                .map(|(c, skills)| (c.clone(), skills.iter().map(|s| s.name.clone()).collect()))
                .collect(),
        }
    }

    /// Matches every taxonomy skill against `text` as a whole word.
    pub fn extract(&self, text: &str) -> ExtractedSkills {
        let mut extracted = ExtractedSkills::default();

        for (category, skills) in &self.categories {
            for skill in skills {
                if skill.pattern.is_match(text) {
                    extracted.flat.insert(skill.name.clone());
                    extracted
                        .categories
                        .entry(category.clone())
                        .or_default()
                        .insert(skill.name.clone());
                }
            }
        }

        extracted
    }
}

/// Whole-word pattern for a skill name. `\b` does not work for names that
/// start or end with symbols (`c++`, `c#`, `.net`), so the boundary is spelled
/// out as "not a word character and not `+`/`#`".
fn skill_pattern(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?i)(?:^|[^a-z0-9_+#])(?:{})(?:$|[^a-z0-9_+#])",
        regex::escape(name)
    ))
}
