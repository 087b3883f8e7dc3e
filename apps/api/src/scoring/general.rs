//! General Scorer: runs every analyzer over one document and folds the
//! sub-scores into a single weighted 0–100 ATS score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::balance::{compute_balance, BalanceReport};
use crate::scoring::contact::{analyze_contact, ContactReport};
use crate::scoring::engine::AtsEngine;
use crate::scoring::enhancements::{build_enhancements, EnhancementInputs};
use crate::scoring::keywords::{analyze_keywords, KeywordReport};
use crate::scoring::profile::AnalysisProfile;
use crate::scoring::readability::{analyze_readability, ReadabilityReport};
use crate::scoring::sections::{detect_sections, SectionReport};
use crate::scoring::structure::{analyze_structure, StructureReport};
use crate::scoring::taxonomy::ExtractedSkills;
use crate::scoring::weights::{Dimension, WeightProfile};

/// Every intermediate report, returned for explainability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralMeta {
    pub profile: AnalysisProfile,
    pub sections: SectionReport,
    pub structure: StructureReport,
    pub readability: ReadabilityReport,
    pub contact: ContactReport,
    pub skills: ExtractedSkills,
    pub keywords: KeywordReport,
    pub balance: BalanceReport,
    pub weights: WeightProfile,
    pub taxonomy_version: String,
    pub weight_tables_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralScoreResult {
    pub score: u8,
    pub breakdown: BTreeMap<Dimension, u8>,
    pub meta: GeneralMeta,
    pub suggestions: Vec<String>,
    pub enhancements: BTreeMap<String, Vec<String>>,
}

/// Scores an already-normalized document.
///
/// The analyzers share no state and could run in parallel; for resume-sized
/// input a sequential pass is sub-millisecond.
pub(crate) fn score_document(
    engine: &AtsEngine,
    text: &str,
    profile: AnalysisProfile,
) -> GeneralScoreResult {
    let tokenizer = engine.tokenizer();

    let sections = detect_sections(text);
    let structure = analyze_structure(text, tokenizer);
    let readability = analyze_readability(text, tokenizer);
    let contact = analyze_contact(text);
    let skills = engine.taxonomy().extract(text);
    let keyword_list = engine.keyword_extractor().keywords(text, tokenizer);
    let keywords = analyze_keywords(&keyword_list, &skills);

    let mut breakdown: BTreeMap<Dimension, u8> = BTreeMap::from([
        (Dimension::Sections, sections.score),
        (Dimension::Formatting, structure.formatting_score),
        (Dimension::Parseability, structure.parse_score),
        (Dimension::Length, structure.length_score),
        (Dimension::Readability, readability.readability_score),
        (Dimension::Contact, contact.score),
        (Dimension::Richness, keywords.richness_score),
        (Dimension::Keywords, keywords.technical_score),
    ]);

    let base_scores: Vec<u8> = Dimension::BASE.iter().map(|d| breakdown[d]).collect();
    let balance = compute_balance(&base_scores);
    breakdown.insert(Dimension::Balance, balance.score);

    let weights = engine.weight_tables().build_profile(&profile);
    let score = weighted_score(&weights, &breakdown);

    let enhancements = build_enhancements(&EnhancementInputs {
        sections: &sections,
        structure: &structure,
        readability: &readability,
        contact: &contact,
        skills: &skills,
        keywords: &keywords,
    });

    debug!(
        score,
        words = structure.word_count,
        skills = skills.flat.len(),
        career_level = %profile.career_level,
        role = %profile.role,
        "General ATS score computed"
    );

    GeneralScoreResult {
        score,
        breakdown,
        meta: GeneralMeta {
            profile,
            sections,
            structure,
            readability,
            contact,
            skills,
            keywords,
            balance,
            weights,
            taxonomy_version: engine.taxonomy().version().to_string(),
            weight_tables_version: engine.weight_tables().version.clone(),
        },
        suggestions: enhancements.suggestions,
        enhancements: enhancements.by_section,
    }
}

/// `round(clamp(Σ weight[d] × value[d], 0, 100))`
pub fn weighted_score(weights: &WeightProfile, values: &BTreeMap<Dimension, u8>) -> u8 {
    let total: f64 = weights
        .iter()
        .map(|(d, w)| w * f64::from(values.get(&d).copied().unwrap_or(0)))
        .sum();
    total.clamp(0.0, 100.0).round() as u8
}
