//! Match Engine: resume vs job description.
//!
//! `matchScore = 0.4 × jdCoverage + 0.35 × hardSkillCoverage + 0.25 × semantic`
//! blended 70/30 with the resume's standalone general score. The keyword and
//! skill lists are diagnostics only and never feed back into the score.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::engine::AtsEngine;
use crate::scoring::general::{score_document, GeneralScoreResult};
use crate::scoring::keywords::dedup_ordered;
use crate::scoring::profile::AnalysisProfile;

/// Cap on every diagnostic list.
pub const MAX_DIAGNOSTIC_ITEMS: usize = 50;

const JD_COVERAGE_WEIGHT: f64 = 0.4;
const HARD_SKILL_WEIGHT: f64 = 0.35;
const SEMANTIC_WEIGHT: f64 = 0.25;
const MATCH_BLEND: f64 = 0.7;
const GENERAL_BLEND: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub match_score: u8,
    pub jd_coverage_percent: u8,
    pub hard_skill_coverage_percent: u8,
    pub semantic_score: u8,
    pub matched_keywords: Vec<String>,
    pub jd_missing_keywords: Vec<String>,
    pub resume_only_keywords: Vec<String>,
    pub matched_hard_skills: Vec<String>,
    pub missing_hard_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    pub general: GeneralScoreResult,
    #[serde(rename = "match")]
    pub details: MatchDetails,
}

/// Scores a normalized resume against a normalized job description.
pub(crate) fn match_documents(
    engine: &AtsEngine,
    resume: &str,
    jd: &str,
    profile: AnalysisProfile,
) -> MatchResult {
    let general = score_document(engine, resume, profile);

    let extractor = engine.keyword_extractor();
    let tokenizer = engine.tokenizer();
    let resume_terms = extractor.terms(resume, tokenizer);
    let jd_terms = extractor.terms(jd, tokenizer);

    let resume_keywords = dedup_ordered(resume_terms.clone());
    let jd_keywords = dedup_ordered(jd_terms.clone());
    let resume_set: HashSet<&str> = resume_keywords.iter().map(String::as_str).collect();
    let jd_set: HashSet<&str> = jd_keywords.iter().map(String::as_str).collect();

    let (matched_keywords, jd_missing_keywords): (Vec<String>, Vec<String>) = jd_keywords
        .iter()
        .cloned()
        .partition(|k| resume_set.contains(k.as_str()));
    let resume_only_keywords: Vec<String> = resume_keywords
        .iter()
        .filter(|k| !jd_set.contains(k.as_str()))
        .cloned()
        .collect();
    let jd_coverage = coverage(matched_keywords.len(), jd_keywords.len());

    let resume_skills = &general.meta.skills.flat;
    let jd_skills = engine.taxonomy().extract(jd).flat;
    let (matched_hard_skills, missing_hard_skills): (Vec<String>, Vec<String>) = jd_skills
        .iter()
        .cloned()
        .partition(|s| resume_skills.contains(s));
    let hard_skill_coverage = coverage(matched_hard_skills.len(), jd_skills.len());

    let semantic = (tfidf_cosine(&resume_terms, &jd_terms) * 100.0).clamp(0.0, 100.0);

    let match_score = (JD_COVERAGE_WEIGHT * jd_coverage
        + HARD_SKILL_WEIGHT * hard_skill_coverage
        + SEMANTIC_WEIGHT * semantic)
        .clamp(0.0, 100.0);
    let blended = (MATCH_BLEND * match_score + GENERAL_BLEND * f64::from(general.score))
        .clamp(0.0, 100.0)
        .round() as u8;

    debug!(
        blended,
        match_score,
        jd_coverage,
        hard_skill_coverage,
        semantic,
        general = general.score,
        "Match ATS score computed"
    );

    MatchResult {
        score: blended,
        general,
        details: MatchDetails {
            match_score: to_score(match_score),
            jd_coverage_percent: to_score(jd_coverage),
            hard_skill_coverage_percent: to_score(hard_skill_coverage),
            semantic_score: to_score(semantic),
            matched_keywords: capped(matched_keywords),
            jd_missing_keywords: capped(jd_missing_keywords),
            resume_only_keywords: capped(resume_only_keywords),
            matched_hard_skills: capped(matched_hard_skills),
            missing_hard_skills: capped(missing_hard_skills),
        },
    }
}

/// Percentage of `total` covered by `hits`; an empty reference set covers nothing.
fn coverage(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64 * 100.0
}

/// Cosine similarity of the two documents' TF-IDF vectors over their joint
/// vocabulary. IDF is smoothed (`ln((1 + N) / (1 + df)) + 1`, N = 2) so terms
/// both documents share keep a non-zero weight.
pub fn tfidf_cosine(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let counts_a = term_counts(a);
    let counts_b = term_counts(b);
    let vocabulary: BTreeSet<&str> = counts_a.keys().chain(counts_b.keys()).copied().collect();

    let (len_a, len_b) = (a.len() as f64, b.len() as f64);
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for term in vocabulary {
        let ca = counts_a.get(term).copied().unwrap_or(0);
        let cb = counts_b.get(term).copied().unwrap_or(0);
        let df = usize::from(ca > 0) + usize::from(cb > 0);
        let idf = (3.0 / (1.0 + df as f64)).ln() + 1.0;

        let wa = ca as f64 / len_a * idf;
        let wb = cb as f64 / len_b * idf;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

fn term_counts(terms: &[String]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    counts
}

fn capped(mut items: Vec<String>) -> Vec<String> {
    items.truncate(MAX_DIAGNOSTIC_ITEMS);
    items
}

fn to_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}
