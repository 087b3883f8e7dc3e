//! Generic keyword extraction and vocabulary/technical-density scoring.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use stop_words::LANGUAGE;

use crate::scoring::taxonomy::ExtractedSkills;
use crate::scoring::tokenizer::Tokenizer;

/// Cap on the technical keyword list carried in the report.
pub const MAX_TECHNICAL_KEYWORDS: usize = 80;

const MIN_TERM_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    pub unique_token_count: usize,
    pub richness_score: u8,
    pub technical_keywords: Vec<String>,
    pub technical_score: u8,
}

/// Lower-cased, stop-word-filtered term extraction.
#[derive(Clone)]
pub struct KeywordExtractor {
    stopwords: HashSet<String>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        let stopwords = stop_words::get(LANGUAGE::English)
            .iter()
            .map(|w| w.to_ascii_lowercase())
            .collect();
        Self { stopwords }
    }

    /// Every non-stop-word term in document order, duplicates kept (term frequencies).
    pub fn terms(&self, text: &str, tokenizer: &dyn Tokenizer) -> Vec<String> {
        tokenizer
            .words(text)
            .into_iter()
            .map(|w| w.to_lowercase())
            .filter(|w| w.chars().count() >= MIN_TERM_LENGTH && !self.stopwords.contains(w))
            .collect()
    }

    /// Unique terms in first-occurrence order.
    pub fn keywords(&self, text: &str, tokenizer: &dyn Tokenizer) -> Vec<String> {
        dedup_ordered(self.terms(text, tokenizer))
    }
}

/// Heuristic: anything with a digit or `.`/`+`/`#`, or longer than 10 characters.
pub fn is_technical(keyword: &str) -> bool {
    keyword
        .chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '#'))
        || keyword.chars().count() > 10
}

/// Scores vocabulary richness and technical density of a keyword list.
pub fn analyze_keywords(keywords: &[String], skills: &ExtractedSkills) -> KeywordReport {
    let unique_alpha = keywords
        .iter()
        .filter(|k| k.chars().all(char::is_alphabetic))
        .count();
    let richness_score = scaled(unique_alpha, 400.0).clamp(30, 100) as u8;

    let technical: Vec<&String> = keywords.iter().filter(|k| is_technical(k)).collect();
    let mut technical_score = scaled(technical.len(), 40.0).clamp(20, 100);

    if skills.flat.len() >= 8 {
        technical_score += 10;
    }
    if skills.flat.len() >= 15 {
        technical_score += 10;
    }
    if skills.category_count() >= 3 {
        technical_score += 5;
    }

    KeywordReport {
        unique_token_count: keywords.len(),
        richness_score,
        technical_keywords: technical
            .into_iter()
            .take(MAX_TECHNICAL_KEYWORDS)
            .cloned()
            .collect(),
        technical_score: technical_score.clamp(20, 100) as u8,
    }
}

fn scaled(count: usize, saturation: f64) -> i64 {
    (count as f64 / saturation * 100.0).round() as i64
}

pub(crate) fn dedup_ordered(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
