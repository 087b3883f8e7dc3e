//! Readability Analyzer: average sentence length banding.

use serde::{Deserialize, Serialize};

use crate::scoring::tokenizer::Tokenizer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityReport {
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub readability_score: u8,
}

pub fn analyze_readability(text: &str, tokenizer: &dyn Tokenizer) -> ReadabilityReport {
    let sentence_count = tokenizer.sentences(text).len();
    let word_count = tokenizer.words(text).len();
    let avg_sentence_length = word_count as f64 / sentence_count.max(1) as f64;

    ReadabilityReport {
        sentence_count,
        avg_sentence_length,
        readability_score: readability_band(avg_sentence_length),
    }
}

fn readability_band(avg_words: f64) -> u8 {
    if avg_words < 8.0 {
        60
    } else if avg_words <= 22.0 {
        100
    } else if avg_words <= 30.0 {
        80
    } else {
        50
    }
}
