//! Structure Analyzer: layout and parseability signals from line shape.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::tokenizer::Tokenizer;

const BULLET_MARKERS: &[char] = &['-', '•', '▪', '*'];

static CAPS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9 .,&/-]+$").expect("valid heading regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    pub word_count: usize,
    pub line_count: usize,
    pub bullet_line_count: usize,
    pub bullet_ratio: f64,
    pub all_caps_heading_count: usize,
    pub has_tabs: bool,
    pub has_pipes: bool,
    pub avg_line_length: f64,
    pub non_ascii_ratio: f64,
    pub length_score: u8,
    pub formatting_score: u8,
    pub parse_score: u8,
}

/// Analyzes line layout of normalized text.
///
/// A document with no non-blank lines has nothing to lay out or parse, so its
/// formatting and parse scores are 0.
pub fn analyze_structure(text: &str, tokenizer: &dyn Tokenizer) -> StructureReport {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let word_count = tokenizer.words(text).len();
    let line_count = lines.len();
    let bullet_line_count = lines
        .iter()
        .filter(|l| l.starts_with(BULLET_MARKERS))
        .count();
    let bullet_ratio = bullet_line_count as f64 / line_count.max(1) as f64;
    let all_caps_heading_count = lines.iter().filter(|l| is_caps_heading(l)).count();
    let has_tabs = text.contains('\t');
    let has_pipes = text.contains('|');

    let line_chars: usize = lines.iter().map(|l| l.chars().count()).sum();
    let avg_line_length = line_chars as f64 / line_count.max(1) as f64;

    let total_chars = text.chars().count();
    let non_ascii = text.chars().filter(|c| !c.is_ascii()).count();
    let non_ascii_ratio = non_ascii as f64 / total_chars.max(1) as f64;

    let length_score = length_band(word_count);

    let (formatting_score, parse_score) = if line_count == 0 {
        (0, 0)
    } else {
        let mut formatting = 50_i32;
        if (0.25..=0.7).contains(&bullet_ratio) {
            formatting += 20;
        }
        if (0.4..=0.6).contains(&bullet_ratio) {
            formatting += 10;
        }
        if all_caps_heading_count >= 3 {
            formatting += 10;
        }
        if has_tabs || has_pipes {
            formatting -= 20;
        }

        let mut parse = 80_i32;
        if non_ascii_ratio > 0.05 {
            parse -= 20;
        }
        if avg_line_length > 110.0 {
            parse -= 20;
        }
        if has_tabs || has_pipes {
            parse -= 10;
        }
        if bullet_ratio < 0.1 {
            parse -= 10;
        }

        (clamp_score(formatting), clamp_score(parse))
    };

    StructureReport {
        word_count,
        line_count,
        bullet_line_count,
        bullet_ratio,
        all_caps_heading_count,
        has_tabs,
        has_pipes,
        avg_line_length,
        non_ascii_ratio,
        length_score,
        formatting_score,
        parse_score,
    }
}

/// Word-count bands: too short or far too long both cost points.
pub fn length_band(word_count: usize) -> u8 {
    match word_count {
        n if n < 250 => 40,
        n if n < 350 => 70,
        n if n <= 900 => 100,
        n if n <= 1200 => 75,
        _ => 40,
    }
}

fn is_caps_heading(line: &str) -> bool {
    let len = line.chars().count();
    (3..=60).contains(&len) && !line.ends_with('.') && CAPS_HEADING.is_match(line)
}

fn clamp_score(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}
