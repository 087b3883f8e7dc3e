//! Section Detector: which standard resume sections the text mentions.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The closed set of resume sections the detector knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
        Section::Achievements,
    ];

    /// Core sections carry 80% of the section score, the rest share 20%.
    pub fn is_core(self) -> bool {
        matches!(
            self,
            Section::Summary
                | Section::Experience
                | Section::Education
                | Section::Skills
                | Section::Projects
        )
    }

    /// Snake-case key used in enhancement maps and JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Achievements => "achievements",
        }
    }

    /// Heading text suggested to users.
    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "Summary",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Certifications => "Certifications",
            Section::Achievements => "Achievements",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Section::Summary => r"\b(summary|profile|objective|about me)\b",
            Section::Experience => {
                r"\b(experience|work history|employment|professional experience)\b"
            }
            Section::Education => r"\b(education|academic|university|college|degree)\b",
            Section::Skills => r"\b(skills|technical skills|competencies|technologies|tech stack)\b",
            Section::Projects => r"\b(projects|personal projects|side projects)\b",
            Section::Certifications => r"\b(certifications?|licenses?|certified)\b",
            Section::Achievements => r"\b(achievements|awards|honors|honours|accomplishments)\b",
        }
    }
}

static SECTION_PATTERNS: LazyLock<Vec<(Section, Regex)>> = LazyLock::new(|| {
    Section::ALL
        .iter()
        .map(|&s| (s, Regex::new(s.pattern()).expect("valid section regex")))
        .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionReport {
    pub present: BTreeMap<Section, bool>,
    pub score: u8,
}

impl SectionReport {
    pub fn missing_core(&self) -> impl Iterator<Item = Section> + '_ {
        self.present
            .iter()
            .filter(|(s, hit)| s.is_core() && !**hit)
            .map(|(s, _)| *s)
    }
}

/// Detects section headings/mentions in normalized text.
///
/// `score = round(100 × (0.8 × coreHitRatio + 0.2 × extraHitRatio))`
pub fn detect_sections(text: &str) -> SectionReport {
    let lower = text.to_lowercase();
    let present: BTreeMap<Section, bool> = SECTION_PATTERNS
        .iter()
        .map(|(section, re)| (*section, re.is_match(&lower)))
        .collect();

    let (core_total, core_hits) = tally(&present, true);
    let (extra_total, extra_hits) = tally(&present, false);

    let core_ratio = core_hits as f64 / core_total.max(1) as f64;
    let extra_ratio = (extra_hits as f64 / extra_total.max(1) as f64).max(0.0);
    let score = (100.0 * (0.8 * core_ratio + 0.2 * extra_ratio)).round().clamp(0.0, 100.0) as u8;

    SectionReport { present, score }
}

fn tally(present: &BTreeMap<Section, bool>, core: bool) -> (usize, usize) {
    present
        .iter()
        .filter(|(s, _)| s.is_core() == core)
        .fold((0, 0), |(total, hits), (_, hit)| (total + 1, hits + usize::from(*hit)))
}
