//! Enhancement Generator: rule-based, section-tagged improvement suggestions.
//!
//! Rules fire independently. Messages are deduplicated per output section and
//! the flat suggestion list keeps firing order, capped at `MAX_SUGGESTIONS`.

use std::collections::BTreeMap;

use crate::scoring::contact::ContactReport;
use crate::scoring::keywords::KeywordReport;
use crate::scoring::readability::ReadabilityReport;
use crate::scoring::sections::SectionReport;
use crate::scoring::structure::StructureReport;
use crate::scoring::taxonomy::ExtractedSkills;

pub const MAX_SUGGESTIONS: usize = 10;

const STRONG_RESUME: &str =
    "Your resume is structurally strong. Tailor its keywords to each job description for the best match.";

/// Everything the rules look at.
pub struct EnhancementInputs<'a> {
    pub sections: &'a SectionReport,
    pub structure: &'a StructureReport,
    pub readability: &'a ReadabilityReport,
    pub contact: &'a ContactReport,
    pub skills: &'a ExtractedSkills,
    pub keywords: &'a KeywordReport,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enhancements {
    pub by_section: BTreeMap<String, Vec<String>>,
    pub suggestions: Vec<String>,
}

impl Enhancements {
    fn add(&mut self, section: &str, message: impl Into<String>) {
        let message = message.into();
        let bucket = self.by_section.entry(section.to_string()).or_default();
        if bucket.contains(&message) {
            return;
        }
        bucket.push(message.clone());
        if self.suggestions.len() < MAX_SUGGESTIONS && !self.suggestions.contains(&message) {
            self.suggestions.push(message);
        }
    }
}

pub fn build_enhancements(inputs: &EnhancementInputs<'_>) -> Enhancements {
    let mut out = Enhancements::default();

    for section in inputs.sections.missing_core() {
        out.add(
            section.key(),
            format!(
                "Add a clearly labelled \"{}\" section so ATS parsers can find it.",
                section.title()
            ),
        );
    }

    let structure = inputs.structure;
    if structure.line_count > 0 && structure.bullet_ratio < 0.25 {
        out.add(
            "formatting",
            "Break dense paragraphs into bullet points; aim for roughly 40-60% bulleted lines.",
        );
        out.add(
            "experience",
            "Describe each role with 3-5 bullet points that open with an action verb.",
        );
    } else if structure.bullet_ratio > 0.7 {
        out.add(
            "formatting",
            "Almost every line is a bullet. Add short role summaries or headings between bullet groups.",
        );
    }
    if structure.has_tabs || structure.has_pipes {
        out.add(
            "formatting",
            "Replace tables, tab stops and pipe separators with plain lines; ATS parsers often scramble them.",
        );
    }

    if structure.word_count < 350 {
        out.add(
            "length",
            "Expand the resume to at least 350 words with concrete projects and measurable outcomes.",
        );
    } else if structure.word_count > 900 {
        out.add(
            "length",
            "Trim the resume toward 900 words, keeping the most recent and relevant achievements.",
        );
    }

    let avg = inputs.readability.avg_sentence_length;
    if avg < 8.0 {
        out.add(
            "readability",
            "Many statements are short fragments. Combine related points into complete sentences.",
        );
    } else if avg > 22.0 {
        out.add(
            "readability",
            "Shorten long sentences to under 22 words so they scan quickly.",
        );
    }

    let contact = inputs.contact;
    if !contact.has_email {
        out.add("contact", "Add a professional email address.");
    }
    if !contact.has_phone {
        out.add("contact", "Add a phone number including the country code.");
    }
    if !contact.has_linkedin {
        out.add("contact", "Add your LinkedIn profile URL.");
    }

    let skill_count = inputs.skills.flat.len();
    if skill_count == 0 {
        out.add(
            "skills",
            "Name your technical skills explicitly (languages, frameworks, databases, tools) so keyword filters can match them.",
        );
    } else if skill_count < 8 {
        out.add(
            "skills",
            format!(
                "Only {skill_count} recognised hard skills found. List the other tools and technologies you have used."
            ),
        );
    }

    if inputs.keywords.technical_score < 50 {
        out.add(
            "keywords",
            "Mention specific technologies, versions and metrics (e.g. \"PostgreSQL 15\", \"cut p99 latency 40%\") to raise keyword density.",
        );
    }

    if out.by_section.is_empty() {
        out.add("general", STRONG_RESUME);
    }

    out
}
