#![allow(dead_code)]

//! `AtsEngine`: immutable scoring state plus the two public entry points.
//!
//! The engine owns the loaded tables, the stop-word set and the tokenizer.
//! Nothing is mutated after construction, so one `Arc<AtsEngine>` serves every
//! request concurrently without locks.

use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::TablesError;
use crate::scoring::general::{score_document, GeneralScoreResult};
use crate::scoring::keywords::KeywordExtractor;
use crate::scoring::matching::{match_documents, MatchResult};
use crate::scoring::normalizer::{normalize_text, truncate_input};
use crate::scoring::profile::{AnalysisProfile, ScoreOptions};
use crate::scoring::taxonomy::SkillTaxonomy;
use crate::scoring::tokenizer::{RegexTokenizer, Tokenizer};
use crate::scoring::weights::WeightTables;

/// Inputs beyond this are cut before analysis to bound TF-IDF cost.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 256 * 1024;

pub struct AtsEngine {
    taxonomy: SkillTaxonomy,
    weights: WeightTables,
    keywords: KeywordExtractor,
    tokenizer: Box<dyn Tokenizer>,
    max_input_bytes: usize,
}

impl AtsEngine {
    pub fn new(taxonomy: SkillTaxonomy, weights: WeightTables) -> Self {
        Self {
            taxonomy,
            weights,
            keywords: KeywordExtractor::new(),
            tokenizer: Box::new(RegexTokenizer),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }

    /// Engine over the tables embedded in the binary.
    pub fn with_defaults() -> Result<Self, TablesError> {
        Ok(Self::new(SkillTaxonomy::embedded()?, WeightTables::embedded()?))
    }

    /// Engine with optional table overrides and the configured input limit.
    pub fn from_config(config: &Config) -> Result<Self, TablesError> {
        let taxonomy = match &config.skill_taxonomy_path {
            Some(path) => SkillTaxonomy::from_path(path)?,
            None => SkillTaxonomy::embedded()?,
        };
        let weights = match &config.weight_tables_path {
            Some(path) => WeightTables::from_path(path)?,
            None => WeightTables::embedded()?,
        };
        Ok(Self::new(taxonomy, weights).with_max_input_bytes(config.max_input_bytes))
    }

    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes.max(1);
        self
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn weight_tables(&self) -> &WeightTables {
        &self.weights
    }

    pub(crate) fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    pub(crate) fn keyword_extractor(&self) -> &KeywordExtractor {
        &self.keywords
    }

    /// Standalone resume score. Never fails; empty text scores near the floor.
    pub fn compute_general_ats(&self, text: &str, options: &ScoreOptions) -> GeneralScoreResult {
        let profile = AnalysisProfile::from_options(options);
        let resume = self.prepare(text, "resume");
        score_document(self, &resume, profile)
    }

    /// Resume vs job description score, blended with the standalone score.
    pub fn compute_match_ats(
        &self,
        resume_text: &str,
        jd_text: &str,
        options: &ScoreOptions,
    ) -> MatchResult {
        let profile = AnalysisProfile::from_options(options);
        let resume = self.prepare(resume_text, "resume");
        let jd = self.prepare(jd_text, "job description");
        match_documents(self, &resume, &jd, profile)
    }

    fn prepare(&self, text: &str, label: &str) -> String {
        let bounded = truncate_input(text, self.max_input_bytes);
        if bounded.len() < text.len() {
            warn!(
                document = label,
                original_bytes = text.len(),
                kept_bytes = bounded.len(),
                "Input truncated before analysis"
            );
        }
        let normalized = normalize_text(bounded);
        debug!(document = label, bytes = normalized.len(), "Input normalized");
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::sections::Section;
    use crate::scoring::weights::Dimension;
    use std::io::Write;

    fn engine() -> AtsEngine {
        AtsEngine::with_defaults().unwrap()
    }

    const SENTENCE: &str = "Designed and delivered reliable backend services for payment \
        workflows while partnering with product designers and mentoring junior engineers \
        across three distributed teams to improve release quality and customer trust \
        every quarter";

    /// 5 headings, 1 contact line, 8 bullets and 6 prose lines (20 lines, ~500 words).
    fn well_formed_resume() -> String {
        let mut lines = vec!["Jane Doe jane.doe@example.com linkedin.com/in/janedoe".to_string()];
        lines.push("Summary".to_string());
        lines.push(format!("{SENTENCE}."));
        lines.push(format!("{SENTENCE}."));
        lines.push("Experience".to_string());
        for _ in 0..4 {
            lines.push(format!("- {SENTENCE}"));
        }
        lines.push("Education".to_string());
        lines.push(format!("{SENTENCE}."));
        lines.push(format!("{SENTENCE}."));
        lines.push("Skills".to_string());
        lines.push(format!("{SENTENCE}."));
        lines.push("Projects".to_string());
        for _ in 0..4 {
            lines.push(format!("- {SENTENCE}"));
        }
        lines.push(format!("{SENTENCE}."));
        lines.join("\n")
    }

    #[test]
    fn test_empty_resume_degrades_gracefully() {
        let result = engine().compute_general_ats("", &ScoreOptions::default());
        assert!(result.score < 35, "score was {}", result.score);
        assert_eq!(result.meta.sections.score, 0);
        assert_eq!(result.meta.contact.score, 20);
    }

    #[test]
    fn test_whitespace_only_matches_empty() {
        let engine = engine();
        let empty = engine.compute_general_ats("", &ScoreOptions::default());
        let blank = engine.compute_general_ats(" \n\t \r\n", &ScoreOptions::default());
        assert_eq!(empty, blank);
    }

    #[test]
    fn test_well_formed_resume() {
        let text = well_formed_resume();
        let result = engine().compute_general_ats(&text, &ScoreOptions::default());

        assert_eq!(result.meta.structure.line_count, 20);
        assert_eq!(result.meta.structure.bullet_line_count, 8);
        let words = result.meta.structure.word_count;
        assert!((350..=900).contains(&words), "word count was {words}");

        assert!(result.meta.sections.score >= 80);
        assert!(result.meta.sections.present[&Section::Experience]);
        assert_eq!(result.meta.contact.score, 65);
        assert_eq!(result.meta.structure.length_score, 100);
        assert!(result.score <= 100);
    }

    #[test]
    fn test_general_score_is_deterministic() {
        let engine = engine();
        let text = well_formed_resume();
        let options = ScoreOptions::new("mid", "DATA");
        let a = serde_json::to_string(&engine.compute_general_ats(&text, &options)).unwrap();
        let b = serde_json::to_string(&engine.compute_general_ats(&text, &options)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scores_bounded_for_hostile_input() {
        let engine = engine();
        let inputs = [
            String::new(),
            "|\t|\t|".repeat(500),
            "ü".repeat(5_000),
            "- ".repeat(3_000),
            "A".repeat(20_000),
            "1234567890 ".repeat(400),
            "@@@ ... !!! ???".to_string(),
        ];
        for text in &inputs {
            let general = engine.compute_general_ats(text, &ScoreOptions::default());
            assert!(general.score <= 100);
            assert!(general.breakdown.values().all(|&v| v <= 100));
            assert!(general.suggestions.len() <= 10);

            let matched = engine.compute_match_ats(text, text, &ScoreOptions::default());
            assert!(matched.score <= 100);
            assert!(matched.details.match_score <= 100);
            assert!(matched.details.semantic_score <= 100);
        }
    }

    #[test]
    fn test_same_skills_give_full_hard_skill_coverage() {
        let resume = "Experience\n- Built a storefront with React, Node, PostgreSQL, Docker, AWS";
        let jd = "We need React, Node, PostgreSQL, Docker and AWS experience.";
        let result = engine().compute_match_ats(resume, jd, &ScoreOptions::default());
        assert_eq!(result.details.hard_skill_coverage_percent, 100);
        assert_eq!(result.details.matched_hard_skills.len(), 5);
        assert!(result.details.missing_hard_skills.is_empty());
    }

    #[test]
    fn test_missing_hard_skills_are_reported() {
        let resume = "Skills: React and Docker";
        let jd = "Requirements: React, Docker, Kubernetes, Terraform";
        let result = engine().compute_match_ats(resume, jd, &ScoreOptions::default());
        assert_eq!(result.details.hard_skill_coverage_percent, 50);
        assert_eq!(
            result.details.missing_hard_skills,
            vec!["kubernetes".to_string(), "terraform".to_string()]
        );
    }

    #[test]
    fn test_disjoint_vocabularies_blend_only_general_score() {
        let resume = "ceramics glazing kiln pottery sculpture";
        let jd = "kubernetes terraform docker golang";
        let result = engine().compute_match_ats(resume, jd, &ScoreOptions::default());
        assert_eq!(result.details.jd_coverage_percent, 0);
        assert_eq!(result.details.hard_skill_coverage_percent, 0);
        assert_eq!(result.details.semantic_score, 0);
        assert!(result.details.matched_keywords.is_empty());
        let expected = (0.3 * f64::from(result.general.score)).round() as u8;
        assert_eq!(result.score, expected);
    }

    #[test]
    fn test_identical_documents_cover_everything() {
        let text = "Rust engineer building Kafka pipelines on AWS with Docker";
        let result = engine().compute_match_ats(text, text, &ScoreOptions::default());
        assert_eq!(result.details.jd_coverage_percent, 100);
        assert_eq!(result.details.semantic_score, 100);
        assert!(result.details.jd_missing_keywords.is_empty());
        assert!(result.details.resume_only_keywords.is_empty());
    }

    #[test]
    fn test_empty_job_description_does_not_divide_by_zero() {
        let result = engine().compute_match_ats("Rust developer", "", &ScoreOptions::default());
        assert_eq!(result.details.jd_coverage_percent, 0);
        assert_eq!(result.details.hard_skill_coverage_percent, 0);
        assert_eq!(result.details.semantic_score, 0);
    }

    #[test]
    fn test_career_level_and_role_change_weights() {
        let engine = engine();
        let text = well_formed_resume();
        let senior = engine.compute_general_ats(&text, &ScoreOptions::new("senior", "SWE"));
        let entry = engine.compute_general_ats(&text, &ScoreOptions::new("entry", "PM"));
        assert_ne!(senior.meta.weights, entry.meta.weights);
        assert!((senior.meta.weights.sum() - 1.0).abs() < 1e-6);
        assert!((entry.meta.weights.sum() - 1.0).abs() < 1e-6);
        // the analyzers themselves do not depend on the profile
        assert_eq!(senior.breakdown, entry.breakdown);
        assert!(
            senior.meta.weights.get(Dimension::Keywords) > entry.meta.weights.get(Dimension::Keywords)
        );
    }

    #[test]
    fn test_unknown_options_are_accepted() {
        let result =
            engine().compute_general_ats("Experience", &ScoreOptions::new("wizard", "ALCHEMIST"));
        assert_eq!(result.meta.profile.career_level, "wizard");
        assert!((result.meta.weights.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_long_input_is_truncated() {
        let engine = engine().with_max_input_bytes(64);
        let text = format!("Experience\n{}", "kubernetes ".repeat(1_000));
        let result = engine.compute_general_ats(&text, &ScoreOptions::default());
        assert!(result.meta.structure.word_count < 10);
    }

    struct WhitespaceTokenizer;

    impl Tokenizer for WhitespaceTokenizer {
        fn words(&self, text: &str) -> Vec<String> {
            text.split_whitespace().map(str::to_string).collect()
        }

        fn sentences(&self, text: &str) -> Vec<String> {
            vec![text.to_string()]
        }
    }

    #[test]
    fn test_custom_tokenizer_is_used() {
        let engine = engine().with_tokenizer(WhitespaceTokenizer);
        let result = engine.compute_general_ats("one two three", &ScoreOptions::default());
        assert_eq!(result.meta.readability.sentence_count, 1);
        assert_eq!(result.meta.readability.avg_sentence_length, 3.0);
    }

    #[test]
    fn test_from_config_loads_override_tables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": "custom-1", "categories": {{"crafts": ["pottery"]}}}}"#
        )
        .unwrap();

        let config = Config {
            skill_taxonomy_path: Some(file.path().to_path_buf()),
            ..Config::default()
        };
        let engine = AtsEngine::from_config(&config).unwrap();
        assert_eq!(engine.taxonomy().version(), "custom-1");
        let result = engine.compute_general_ats("Pottery and React", &ScoreOptions::default());
        assert!(result.meta.skills.flat.contains("pottery"));
        assert!(!result.meta.skills.flat.contains("react"));
    }

    #[test]
    fn test_from_config_reports_missing_file() {
        let config = Config {
            weight_tables_path: Some("/nonexistent/weights.json".into()),
            ..Config::default()
        };
        assert!(matches!(
            AtsEngine::from_config(&config),
            Err(TablesError::Io { .. })
        ));
    }
}
