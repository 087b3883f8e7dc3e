// Resume Scoring Engine
// Implements: normalization, structural analyzers, skill/keyword extraction,
// weight profiles, general ATS score, resume vs JD match score.
// Every analyzer is a pure function over normalized text; AtsEngine composes them.

pub mod balance;
pub mod contact;
pub mod engine;
pub mod enhancements;
pub mod general;
pub mod handlers;
pub mod keywords;
pub mod matching;
pub mod normalizer;
pub mod profile;
pub mod readability;
pub mod sections;
pub mod structure;
pub mod taxonomy;
pub mod tokenizer;
pub mod weights;

// Re-export the public API consumed by handlers and main.
pub use engine::AtsEngine;
pub use general::GeneralScoreResult;
pub use matching::MatchResult;
pub use profile::ScoreOptions;
