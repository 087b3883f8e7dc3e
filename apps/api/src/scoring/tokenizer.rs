//! Tokenizer capability used by every analyzer that needs words or sentences.
//!
//! Scoring logic only talks to the `Tokenizer` trait, so a stemming or
//! language-aware tokenizer can be swapped in through `AtsEngine::with_tokenizer`.

use std::sync::LazyLock;

use regex::Regex;

/// Splits text into words and sentences.
pub trait Tokenizer: Send + Sync {
    /// Word tokens in document order, original casing preserved.
    fn words(&self, text: &str) -> Vec<String>;

    /// Sentences in document order. Every returned sentence contains at least
    /// one alphanumeric character.
    fn sentences(&self, text: &str) -> Vec<String>;
}

/// Matches technical tokens whole: `c++`, `c#`, `node.js`, `ci/cd`, `scikit-learn`.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}+#]*(?:[.\-/'][\p{L}\p{N}+#]+)*")
        .expect("valid word regex")
});

/// Terminal punctuation followed by whitespace (or end of text), or a line break.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)|\n").expect("valid sentence regex"));

/// Default regex-based tokenizer for English resume text.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexTokenizer;

impl Tokenizer for RegexTokenizer {
    fn words(&self, text: &str) -> Vec<String> {
        WORD.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        SENTENCE_BREAK
            .split(text)
            .map(str::trim)
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .map(str::to_string)
            .collect()
    }
}
