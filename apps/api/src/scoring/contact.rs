//! Contact Analyzer: which contact channels a resume exposes.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").expect("valid email regex")
});
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s\-]{8,}").expect("valid phone regex"));
static LINKEDIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\blinkedin\.com\b").expect("valid linkedin regex"));
static GITHUB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bgithub\.com\b").expect("valid github regex"));
/// Personal-site domains only count in URL form (scheme, `www.` or a path), so
/// library names like `socket.io` do not.
static PORTFOLIO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:portfolio|behance\.net|dribbble\.com)\b",
        r"|(?:https?://|\bwww\.)[a-z0-9-]+(?:\.[a-z0-9-]+)*\.(?:dev|io|me)\b",
        r"|\b[a-z0-9-]+\.(?:dev|io|me)/",
    ))
    .expect("valid portfolio regex")
});

/// Score by number of channels present; 4 or more saturates.
const CHANNEL_SCORES: [u8; 5] = [20, 45, 65, 85, 100];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactReport {
    pub has_email: bool,
    pub has_phone: bool,
    pub has_linkedin: bool,
    pub has_github: bool,
    pub has_portfolio: bool,
    pub score: u8,
}

impl ContactReport {
    pub fn channel_count(&self) -> usize {
        [
            self.has_email,
            self.has_phone,
            self.has_linkedin,
            self.has_github,
            self.has_portfolio,
        ]
        .iter()
        .filter(|&&present| present)
        .count()
    }
}

pub fn analyze_contact(text: &str) -> ContactReport {
    // An address at a .me or .io domain is still a single channel.
    let without_emails = EMAIL.replace_all(text, " ");
    let mut report = ContactReport {
        has_email: EMAIL.is_match(text),
        has_phone: PHONE.is_match(text),
        has_linkedin: LINKEDIN.is_match(text),
        has_github: GITHUB.is_match(text),
        has_portfolio: PORTFOLIO.is_match(&without_emails),
        score: 0,
    };
    let idx = report.channel_count().min(CHANNEL_SCORES.len() - 1);
    report.score = CHANNEL_SCORES[idx];
    report
}
