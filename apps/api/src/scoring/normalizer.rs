//! Text Normalizer: cleans extracted resume text before any analyzer sees it.
//!
//! Line breaks and tab characters survive normalization: the structure analyzer
//! scores line layout and treats tabs as a formatting red flag.

use std::sync::LazyLock;

use regex::Regex;

static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^page\s+\d+\s+of\s+\d+$").expect("valid page marker regex")
});

/// Normalizes raw extracted text.
///
/// - `\r\n` and lone `\r` become `\n`
/// - each line is trimmed and inner whitespace runs collapse to one space
///   (a run containing a tab collapses to a single tab)
/// - `Page N of M` footers and digit-only lines (page numbers) are dropped
/// - runs of blank lines collapse to one; leading/trailing blank lines are removed
pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<String> = Vec::new();

    for line in unified.split('\n') {
        let line = collapse_whitespace(line.trim());

        if is_page_artifact(&line) {
            continue;
        }

        if line.is_empty() && lines.last().map_or(true, |prev| prev.is_empty()) {
            continue;
        }

        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Cuts `text` to at most `max_bytes`, backing off to the nearest UTF-8
/// character boundary. Returns the input unchanged when it already fits.
pub fn truncate_input(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn collapse_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pending: Option<char> = None;

    for ch in line.chars() {
        if ch == '\t' {
            pending = Some('\t');
        } else if ch.is_whitespace() {
            pending.get_or_insert(' ');
        } else {
            if let Some(ws) = pending.take() {
                out.push(ws);
            }
            out.push(ch);
        }
    }

    out
}

fn is_page_artifact(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    line.chars().all(|c| c.is_ascii_digit()) || PAGE_MARKER.is_match(line)
}
