use crate::model::Finding;
use crate::rules::PatternRule;
use crate::scanner::RawMatch;

/// Upper bound on excerpt length, in characters. Keeps reports compact and
/// stops full secrets from leaking into logs or UI.
pub const EXCERPT_MAX_CHARS: usize = 100;

/// Byte offsets of line starts, built once per document. Looking up a line
/// is a binary search, so resolving N matches costs O(N log lines) instead
/// of re-counting line breaks from the top of the document for each match.
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based line number containing the byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }
}

/// Builds one structured finding from a raw match. Pure function of its
/// inputs: templates come from the rule, position from the line index.
pub fn build(raw: &RawMatch, rule: &PatternRule, lines: &LineIndex) -> Finding {
    Finding {
        category: raw.category,
        severity_tier: rule.severity_tier,
        line: lines.line_of(raw.offset),
        excerpt: truncate_excerpt(&raw.matched_text, EXCERPT_MAX_CHARS),
        description: rule.description.clone(),
        remediation: rule.remediation.clone(),
    }
}

fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}
