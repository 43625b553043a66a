use crate::model::{Category, Document, ScanMetadata, ScanResult};
use crate::rules::{self, PatternRule, RuleError};
use crate::scoring;
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use vigil_config::Config;

pub mod finding;

pub use finding::{LineIndex, EXCERPT_MAX_CHARS};

/// One matcher hit, before line and template resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub category: Category,
    pub offset: usize,
    pub matched_text: String,
}

/// Applies every rule to the document and assembles a complete ScanResult.
///
/// Matches are collected per rule in offset order, rules in registry order,
/// so findings come out in a stable discovery order. Each rule gets a
/// wall-clock budget and a match cap; exhausting either abandons that rule's
/// remaining matches and records a warning on the document's metadata
/// instead of failing the scan.
pub fn scan_document(doc: &Document, rules: &[PatternRule], config: &Config) -> ScanResult {
    let started = Instant::now();
    let lines = finding::LineIndex::new(&doc.text);
    let budget = Duration::from_millis(config.scan.rule_budget_ms);
    let max_matches = config.scan.max_matches_per_rule;

    let mut findings = Vec::new();
    let mut warnings = Vec::new();

    for rule in rules {
        let deadline = Instant::now() + budget;
        let mut collected = 0usize;

        for mat in rule.matcher.find_iter(&doc.text) {
            if Instant::now() > deadline {
                warnings.push(format!(
                    "rule '{}' exceeded its {}ms budget; remaining matches dropped",
                    rule.id,
                    budget.as_millis()
                ));
                warn!(rule = %rule.id, document = %doc.id, "match budget exhausted");
                break;
            }
            if collected >= max_matches {
                warnings.push(format!(
                    "rule '{}' hit the cap of {} matches; remaining matches dropped",
                    rule.id, max_matches
                ));
                warn!(rule = %rule.id, document = %doc.id, "match cap reached");
                break;
            }

            let raw = RawMatch {
                category: rule.category,
                offset: mat.start(),
                matched_text: mat.as_str().to_string(),
            };
            findings.push(finding::build(&raw, rule, &lines));
            collected += 1;
        }
    }

    let (risk_score, severity_counts) = scoring::score(&findings);

    debug!(
        document = %doc.id,
        findings = findings.len(),
        risk_score,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scan complete"
    );

    ScanResult {
        findings,
        risk_score,
        severity_counts,
        metadata: ScanMetadata {
            language: doc.language.clone(),
            scan_timestamp: Utc::now(),
            line_count: doc.text.lines().count(),
            warnings,
        },
    }
}

/// Single-document entry point: `(documentId, sourceText, languageHint)`.
/// Builds the registry for `config`, so registry problems surface here and
/// not mid-scan.
pub fn scan_source(
    id: &str,
    text: &str,
    language_hint: &str,
    config: &Config,
) -> Result<ScanResult, RuleError> {
    let rules = rules::get_all_rules(config)?;
    let doc = Document::new(id, text, language_hint);
    Ok(scan_document(&doc, &rules, config))
}
