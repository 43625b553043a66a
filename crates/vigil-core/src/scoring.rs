use crate::model::{Finding, Severity, SeverityCounts};

// Point values per severity tier and the high-risk cutoff are part of the
// report contract; existing consumers compare scores across report versions.
pub const HIGH_POINTS: u32 = 25;
pub const MEDIUM_POINTS: u32 = 15;
pub const LOW_POINTS: u32 = 5;

/// Files scoring strictly above this are classified high risk.
pub const HIGH_RISK_THRESHOLD: u32 = 70;

pub const MAX_SCORE: u32 = 100;

pub fn severity_points(severity: Severity) -> u32 {
    match severity {
        Severity::High => HIGH_POINTS,
        Severity::Medium => MEDIUM_POINTS,
        Severity::Low => LOW_POINTS,
    }
}

/// Additive-saturating risk score plus a per-tier tally. Monotonic in the
/// finding list, insensitive to ordering, and always within [0,100].
pub fn score(findings: &[Finding]) -> (u32, SeverityCounts) {
    let mut counts = SeverityCounts::default();
    let mut total: u32 = 0;

    for finding in findings {
        match finding.severity_tier {
            Severity::High => counts.high += 1,
            Severity::Medium => counts.medium += 1,
            Severity::Low => counts.low += 1,
        }
        total = total.saturating_add(severity_points(finding.severity_tier));
    }

    (total.min(MAX_SCORE), counts)
}

pub fn is_high_risk(score: u32) -> bool {
    score > HIGH_RISK_THRESHOLD
}
