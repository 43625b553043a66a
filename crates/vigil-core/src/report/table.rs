use serde::Serialize;

use crate::model::{BatchReport, Category, Severity};
use crate::report::{Render, RenderError};

/// One flattened row per finding, for tabular consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingRow {
    pub file: String,
    pub line: usize,
    pub severity_tier: Severity,
    pub category: Category,
    pub excerpt: String,
}

/// Flattens every finding in the report into rows, preserving report order.
pub fn finding_rows(report: &BatchReport) -> Vec<FindingRow> {
    let mut rows = Vec::new();
    for (id, result) in report.per_file.iter() {
        for finding in &result.findings {
            rows.push(FindingRow {
                file: id.clone(),
                line: finding.line,
                severity_tier: finding.severity_tier,
                category: finding.category,
                excerpt: finding.excerpt.clone(),
            });
        }
    }
    rows
}

/// Terminal-friendly columnar output. Rows are sorted by file then line for
/// display; the underlying report keeps discovery order.
pub struct TableRenderer;

const EXCERPT_COLUMN_CHARS: usize = 50;

fn column_excerpt(excerpt: &str) -> String {
    if excerpt.chars().count() <= EXCERPT_COLUMN_CHARS {
        return excerpt.to_string();
    }
    let cut: String = excerpt.chars().take(EXCERPT_COLUMN_CHARS - 3).collect();
    format!("{}...", cut)
}

impl Render for TableRenderer {
    fn render(&self, report: &BatchReport) -> Result<String, RenderError> {
        let mut rows = finding_rows(report);

        if rows.is_empty() {
            return Ok(format!(
                "No findings.\n\nScan Summary:\n  Files: {}\n  Average Risk Score: {}/100\n",
                report.summary.total_files, report.summary.average_risk_score
            ));
        }

        rows.sort_by(|a, b| a.file.cmp(&b.file).then(a.line.cmp(&b.line)));

        let mut out = String::new();
        out.push_str(&format!(
            "{:<28} {:>5}  {:<8} {:<22} {}\n",
            "FILE", "LINE", "SEVERITY", "CATEGORY", "EXCERPT"
        ));
        for row in &rows {
            let severity = row.severity_tier.to_string();
            out.push_str(&format!(
                "{:<28} {:>5}  {:<8} {:<22} {}\n",
                row.file,
                row.line,
                severity,
                row.category.name(),
                column_excerpt(&row.excerpt)
            ));
        }
        out.push_str(&format!(
            "\nScan Summary:\n  Files: {}\n  Findings: {}\n  High Risk Files: {}\n  Average Risk Score: {}/100\n",
            report.summary.total_files,
            report.summary.total_findings,
            report.summary.high_risk_file_count,
            report.summary.average_risk_score
        ));
        Ok(out)
    }
}

// ==========================
// Tests
// ==========================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BatchSummary, Finding, PerFileResults, ScanMetadata, ScanResult, SeverityCounts,
    };
    use chrono::Utc;

    fn finding(category: Category, line: usize, excerpt: &str) -> Finding {
        Finding {
            category,
            severity_tier: category.severity_tier(),
            line,
            excerpt: excerpt.to_string(),
            description: category.description().to_string(),
            remediation: category.remediation().to_string(),
        }
    }

    fn result_with(findings: Vec<Finding>) -> ScanResult {
        let mut counts = SeverityCounts::default();
        for f in &findings {
            match f.severity_tier {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        ScanResult {
            findings,
            risk_score: 0,
            severity_counts: counts,
            metadata: ScanMetadata {
                language: "javascript".to_string(),
                scan_timestamp: Utc::now(),
                line_count: 5,
                warnings: Vec::new(),
            },
        }
    }

    fn two_file_report() -> BatchReport {
        let per_file: PerFileResults = [
            (
                "zeta.js".to_string(),
                result_with(vec![finding(Category::InsecureRandom, 9, "Math.random()")]),
            ),
            (
                "alpha.js".to_string(),
                result_with(vec![
                    finding(Category::HardcodedSecret, 4, "apiKey = \"sk-live\""),
                    finding(Category::WeakHash, 2, "md5(data)"),
                ]),
            ),
        ]
        .into_iter()
        .collect();
        BatchReport {
            per_file,
            summary: BatchSummary {
                total_files: 2,
                total_findings: 3,
                high_risk_file_count: 0,
                average_risk_score: 15,
            },
            recommendations: Vec::new(),
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_rows_preserve_report_order() {
        let rows = finding_rows(&two_file_report());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].file, "zeta.js");
        assert_eq!(rows[1].file, "alpha.js");
        assert_eq!(rows[1].line, 4);
        assert_eq!(rows[2].line, 2);
    }

    #[test]
    fn test_table_sorts_by_file_then_line() {
        let rendered = TableRenderer.render(&two_file_report()).unwrap();
        let alpha_line_2 = rendered.find("md5(data)").unwrap();
        let alpha_line_4 = rendered.find("apiKey").unwrap();
        let zeta_line_9 = rendered.find("Math.random()").unwrap();

        assert!(alpha_line_2 < alpha_line_4);
        assert!(alpha_line_4 < zeta_line_9);
    }

    #[test]
    fn test_table_truncates_long_excerpts() {
        let long = "x".repeat(80);
        let per_file: PerFileResults = [(
            "a.js".to_string(),
            result_with(vec![finding(Category::WeakHash, 1, &long)]),
        )]
        .into_iter()
        .collect();
        let report = BatchReport {
            per_file,
            summary: BatchSummary {
                total_files: 1,
                total_findings: 1,
                high_risk_file_count: 0,
                average_risk_score: 15,
            },
            recommendations: Vec::new(),
            skipped: Vec::new(),
        };

        let rendered = TableRenderer.render(&report).unwrap();
        assert!(rendered.contains(&format!("{}...", "x".repeat(47))));
        assert!(!rendered.contains(&long));
    }

    #[test]
    fn test_table_without_findings() {
        let report = BatchReport {
            per_file: PerFileResults::new(),
            summary: BatchSummary {
                total_files: 0,
                total_findings: 0,
                high_risk_file_count: 0,
                average_risk_score: 0,
            },
            recommendations: Vec::new(),
            skipped: Vec::new(),
        };

        let rendered = TableRenderer.render(&report).unwrap();
        assert!(rendered.starts_with("No findings."));
    }
}
