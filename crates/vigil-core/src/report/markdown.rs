use crate::model::BatchReport;
use crate::report::{Render, RenderError};

/// Human-readable narrative output for pull requests and review notes.
pub struct MarkdownRenderer;

// Escape pipe characters so identifiers cannot break table rows.
fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Render for MarkdownRenderer {
    fn render(&self, report: &BatchReport) -> Result<String, RenderError> {
        let mut out = String::new();

        out.push_str("# Security Scan Report\n");

        out.push_str("\n## Summary\n");
        out.push_str(&format!(
            "- **Files Scanned**: {}\n",
            report.summary.total_files
        ));
        out.push_str(&format!(
            "- **Total Findings**: {}\n",
            report.summary.total_findings
        ));
        out.push_str(&format!(
            "- **High Risk Files**: {}\n",
            report.summary.high_risk_file_count
        ));
        out.push_str(&format!(
            "- **Average Risk Score**: {}/100\n",
            report.summary.average_risk_score
        ));

        if report.summary.total_findings == 0 {
            out.push_str("\n✅ No vulnerabilities detected.\n");
        } else {
            out.push_str("\n## Files\n");
            out.push_str("| File | Risk Score | High | Medium | Low |\n");
            out.push_str("|------|-----------:|-----:|-------:|----:|\n");
            for (id, result) in report.per_file.iter() {
                out.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    escape_pipes(id),
                    result.risk_score,
                    result.severity_counts.high,
                    result.severity_counts.medium,
                    result.severity_counts.low
                ));
            }

            out.push_str("\n## Findings\n");
            for (id, result) in report.per_file.iter() {
                if result.findings.is_empty() {
                    continue;
                }
                out.push_str(&format!(
                    "\n### {} (risk score {})\n",
                    id, result.risk_score
                ));
                for finding in &result.findings {
                    out.push_str(&format!(
                        "- **Line {}** [{}] {}\n",
                        finding.line, finding.severity_tier, finding.description
                    ));
                    out.push_str(&format!(
                        "  - Excerpt: `{}`\n",
                        finding.excerpt.replace('`', "'")
                    ));
                    out.push_str(&format!("  - Remediation: {}\n", finding.remediation));
                }
            }
        }

        if !report.skipped.is_empty() {
            out.push_str("\n## Skipped\n");
            for skip in &report.skipped {
                out.push_str(&format!("- {}: {}\n", skip.id, skip.reason));
            }
        }

        out.push_str("\n## Recommendations\n");
        for (index, recommendation) in report.recommendations.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", index + 1, recommendation));
        }

        Ok(out)
    }
}

// ==========================
// Tests
// ==========================
