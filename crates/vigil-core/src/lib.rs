pub mod batch;
pub mod model;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod scoring;
pub mod sources;

pub use batch::{derive_recommendations, run_batch};
pub use model::{
    BatchReport, BatchSummary, Category, Document, Finding, PerFileResults, ScanMetadata,
    ScanResult, Severity, SeverityCounts, SkippedDocument,
};
pub use report::{
    finding_rows, FindingRow, JsonRenderer, MarkdownRenderer, Render, RenderError, TableRenderer,
};
pub use report::json::SCHEMA_VERSION;
pub use rules::{get_all_rules, PatternRule, RuleError};
pub use scanner::{scan_document, scan_source, LineIndex, EXCERPT_MAX_CHARS};
pub use scoring::{
    is_high_risk, score, severity_points, HIGH_POINTS, HIGH_RISK_THRESHOLD, LOW_POINTS,
    MAX_SCORE, MEDIUM_POINTS,
};
pub use sources::{language_hint, load_document, scan_paths, DEFAULT_MAX_FILE_SIZE};
