use crate::model::BatchReport;
use thiserror::Error;

pub mod json;
pub mod markdown;
pub mod table;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use table::{finding_rows, FindingRow, TableRenderer};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// A pure projection of a finished [`BatchReport`] into one output shape.
/// Renderers never recompute scores or counts; they only reshape fields.
pub trait Render {
    fn render(&self, report: &BatchReport) -> Result<String, RenderError>;
}
