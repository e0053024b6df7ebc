//! Report renderers.
//!
//! Every renderer is a pure transform from [`Report`] to an output string;
//! writing the result anywhere is the caller's business. Rendering is
//! all-or-nothing: on error no partial output escapes.

mod html;
mod markdown;
mod mermaid;

use thiserror::Error;

use crate::report::{Report, ReportFormat};

pub use markdown::ANALYSIS_PLACEHOLDER;
pub use mermaid::render_graph;

/// Rendering error, fatal to the render attempt.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A relation kind carries characters the diagram mini-language cannot
    /// hold. Policy is reject, not sanitize.
    #[error("Relation kind `{relation}` contains characters unsafe for the diagram block")]
    UnsafeRelation { relation: String },

    /// JSON export failed
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTML template expansion failed
    #[error("HTML template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

/// Render a report in the given format.
pub fn render(report: &Report, format: ReportFormat) -> Result<String, RenderError> {
    match format {
        ReportFormat::Markdown => markdown::render_markdown(report),
        ReportFormat::Html => html::render_html(report),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
