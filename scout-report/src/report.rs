//! Report assembly and validation.
//!
//! A [`Report`] is the immutable bundle the renderers consume. It can only
//! be obtained through [`ReportBuilder::build`], which validates the input
//! and stamps the generation timestamp; a new generation produces a new
//! `Report`, never a mutation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::keywords::extract_keywords;
use crate::model::{CompanyRecord, EvidenceItem, Keyword, KnowledgeGraph, ScoreCard};
use crate::render;

/// Keyword cap applied when the builder derives keywords itself.
pub const DEFAULT_TOP_KEYWORDS: usize = 30;

// ============================================================================
// Validation
// ============================================================================

/// Input validation error, raised before any rendering happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Relationship references unknown entity: {entity_id}")]
    UnknownEntity { entity_id: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

// ============================================================================
// Report Format
// ============================================================================

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Markdown format (human-readable, embeds the Mermaid diagram)
    Markdown,
    /// Standalone HTML document
    Html,
    /// JSON format (machine-readable)
    Json,
}

impl ReportFormat {
    /// File extension for artifacts in this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// The fully-assembled, immutable report bundle.
///
/// Deliberately not deserializable: the only way in is the builder, so every
/// `Report` in existence has passed validation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report id
    pub id: Uuid,
    /// Core company facts
    pub company: CompanyRecord,
    /// Entity relationship graph
    pub graph: KnowledgeGraph,
    /// Vetted evidence sources
    pub evidence: Vec<EvidenceItem>,
    /// Narrative analysis text (may be empty; renderers substitute a placeholder)
    pub analysis_text: String,
    /// Optional five-dimension scorecard
    pub scorecard: Option<ScoreCard>,
    /// Weighted keywords
    pub keywords: Vec<Keyword>,
    /// Generation timestamp, stamped at build
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Build a report straight from an upstream payload.
    pub fn from_input(input: ReportInput) -> Result<Self, ValidationError> {
        input.into_builder().build()
    }

    /// Render this report in the given format.
    pub fn render(&self, format: ReportFormat) -> Result<String, render::RenderError> {
        render::render(self, format)
    }

    /// Render and save to file.
    ///
    /// When the path has no extension, the format's default is appended.
    /// Parent directories are created as needed.
    pub fn save_to_file(&self, path: &Path, format: ReportFormat) -> anyhow::Result<PathBuf> {
        let content = self.render(format)?;

        let file_path = if path.extension().is_none() {
            path.with_extension(format.extension())
        } else {
            path.to_path_buf()
        };

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context("Failed to create report directory")?;
            }
        }

        std::fs::write(&file_path, content).context("Failed to write report file")?;

        Ok(file_path)
    }
}

// ============================================================================
// Upstream Payload
// ============================================================================

/// The payload shape an upstream analysis pipeline emits.
///
/// Field aliases track the upstream JSON so older payloads parse unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportInput {
    /// Company facts
    pub company: CompanyRecord,
    /// Narrative analysis text
    #[serde(default, alias = "raw_response")]
    pub analysis_text: String,
    /// Entity relationship graph
    #[serde(default)]
    pub graph: KnowledgeGraph,
    /// Five-dimension scorecard
    #[serde(default, alias = "scoring")]
    pub scorecard: Option<ScoreCard>,
    /// Evidence sources
    #[serde(default, alias = "sources")]
    pub evidence: Vec<EvidenceItem>,
    /// Pre-computed keywords; derived from the analysis text when absent
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

impl ReportInput {
    /// Move this payload into a builder.
    pub fn into_builder(self) -> ReportBuilder {
        ReportBuilder {
            company: self.company,
            graph: self.graph,
            evidence: self.evidence,
            analysis_text: self.analysis_text,
            scorecard: self.scorecard,
            keywords: self.keywords,
            keyword_cap: DEFAULT_TOP_KEYWORDS,
            generated_at: None,
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Validating builder for [`Report`].
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    company: CompanyRecord,
    graph: KnowledgeGraph,
    evidence: Vec<EvidenceItem>,
    analysis_text: String,
    scorecard: Option<ScoreCard>,
    keywords: Vec<Keyword>,
    keyword_cap: usize,
    generated_at: Option<DateTime<Utc>>,
}

impl ReportBuilder {
    /// Start a builder from company facts.
    pub fn new(company: CompanyRecord) -> Self {
        Self {
            company,
            graph: KnowledgeGraph::default(),
            evidence: Vec::new(),
            analysis_text: String::new(),
            scorecard: None,
            keywords: Vec::new(),
            keyword_cap: DEFAULT_TOP_KEYWORDS,
            generated_at: None,
        }
    }

    /// Attach the relationship graph.
    pub fn graph(mut self, graph: KnowledgeGraph) -> Self {
        self.graph = graph;
        self
    }

    /// Attach evidence sources.
    pub fn evidence(mut self, evidence: Vec<EvidenceItem>) -> Self {
        self.evidence = evidence;
        self
    }

    /// Attach the narrative analysis text.
    pub fn analysis_text(mut self, text: impl Into<String>) -> Self {
        self.analysis_text = text.into();
        self
    }

    /// Attach the scorecard.
    pub fn scorecard(mut self, scorecard: ScoreCard) -> Self {
        self.scorecard = Some(scorecard);
        self
    }

    /// Attach pre-computed keywords (suppresses the derived fallback).
    pub fn keywords(mut self, keywords: Vec<Keyword>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Cap for keywords derived from the analysis text.
    pub fn auto_keywords(mut self, cap: usize) -> Self {
        self.keyword_cap = cap;
        self
    }

    /// Pin the generation timestamp (defaults to now). Two builds of the
    /// same input with the same pinned timestamp render byte-identically.
    pub fn generated_at(mut self, ts: DateTime<Utc>) -> Self {
        self.generated_at = Some(ts);
        self
    }

    /// Validate and assemble the report.
    pub fn build(self) -> Result<Report, ValidationError> {
        let mut errors = Vec::new();

        if self.company.name.trim().is_empty() {
            errors.push(ValidationError::MissingField {
                field: "company.name".into(),
            });
        }

        // Every edge endpoint must resolve to a declared, labeled node.
        let known_ids: HashSet<&str> = self.graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for node in &self.graph.nodes {
            if node.label.trim().is_empty() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("graph.nodes[{}].label", node.id),
                    reason: "display label must not be empty".into(),
                });
            }
        }
        for edge in &self.graph.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !known_ids.contains(endpoint.as_str()) {
                    errors.push(ValidationError::UnknownEntity {
                        entity_id: endpoint.clone(),
                    });
                }
            }
        }

        for (index, item) in self.evidence.iter().enumerate() {
            if let Err(e) = url::Url::parse(&item.url) {
                errors.push(ValidationError::InvalidValue {
                    field: format!("evidence[{index}].url"),
                    reason: e.to_string(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(if errors.len() == 1 {
                errors.remove(0)
            } else {
                ValidationError::Multiple(errors)
            });
        }

        let keywords = if self.keywords.is_empty() && !self.analysis_text.trim().is_empty() {
            extract_keywords(&self.analysis_text, self.keyword_cap)
        } else {
            self.keywords
        };

        Ok(Report {
            id: Uuid::new_v4(),
            company: self.company,
            graph: self.graph,
            evidence: self.evidence,
            analysis_text: self.analysis_text,
            scorecard: self.scorecard,
            keywords,
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
        })
    }
}
