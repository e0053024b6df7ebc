//! Scout Report - startup profile report renderer.
//!
//! Takes the structured output of an upstream analysis pipeline (company
//! facts, a narrative summary, a knowledge graph, vetted evidence) and
//! deterministically renders it into report documents.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        scout-report                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌───────────────┐   ┌────────────────┐   ┌─────────────────┐  │
//! │  │  ReportInput  │──▶│  ReportBuilder │──▶│    Renderers    │  │
//! │  │  (upstream    │   │  (validation,  │   │  markdown/html/ │  │
//! │  │   payload)    │   │   assembly)    │   │  json + mermaid │  │
//! │  └───────────────┘   └────────────────┘   └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is a pure transform: no I/O, no shared state, all-or-nothing
//! output. Everything upstream of the payload (crawling, LLM analysis) and
//! downstream of the string (delivery, archival) lives elsewhere.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod keywords;
pub mod model;
pub mod render;
pub mod report;

pub use model::{
    CompanyRecord, ConfidenceTier, EntityKind, EvidenceItem, GraphNode, Keyword, KnowledgeGraph,
    Relationship, ScoreCard,
};
pub use render::{render, RenderError};
pub use report::{Report, ReportBuilder, ReportFormat, ReportInput, ValidationError};
