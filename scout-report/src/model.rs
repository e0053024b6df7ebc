//! Data model for startup profile reports.
//!
//! These types mirror the payload an upstream analysis pipeline hands over:
//! company facts, a knowledge graph of entity relationships, vetted evidence
//! sources, an optional five-dimension scorecard, and weighted keywords.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Company Record
// ============================================================================

/// Core facts about the analyzed company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Company name
    #[serde(alias = "company_name")]
    pub name: String,
    /// Founding date
    #[serde(alias = "founded")]
    pub founded_date: NaiveDate,
    /// Business domains (ordered set, so rendering is stable)
    #[serde(default)]
    pub domains: BTreeSet<String>,
    /// One-line value proposition
    #[serde(default, alias = "one_liner")]
    pub value_proposition: String,
    /// Product or company description
    #[serde(default, alias = "product_description")]
    pub description: String,
}

// ============================================================================
// Knowledge Graph
// ============================================================================

/// Entity category in the knowledge graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Company,
    Person,
    Investor,
    Product,
    Market,
    Other,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Company => write!(f, "Company"),
            Self::Person => write!(f, "Person"),
            Self::Investor => write!(f, "Investor"),
            Self::Product => write!(f, "Product"),
            Self::Market => write!(f, "Market"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A named entity in the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Stable entity id, e.g. `company:blue`
    pub id: String,
    /// Display label
    pub label: String,
    /// Entity category
    #[serde(default = "default_entity_kind", alias = "type")]
    pub kind: EntityKind,
}

fn default_entity_kind() -> EntityKind {
    EntityKind::Other
}

/// A directed, labeled connection between two entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Source entity id
    pub source: String,
    /// Target entity id
    pub target: String,
    /// Relation kind, e.g. `FOUNDED_BY`, `INVESTED_IN`
    #[serde(default, alias = "rel")]
    pub relation: String,
}

/// Entity/relationship graph attached to a report.
///
/// Node and edge order is preserved from the upstream payload; the renderer
/// emits declarations and edges in exactly this order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<Relationship>,
}

impl KnowledgeGraph {
    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

// ============================================================================
// Evidence
// ============================================================================

/// Source reliability tier. Closed set: L1 (highest) through L5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    L1,
    L2,
    L3,
    L4,
    L5,
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::L1 => write!(f, "L1"),
            Self::L2 => write!(f, "L2"),
            Self::L3 => write!(f, "L3"),
            Self::L4 => write!(f, "L4"),
            Self::L5 => write!(f, "L5"),
        }
    }
}

impl std::str::FromStr for ConfidenceTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "L1" => Ok(Self::L1),
            "L2" => Ok(Self::L2),
            "L3" => Ok(Self::L3),
            "L4" => Ok(Self::L4),
            "L5" => Ok(Self::L5),
            _ => Err(format!("Unknown confidence tier: {s}")),
        }
    }
}

/// A vetted source backing the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Source title
    pub title: String,
    /// Source URL (validated at build time)
    pub url: String,
    /// Reliability tier
    #[serde(alias = "level")]
    pub tier: ConfidenceTier,
    /// Date the source was captured
    #[serde(alias = "captured_at")]
    pub retrieved_at: NaiveDate,
}

// ============================================================================
// Scorecard
// ============================================================================

/// Five-dimension investment scorecard. Dimensions the upstream scorer did
/// not produce are simply absent and skipped when rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Team strength
    #[serde(default)]
    pub people: Option<f64>,
    /// Market potential
    #[serde(default)]
    pub market: Option<f64>,
    /// Traction
    #[serde(default)]
    pub traction: Option<f64>,
    /// Moat / defensibility
    #[serde(default)]
    pub moat: Option<f64>,
    /// Financing position
    #[serde(default)]
    pub financing: Option<f64>,
    /// Overall score
    #[serde(default)]
    pub total: Option<f64>,
    /// Scorer confidence in [0, 1]
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ScoreCard {
    /// Dimension rows in fixed render order: (key label, value).
    pub fn dimensions(&self) -> Vec<(&'static str, f64)> {
        [
            ("团队", self.people),
            ("市场", self.market),
            ("牵引力", self.traction),
            ("护城河", self.moat),
            ("融资", self.financing),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }

    /// True when no dimension carries a value.
    pub fn is_empty(&self) -> bool {
        self.dimensions().is_empty() && self.total.is_none()
    }
}

// ============================================================================
// Keywords
// ============================================================================

/// A keyword with a normalized weight in (0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub weight: f64,
}
