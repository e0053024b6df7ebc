//! Mermaid diagram block for the relationship graph.
//!
//! Grammar emitted:
//! - node declaration: `slug["Label (Kind)"]`
//! - directed edge:    `src -->|RELATION| dst`
//!
//! Nodes come out in declaration order, edges in report order, so the block
//! is deterministic for a given graph.

use crate::model::KnowledgeGraph;
use crate::render::RenderError;

/// Map an entity id to a diagram-safe identifier, e.g.
/// `company:blue` → `company_blue`.
pub(crate) fn slug(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Labels are display text; a double quote would end the node literal early
/// and angle brackets would leak markup into HTML embeddings, so all three
/// become Mermaid entities.
fn escape_label(label: &str) -> String {
    label
        .replace('"', "#quot;")
        .replace('<', "#lt;")
        .replace('>', "#gt;")
}

/// Relation kinds are part of the edge grammar and must stay inside
/// `[A-Za-z0-9_]`. Anything else is rejected.
fn is_safe_relation(relation: &str) -> bool {
    relation
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render the graph as a Mermaid `graph TD` block (without code fences).
pub fn render_graph(graph: &KnowledgeGraph) -> Result<String, RenderError> {
    let mut lines = vec!["graph TD".to_string()];

    for node in &graph.nodes {
        lines.push(format!(
            "    {}[\"{} ({})\"]",
            slug(&node.id),
            escape_label(&node.label),
            node.kind
        ));
    }

    for edge in &graph.edges {
        if !is_safe_relation(&edge.relation) {
            return Err(RenderError::UnsafeRelation {
                relation: edge.relation.clone(),
            });
        }
        if edge.relation.is_empty() {
            lines.push(format!("    {} --> {}", slug(&edge.source), slug(&edge.target)));
        } else {
            lines.push(format!(
                "    {} -->|{}| {}",
                slug(&edge.source),
                edge.relation,
                slug(&edge.target)
            ));
        }
    }

    Ok(lines.join("\n"))
}
