//! Markdown report renderer.
//!
//! Section order is fixed: header, core-facts table, scorecard, analysis
//! text, relationship diagram, keyword table, evidence table, disclaimer
//! footer. Optional sections (scorecard, keywords) drop out entirely when
//! there is nothing to show; the mandatory ones fall back to a placeholder
//! line instead.

use crate::render::{mermaid, RenderError};
use crate::report::Report;

/// Literal shown when the narrative analysis text is empty.
pub const ANALYSIS_PLACEHOLDER: &str = "> 暂无分析内容";

/// Escape a value so it cannot break out of its table cell.
fn escape_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace('\r', "")
        .replace('\n', "<br>")
}

/// Escaped cell content, or an em dash when there is nothing to show.
fn cell_or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "—".to_string()
    } else {
        escape_cell(value)
    }
}

/// Render the full Markdown document.
pub fn render_markdown(report: &Report) -> Result<String, RenderError> {
    let mut md = String::new();

    // Header
    md.push_str(&format!(
        "# 🚀 创业公司分析报告 · {}\n\n",
        report.company.name
    ));
    md.push_str(&format!(
        "**生成时间**: {}\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    // Core facts
    md.push_str("## 🧩 核心要素\n\n");
    md.push_str("| 要素 | 内容 |\n");
    md.push_str("|---|---|\n");
    md.push_str(&format!(
        "| 公司名称 | {} |\n",
        escape_cell(&report.company.name)
    ));
    md.push_str(&format!(
        "| 成立时间 | {} |\n",
        report.company.founded_date.format("%Y-%m-%d")
    ));
    let domains = report
        .company
        .domains
        .iter()
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    md.push_str(&format!("| 所属领域 | {} |\n", cell_or_dash(&domains)));
    md.push_str(&format!(
        "| 价值主张 | {} |\n",
        cell_or_dash(&report.company.value_proposition)
    ));
    md.push_str(&format!(
        "| 简介/产品 | {} |\n",
        cell_or_dash(&report.company.description)
    ));
    md.push('\n');

    // Scorecard
    if let Some(card) = report.scorecard.as_ref().filter(|c| !c.is_empty()) {
        md.push_str("## 📊 投资评分\n\n");
        md.push_str("| 维度 | 得分 |\n");
        md.push_str("|---|---|\n");
        for (label, value) in card.dimensions() {
            md.push_str(&format!("| {label} | {value:.1} |\n"));
        }
        if let Some(total) = card.total {
            md.push_str(&format!("| **总分** | **{total:.1}** |\n"));
        }
        md.push('\n');
        if let Some(confidence) = card.confidence {
            md.push_str(&format!("**信心度**: {:.0}%\n\n", confidence * 100.0));
        }
    }

    // Analysis text
    md.push_str("## 🧠 LLM 分析摘要（原文）\n\n");
    let analysis = report.analysis_text.trim();
    if analysis.is_empty() {
        md.push_str(ANALYSIS_PLACEHOLDER);
    } else {
        md.push_str(analysis);
    }
    md.push_str("\n\n");

    // Relationship diagram
    md.push_str("## 🔗 关系图谱\n\n");
    if report.graph.is_empty() {
        md.push_str("> 暂无图谱数据\n\n");
    } else {
        let diagram = mermaid::render_graph(&report.graph)?;
        md.push_str("```mermaid\n");
        md.push_str(&diagram);
        md.push_str("\n```\n\n");
    }

    // Keywords
    if !report.keywords.is_empty() {
        md.push_str("## ☁️ 关键词权重\n\n");
        md.push_str("| 关键词 | 权重 |\n");
        md.push_str("|---|---|\n");
        for keyword in &report.keywords {
            md.push_str(&format!(
                "| {} | {:.2} |\n",
                escape_cell(&keyword.word),
                keyword.weight
            ));
        }
        md.push('\n');
    }

    // Evidence
    md.push_str("## 🗂️ 证据与来源\n\n");
    if report.evidence.is_empty() {
        md.push_str("> 暂无来源\n\n");
    } else {
        md.push_str("| 标题 | URL | 抓取时间 | 等级 |\n");
        md.push_str("|---|---|---|---|\n");
        for item in &report.evidence {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                escape_cell(&item.title),
                escape_cell(&item.url),
                item.retrieved_at.format("%Y-%m-%d"),
                item.tier
            ));
        }
        md.push('\n');
    }

    // Footer
    md.push_str("---\n\n");
    md.push_str("**数据与方法**：公开信息 + 知识图谱推理 + 大模型分析\n\n");
    md.push_str("_本报告仅供参考，不构成投资建议。_\n");

    Ok(md)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CompanyRecord, ConfidenceTier, EntityKind, EvidenceItem, GraphNode, Relationship,
        ScoreCard,
    };
    use crate::report::ReportBuilder;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn blue_report() -> Report {
        ReportBuilder::new(CompanyRecord {
            name: "Blue".into(),
            founded_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            domains: ["AI".to_string(), "hardware".to_string()].into(),
            value_proposition: "True voice control for your phone.".into(),
            description: "Voice assistant enabling hands-free operation across apps.".into(),
        })
        .graph(crate::model::KnowledgeGraph {
            nodes: vec![
                GraphNode {
                    id: "company:blue".into(),
                    label: "Blue".into(),
                    kind: EntityKind::Company,
                },
                GraphNode {
                    id: "person:omar".into(),
                    label: "Omar".into(),
                    kind: EntityKind::Person,
                },
            ],
            edges: vec![Relationship {
                source: "company:blue".into(),
                target: "person:omar".into(),
                relation: "FOUNDED_BY".into(),
            }],
        })
        .evidence(vec![EvidenceItem {
            title: "Company Website".into(),
            url: "https://heyblue.com".into(),
            tier: ConfidenceTier::L2,
            retrieved_at: NaiveDate::from_ymd_opt(2025, 8, 13).unwrap(),
        }])
        .generated_at(Utc.with_ymd_and_hms(2025, 8, 13, 10, 0, 0).unwrap())
        .build()
        .unwrap()
    }

    #[test]
    fn test_blue_scenario_output() {
        let md = render_markdown(&blue_report()).unwrap();

        assert!(md.starts_with("# 🚀 创业公司分析报告 · Blue\n"));
        assert!(md.contains("**生成时间**: 2025-08-13 10:00:00"));
        assert!(md.contains("| 公司名称 | Blue |"));
        assert!(md.contains("| 成立时间 | 2024-01-01 |"));
        assert!(md.contains("| 所属领域 | AI, hardware |"));
        assert!(md.contains("company_blue -->|FOUNDED_BY| person_omar"));

        // Evidence row ends with the confidence tier cell
        let evidence_row = md
            .lines()
            .find(|l| l.starts_with("| Company Website"))
            .unwrap();
        assert!(evidence_row.ends_with("| L2 |"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let report = blue_report();
        assert_eq!(
            render_markdown(&report).unwrap(),
            render_markdown(&report).unwrap()
        );
    }

    #[test]
    fn test_empty_analysis_gets_placeholder() {
        let md = render_markdown(&blue_report()).unwrap();
        assert!(md.contains("## 🧠 LLM 分析摘要（原文）\n\n> 暂无分析内容\n"));
    }

    #[test]
    fn test_edge_lines_match_relationship_count_and_order() {
        let mut report = blue_report();
        report.graph.edges.push(Relationship {
            source: "person:omar".into(),
            target: "company:blue".into(),
            relation: "ADVISES".into(),
        });

        let md = render_markdown(&report).unwrap();
        let edge_lines: Vec<&str> = md.lines().filter(|l| l.contains("-->")).collect();
        assert_eq!(edge_lines.len(), report.graph.edges.len());
        assert!(edge_lines[0].contains("FOUNDED_BY"));
        assert!(edge_lines[1].contains("ADVISES"));
    }

    #[test]
    fn test_empty_graph_and_evidence_placeholders() {
        let mut report = blue_report();
        report.graph = Default::default();
        report.evidence.clear();

        let md = render_markdown(&report).unwrap();
        assert!(md.contains("## 🔗 关系图谱\n\n> 暂无图谱数据\n"));
        assert!(md.contains("## 🗂️ 证据与来源\n\n> 暂无来源\n"));
        assert!(!md.contains("```mermaid"));
    }

    #[test]
    fn test_scorecard_section() {
        let mut report = blue_report();
        report.scorecard = Some(ScoreCard {
            people: Some(26.0),
            market: Some(18.0),
            traction: Some(12.0),
            moat: Some(10.0),
            financing: Some(6.0),
            total: Some(72.0),
            confidence: Some(0.65),
        });

        let md = render_markdown(&report).unwrap();
        assert!(md.contains("## 📊 投资评分"));
        assert!(md.contains("| 团队 | 26.0 |"));
        assert!(md.contains("| **总分** | **72.0** |"));
        assert!(md.contains("**信心度**: 65%"));
        // Scorecard sits between the core facts and the analysis section
        let score_pos = md.find("## 📊").unwrap();
        assert!(score_pos > md.find("## 🧩").unwrap());
        assert!(score_pos < md.find("## 🧠").unwrap());
    }

    #[test]
    fn test_pipes_in_values_cannot_break_the_table() {
        let mut report = blue_report();
        report.company.description = "left | right\nsecond line".into();

        let md = render_markdown(&report).unwrap();
        assert!(md.contains("| 简介/产品 | left \\| right<br>second line |"));
    }

    #[test]
    fn test_unsafe_relation_fails_whole_render() {
        let mut report = blue_report();
        report.graph.edges[0].relation = "FOUNDED BY".into();

        assert!(matches!(
            render_markdown(&report),
            Err(RenderError::UnsafeRelation { .. })
        ));
    }

    #[test]
    fn test_footer_is_last() {
        let md = render_markdown(&blue_report()).unwrap();
        assert!(md.ends_with("---\n\n**数据与方法**：公开信息 + 知识图谱推理 + 大模型分析\n\n_本报告仅供参考，不构成投资建议。_\n"));
    }
}
