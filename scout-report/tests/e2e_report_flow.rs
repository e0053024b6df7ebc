//! End-to-end integration tests for the report generation flow.
//!
//! Tests the complete pipeline:
//! Upstream payload (JSON) → validation/build → rendering → artifacts
//!
//! These tests use a realistic payload shaped like the upstream analysis
//! pipeline's output.

use chrono::{TimeZone, Utc};

use scout_report::{Report, ReportFormat, ReportInput, ValidationError};

// ============================================================================
// Test Payloads
// ============================================================================

fn blue_payload() -> &'static str {
    r#"{
        "company": {
            "name": "Blue",
            "founded_date": "2024-01-01",
            "domains": ["AI", "hardware", "speech-recognition"],
            "one_liner": "True voice control for your phone.",
            "product_description": "Voice assistant enabling hands-free operation across apps."
        },
        "raw_response": "Blue 将语音助手带到移动端，语音助手聚焦无障碍场景。",
        "graph": {
            "nodes": [
                {"id": "company:blue", "label": "Blue", "type": "Company"},
                {"id": "person:omar", "label": "Omar", "type": "Person"},
                {"id": "investor:yc", "label": "Y Combinator", "type": "Investor"}
            ],
            "edges": [
                {"source": "company:blue", "target": "person:omar", "rel": "FOUNDED_BY"},
                {"source": "investor:yc", "target": "company:blue", "rel": "INVESTED_IN"}
            ]
        },
        "scoring": {"people": 26, "market": 18, "traction": 12, "moat": 10, "financing": 6, "total": 72, "confidence": 0.65},
        "sources": [
            {"title": "Company Website", "url": "https://heyblue.com", "level": "L2", "captured_at": "2025-08-13"}
        ],
        "keywords": [
            {"word": "语音助手", "weight": 0.9},
            {"word": "无障碍", "weight": 0.6}
        ]
    }"#
}

fn build_blue_report() -> Report {
    let input: ReportInput = serde_json::from_str(blue_payload()).unwrap();
    input
        .into_builder()
        .generated_at(Utc.with_ymd_and_hms(2025, 8, 13, 10, 0, 0).unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// Full Flow
// ============================================================================

#[test]
fn payload_renders_in_every_format() {
    let report = build_blue_report();

    let md = report.render(ReportFormat::Markdown).unwrap();
    assert!(md.contains("| 公司名称 | Blue |"));
    assert!(md.contains("| 所属领域 | AI, hardware, speech-recognition |"));
    assert!(md.contains("company_blue -->|FOUNDED_BY| person_omar"));
    assert!(md.contains("investor_yc -->|INVESTED_IN| company_blue"));
    assert!(md.contains("| 语音助手 | 0.90 |"));
    assert!(md.contains("| **总分** | **72.0** |"));

    let html = report.render(ReportFormat::Html).unwrap();
    assert!(html.contains("Y Combinator (Investor)"));
    assert!(html.contains("<td>L2</td>"));

    let json = report.render(ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["company"]["name"], "Blue");
    assert_eq!(value["graph"]["edges"].as_array().unwrap().len(), 2);
}

#[test]
fn identical_input_and_timestamp_render_identically() {
    let input_a: ReportInput = serde_json::from_str(blue_payload()).unwrap();
    let input_b: ReportInput = serde_json::from_str(blue_payload()).unwrap();
    let ts = Utc.with_ymd_and_hms(2025, 8, 13, 10, 0, 0).unwrap();

    let report_a = input_a.into_builder().generated_at(ts).build().unwrap();
    let report_b = input_b.into_builder().generated_at(ts).build().unwrap();

    for format in [ReportFormat::Markdown, ReportFormat::Html] {
        assert_eq!(
            report_a.render(format).unwrap(),
            report_b.render(format).unwrap(),
            "{format} output diverged for identical input"
        );
    }
}

#[test]
fn diagram_edges_match_payload_order() {
    let report = build_blue_report();
    let md = report.render(ReportFormat::Markdown).unwrap();

    let edge_lines: Vec<&str> = md.lines().filter(|l| l.contains("-->")).collect();
    assert_eq!(edge_lines.len(), 2);
    assert!(edge_lines[0].contains("FOUNDED_BY"));
    assert!(edge_lines[1].contains("INVESTED_IN"));
}

#[test]
fn invalid_payload_never_becomes_a_report() {
    let payload = r#"{
        "company": {"name": "", "founded_date": "2024-01-01"},
        "graph": {
            "nodes": [],
            "edges": [{"source": "company:ghost", "target": "person:ghost", "rel": "FOUNDED_BY"}]
        }
    }"#;

    let input: ReportInput = serde_json::from_str(payload).unwrap();
    let err = Report::from_input(input).unwrap_err();
    match err {
        ValidationError::Multiple(errors) => {
            // Empty name plus two unresolvable endpoints
            assert_eq!(errors.len(), 3);
        }
        other => panic!("expected Multiple, got {other:?}"),
    }
}

#[test]
fn keyword_fallback_kicks_in_when_payload_has_none() {
    let mut payload: serde_json::Value = serde_json::from_str(blue_payload()).unwrap();
    payload["keywords"] = serde_json::Value::Array(vec![]);
    payload["raw_response"] = "voice voice voice 语音助手 语音助手 无障碍".into();

    let input: ReportInput = serde_json::from_value(payload).unwrap();
    let report = Report::from_input(input).unwrap();

    // Derived from the narrative text; most frequent word first
    assert_eq!(report.keywords[0].word, "voice");
    assert!(report.keywords.iter().any(|k| k.word == "语音助手"));
}
