//! Standalone HTML report renderer.
//!
//! Same content and section order as the Markdown renderer, wrapped in a
//! self-contained document with card styling. The Mermaid block is emitted
//! into a `<pre class="mermaid">` so environments that load mermaid.js
//! render it as a diagram and everything else shows the source.

use handlebars::Handlebars;
use serde_json::json;

use crate::render::{markdown::ANALYSIS_PLACEHOLDER, mermaid, RenderError};
use crate::report::Report;

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<title>{{title}}</title>
<style>
  body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "PingFang SC", "Hiragino Sans GB", "Microsoft YaHei", Arial, sans-serif; margin: 24px; line-height: 1.55; }
  h1, h2 { margin: 16px 0 8px; }
  table { width: 100%; border-collapse: collapse; }
  th, td { border: 1px solid #e5e7eb; padding: 8px; text-align: left; }
  .card { border: 1px solid #e5e7eb; border-radius: 12px; padding: 16px; margin-top: 16px; }
  .muted { color: #6b7280; }
  pre { background: #0b1021; color: #e5e7eb; padding: 12px; border-radius: 8px; overflow: auto; }
</style>
</head>
<body>
  <h1>🚀 创业公司分析报告 · {{company_name}}</h1>
  <div class="muted">生成时间：{{generated_at}}</div>

  <div class="card">
    <h2>🧩 核心要素</h2>
    <table>
      <tr><th>公司名称</th><td>{{company_name}}</td></tr>
      <tr><th>成立时间</th><td>{{founded}}</td></tr>
      <tr><th>所属领域</th><td>{{domains}}</td></tr>
      <tr><th>价值主张</th><td>{{value_proposition}}</td></tr>
      <tr><th>简介/产品</th><td>{{description}}</td></tr>
    </table>
  </div>

{{#if score_rows}}
  <div class="card">
    <h2>📊 投资评分</h2>
    <table>
      <thead><tr><th>维度</th><th>得分</th></tr></thead>
      <tbody>
      {{#each score_rows}}
        <tr><td>{{this.label}}</td><td>{{this.value}}</td></tr>
      {{/each}}
      {{#if score_total}}
        <tr><th>总分</th><th>{{score_total}}</th></tr>
      {{/if}}
      </tbody>
    </table>
    {{#if score_confidence}}
      <div class="muted">信心度：{{score_confidence}}</div>
    {{/if}}
  </div>
{{/if}}

  <div class="card">
    <h2>🧠 LLM 分析摘要（原文）</h2>
    <pre>{{analysis}}</pre>
  </div>

  <div class="card">
    <h2>🔗 关系图谱</h2>
    {{#if mermaid}}
      <pre class="mermaid">{{{mermaid}}}</pre>
      <div class="muted">（在支持 Mermaid 的环境中可直接渲染）</div>
    {{else}}
      <div class="muted">暂无图谱数据</div>
    {{/if}}
  </div>

{{#if keywords}}
  <div class="card">
    <h2>☁️ 关键词权重</h2>
    <table>
      <thead><tr><th>关键词</th><th>权重</th></tr></thead>
      <tbody>
      {{#each keywords}}
        <tr><td>{{this.word}}</td><td>{{this.weight}}</td></tr>
      {{/each}}
      </tbody>
    </table>
  </div>
{{/if}}

  <div class="card">
    <h2>🗂️ 证据与来源</h2>
    {{#if sources}}
      <table>
        <thead><tr><th>标题</th><th>URL</th><th>抓取时间</th><th>等级</th></tr></thead>
        <tbody>
        {{#each sources}}
          <tr>
            <td>{{this.title}}</td>
            <td><a href="{{this.url}}">{{this.url}}</a></td>
            <td>{{this.retrieved_at}}</td>
            <td>{{this.tier}}</td>
          </tr>
        {{/each}}
        </tbody>
      </table>
    {{else}}
      <div class="muted">暂无来源</div>
    {{/if}}
  </div>

  <div class="muted" style="margin-top:16px;">
    数据与方法：公开信息 + 知识图谱推理 + 大模型分析。<br/>
    本报告仅供参考，不构成投资建议。
  </div>
</body>
</html>
"#;

/// Render the full HTML document.
pub fn render_html(report: &Report) -> Result<String, RenderError> {
    // The Mermaid block goes in unescaped; its own renderer already rejects
    // unsafe relation kinds and neutralizes quote/angle characters in labels.
    let mermaid_block = if report.graph.is_empty() {
        None
    } else {
        Some(mermaid::render_graph(&report.graph)?)
    };

    let analysis = report.analysis_text.trim();
    let analysis = if analysis.is_empty() {
        ANALYSIS_PLACEHOLDER.trim_start_matches("> ")
    } else {
        analysis
    };

    let score_rows: Vec<serde_json::Value> = report
        .scorecard
        .iter()
        .flat_map(|card| card.dimensions())
        .map(|(label, value)| json!({ "label": label, "value": format!("{value:.1}") }))
        .collect();

    let data = json!({
        "title": format!("创业公司分析报告 · {}", report.company.name),
        "company_name": report.company.name,
        "generated_at": report.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        "founded": report.company.founded_date.format("%Y-%m-%d").to_string(),
        "domains": report.company.domains.iter().cloned().collect::<Vec<_>>().join(", "),
        "value_proposition": non_empty(&report.company.value_proposition),
        "description": non_empty(&report.company.description),
        "analysis": analysis,
        "mermaid": mermaid_block,
        "score_rows": score_rows,
        "score_total": report.scorecard.as_ref().and_then(|c| c.total).map(|t| format!("{t:.1}")),
        "score_confidence": report.scorecard.as_ref().and_then(|c| c.confidence).map(|c| format!("{:.0}%", c * 100.0)),
        "keywords": report.keywords.iter().map(|k| json!({
            "word": k.word,
            "weight": format!("{:.2}", k.weight),
        })).collect::<Vec<_>>(),
        "sources": report.evidence.iter().map(|item| json!({
            "title": item.title,
            "url": item.url,
            "retrieved_at": item.retrieved_at.format("%Y-%m-%d").to_string(),
            "tier": item.tier.to_string(),
        })).collect::<Vec<_>>(),
    });

    Ok(Handlebars::new().render_template(HTML_TEMPLATE, &data)?)
}

fn non_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}
