//! Scout Report CLI - render startup analysis payloads into report documents.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use scout_common::config::Config;
use scout_common::error::Error;
use scout_common::logging::init_logging;
use scout_report::{Report, ReportFormat, ReportInput};

/// Startup profile report renderer.
#[derive(Parser, Debug)]
#[command(name = "scout-report")]
#[command(version)]
#[command(about = "Render startup analysis payloads into Markdown/HTML/JSON reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a payload and write report artifacts
    Render {
        /// Path to the upstream analysis payload (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Output formats (markdown, html, json); defaults to the configured set
        #[arg(long = "format")]
        formats: Vec<String>,

        /// Output directory, or a file path when a single format is rendered
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate a payload without rendering anything
    Validate {
        /// Path to the upstream analysis payload (JSON)
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("scout-report v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            input,
            formats,
            output,
        } => render_command(&config, &input, formats, output),
        Commands::Validate { input } => validate_command(&input),
    }
}

/// Read and deserialize the upstream payload.
fn load_input(path: &Path) -> scout_common::Result<ReportInput> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    let input = serde_json::from_str(&raw)?;
    Ok(input)
}

fn render_command(
    config: &Config,
    input: &Path,
    formats: Vec<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let payload = load_input(input).context("Failed to load analysis payload")?;
    let report = payload
        .into_builder()
        .auto_keywords(config.report.top_keywords)
        .build()?;

    let format_names = if formats.is_empty() {
        config.report.formats.clone()
    } else {
        formats
    };
    let formats = parse_formats(&format_names)?;

    let output = output.unwrap_or_else(|| config.report.output_dir.clone());
    if formats.len() > 1 && output.extension().is_some() {
        bail!(
            "--output {} looks like a file path, but {} formats were requested",
            output.display(),
            formats.len()
        );
    }

    for format in formats {
        let path = if output.extension().is_some() {
            report.save_to_file(&output, format)?
        } else {
            let stem = file_stem(&report.company.name);
            report.save_to_file(&output.join(stem), format)?
        };
        tracing::info!(format = %format, path = %path.display(), "Report artifact written");
        println!("{}", path.display());
    }

    Ok(())
}

fn validate_command(input: &Path) -> Result<()> {
    let payload = load_input(input).context("Failed to load analysis payload")?;
    let report = Report::from_input(payload)?;

    tracing::info!(
        company = %report.company.name,
        relationships = report.graph.edges.len(),
        evidence = report.evidence.len(),
        "Payload is valid"
    );
    println!("OK: {}", report.company.name);
    Ok(())
}

fn parse_formats(names: &[String]) -> Result<Vec<ReportFormat>> {
    let mut formats = Vec::new();
    for name in names {
        let format = ReportFormat::from_str(name).map_err(Error::InvalidInput)?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    if formats.is_empty() {
        bail!("No output formats requested");
    }
    Ok(formats)
}

/// Artifact file stem derived from the company name, e.g. `blue_report`.
fn file_stem(company_name: &str) -> String {
    let slug: String = company_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_report", slug.trim_matches('_'))
}
