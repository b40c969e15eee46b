use std::io::Write;
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::types::{ExpectedStructure, ValidationReport};

pub const PASSED_MESSAGE: &str = "✅ Structure validation passed";
pub const FAILED_HEADER: &str = "❌ Structure validation failed:";

/// How a report is written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct JsonReport {
    passed: bool,
    mismatches: Vec<JsonMismatch>,
}

#[derive(Debug, Serialize)]
struct JsonMismatch {
    kind: &'static str,
    path: String,
    message: String,
}

pub fn render<W: Write + ?Sized>(report: &ValidationReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(report, out),
        OutputFormat::Json => render_json(report, out),
    }
}

pub fn render_text<W: Write + ?Sized>(report: &ValidationReport, out: &mut W) -> Result<()> {
    if report.is_success() {
        writeln!(out, "{}", PASSED_MESSAGE)?;
    } else {
        writeln!(out, "{}", FAILED_HEADER)?;
        for mismatch in report.mismatches() {
            writeln!(out, "  - {}", mismatch)?;
        }
    }
    Ok(())
}

pub fn render_json<W: Write + ?Sized>(report: &ValidationReport, out: &mut W) -> Result<()> {
    let json = JsonReport {
        passed: report.is_success(),
        mismatches: report
            .mismatches()
            .iter()
            .map(|m| JsonMismatch {
                kind: m.kind(),
                path: m.path(),
                message: m.to_string(),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}

/// Print the expected table, one directory per line followed by its files
pub fn render_structure<W: Write + ?Sized>(structure: &ExpectedStructure, out: &mut W) -> Result<()> {
    for entry in structure.entries() {
        writeln!(out, "{}/", entry.path)?;
        for file in &entry.files {
            writeln!(out, "  {}", file)?;
        }
    }
    Ok(())
}
