//! Report rendering for analysis runs.

use anyhow::Result;
use arrow::util::pretty::pretty_format_batches;
use lg_analyzer::{AnalysisResult, FileFormat, PartitionKind, ScanStats};
use serde::Serialize;

use crate::args::OutputFormat;
use crate::run::RunReport;

/// Print the run report to stdout in the requested format.
pub fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => print_json(report),
    }
}

fn print_text(report: &RunReport) -> Result<()> {
    let analysis = &report.analysis;

    let Some(kind) = analysis.partition_kind else {
        println!(
            "No date partitions found under s3://{}/{}",
            report.bucket, report.prefix
        );
        return Ok(());
    };

    let (title, noun) = match kind {
        PartitionKind::Day => ("Daily partition analysis", "day"),
        PartitionKind::Month => ("Monthly partition analysis", "month"),
    };

    println!("{title}");
    println!("  {:<18}s3://{}/{}", "Location:", report.bucket, report.prefix);
    println!(
        "  {:<18}{}",
        "Total partitions:",
        format_number(analysis.total_partitions as u64)
    );
    if let Some(min) = &analysis.min {
        println!("  {:<18}{}", format!("First {noun}:"), min);
    }
    if let Some(max) = &analysis.max {
        println!("  {:<18}{}", format!("Last {noun}:"), max);
    }

    if analysis.missing.is_empty() {
        println!("  No missing {noun}s");
    } else {
        println!("  Missing {noun}s ({}):", analysis.missing.len());
        for value in &analysis.missing {
            println!("    {value}");
        }
    }

    if let Some(sample) = &report.sample {
        println!();
        println!("Sample data preview ({}, {}):", sample.format, sample.key);
        let table = pretty_format_batches(std::slice::from_ref(&sample.batch))?;
        println!("{table}");
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    bucket: &'a str,
    prefix: &'a str,
    analysis: &'a AnalysisResult,
    stats: &'a ScanStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample: Option<JsonSample<'a>>,
}

#[derive(Serialize)]
struct JsonSample<'a> {
    key: &'a str,
    format: FileFormat,
    rows: usize,
}

fn print_json(report: &RunReport) -> Result<()> {
    let json = JsonReport {
        bucket: &report.bucket,
        prefix: &report.prefix,
        analysis: &report.analysis,
        stats: &report.stats,
        sample: report.sample.as_ref().map(|s| JsonSample {
            key: &s.key,
            format: s.format,
            rows: s.batch.num_rows(),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Format a large number with commas for readability.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;

    for c in s.chars().rev() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
        count += 1;
    }

    result.chars().rev().collect()
}
