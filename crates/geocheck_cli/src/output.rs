use anyhow::Result;
use colored::*;
use geocheck_cad::{CadValidationResult, LayerRequirements, LayerSpec};
use geocheck_core::{ColumnMapping, ColumnProfile, FindingRecord, RuleMetadata, Severity};
use geocheck_validator::{Checker, ValidationSummary};
use serde::Serialize;
use serde_json::json;

pub fn print_validation_summary(summary: &ValidationSummary, format: &str) -> Result<()> {
    match format {
        "json" => print_json(summary),
        _ => {
            print_text_summary(summary);
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn banner(title: &str) {
    println!("\n{}", "═".repeat(60));
    println!("{}", format!("  {}", title).bold());
    println!("{}", "═".repeat(60));
}

fn print_verdict(passed: bool) {
    if passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }
}

fn finding_line(record: &FindingRecord) -> String {
    let mut line = format!(
        "Row {} [{}] {}: {}",
        record.display_row, record.rule_id, record.column, record.message
    );
    if let Some(suggestion) = &record.suggestion {
        line.push_str(&format!(" ({})", suggestion));
    }
    line
}

fn print_findings(records: &[&FindingRecord], heading: &str, paint: fn(&str) -> ColoredString) {
    if records.is_empty() {
        return;
    }
    println!("\n{}", paint(heading).bold());
    for (i, record) in records.iter().enumerate() {
        println!("  {}. {}", i + 1, paint(&finding_line(record)));
    }
}

fn print_text_summary(summary: &ValidationSummary) {
    banner("VALIDATION REPORT");
    print_verdict(summary.error_count == 0);

    let of_severity = |severity: Severity| {
        summary
            .errors
            .iter()
            .filter(|r| r.severity == severity)
            .collect::<Vec<_>>()
    };
    print_findings(&of_severity(Severity::Error), "Errors:", |s| s.red());
    print_findings(&of_severity(Severity::Warning), "Warnings:", |s| s.yellow());
    print_findings(&of_severity(Severity::Info), "Info:", |s| s.blue());

    if !summary.errors_by_category.is_empty() {
        println!("\n{}", "By category:".bold());
        for (category, count) in &summary.errors_by_category {
            println!("  {:<14}{}", category, count);
        }
    }

    for (dimension, breakdown) in &summary.dimensions {
        println!("\n{}", format!("{}:", dimension).bold());
        for (value, counts) in breakdown {
            println!(
                "  {:<20}{} rows, {} errors, {} warnings",
                value, counts.total, counts.errors, counts.warnings
            );
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total rows:     {}", summary.total_rows);
    println!("  Passed rows:    {}", summary.passed_rows);
    println!("  Pass rate:      {:.1}%", summary.pass_rate);
    println!("  Total errors:   {}", summary.error_count);
    println!("  Total warnings: {}", summary.warning_count);
    println!("  Total info:     {}", summary.info_count);
    println!(
        "  Rules:          {} executed, {} skipped",
        summary.rules_executed.len(),
        summary.rules_skipped.len()
    );
    println!("{}", "═".repeat(60));
}

pub fn print_rule_catalogue(rules: &[&RuleMetadata], format: &str) -> Result<()> {
    if format == "json" {
        return print_json(rules);
    }

    banner("RULE CATALOGUE");
    for rule in rules {
        let severity = match rule.severity {
            Severity::Error => rule.severity.as_str().red(),
            Severity::Warning => rule.severity.as_str().yellow(),
            Severity::Info => rule.severity.as_str().blue(),
        };
        println!(
            "\n{} {} [{}] ({})",
            rule.id.bold(),
            rule.name,
            severity,
            rule.category
        );
        if !rule.description.is_empty() {
            println!("  {}", rule.description);
        }
        if !rule.required_columns.is_empty() {
            println!("  Requires: {}", rule.required_columns.join(", "));
        }
    }
    println!("\n{} rules", rules.len());
    Ok(())
}

pub fn print_column_profile(
    data_path: &str,
    rows: usize,
    profile: &[ColumnProfile],
    detected: &ColumnMapping,
    format: &str,
) -> Result<()> {
    if format == "json" {
        return print_json(&json!({
            "filename": data_path,
            "rows": rows,
            "columns": profile,
            "detected_columns": detected,
        }));
    }

    print_info(&format!("{}: {} rows, {} columns", data_path, rows, profile.len()));
    println!();
    for column in profile {
        let detected_as = match &column.detected_as {
            Some(field) => format!("→ {}", field).green(),
            None => "-".dimmed(),
        };
        println!(
            "  {:<24}{:<16}{}",
            column.name,
            detected_as,
            column.sample_values.join(", ")
        );
    }
    println!("\n  {} of {} columns detected", detected.len(), profile.len());
    Ok(())
}

pub fn print_checkers(checkers: &[Checker], format: &str) -> Result<()> {
    if format == "json" {
        return print_json(checkers);
    }

    banner("CHECKERS");
    for checker in checkers {
        println!("\n{} {}", checker.id.bold(), checker.name);
        println!("  {}", checker.description);
        match checker.rule_ids {
            Some(ids) => println!("  Rules: {}", ids.join(", ")),
            None => println!("  Rules: all"),
        }
        if !checker.required_columns.is_empty() {
            println!("  Columns: {}", checker.required_columns.join(", "));
        }
    }
    Ok(())
}

pub fn print_layer_requirements(requirements: &LayerRequirements, format: &str) -> Result<()> {
    if format == "json" {
        return print_json(requirements);
    }

    banner("BBL LAYER STANDARD");
    print_layers("Checked layers:", &requirements.required);
    print_layers("Optional layers:", &requirements.optional);
    Ok(())
}

fn print_layers(heading: &str, layers: &[LayerSpec]) {
    println!("\n{}", heading.bold());
    for layer in layers {
        let marker = if layer.mandatory { "*".red().bold() } else { " ".normal() };
        println!(
            "  {}{:<22}{:>4}  {}",
            marker, layer.name, layer.color, layer.description
        );
    }
}

pub fn print_cad_report(result: &CadValidationResult, format: &str) -> Result<()> {
    if format == "json" {
        return print_json(&result.summary());
    }

    banner("CAD VALIDATION REPORT");
    print_verdict(result.is_valid());

    if !result.findings.is_empty() {
        println!("\n{}", "Findings:".bold());
        for (i, finding) in result.findings.iter().enumerate() {
            let line = format!("[{}] {}: {}", finding.rule_id, finding.rule_name, finding.message);
            let line = match finding.severity {
                Severity::Error => line.red(),
                Severity::Warning => line.yellow(),
                Severity::Info => line.normal(),
            };
            println!("  {}. {}", i + 1, line);
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  File:           {}", result.filename);
    println!("  Layers:         {}", result.layers_found.len());
    println!("  Rooms:          {}", result.room_count);
    println!("  Total area:     {:.2} m²", result.total_area);
    println!("  Entities:       {}", result.statistics.total_entities);
    println!("  Total errors:   {}", result.error_count());
    println!("  Total warnings: {}", result.warning_count());
    println!("{}", "═".repeat(60));
    Ok(())
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
