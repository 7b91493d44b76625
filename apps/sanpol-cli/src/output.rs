//! Run report rendering.

use serde_json::Value;

use sanpol_engine::RunReport;

use crate::error::CliResult;

/// Render the report to stdout, as JSON or human-readable text.
pub fn render(report: &RunReport, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if report.simulate {
        println!("Check mode - no changes were submitted.");
        println!();
    }

    if !report.has_submissions() {
        match &report.message {
            Some(message) => println!("{message}"),
            None if report.failed => {}
            None => println!("No changes required. Policies are up to date."),
        }
    } else {
        let verb = if report.simulate { "Would apply" } else { "Applied" };
        println!("{verb}:");
        for entry in &report.updated {
            print_line('~', "\x1b[33m", "update", entry, detail(report, entry));
        }
        for entry in &report.created {
            print_line('+', "\x1b[32m", "create", entry, None);
        }
        for entry in &report.deleted {
            print_line('-', "\x1b[31m", "delete", entry, None);
        }
        for entry in &report.activated {
            print_line('*', "\x1b[36m", "activate", entry, None);
        }
    }

    for skipped in &report.skipped_deletions {
        println!("  (skipped '{skipped}': no such policy)");
    }

    println!();
    println!(
        "Summary: {} updated, {} created, {} deleted, {} activated; changed={}",
        report.updated.len(),
        report.created.len(),
        report.deleted.len(),
        report.activated.len(),
        report.changed
    );

    Ok(())
}

fn print_line(symbol: char, color: &str, action: &str, entry: &Value, detail: Option<String>) {
    let reset = "\x1b[0m";
    let name = entry.get("name").and_then(Value::as_str).unwrap_or("?");
    match detail {
        Some(detail) => println!("  {color}{symbol}{reset} {action} {name} ({detail})"),
        None => println!("  {color}{symbol}{reset} {action} {name}"),
    }
}

/// Changed field names for an update entry, from the diff echo.
fn detail(report: &RunReport, entry: &Value) -> Option<String> {
    let name = entry.get("name").and_then(Value::as_str)?;
    let diff = report.diffs.iter().find(|d| d.name == name)?;
    let fields: Vec<&str> = diff.changes.iter().map(|(k, _)| k.as_str()).collect();
    Some(fields.join(", "))
}
