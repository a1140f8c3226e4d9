//! Text formatting for CLI output.

use crate::index::{BuildReport, IndexStatus};
use crate::types::{ActorIndexEntry, ScanFailure, WorldDescriptor};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_status_text(status: &IndexStatus) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Data Status"));
    out.push_str(&format!("  Worlds path: {}\n", status.worlds_path));
    out.push_str(&format!(
        "  Available: {}\n",
        if status.available { "yes" } else { "no" }
    ));
    out.push_str(&format!("  Worlds: {}\n", status.world_count));
    match status.built_at {
        Some(built_at) => {
            out.push_str(&format!("  Built at: {}\n", built_at.to_rfc3339()));
            out.push_str(&format!("  Actors: {}\n", status.entry_count));
            out.push_str(&format!("  Skipped: {}\n", status.failure_count));
        }
        None => out.push_str("  Index: not built\n"),
    }
    out
}

pub fn format_worlds_text(worlds: &[WorldDescriptor], failures: &[ScanFailure]) -> String {
    if worlds.is_empty() {
        return "No worlds found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Name", "Path"]);
    for world in worlds {
        table.add_row(vec![
            world.id.clone(),
            world.name.clone(),
            world.storage_path.display().to_string(),
        ]);
    }
    let mut out = format!("{}\n", table);
    if !failures.is_empty() {
        out.push('\n');
        out.push_str(&format_failures_text(failures));
    }
    out
}

pub fn format_failures_text(failures: &[ScanFailure]) -> String {
    let mut out = format!("{}\n", format_section_heading("Skipped"));
    for failure in failures {
        out.push_str(&format!("  [{:?}] {}: {}\n", failure.kind, failure.path, failure.reason));
    }
    out
}

pub fn format_build_text(report: &BuildReport) -> String {
    let mut out = format!(
        "Indexed {} actors across {} worlds in {} ms",
        report.entries.len(),
        report.worlds.len(),
        report.duration_ms
    );
    if !report.failures.is_empty() {
        out.push_str(&format!(" ({} skipped)", report.failures.len()));
    }
    if !report.installed {
        out.push_str("\nA newer build finished first; this result was not installed.");
    }
    out
}

pub fn format_entry_text(entry: &ActorIndexEntry) -> String {
    format!("{} ({})\n  {}", entry.name.bold(), entry.world, entry.locator)
}

pub fn format_entries_text(entries: &[ActorIndexEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "World", "Locator"]);
    for entry in entries {
        table.add_row(vec![
            entry.name.clone(),
            entry.world.clone(),
            entry.locator.to_string(),
        ]);
    }
    table.to_string()
}
