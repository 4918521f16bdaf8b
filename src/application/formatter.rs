//! Output formatting for places and sync reports.
//!
//! Supports multiple output formats: table, JSON, and the plain
//! `target label` lines GTK uses.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{BookmarkBackend, Place, SyncReport, WriteOutcome};

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Table view.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
    /// One `target label` per line.
    Plain,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "plain" | "text" => Ok(Self::Plain),
            _ => Err(format!("Unknown format: {s}. Use: table, json, plain")),
        }
    }
}

/// Formats places as a table.
pub fn format_places_table(places: &[Place]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Label", "Target"]);

    for (i, place) in places.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), place.label.clone(), place.target.clone()]);
    }

    table.to_string()
}

/// Formats places as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_places_json(places: &[Place]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(places)
}

/// Formats places as `target label` lines.
pub fn format_places_plain(places: &[Place]) -> String {
    places
        .iter()
        .map(|p| {
            if p.label.is_empty() {
                p.target.clone()
            } else {
                format!("{} {}", p.target, p.label)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the outcome of a sync, one line per destination.
pub fn format_sync_report(report: &SyncReport) -> String {
    let mut out = format!(
        "{} {} places from {}",
        "↻".bold(),
        report.place_count.to_string().cyan(),
        report.source.bold()
    );

    for dest in &report.destinations {
        let line = match &dest.outcome {
            WriteOutcome::Written(count) => {
                format!("  {} {}: {} places", "✓".green().bold(), dest.backend, count)
            }
            WriteOutcome::Failed(message) => {
                format!("  {} {}: {}", "✗".red().bold(), dest.backend, message.red())
            }
        };
        out.push('\n');
        out.push_str(&line);
    }

    out
}

/// Formats the registered backends with their store paths.
pub fn format_backend_paths<'a>(backends: impl Iterator<Item = &'a dyn BookmarkBackend>) -> String {
    backends
        .map(|b| {
            let state = if b.path().exists() {
                "present".green()
            } else {
                "absent".yellow()
            };
            format!("  {:<4} [{}] {}", b.name(), state, b.path().display())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DestinationReport;

    fn places() -> Vec<Place> {
        vec![Place::new("Docs", "file:///docs"), Place::new("", "sftp://h/x")]
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!(matches!("plain".parse::<OutputFormat>(), Ok(OutputFormat::Plain)));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_plain_matches_gtk_lines() {
        assert_eq!(format_places_plain(&places()), "file:///docs Docs\nsftp://h/x");
    }

    #[test]
    fn test_json_roundtrips_places() {
        let json = format_places_json(&places()).unwrap();
        let parsed: Vec<Place> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, places());
    }

    #[test]
    fn test_table_lists_every_place() {
        let table = format_places_table(&places());
        assert!(table.contains("file:///docs"));
        assert!(table.contains("sftp://h/x"));
    }

    #[test]
    fn test_report_mentions_failures() {
        colored::control::set_override(false);
        let report = SyncReport {
            source: "gtk",
            place_count: 2,
            destinations: vec![
                DestinationReport {
                    backend: "kde",
                    outcome: WriteOutcome::Written(2),
                },
                DestinationReport {
                    backend: "qt",
                    outcome: WriteOutcome::Failed("IO error: denied".into()),
                },
            ],
        };

        let text = format_sync_report(&report);

        assert!(text.contains("kde: 2 places"));
        assert!(text.contains("qt: IO error: denied"));
    }
}
