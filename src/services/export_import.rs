//! History export/import for Tizim Scan.
//!
//! Serializes the scan history into a versioned JSON envelope (and a CSV
//! view for spreadsheets), and validates incoming envelopes before the
//! history store reconciles them. Validation collects every problem at
//! once rather than failing on the first.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::{ExportError, ImportError};
use crate::types::history::HistoryEntry;

/// Version of the export envelope format.
pub const EXPORT_VERSION: u32 = 1;

/// Versioned envelope wrapping exported history entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryExport {
    pub version: u32,
    /// UNIX timestamp (seconds) at export time.
    pub exported_at: i64,
    pub entries: Vec<HistoryEntry>,
}

/// Serializes history entries into the pretty-printed JSON envelope.
pub fn export_json(entries: &[HistoryEntry]) -> Result<String, ExportError> {
    let export = HistoryExport {
        version: EXPORT_VERSION,
        exported_at: now(),
        entries: entries.to_vec(),
    };
    serde_json::to_string_pretty(&export).map_err(|e| ExportError::Serialization(e.to_string()))
}

/// Renders history entries as CSV with a header row.
///
/// Text fields are always quoted, with embedded quotes doubled.
pub fn export_csv(entries: &[HistoryEntry]) -> String {
    let mut rows = Vec::with_capacity(entries.len() + 1);
    rows.push("ID,Kind,Data,Recorded At,Favorite,Note".to_string());

    for entry in entries {
        let row = [
            entry.id.clone(),
            entry.kind().to_string(),
            csv_quote(&entry.raw),
            entry.recorded_at.to_string(),
            entry.favorite.to_string(),
            csv_quote(entry.note.as_deref().unwrap_or("")),
        ];
        rows.push(row.join(","));
    }

    rows.join("\n")
}

/// Parses and validates a JSON export envelope.
///
/// Returns `ImportError::Validation` carrying every problem found when the
/// payload parses but is not importable.
pub fn import_json(data: &str) -> Result<HistoryExport, ImportError> {
    let export: HistoryExport =
        serde_json::from_str(data).map_err(|e| ImportError::Parse(e.to_string()))?;

    let errors = validate_import(&export);
    if !errors.is_empty() {
        return Err(ImportError::Validation(errors));
    }
    Ok(export)
}

/// Collects validation problems in an export envelope.
pub fn validate_import(export: &HistoryExport) -> Vec<String> {
    let mut errors = Vec::new();

    if export.version == 0 || export.version > EXPORT_VERSION {
        errors.push(format!("Unsupported export version: {}", export.version));
    }

    let mut seen_ids = HashSet::new();
    for (index, entry) in export.entries.iter().enumerate() {
        if entry.id.is_empty() {
            errors.push(format!("Entry at index {} is missing an id", index));
        } else if !seen_ids.insert(entry.id.as_str()) {
            errors.push(format!("Duplicate entry id: {}", entry.id));
        }
        if entry.raw.is_empty() {
            errors.push(format!("Entry at index {} has an empty payload", index));
        }
    }

    errors
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
