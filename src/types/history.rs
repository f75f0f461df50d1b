use serde::{Deserialize, Serialize};

use super::scan::{ScanFields, ScanKind, ScanResult};

/// Persisted record of a past scan with user annotations.
///
/// `raw` and `fields` are copied from the originating [`ScanResult`] at
/// creation time and never change afterwards; only `favorite` and `note`
/// are mutable through the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub raw: String,
    pub fields: Option<ScanFields>,
    /// UNIX timestamp (seconds) of capture.
    pub recorded_at: i64,
    pub favorite: bool,
    pub note: Option<String>,
}

impl HistoryEntry {
    pub fn kind(&self) -> ScanKind {
        match &self.fields {
            Some(fields) => fields.kind(),
            None => ScanKind::PlainText,
        }
    }

    /// Rebuilds the scan result this entry was created from, for replay
    /// through the action router.
    pub fn to_result(&self) -> ScanResult {
        ScanResult {
            raw: self.raw.clone(),
            fields: self.fields.clone(),
        }
    }
}
