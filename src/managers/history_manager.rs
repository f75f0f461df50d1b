//! History Manager for Tizim Scan.
//!
//! Implements `HistoryStoreTrait` — the persisted, ordered, deduplicated
//! record of past scans, with favorite-marking, annotation, search, and
//! capped eviction. The in-memory list is authoritative for the session;
//! every mutation triggers a best-effort persist through the generic
//! key-value storage backend, and persistence failures are logged, never
//! surfaced.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::classifier::Classifier;
use crate::storage::StorageBackend;
use crate::types::history::HistoryEntry;
use crate::types::scan::ScanFields;

/// Maximum number of retained history entries.
pub const HISTORY_CAP: usize = 100;

/// Key the serialized history snapshot is stored under.
pub const STORAGE_KEY: &str = "qr-history-storage";

/// Trait defining history store operations.
///
/// `remove`, `toggle_favorite` and `update_note` are no-ops for unknown
/// ids — a stale id from the UI layer must never error or resurrect state.
pub trait HistoryStoreTrait {
    /// Classifies `raw`, supersedes any prior entry with the same payload,
    /// and prepends the new entry. Returns the new entry's id.
    fn record(&mut self, raw: &str) -> String;
    fn remove(&mut self, id: &str);
    fn clear(&mut self);
    fn toggle_favorite(&mut self, id: &str);
    fn update_note(&mut self, id: &str, note: &str);
    fn get(&self, id: &str) -> Option<&HistoryEntry>;
    /// All entries, newest first.
    fn list(&self) -> &[HistoryEntry];
    /// Favorited entries, newest first.
    fn list_favorites(&self) -> Vec<&HistoryEntry>;
    /// Case-insensitive substring search over raw payload, note, and
    /// URL/email sub-fields, preserving recency order.
    fn search(&self, query: &str) -> Vec<&HistoryEntry>;
    /// Reconciles imported entries into the store. Entries whose payload is
    /// already present win only when newer. Returns how many entries were
    /// added or replaced.
    fn import_entries(&mut self, entries: Vec<HistoryEntry>) -> usize;
}

/// Snapshot written to and restored from the storage backend.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedHistory {
    entries: Vec<HistoryEntry>,
    favorites: Vec<String>,
}

/// History store backed by a generic key-value storage backend.
pub struct HistoryManager<S: StorageBackend> {
    entries: Vec<HistoryEntry>,
    favorites: HashSet<String>,
    classifier: Classifier,
    storage: S,
}

impl<S: StorageBackend> HistoryManager<S> {
    /// Creates a history manager, restoring any persisted snapshot.
    ///
    /// A missing, unreadable or malformed snapshot starts the session with
    /// an empty history (the failure is logged).
    pub fn new(classifier: Classifier, storage: S) -> Self {
        let mut manager = Self {
            entries: Vec::new(),
            favorites: HashSet::new(),
            classifier,
            storage,
        };
        manager.restore();
        manager
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn restore(&mut self) {
        let payload = match self.storage.load(STORAGE_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return,
            Err(e) => {
                warn!("failed to load scan history: {}", e);
                return;
            }
        };

        let snapshot: PersistedHistory = match serde_json::from_str(&payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("failed to decode scan history snapshot: {}", e);
                return;
            }
        };

        self.entries = snapshot.entries;
        // The entry flags are authoritative; the index is rebuilt from them
        // so a drifted snapshot cannot leave a dangling favorite id.
        self.favorites = self
            .entries
            .iter()
            .filter(|e| e.favorite)
            .map(|e| e.id.clone())
            .collect();
        self.enforce_cap();
    }

    /// Fire-and-forget persist of the current state. Failures are logged;
    /// the in-memory state remains authoritative for the session.
    fn persist(&self) {
        let snapshot = PersistedHistory {
            entries: self.entries.clone(),
            favorites: self.favorites.iter().cloned().collect(),
        };
        let payload = match serde_json::to_string(&snapshot) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("failed to encode scan history snapshot: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.save(STORAGE_KEY, &payload) {
            warn!("failed to persist scan history: {}", e);
        }
    }

    /// Evicts entries beyond the cap: oldest non-favorited first, oldest
    /// regardless when every entry is favorited.
    ///
    /// The entry at the front (the newest) is never the victim — a scan
    /// into a fully-favorited history must not discard itself.
    fn enforce_cap(&mut self) {
        while self.entries.len() > HISTORY_CAP {
            let victim = self.entries[1..]
                .iter()
                .rposition(|e| !e.favorite)
                .map(|pos| pos + 1)
                .unwrap_or(self.entries.len() - 1);
            let removed = self.entries.remove(victim);
            self.favorites.remove(&removed.id);
        }
    }

    fn entry_matches(entry: &HistoryEntry, query: &str) -> bool {
        if entry.raw.to_lowercase().contains(query) {
            return true;
        }
        if let Some(note) = &entry.note {
            if note.to_lowercase().contains(query) {
                return true;
            }
        }
        match &entry.fields {
            Some(ScanFields::Url { url }) => url.to_lowercase().contains(query),
            Some(ScanFields::Email { address }) => address.to_lowercase().contains(query),
            _ => false,
        }
    }
}

impl<S: StorageBackend> HistoryStoreTrait for HistoryManager<S> {
    fn record(&mut self, raw: &str) -> String {
        let result = self.classifier.classify(raw);

        // Rescanning the same payload supersedes the prior entry — the
        // newest occurrence moves to the front instead of duplicating.
        if let Some(pos) = self.entries.iter().position(|e| e.raw == result.raw) {
            let old = self.entries.remove(pos);
            self.favorites.remove(&old.id);
        }

        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            raw: result.raw,
            fields: result.fields,
            recorded_at: Self::now(),
            favorite: false,
            note: None,
        };
        let id = entry.id.clone();
        self.entries.insert(0, entry);
        self.enforce_cap();
        self.persist();
        id
    }

    fn remove(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return;
        }
        self.favorites.remove(id);
        self.persist();
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.favorites.clear();
        self.persist();
    }

    fn toggle_favorite(&mut self, id: &str) {
        let entry = match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => entry,
            None => return,
        };
        entry.favorite = !entry.favorite;
        if entry.favorite {
            self.favorites.insert(id.to_string());
        } else {
            self.favorites.remove(id);
        }
        self.persist();
    }

    fn update_note(&mut self, id: &str, note: &str) {
        let entry = match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => entry,
            None => return,
        };
        entry.note = Some(note.to_string());
        self.persist();
    }

    fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn list_favorites(&self) -> Vec<&HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| self.favorites.contains(&e.id))
            .collect()
    }

    fn search(&self, query: &str) -> Vec<&HistoryEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| Self::entry_matches(e, &query))
            .collect()
    }

    fn import_entries(&mut self, entries: Vec<HistoryEntry>) -> usize {
        let mut merged = 0;
        for incoming in entries {
            if incoming.id.is_empty() || incoming.raw.is_empty() {
                continue;
            }
            match self.entries.iter().position(|e| e.raw == incoming.raw) {
                Some(pos) => {
                    if incoming.recorded_at > self.entries[pos].recorded_at {
                        let old = std::mem::replace(&mut self.entries[pos], incoming);
                        self.favorites.remove(&old.id);
                        merged += 1;
                    }
                }
                None => {
                    self.entries.push(incoming);
                    merged += 1;
                }
            }
        }

        self.entries
            .sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        self.favorites = self
            .entries
            .iter()
            .filter(|e| e.favorite)
            .map(|e| e.id.clone())
            .collect();
        self.enforce_cap();
        self.persist();
        merged
    }
}
