//! Session core for Tizim Scan.
//!
//! Central struct wiring the classifier, history store and action router
//! into the scan → classify → record → route pipeline, plus the
//! acquisition collaborator contract.

use crate::managers::history_manager::{HistoryManager, HistoryStoreTrait};
use crate::services::action_router::{ActionOutcome, ActionRouter, Confirmation, IntentLauncher};
use crate::services::classifier::Classifier;
use crate::services::transactions_api::TransactionsGateway;
use crate::storage::StorageBackend;
use crate::types::errors::{AcquireError, ActionError, ScanError};
use crate::types::scan::ScanFields;

/// Scan acquisition collaborator (device camera or image-file decode).
///
/// A single-shot operation that resolves with the raw decoded string or
/// fails (including user cancellation). This crate only consumes the
/// contract; timeout semantics belong to the implementation.
pub trait ScanSource {
    fn acquire(&mut self) -> Result<String, AcquireError>;
}

/// One logical scanning session owning the history store.
///
/// Constructed once at application start and passed by reference to
/// consumers; all history mutation goes through its operations.
pub struct ScanSession<S: StorageBackend, L: IntentLauncher, T: TransactionsGateway> {
    classifier: Classifier,
    history: HistoryManager<S>,
    router: ActionRouter<L, T>,
}

impl<S: StorageBackend, L: IntentLauncher, T: TransactionsGateway> ScanSession<S, L, T> {
    /// Creates a session recognizing the default payment scheme.
    pub fn new(storage: S, launcher: L, transactions: T) -> Self {
        Self::with_classifier(Classifier::new(), storage, launcher, transactions)
    }

    /// Creates a session with a custom-configured classifier.
    pub fn with_classifier(
        classifier: Classifier,
        storage: S,
        launcher: L,
        transactions: T,
    ) -> Self {
        let history = HistoryManager::new(classifier.clone(), storage);
        let router = ActionRouter::new(launcher, transactions);
        Self {
            classifier,
            history,
            router,
        }
    }

    /// Records a decoded payload to history and routes it to its effect.
    ///
    /// A payment code carrying a usable amount is auto-confirmed — the
    /// live-scanner flow creates the expense immediately and reports the
    /// outcome for toast display. Everything else routes with a prompt.
    pub fn handle_scan(&mut self, raw: &str) -> Result<ActionOutcome, ActionError> {
        self.history.record(raw);

        let result = self.classifier.classify(raw);
        let confirm = match &result.fields {
            Some(ScanFields::Transaction {
                amount: Some(_), ..
            }) => Confirmation::PreConfirmed,
            _ => Confirmation::Prompt,
        };
        self.router.perform_action(&result, confirm)
    }

    /// Acquires a payload from the source, then handles it.
    ///
    /// Acquisition failures (including cancellation) propagate without
    /// touching the history store or classifier.
    pub fn scan_once(&mut self, source: &mut dyn ScanSource) -> Result<ActionOutcome, ScanError> {
        let raw = source.acquire()?;
        Ok(self.handle_scan(&raw)?)
    }

    /// Re-routes a stored history entry.
    ///
    /// Replay always prompts — acting on an old payment code must never
    /// silently create a transaction. Returns `Ok(None)` for unknown ids.
    pub fn replay(&self, id: &str) -> Result<Option<ActionOutcome>, ActionError> {
        let entry = match self.history.get(id) {
            Some(entry) => entry,
            None => return Ok(None),
        };
        let outcome = self
            .router
            .perform_action(&entry.to_result(), Confirmation::Prompt)?;
        Ok(Some(outcome))
    }

    /// Read access to the history store for listing, search and export.
    pub fn history(&self) -> &HistoryManager<S> {
        &self.history
    }

    /// Mutable access for favorite toggling, notes, removal and import.
    pub fn history_mut(&mut self) -> &mut HistoryManager<S> {
        &mut self.history
    }
}
