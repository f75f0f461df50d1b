//! Action Router for Tizim Scan.
//!
//! Given a classified scan (fresh or replayed from history), performs the
//! real-world effect appropriate to its kind and reports the outcome for
//! user feedback. The router never persists anything itself.

use crate::services::transactions_api::TransactionsGateway;
use crate::types::errors::ActionError;
use crate::types::scan::{ScanFields, ScanResult};
use crate::types::transaction::{NewTransaction, TransactionRecord};

/// Trait the platform shell implements to launch external intents.
pub trait IntentLauncher {
    /// Navigates to the given absolute URL in an external browser/webview.
    fn open_url(&self, url: &str) -> Result<(), ActionError>;
    /// Opens the dialer with the given number.
    fn dial(&self, number: &str) -> Result<(), ActionError>;
    /// Opens a mail composer addressed to the given address.
    fn compose_email(&self, address: &str) -> Result<(), ActionError>;
}

/// Information surfaced to the user instead of triggering a side effect.
///
/// WiFi credentials and transaction previews must never act silently:
/// credentials are sensitive, payments are financial. Both are shown and
/// the user decides the next step.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayContent {
    WifiCredentials { ssid: String, password: String },
    TransactionPreview {
        amount: Option<f64>,
        description: String,
    },
    Text(String),
}

/// Result of routing a scan to its effect.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// External navigation, dial or mail compose was triggered.
    Opened { target: String },
    /// Information was shown for user confirmation.
    Displayed(DisplayContent),
    /// A transaction was created through the CRUD collaborator.
    Recorded(TransactionRecord),
    /// The payload carried nothing actionable.
    NoOp,
}

/// Whether the caller has already confirmed acting on a payment code.
///
/// A live scan from the in-app scanner auto-adds the expense
/// (`PreConfirmed`); everything else previews first (`Prompt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Prompt,
    PreConfirmed,
}

/// Routes classified scans to their side effects.
pub struct ActionRouter<L: IntentLauncher, T: TransactionsGateway> {
    launcher: L,
    transactions: T,
}

impl<L: IntentLauncher, T: TransactionsGateway> ActionRouter<L, T> {
    pub fn new(launcher: L, transactions: T) -> Self {
        Self {
            launcher,
            transactions,
        }
    }

    /// Performs the effect appropriate to the scan's kind.
    ///
    /// Collaborator failures (intent launch, transaction creation) are
    /// returned as errors for toast display; nothing is retried and
    /// history is never mutated here.
    pub fn perform_action(
        &self,
        result: &ScanResult,
        confirm: Confirmation,
    ) -> Result<ActionOutcome, ActionError> {
        let fields = match &result.fields {
            Some(fields) => fields,
            // Plain text: show the raw payload for the user to read/copy.
            None => return Ok(ActionOutcome::Displayed(DisplayContent::Text(result.raw.clone()))),
        };

        match fields {
            ScanFields::Url { url } => {
                if url.is_empty() {
                    return Ok(ActionOutcome::NoOp);
                }
                self.launcher.open_url(url)?;
                Ok(ActionOutcome::Opened {
                    target: url.clone(),
                })
            }
            ScanFields::Phone { number } => {
                if number.is_empty() {
                    return Ok(ActionOutcome::NoOp);
                }
                self.launcher.dial(number)?;
                Ok(ActionOutcome::Opened {
                    target: number.clone(),
                })
            }
            ScanFields::Email { address } => {
                if address.is_empty() {
                    return Ok(ActionOutcome::NoOp);
                }
                self.launcher.compose_email(address)?;
                Ok(ActionOutcome::Opened {
                    target: address.clone(),
                })
            }
            // No platform auto-connect API is assumed; credentials are
            // surfaced for manual entry behind explicit confirmation.
            ScanFields::Wifi { ssid, password } => {
                Ok(ActionOutcome::Displayed(DisplayContent::WifiCredentials {
                    ssid: ssid.clone(),
                    password: password.clone(),
                }))
            }
            ScanFields::Transaction {
                amount: Some(amount),
                description,
            } => match confirm {
                Confirmation::PreConfirmed => {
                    let record = self
                        .transactions
                        .create_transaction(&NewTransaction::qr_expense(*amount, description))
                        .map_err(|e| ActionError::Transaction(e.to_string()))?;
                    Ok(ActionOutcome::Recorded(record))
                }
                Confirmation::Prompt => Ok(ActionOutcome::Displayed(
                    DisplayContent::TransactionPreview {
                        amount: Some(*amount),
                        description: description.clone(),
                    },
                )),
            },
            // Amount missing: nothing to submit, fall back to raw display.
            ScanFields::Transaction { amount: None, .. } => Ok(ActionOutcome::Displayed(
                DisplayContent::Text(result.raw.clone()),
            )),
        }
    }
}
