//! Unit tests for the ActionRouter.
//!
//! These tests exercise routing for every scan kind through mock
//! collaborators: a recording intent launcher and a stub transactions
//! gateway, including the pre-confirmed expense flow and failure surfacing.

use std::cell::RefCell;

use tizim_scan::services::action_router::{
    ActionOutcome, ActionRouter, Confirmation, DisplayContent, IntentLauncher,
};
use tizim_scan::services::classifier::Classifier;
use tizim_scan::services::transactions_api::TransactionsGateway;
use tizim_scan::types::errors::{ActionError, TransactionError};
use tizim_scan::types::scan::{ScanFields, ScanResult};
use tizim_scan::types::transaction::{
    NewTransaction, TransactionRecord, DEFAULT_QR_EXPENSE_TITLE,
};

/// Launcher that records every intent instead of launching it.
#[derive(Default)]
struct RecordingLauncher {
    calls: RefCell<Vec<String>>,
}

impl IntentLauncher for RecordingLauncher {
    fn open_url(&self, url: &str) -> Result<(), ActionError> {
        self.calls.borrow_mut().push(format!("open:{}", url));
        Ok(())
    }

    fn dial(&self, number: &str) -> Result<(), ActionError> {
        self.calls.borrow_mut().push(format!("dial:{}", number));
        Ok(())
    }

    fn compose_email(&self, address: &str) -> Result<(), ActionError> {
        self.calls.borrow_mut().push(format!("mail:{}", address));
        Ok(())
    }
}

/// Gateway stub that either echoes the submitted record or fails.
#[derive(Default)]
struct StubGateway {
    fail: bool,
    submitted: RefCell<Vec<NewTransaction>>,
}

impl StubGateway {
    fn failing() -> Self {
        Self {
            fail: true,
            submitted: RefCell::new(Vec::new()),
        }
    }
}

impl TransactionsGateway for StubGateway {
    fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<TransactionRecord, TransactionError> {
        if self.fail {
            return Err(TransactionError::Network("connection refused".to_string()));
        }
        self.submitted.borrow_mut().push(transaction.clone());
        Ok(TransactionRecord {
            id: "tx-1".to_string(),
            title: transaction.title.clone(),
            amount: transaction.amount,
            transaction_type: transaction.transaction_type.clone(),
            category: transaction.category.clone(),
            date: transaction.date.clone(),
        })
    }
}

fn router() -> ActionRouter<RecordingLauncher, StubGateway> {
    ActionRouter::new(RecordingLauncher::default(), StubGateway::default())
}

fn classify(input: &str) -> ScanResult {
    Classifier::new().classify(input)
}

#[test]
fn test_url_scan_triggers_navigation() {
    let router = router();
    let outcome = router
        .perform_action(&classify("https://example.com"), Confirmation::Prompt)
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Opened {
            target: "https://example.com".to_string()
        }
    );
}

#[test]
fn test_phone_scan_triggers_dial() {
    let launcher = RecordingLauncher::default();
    let router = ActionRouter::new(launcher, StubGateway::default());
    let outcome = router
        .perform_action(&classify("tel:+998901234567"), Confirmation::Prompt)
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Opened {
            target: "+998901234567".to_string()
        }
    );
}

#[test]
fn test_email_scan_triggers_compose() {
    let router = router();
    let outcome = router
        .perform_action(&classify("mailto:user@example.com"), Confirmation::Prompt)
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Opened {
            target: "user@example.com".to_string()
        }
    );
}

/// WiFi credentials are revealed, never auto-connected.
#[test]
fn test_wifi_scan_is_displayed_without_side_effects() {
    let launcher = RecordingLauncher::default();
    let gateway = StubGateway::default();
    let router = ActionRouter::new(launcher, gateway);

    let outcome = router
        .perform_action(
            &classify("WIFI:T:WPA;S:HomeNet;P:secret123;;"),
            Confirmation::Prompt,
        )
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Displayed(DisplayContent::WifiCredentials {
            ssid: "HomeNet".to_string(),
            password: "secret123".to_string()
        })
    );
}

#[test]
fn test_plain_text_is_displayed() {
    let router = router();
    let outcome = router
        .perform_action(&classify("just some random text"), Confirmation::Prompt)
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Displayed(DisplayContent::Text("just some random text".to_string()))
    );
}

#[test]
fn test_transaction_prompt_shows_preview() {
    let router = router();
    let outcome = router
        .perform_action(
            &classify("tizim://transaction?amount=50000&description=Lunch"),
            Confirmation::Prompt,
        )
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Displayed(DisplayContent::TransactionPreview {
            amount: Some(50000.0),
            description: "Lunch".to_string()
        })
    );
}

/// The pre-confirmed flow creates a negative-signed expense.
#[test]
fn test_preconfirmed_transaction_is_recorded_as_expense() {
    let launcher = RecordingLauncher::default();
    let gateway = StubGateway::default();
    let router = ActionRouter::new(launcher, gateway);

    let outcome = router
        .perform_action(
            &classify("tizim://transaction?amount=50000&description=Lunch"),
            Confirmation::PreConfirmed,
        )
        .unwrap();

    match outcome {
        ActionOutcome::Recorded(record) => {
            assert_eq!(record.amount, -50000.0);
            assert_eq!(record.title, "Lunch");
            assert_eq!(record.transaction_type, "expense");
        }
        other => panic!("expected Recorded, got {:?}", other),
    }
}

#[test]
fn test_preconfirmed_transaction_without_description_uses_default_title() {
    let router = router();
    let outcome = router
        .perform_action(
            &classify("tizim://transaction?amount=7500"),
            Confirmation::PreConfirmed,
        )
        .unwrap();

    match outcome {
        ActionOutcome::Recorded(record) => {
            assert_eq!(record.title, DEFAULT_QR_EXPENSE_TITLE);
            assert_eq!(record.amount, -7500.0);
        }
        other => panic!("expected Recorded, got {:?}", other),
    }
}

/// Gateway failures surface as typed errors; nothing is retried.
#[test]
fn test_gateway_failure_is_surfaced() {
    let router = ActionRouter::new(RecordingLauncher::default(), StubGateway::failing());

    let result = router.perform_action(
        &classify("tizim://transaction?amount=50000"),
        Confirmation::PreConfirmed,
    );

    match result {
        Err(ActionError::Transaction(msg)) => {
            assert!(msg.contains("connection refused"), "got: {}", msg);
        }
        other => panic!("expected transaction error, got {:?}", other),
    }
}

/// A payment code without a usable amount falls back to raw display.
#[test]
fn test_transaction_without_amount_displays_raw() {
    let router = router();
    let raw = "tizim://transaction?description=Lunch";
    let outcome = router
        .perform_action(&classify(raw), Confirmation::PreConfirmed)
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Displayed(DisplayContent::Text(raw.to_string()))
    );
}

/// Structurally present but empty fields carry nothing actionable.
#[test]
fn test_empty_url_field_is_noop() {
    let router = router();
    let result = ScanResult {
        raw: "".to_string(),
        fields: Some(ScanFields::Url {
            url: "".to_string(),
        }),
    };

    let outcome = router.perform_action(&result, Confirmation::Prompt).unwrap();
    assert_eq!(outcome, ActionOutcome::NoOp);
}

/// Launcher failures are returned, not swallowed.
#[test]
fn test_launcher_failure_is_surfaced() {
    struct BrokenLauncher;

    impl IntentLauncher for BrokenLauncher {
        fn open_url(&self, _url: &str) -> Result<(), ActionError> {
            Err(ActionError::Launch("no browser installed".to_string()))
        }

        fn dial(&self, _number: &str) -> Result<(), ActionError> {
            Ok(())
        }

        fn compose_email(&self, _address: &str) -> Result<(), ActionError> {
            Ok(())
        }
    }

    let router = ActionRouter::new(BrokenLauncher, StubGateway::default());
    let result = router.perform_action(&classify("https://example.com"), Confirmation::Prompt);

    assert!(matches!(result, Err(ActionError::Launch(_))));
}
