use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default title used when a payment QR code carries no description.
pub const DEFAULT_QR_EXPENSE_TITLE: &str = "QR kod orqali to'lov";

/// Category assigned to transactions created from scanned payment codes.
pub const QR_EXPENSE_CATEGORY: &str = "Boshqa";

/// Transaction payload submitted to the backend CRUD API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub title: String,
    /// Signed amount — negative for expenses.
    pub amount: f64,
    pub transaction_type: String,
    pub category: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
}

impl NewTransaction {
    /// Builds the expense record for a scanned payment code.
    ///
    /// The scanned amount is always positive on the wire; it is negated
    /// here because a payment QR code records money leaving the account.
    pub fn qr_expense(amount: f64, description: &str) -> Self {
        let title = if description.is_empty() {
            DEFAULT_QR_EXPENSE_TITLE.to_string()
        } else {
            description.to_string()
        };
        Self {
            title,
            amount: -amount,
            transaction_type: "expense".to_string(),
            category: QR_EXPENSE_CATEGORY.to_string(),
            date: today_utc(),
        }
    }
}

/// Transaction record as echoed back by the backend after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub transaction_type: String,
    pub category: String,
    pub date: String,
}

/// Formats the current UTC date as `YYYY-MM-DD`.
///
/// Civil-from-days conversion (Gregorian), the inverse of the
/// days-from-civil arithmetic used for date filtering.
pub fn today_utc() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    let days = secs / 86400;

    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };

    format!("{:04}-{:02}-{:02}", y, m, d)
}
