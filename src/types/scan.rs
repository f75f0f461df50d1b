use serde::{Deserialize, Serialize};

/// Discriminant tag for a classified QR payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanKind {
    Url,
    Phone,
    Email,
    Wifi,
    Transaction,
    PlainText,
}

impl std::fmt::Display for ScanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScanKind::Url => "url",
            ScanKind::Phone => "phone",
            ScanKind::Email => "email",
            ScanKind::Wifi => "wifi",
            ScanKind::Transaction => "transaction",
            ScanKind::PlainText => "text",
        };
        write!(f, "{}", name)
    }
}

/// Kind-specific structured payload extracted by the classifier.
///
/// Absent entirely for plain text — `ScanResult::fields` is `None` exactly
/// when the scan classified as `PlainText`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanFields {
    Url {
        /// Normalized absolute URL (a `www.` payload gains an `https://` prefix).
        url: String,
    },
    Phone {
        /// Captured run with whitespace stripped; `tel:`/`phone:` prefix removed.
        number: String,
    },
    Email {
        /// Address with any `mailto:` prefix removed.
        address: String,
    },
    Wifi {
        ssid: String,
        password: String,
    },
    Transaction {
        /// Unset when the `amount` query parameter is absent or not a number.
        amount: Option<f64>,
        description: String,
    },
}

impl ScanFields {
    /// Returns the kind this payload belongs to.
    pub fn kind(&self) -> ScanKind {
        match self {
            ScanFields::Url { .. } => ScanKind::Url,
            ScanFields::Phone { .. } => ScanKind::Phone,
            ScanFields::Email { .. } => ScanKind::Email,
            ScanFields::Wifi { .. } => ScanKind::Wifi,
            ScanFields::Transaction { .. } => ScanKind::Transaction,
        }
    }
}

/// Transient result of classifying a decoded QR payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Original decoded string, trimmed of surrounding whitespace.
    /// Always preserved verbatim regardless of classification.
    pub raw: String,
    pub fields: Option<ScanFields>,
}

impl ScanResult {
    /// Builds an unclassified (plain text) result.
    pub fn plain_text(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            fields: None,
        }
    }

    pub fn kind(&self) -> ScanKind {
        match &self.fields {
            Some(fields) => fields.kind(),
            None => ScanKind::PlainText,
        }
    }
}
