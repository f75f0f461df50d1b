use std::fmt;

// === StorageError ===

/// Errors raised by the persistence backend.
///
/// History operations never propagate these — persistence is best-effort
/// and failures are logged at the store boundary.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    Database(String),
    /// Failed to serialize or deserialize the persisted snapshot.
    Serialization(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Database(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::Serialization(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// === TransactionError ===

/// Errors from the transactions CRUD collaborator.
#[derive(Debug)]
pub enum TransactionError {
    /// A network error occurred while reaching the backend.
    Network(String),
    /// The backend rejected the request.
    Api { status: u16, message: String },
}

impl fmt::Display for TransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionError::Network(msg) => write!(f, "Transaction network error: {}", msg),
            TransactionError::Api { status, message } => {
                write!(f, "Transaction API error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for TransactionError {}

// === ActionError ===

/// Errors surfaced by the action router for caller feedback.
#[derive(Debug)]
pub enum ActionError {
    /// Creating a transaction through the collaborator failed.
    Transaction(String),
    /// The platform shell failed to launch an external intent.
    Launch(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Transaction(msg) => {
                write!(f, "Transaction creation failed: {}", msg)
            }
            ActionError::Launch(msg) => write!(f, "Intent launch failed: {}", msg),
        }
    }
}

impl std::error::Error for ActionError {}

// === AcquireError ===

/// Errors from the scan acquisition collaborator (camera / image decode).
#[derive(Debug)]
pub enum AcquireError {
    /// The user closed the scanner before a code was decoded.
    Cancelled,
    /// The device or decoder failed to produce a payload.
    Failed(String),
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireError::Cancelled => write!(f, "Scan cancelled"),
            AcquireError::Failed(msg) => write!(f, "Scan acquisition failed: {}", msg),
        }
    }
}

impl std::error::Error for AcquireError {}

// === ScanError ===

/// Errors from a full acquire-and-handle scan cycle.
#[derive(Debug)]
pub enum ScanError {
    Acquire(AcquireError),
    Action(ActionError),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Acquire(e) => write!(f, "{}", e),
            ScanError::Action(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScanError {}

impl From<AcquireError> for ScanError {
    fn from(e: AcquireError) -> Self {
        ScanError::Acquire(e)
    }
}

impl From<ActionError> for ScanError {
    fn from(e: ActionError) -> Self {
        ScanError::Action(e)
    }
}

// === ExportError ===

/// Errors raised while exporting history data.
#[derive(Debug)]
pub enum ExportError {
    /// Failed to serialize the export payload.
    Serialization(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Serialization(msg) => {
                write!(f, "Export serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ExportError {}

// === ImportError ===

/// Errors raised while importing history data.
#[derive(Debug)]
pub enum ImportError {
    /// The payload is not valid JSON for the export envelope.
    Parse(String),
    /// The payload parsed but failed validation; all problems are listed.
    Validation(Vec<String>),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Parse(msg) => write!(f, "Import parse error: {}", msg),
            ImportError::Validation(errors) => {
                write!(f, "Import validation failed: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ImportError {}
