//! Error types for ledgerview-core
//!
//! Gateway failures never escape as panics: every call site converts the
//! response envelope into a `ViewError`, reports it through an
//! `ErrorLogger` and hands it back to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AccountId, TransactionId};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Root container missing or a port not wired
    InitializationError,
    /// Account or transaction fetch failed
    LoadError,
    /// Account or transaction removal failed
    DeletionError,
    /// Timestamp could not be parsed
    InvalidTimestamp,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InitializationError => write!(f, "INITIALIZATION_ERROR"),
            ErrorCode::LoadError => write!(f, "LOAD_ERROR"),
            ErrorCode::DeletionError => write!(f, "DELETION_ERROR"),
            ErrorCode::InvalidTimestamp => write!(f, "INVALID_TIMESTAMP"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Warning,
    Error,
    /// The view cannot work at all
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Why a gateway call did not produce usable data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FailureCause {
    /// The service answered `success: false`
    Rejected { message: String },
    /// The service answered `success: true` without the expected payload
    Malformed,
}

impl FailureCause {
    pub fn rejected(message: Option<String>) -> Self {
        FailureCause::Rejected {
            message: message.unwrap_or_else(|| "request was rejected".to_string()),
        }
    }
}

impl std::fmt::Display for FailureCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureCause::Rejected { message } => write!(f, "{}", message),
            FailureCause::Malformed => write!(f, "malformed response"),
        }
    }
}

/// What a failed load was fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadTarget {
    AccountName,
    Transactions,
}

impl std::fmt::Display for LoadTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadTarget::AccountName => write!(f, "account name"),
            LoadTarget::Transactions => write!(f, "transactions"),
        }
    }
}

/// What a failed removal was deleting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DeletionTarget {
    Account(AccountId),
    Transaction(TransactionId),
}

impl std::fmt::Display for DeletionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeletionTarget::Account(id) => write!(f, "account {}", id),
            DeletionTarget::Transaction(id) => write!(f, "transaction {}", id),
        }
    }
}

/// Detailed error information for hosts that display or ship errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub severity: ErrorSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, severity: ErrorSeverity, message: String) -> Self {
        Self {
            code,
            severity,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for the view layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error("View initialization failed: {message}")]
    Initialization { message: String },

    #[error("Failed to load {target} for account {account_id}: {cause}")]
    Load {
        target: LoadTarget,
        account_id: AccountId,
        cause: FailureCause,
    },

    #[error("Failed to delete {target}: {cause}")]
    Deletion {
        target: DeletionTarget,
        cause: FailureCause,
    },

    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
}

impl ViewError {
    pub fn initialization(message: impl Into<String>) -> Self {
        ViewError::Initialization {
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ViewError::Initialization { .. } => ErrorCode::InitializationError,
            ViewError::Load { .. } => ErrorCode::LoadError,
            ViewError::Deletion { .. } => ErrorCode::DeletionError,
            ViewError::InvalidTimestamp { .. } => ErrorCode::InvalidTimestamp,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ViewError::Initialization { .. } => ErrorSeverity::Critical,
            ViewError::Load { .. } => ErrorSeverity::Error,
            ViewError::Deletion { .. } => ErrorSeverity::Error,
            ViewError::InvalidTimestamp { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.severity(), self.to_string());

        match self {
            ViewError::Initialization { .. } => {
                details = details.with_suggestion(
                    "Mount the transaction list container before constructing the controller.".to_string()
                );
            }
            ViewError::Load { target, account_id, cause } => {
                details = details.with_detail(serde_json::json!({
                    "target": target,
                    "account_id": account_id,
                    "cause": cause,
                }));
                details = details.with_suggestion(
                    "Reopen the account once the service is reachable.".to_string()
                );
            }
            ViewError::Deletion { target, cause } => {
                details = details.with_detail(serde_json::json!({
                    "target": target,
                    "cause": cause,
                }));
                if *cause == FailureCause::Malformed {
                    details = details.with_suggestion(
                        "The service acknowledged the request without a body; refresh to check whether it was applied.".to_string()
                    );
                } else {
                    details = details.with_suggestion(
                        "Refresh the view; the item may already have been removed.".to_string()
                    );
                }
            }
            ViewError::InvalidTimestamp { value } => {
                details = details.with_detail(serde_json::json!({ "value": value }));
                details = details.with_suggestion(
                    "Timestamps must look like 2019-03-10 03:20:41.".to_string()
                );
            }
        }

        details
    }
}

/// Result type with ViewError
pub type ViewResult<T> = Result<T, ViewError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Workflow step being performed
    pub operation: String,
    pub account_id: Option<AccountId>,
    pub transaction_id: Option<TransactionId>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            account_id: None,
            transaction_id: None,
        }
    }

    pub fn with_account(mut self, account_id: &AccountId) -> Self {
        self.account_id = Some(account_id.clone());
        self
    }

    pub fn with_transaction(mut self, transaction_id: &TransactionId) -> Self {
        self.transaction_id = Some(transaction_id.clone());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Report a failed workflow step
    fn log_error(&self, error: &ViewError, context: &ErrorContext);
    /// Report a benign anomaly (stale response, duplicate click)
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &ViewError, context: &ErrorContext) {
        log::error!(
            target: "ledgerview::error",
            "ERROR [{}] {} - Operation: {} - Account: {:?} - Transaction: {:?}",
            error.code(),
            error,
            context.operation,
            context.account_id,
            context.transaction_id
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "ledgerview::error",
            "WARNING: {} - Operation: {} - Account: {:?}",
            message,
            context.operation,
            context.account_id
        );
    }
}

// ==================== Tests ====================
