// Library error types
// HTTP mapping lives in api::AppError

use crate::receipt::ReceiptId;
use thiserror::Error;

/// Raised when a client-supplied identifier is not well-formed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptIdError {
    #[error("receipt id is empty")]
    Empty,

    #[error("receipt id contains whitespace: {0:?}")]
    Whitespace(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Entries are write-once
    #[error("receipt {0} already has points stored")]
    AlreadyExists(ReceiptId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid host {value:?}: {reason}")]
    InvalidHost { value: String, reason: String },

    #[error("invalid port {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },
}
