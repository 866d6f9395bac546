// Copyright 2025 Cowboy AI, LLC.

//! Error types for composition operations

use thiserror::Error;

/// Errors that can occur while composing, writing or finalizing records
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposerError {
    /// A node precondition failed before anything was written
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A semantic's referenced component was read before it was established
    #[error("Reference not set for {node}")]
    ReferenceNotSet {
        /// Description of the node whose reference is missing
        node: String,
    },

    /// A semantic's referenced component was already bound to another identity
    #[error("Reference already set for {node}")]
    ReferenceAlreadySet {
        /// Description of the node whose reference is fixed
        node: String,
    },

    /// Operation attempted on a session that is no longer open
    #[error("Session {stamp_key} is {state}")]
    SessionTerminal {
        /// Key of the session's stamp
        stamp_key: String,
        /// Terminal state the session is in
        state: String,
    },

    /// Registration attempted on a transaction that is no longer open
    #[error("Transaction {transaction_id} is {state}")]
    TransactionTerminal {
        /// Transaction identifier
        transaction_id: String,
        /// Terminal state the transaction is in
        state: String,
    },

    /// Invalid state transition
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// Current state
        from: String,
        /// Attempted target state
        to: String,
    },

    /// Ambiguous or conflicting identity resolution reported by the store
    #[error("Identity error: {0}")]
    IdentityError(String),

    /// External store failure
    #[error("Store error: {store} - {message}")]
    StoreError {
        /// Name of the store
        store: String,
        /// Error message from the store
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for composition operations
pub type ComposerResult<T> = Result<T, ComposerError>;

impl From<serde_json::Error> for ComposerError {
    fn from(err: serde_json::Error) -> Self {
        ComposerError::SerializationError(err.to_string())
    }
}

impl ComposerError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ComposerError::ValidationError(msg.into())
    }

    /// Create a store error
    pub fn store(store: impl Into<String>, message: impl Into<String>) -> Self {
        ComposerError::StoreError {
            store: store.into(),
            message: message.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, ComposerError::ValidationError(_))
    }

    /// Check if this is a state error (terminal session, missing reference, ...)
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            ComposerError::ReferenceNotSet { .. }
                | ComposerError::ReferenceAlreadySet { .. }
                | ComposerError::SessionTerminal { .. }
                | ComposerError::TransactionTerminal { .. }
                | ComposerError::InvalidStateTransition { .. }
        )
    }

    /// Check if this is an identity resolution error
    pub fn is_identity_error(&self) -> bool {
        matches!(self, ComposerError::IdentityError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = ComposerError::validation("navigation needs parents or children");
        assert_eq!(
            err.to_string(),
            "Validation error: navigation needs parents or children"
        );

        let err = ComposerError::ReferenceNotSet {
            node: "semantic 1234".to_string(),
        };
        assert_eq!(err.to_string(), "Reference not set for semantic 1234");

        let err = ComposerError::SessionTerminal {
            stamp_key: "abc".to_string(),
            state: "Committed".to_string(),
        };
        assert_eq!(err.to_string(), "Session abc is Committed");

        let err = ComposerError::InvalidStateTransition {
            from: "Cancelled".to_string(),
            to: "Committed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid state transition from Cancelled to Committed"
        );

        let err = ComposerError::store("memory", "poisoned lock");
        assert_eq!(err.to_string(), "Store error: memory - poisoned lock");
    }

    #[test]
    fn test_error_classification() {
        assert!(ComposerError::validation("x").is_validation_error());
        assert!(!ComposerError::validation("x").is_state_error());

        let state_errors = [
            ComposerError::ReferenceNotSet { node: "n".into() },
            ComposerError::ReferenceAlreadySet { node: "n".into() },
            ComposerError::SessionTerminal {
                stamp_key: "k".into(),
                state: "Cancelled".into(),
            },
            ComposerError::TransactionTerminal {
                transaction_id: "t".into(),
                state: "Committed".into(),
            },
        ];
        for err in &state_errors {
            assert!(err.is_state_error(), "{err} should be a state error");
            assert!(!err.is_validation_error());
        }

        assert!(ComposerError::IdentityError("overlap".into()).is_identity_error());
        assert!(!ComposerError::store("s", "m").is_identity_error());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ComposerError = json_err.into();
        assert!(matches!(err, ComposerError::SerializationError(_)));
    }
}
