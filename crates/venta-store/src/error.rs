//! # Store Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  std::io::Error (file backend)                                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← Adds key/entity context                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller surfaces a notification; nothing crashes                    │
//! │                                                                     │
//! │  Corrupt stored JSON never reaches callers: each store's load       │
//! │  routine downgrades it to "store is empty" with a warning.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in a store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Reading or writing a record through the storage port failed.
    #[error("Persistence failure for '{key}': {source}")]
    Persistence {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A record exceeds the backend's size limit.
    ///
    /// ## When This Occurs
    /// The host key-value storage has a quota; a record that would not fit
    /// is rejected before any bytes are written.
    #[error("Record too large for '{key}': {size} bytes (limit {limit})")]
    RecordTooLarge {
        key: String,
        size: usize,
        limit: usize,
    },

    /// Input validation failed before the store was touched.
    #[error(transparent)]
    Invalid(#[from] venta_core::ValidationError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Persistence error for a given storage key.
    pub fn persistence(key: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Persistence {
            key: key.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("Product", "P9");
        assert_eq!(err.to_string(), "Product not found: P9");
    }

    #[test]
    fn test_validation_converts_to_store_error() {
        let err: StoreError = venta_core::ValidationError::Required {
            field: "code".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Invalid(_)));
    }
}
