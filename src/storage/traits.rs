//! Abstract document-store trait.
//!
//! The resolver consumes exactly one capability from the backing store:
//! a single-field equality query against a named collection. Keeping that
//! behind a trait enables:
//! - An in-memory backend for tests and embedded use
//! - A gRPC backend for the operator binary
//! - Fault-injecting fakes in integration tests

use thiserror::Error;

use crate::document::Document;

/// Errors a store backend can raise while serving a probe.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing service could not be reached or refused authentication.
    #[error("connection error: {message}")]
    Connection {
        /// Underlying cause, verbatim from the backend.
        message: String,
    },

    /// The filter/query was malformed or rejected by the backend.
    #[error("query rejected: {message}")]
    QueryRejected {
        /// Rejection reason, verbatim from the backend.
        message: String,
    },

    /// The bounded per-request timeout elapsed before a response arrived.
    #[error("request timed out after {duration_ms}ms")]
    Timeout {
        /// Configured timeout that elapsed.
        duration_ms: u64,
    },

    /// The backend responded, but the payload could not be decoded.
    #[error("undecodable response: {message}")]
    Deserialization {
        /// Decode failure detail.
        message: String,
    },

    /// Backend-internal failure (poisoned lock, unexpected state).
    #[error("storage backend error: {message}")]
    Backend {
        /// Failure detail.
        message: String,
    },
}

impl StoreError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a query-rejected error.
    #[must_use]
    pub fn query_rejected(message: impl Into<String>) -> Self {
        Self::QueryRejected {
            message: message.into(),
        }
    }

    /// Creates a backend error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns true when the failure is connectivity rather than a data
    /// problem — the distinction the operator diagnoses with.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }
}

/// Read-only document-store capability the resolver depends on.
///
/// Implementations own their connection, credentials, and timeout policy;
/// the resolver only ever calls `query_by_field`.
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in `collection` whose `field` equals `value`.
    ///
    /// Equality is exact and case-sensitive; no normalization is applied to
    /// `value` on either side. An empty result is `Ok(vec![])`, never an
    /// error.
    ///
    /// # Errors
    /// Any `StoreError` aborts the whole resolution; backends must not
    /// retry internally or return partial results.
    fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: ensure the trait is object-safe
    fn _assert_document_store_object_safe(_: &dyn DocumentStore) {}

    #[test]
    fn test_store_error_display() {
        let err = StoreError::connection("connection refused");
        assert!(err.to_string().contains("connection refused"));

        let err = StoreError::query_rejected("unknown field 'emial'");
        assert!(err.to_string().contains("query rejected"));

        let err = StoreError::Timeout { duration_ms: 30_000 };
        assert!(err.to_string().contains("30000ms"));
    }

    #[test]
    fn test_is_connection() {
        assert!(StoreError::connection("refused").is_connection());
        assert!(StoreError::Timeout { duration_ms: 100 }.is_connection());
        assert!(!StoreError::query_rejected("bad filter").is_connection());
        assert!(!StoreError::backend("poisoned lock").is_connection());
    }
}
