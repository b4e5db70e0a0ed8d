//! Error types for idprobe.
//!
//! All errors are strongly typed using thiserror. The taxonomy is small on
//! purpose: input validation problems, and probe failures carrying the
//! offending collection. A collection with no matching documents is never
//! an error — `NotFound` is a first-class outcome in `resolver`.

use thiserror::Error;

use crate::storage::StoreError;

/// Validation errors raised before any probe executes.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The identity key was empty.
    #[error("Identity key cannot be empty")]
    EmptyIdentityKey,

    /// The descriptor list was empty.
    #[error("At least one collection descriptor is required")]
    NoDescriptors,

    /// Two descriptors named the same collection.
    #[error("Duplicate collection name: {name}")]
    DuplicateCollection {
        /// The repeated collection name.
        name: String,
    },
}

/// Top-level error type for idprobe.
///
/// A probe failure aborts the whole resolution: no retry, no partial
/// results. The error keeps the collection name so the operator can tell a
/// connectivity problem from a genuine data issue.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Input validation failed; nothing was probed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A probe against one collection failed.
    #[error("Probe of collection '{collection}' failed: {source}")]
    Probe {
        /// The collection whose fetch failed.
        collection: String,
        /// Underlying store failure, verbatim.
        #[source]
        source: StoreError,
    },
}

impl ProbeError {
    /// Wraps a store failure with the collection it occurred against.
    #[must_use]
    pub fn probe(collection: impl Into<String>, source: StoreError) -> Self {
        Self::Probe {
            collection: collection.into(),
            source,
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the underlying failure is connectivity rather than
    /// a rejected query.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        match self {
            Self::Probe { source, .. } => source.is_connection(),
            Self::Validation(_) => false,
        }
    }

    /// The collection whose probe failed, when there is one.
    #[must_use]
    pub fn failed_collection(&self) -> Option<&str> {
        match self {
            Self::Probe { collection, .. } => Some(collection),
            Self::Validation(_) => None,
        }
    }
}

/// Result type alias for idprobe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::EmptyIdentityKey;
        assert!(err.to_string().contains("cannot be empty"));

        let err = ValidationError::DuplicateCollection {
            name: "users".to_string(),
        };
        assert!(err.to_string().contains("users"));
    }

    #[test]
    fn test_probe_error_carries_collection() {
        let err = ProbeError::probe("employers", StoreError::connection("refused"));
        assert_eq!(err.failed_collection(), Some("employers"));

        let msg = err.to_string();
        assert!(msg.contains("employers"));
        assert!(msg.contains("refused"));
    }

    #[test]
    fn test_probe_error_from_validation() {
        let err: ProbeError = ValidationError::NoDescriptors.into();
        assert!(err.is_validation());
        assert!(!err.is_connection());
        assert!(err.failed_collection().is_none());
    }

    #[test]
    fn test_is_connection_distinguishes_causes() {
        let conn = ProbeError::probe("users", StoreError::connection("unreachable"));
        assert!(conn.is_connection());

        let rejected = ProbeError::probe("users", StoreError::query_rejected("bad filter"));
        assert!(!rejected.is_connection());

        let timeout = ProbeError::probe("users", StoreError::Timeout { duration_ms: 100 });
        assert!(timeout.is_connection());
    }
}
