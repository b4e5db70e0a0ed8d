//! The Identity Resolver: sequential probes over an ordered collection list.
//!
//! Given one identity key, the resolver runs a single-field equality query
//! against every descriptor in order and records a per-collection outcome.
//! A hit never short-circuits later probes: the tool exists to surface
//! *every* place a stale record may linger, so each collection is always
//! checked. The first failing probe aborts the run with the collection
//! name attached.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::descriptor::{CollectionDescriptor, IDENTITY_FIELD};
use crate::document::Document;
use crate::error::{ProbeError, Result, ValidationError};
use crate::storage::DocumentStore;

/// Outcome of probing one collection.
///
/// `NotFound` is a first-class result, not an error: "not found anywhere"
/// is a perfectly successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// One or more documents matched the identity key.
    ///
    /// All matches are reported. The identity field is not assumed unique
    /// within a collection — duplicates under one email are themselves a
    /// data-integrity finding.
    Found {
        /// Every matching document, in store order.
        documents: Vec<Document>,
    },
    /// No document in the collection matched.
    NotFound,
}

impl ProbeOutcome {
    /// Returns true when at least one document matched.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Number of matching documents (zero for `NotFound`).
    #[must_use]
    pub fn match_count(&self) -> usize {
        match self {
            Self::Found { documents } => documents.len(),
            Self::NotFound => 0,
        }
    }

    /// One-line summary for compact output.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Found { documents } if documents.len() == 1 => "found 1 record".to_string(),
            Self::Found { documents } => format!("found {} records", documents.len()),
            Self::NotFound => "not found".to_string(),
        }
    }
}

/// Per-collection result: the descriptor that was probed and its outcome.
///
/// The resolver returns these in descriptor order with one entry per
/// descriptor, so callers may zip results back onto their input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The descriptor this probe ran against.
    pub descriptor: CollectionDescriptor,
    /// What the probe found.
    pub outcome: ProbeOutcome,
}

/// Probes collections for an identity key, one at a time, in order.
///
/// The store is an injected dependency so tests can substitute a fake
/// backend; the resolver holds no other state and performs no writes.
pub struct IdentityResolver {
    store: Arc<dyn DocumentStore>,
    identity_field: String,
}

impl IdentityResolver {
    /// Creates a resolver over `store`, filtering on the default identity
    /// field (`email`).
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            identity_field: IDENTITY_FIELD.to_string(),
        }
    }

    /// Overrides the document field the equality filter applies to.
    #[must_use]
    pub fn with_identity_field(mut self, field: impl Into<String>) -> Self {
        self.identity_field = field.into();
        self
    }

    /// The field probes currently filter on.
    #[must_use]
    pub fn identity_field(&self) -> &str {
        &self.identity_field
    }

    /// Probes every descriptor in order for `identity_key`.
    ///
    /// The identity key is matched exactly: case-sensitive, untrimmed, no
    /// normalization of any kind. The output has the same length and order
    /// as `descriptors`, one `ProbeResult` each.
    ///
    /// # Errors
    /// - `ProbeError::Validation` if the key is empty, the descriptor list
    ///   is empty, or two descriptors name the same collection. Nothing is
    ///   probed in that case.
    /// - `ProbeError::Probe` on the first failing fetch. Remaining
    ///   descriptors are not probed and no partial results are returned.
    pub fn resolve(
        &self,
        identity_key: &str,
        descriptors: &[CollectionDescriptor],
    ) -> Result<Vec<ProbeResult>> {
        validate_inputs(identity_key, descriptors)?;

        let mut results = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let documents = self
                .store
                .query_by_field(&descriptor.name, &self.identity_field, identity_key)
                .map_err(|e| ProbeError::probe(descriptor.name.clone(), e))?;

            let outcome = if documents.is_empty() {
                ProbeOutcome::NotFound
            } else {
                ProbeOutcome::Found { documents }
            };

            results.push(ProbeResult {
                descriptor: descriptor.clone(),
                outcome,
            });
        }

        Ok(results)
    }
}

fn validate_inputs(
    identity_key: &str,
    descriptors: &[CollectionDescriptor],
) -> std::result::Result<(), ValidationError> {
    if identity_key.is_empty() {
        return Err(ValidationError::EmptyIdentityKey);
    }
    if descriptors.is_empty() {
        return Err(ValidationError::NoDescriptors);
    }

    let mut seen = HashSet::with_capacity(descriptors.len());
    for descriptor in descriptors {
        if !seen.insert(descriptor.name.as_str()) {
            return Err(ValidationError::DuplicateCollection {
                name: descriptor.name.clone(),
            });
        }
    }

    Ok(())
}
