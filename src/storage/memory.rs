//! In-memory document-store backend.
//!
//! A thread-safe map of collection name to documents. Intended for tests
//! and embedded usage, and as the reference implementation of the
//! `DocumentStore` contract.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::document::{Document, DocumentId};
use crate::storage::traits::{DocumentStore, StoreError};

fn lock_err(context: &'static str) -> StoreError {
    StoreError::backend(format!("poisoned lock: {context}"))
}

/// In-memory `DocumentStore` backed by a `RwLock`ed map.
///
/// Collections spring into existence on first insert; querying a collection
/// that was never written yields an empty result, matching how a document
/// store treats unknown collection names.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a payload into `collection` under a fresh UUID document id.
    ///
    /// Returns the assigned id so callers can assert round-trips.
    ///
    /// # Errors
    /// `StoreError::Backend` if the store lock is poisoned.
    pub fn insert(
        &self,
        collection: &str,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> Result<DocumentId, StoreError> {
        let id = DocumentId::new(Uuid::new_v4().to_string());
        self.insert_with_id(collection, id.clone(), data)?;
        Ok(id)
    }

    /// Inserts a payload under a caller-chosen document id.
    ///
    /// Ids are not required to be unique: the backing store this models
    /// assigns ids itself, and this method exists so tests can fix them.
    ///
    /// # Errors
    /// `StoreError::Backend` if the store lock is poisoned.
    pub fn insert_with_id(
        &self,
        collection: &str,
        id: DocumentId,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().map_err(|_| lock_err("insert"))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document { id, data });
        Ok(())
    }

    /// Number of documents currently held in `collection`.
    ///
    /// # Errors
    /// `StoreError::Backend` if the store lock is poisoned.
    pub fn len(&self, collection: &str) -> Result<usize, StoreError> {
        let collections = self.collections.read().map_err(|_| lock_err("len"))?;
        Ok(collections.get(collection).map_or(0, Vec::len))
    }

    /// Returns true when `collection` holds no documents.
    ///
    /// # Errors
    /// `StoreError::Backend` if the store lock is poisoned.
    pub fn is_empty(&self, collection: &str) -> Result<bool, StoreError> {
        Ok(self.len(collection)? == 0)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().map_err(|_| lock_err("query"))?;

        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        // Exact, case-sensitive string equality; non-string fields never match.
        let matches = documents
            .iter()
            .filter(|doc| doc.field(field).and_then(|v| v.as_str()) == Some(value))
            .cloned()
            .collect();

        Ok(matches)
    }
}
