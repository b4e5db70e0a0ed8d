//! Collection descriptors: which collections get probed, in what order.
//!
//! Probe order is significant only for report readability: current-schema
//! collections come first, legacy collections last, reflecting the
//! migration history of the data. Correctness never depends on order
//! because every collection is always probed.

use serde::{Deserialize, Serialize};

/// The document field every probe filters on.
pub const IDENTITY_FIELD: &str = "email";

/// One collection to probe: a store-level name plus a human label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    /// Collection name as known to the backing store.
    pub name: String,
    /// Human-readable label for report output.
    pub label: String,
    /// True for collections retained from a prior data model.
    pub legacy: bool,
}

impl CollectionDescriptor {
    /// Creates a descriptor for a current-schema collection.
    #[must_use]
    pub fn current(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            legacy: false,
        }
    }

    /// Creates a descriptor for a legacy collection.
    #[must_use]
    pub fn legacy(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            legacy: true,
        }
    }
}

/// The production collection list, in probe order.
///
/// Current-schema collections first, then the two collections left behind
/// by earlier data models. Stale records in the legacy collections are
/// exactly what this tool exists to find.
#[must_use]
pub fn default_descriptors() -> Vec<CollectionDescriptor> {
    vec![
        CollectionDescriptor::current("users_specific", "user profiles"),
        CollectionDescriptor::current("employers", "employer accounts"),
        CollectionDescriptor::legacy("employees", "employee accounts"),
        CollectionDescriptor::legacy("users", "user accounts"),
    ]
}
