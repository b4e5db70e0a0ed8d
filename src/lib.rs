//! # idprobe - identity lookup across current and legacy collections
//!
//! `idprobe` answers one question for an operator: *does this identity
//! already exist in the document store, and under which data model?* It
//! probes an ordered list of collections (current schema first, legacy
//! schemas last) with a single-field equality filter and reports every
//! match it finds.
//!
//! ## Core Concepts
//!
//! - **Identity key**: the value (an email address) used as the exact-match
//!   filter for every probe. Opaque and case-sensitive; never normalized.
//! - **CollectionDescriptor**: a named collection with a human label and a
//!   legacy marker. Probe order follows descriptor order.
//! - **ProbeOutcome**: `Found` with every matching document, or an explicit
//!   `NotFound`. Not-found is a first-class result, never an error.
//!
//! Every collection is always probed; a hit in an early collection does not
//! short-circuit later probes. The tool exists to surface *all* the places
//! a stale record may linger, including duplicates within one collection.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use idprobe::{default_descriptors, IdentityResolver, InMemoryDocumentStore};
//!
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let resolver = IdentityResolver::new(store);
//! let results = resolver.resolve("a@x.com", &default_descriptors())?;
//! for probe in &results {
//!     println!("{}: {}", probe.descriptor.name, probe.outcome.summary());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod descriptor;
pub mod document;
pub mod error;
pub mod report;
pub mod resolver;
pub mod storage;

#[cfg(feature = "transport-grpc")]
pub mod transport;

// Re-export primary types at crate root for convenience
pub use descriptor::{default_descriptors, CollectionDescriptor, IDENTITY_FIELD};
pub use document::{Document, DocumentId};
pub use error::{ProbeError, ValidationError};
pub use report::render_report;
pub use resolver::{IdentityResolver, ProbeOutcome, ProbeResult};
pub use storage::{DocumentStore, InMemoryDocumentStore, StoreError};

#[cfg(feature = "transport-grpc")]
pub use transport::GrpcDocumentStore;
