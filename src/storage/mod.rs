//! Document-store backends.
//!
//! `traits` defines the abstract capability the resolver depends on;
//! `memory` provides the in-memory reference backend. The gRPC backend
//! lives in `crate::transport` behind the `transport-grpc` feature.

mod memory;
mod traits;

pub use memory::InMemoryDocumentStore;
pub use traits::{DocumentStore, StoreError};
