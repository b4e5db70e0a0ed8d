//! gRPC document-store backend.
//!
//! Talks to the document-store query facade over tonic. Document payloads
//! travel as JSON bytes: the store's documents are schemaless and the wire
//! format should not constrain them.
//!
//! The backend owns a private tokio runtime so it can satisfy the
//! synchronous `DocumentStore` trait; the resolver stays a plain
//! sequential loop and each probe blocks until its response (or the
//! bounded per-request timeout) arrives.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};

use crate::document::Document;
use crate::storage::{DocumentStore, StoreError};

#[allow(missing_docs)]
pub mod proto {
    tonic::include_proto!("docstore");
}

use proto::doc_store_client::DocStoreClient;
use proto::{DocumentProto, QueryRequest};

/// Per-request timeout applied when the caller does not choose one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `DocumentStore` backed by a remote gRPC query service.
pub struct GrpcDocumentStore {
    runtime: tokio::runtime::Runtime,
    client: DocStoreClient<Channel>,
    timeout: Duration,
}

impl GrpcDocumentStore {
    /// Connects to the query service at `endpoint` with the default
    /// per-request timeout.
    ///
    /// # Errors
    /// `StoreError::Connection` if the endpoint is malformed or the
    /// connection cannot be established.
    pub fn connect(endpoint: &str) -> Result<Self, StoreError> {
        Self::connect_with_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Connects with an explicit per-request timeout.
    ///
    /// The timeout bounds every probe so a stalled backend surfaces as a
    /// probe failure instead of hanging the run indefinitely.
    ///
    /// # Errors
    /// `StoreError::Connection` if the endpoint is malformed or the
    /// connection cannot be established.
    pub fn connect_with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| StoreError::backend(format!("failed to start runtime: {e}")))?;

        let endpoint = Endpoint::from_shared(endpoint.to_string())
            .map_err(|e| StoreError::connection(format!("invalid endpoint: {e}")))?
            .timeout(timeout)
            .connect_timeout(timeout);

        let channel = runtime
            .block_on(endpoint.connect())
            .map_err(|e| StoreError::connection(e.to_string()))?;

        Ok(Self {
            runtime,
            client: DocStoreClient::new(channel),
            timeout,
        })
    }
}

impl DocumentStore for GrpcDocumentStore {
    fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let request = QueryRequest {
            collection: collection.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        };

        // Tonic clients are cheap to clone; the clone shares the channel.
        let mut client = self.client.clone();
        let response = self
            .runtime
            .block_on(async move { client.query(request).await })
            .map_err(|status| status_to_store_error(&status, self.timeout))?;

        response
            .into_inner()
            .documents
            .into_iter()
            .map(decode_document)
            .collect()
    }
}

fn status_to_store_error(status: &Status, timeout: Duration) -> StoreError {
    match status.code() {
        Code::Unavailable | Code::Unauthenticated | Code::PermissionDenied => {
            StoreError::connection(status.message().to_string())
        }
        Code::DeadlineExceeded | Code::Cancelled => StoreError::Timeout {
            duration_ms: timeout.as_millis().try_into().unwrap_or(u64::MAX),
        },
        Code::InvalidArgument | Code::NotFound | Code::FailedPrecondition => {
            StoreError::query_rejected(status.message().to_string())
        }
        _ => StoreError::backend(format!("{}: {}", status.code(), status.message())),
    }
}

fn decode_document(proto: DocumentProto) -> Result<Document, StoreError> {
    let data = if proto.data_json.is_empty() {
        serde_json::Map::new()
    } else {
        serde_json::from_slice(&proto.data_json).map_err(|e| StoreError::Deserialization {
            message: format!("document {}: {e}", proto.id),
        })?
    };

    Ok(Document::new(proto.id, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_connection() {
        let err = status_to_store_error(&Status::unavailable("down"), DEFAULT_REQUEST_TIMEOUT);
        assert!(matches!(err, StoreError::Connection { .. }));

        let err = status_to_store_error(&Status::unauthenticated("bad creds"), DEFAULT_REQUEST_TIMEOUT);
        assert!(matches!(err, StoreError::Connection { .. }));
    }

    #[test]
    fn test_status_mapping_timeout() {
        let err = status_to_store_error(
            &Status::deadline_exceeded("too slow"),
            Duration::from_secs(5),
        );
        assert!(matches!(err, StoreError::Timeout { duration_ms: 5000 }));
    }

    #[test]
    fn test_status_mapping_query_rejected() {
        let err = status_to_store_error(
            &Status::invalid_argument("unknown field"),
            DEFAULT_REQUEST_TIMEOUT,
        );
        assert!(matches!(err, StoreError::QueryRejected { .. }));
    }

    #[test]
    fn test_status_mapping_other_is_backend() {
        let err = status_to_store_error(&Status::internal("boom"), DEFAULT_REQUEST_TIMEOUT);
        assert!(matches!(err, StoreError::Backend { .. }));
    }

    #[test]
    fn test_decode_document_round_trip() {
        let proto = DocumentProto {
            id: "doc-1".to_string(),
            data_json: br#"{"email":"a@x.com"}"#.to_vec(),
        };
        let doc = decode_document(proto).unwrap();
        assert_eq!(doc.id.as_str(), "doc-1");
        assert_eq!(doc.field("email").and_then(|v| v.as_str()), Some("a@x.com"));
    }

    #[test]
    fn test_decode_document_empty_payload() {
        let proto = DocumentProto {
            id: "doc-1".to_string(),
            data_json: Vec::new(),
        };
        let doc = decode_document(proto).unwrap();
        assert!(doc.data.is_empty());
    }

    #[test]
    fn test_decode_document_invalid_json() {
        let proto = DocumentProto {
            id: "doc-1".to_string(),
            data_json: b"not json".to_vec(),
        };
        let err = decode_document(proto).unwrap_err();
        assert!(matches!(err, StoreError::Deserialization { .. }));
        assert!(err.to_string().contains("doc-1"));
    }
}
