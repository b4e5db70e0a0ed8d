//! Document types returned by store probes.
//!
//! Documents are opaque to the resolver: an identifier assigned by the
//! backing store plus a schemaless JSON object payload. Whatever the store
//! holds is what the report shows, verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned document identifier.
///
/// Treated as an opaque string. Stores assign these on insert and the
/// resolver only ever echoes them back in reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a document id from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single document fetched from a collection.
///
/// The payload is an arbitrary key/value object; the resolver never
/// interprets it beyond serializing it back out for the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier assigned by the originating store.
    pub id: DocumentId,
    /// Schemaless document payload.
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// Creates a document from an id and payload object.
    #[must_use]
    pub fn new(id: impl Into<DocumentId>, data: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Returns a field of the payload, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name)
    }

    /// Serializes the payload as pretty-printed JSON for report output.
    ///
    /// # Errors
    /// Returns `serde_json::Error` if the payload cannot be serialized,
    /// which cannot happen for a well-formed JSON object.
    pub fn data_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Map<String, serde_json::Value> {
        let serde_json::Value::Object(map) = json!({
            "email": "a@x.com",
            "name": "Asha",
            "role": "employer",
        }) else {
            panic!("expected JSON object");
        };
        map
    }

    #[test]
    fn test_document_id_display() {
        let id = DocumentId::new("abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_document_field_access() {
        let doc = Document::new("abc123", payload());
        assert_eq!(doc.field("email"), Some(&json!("a@x.com")));
        assert!(doc.field("missing").is_none());
    }

    #[test]
    fn test_document_serialization_round_trip() {
        let doc = Document::new("abc123", payload());
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_document_id_serde_transparent() {
        let id = DocumentId::new("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");
    }

    #[test]
    fn test_data_pretty_contains_fields() {
        let doc = Document::new("abc123", payload());
        let pretty = doc.data_pretty().unwrap();
        assert!(pretty.contains("\"email\""));
        assert!(pretty.contains("a@x.com"));
    }
}
