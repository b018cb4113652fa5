//! Appwrite REST payloads.
//!
//! Documents come back with store metadata mixed into the attribute map under
//! `$`-prefixed keys (`$id`, `$createdAt`, `$permissions`, ...). Decoding
//! lifts `$id` out and drops the rest.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use menuseed_core::{Attributes, Document, DocumentId};

/// Prefix Appwrite uses for system attributes.
const SYSTEM_PREFIX: char = '$';
const ID_FIELD: &str = "$id";

/// Response of the list-documents endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DocumentList {
    /// Number of documents matching the query, across all pages.
    pub total: u64,
    /// The current page.
    pub documents: Vec<Map<String, Value>>,
}

/// Body of the create-document endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct CreateDocumentRequest<'a> {
    #[serde(rename = "documentId")]
    pub document_id: &'a str,
    pub data: &'a Attributes,
}

/// Error body returned alongside non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ErrorBody {
    /// Best description of a failure, falling back to the raw body.
    pub(crate) fn describe(raw: &str) -> String {
        match serde_json::from_str::<Self>(raw) {
            Ok(Self {
                message: Some(message),
                kind: Some(kind),
            }) => format!("{message} ({kind})"),
            Ok(Self {
                message: Some(message),
                kind: None,
            }) => message,
            _ => raw.trim().to_owned(),
        }
    }
}

/// Split a raw Appwrite document into its id and user attributes.
///
/// Returns `None` when the payload carries no string `$id`.
pub(crate) fn decode_document(mut raw: Map<String, Value>) -> Option<Document> {
    let id = match raw.remove(ID_FIELD) {
        Some(Value::String(id)) => DocumentId::new(id),
        _ => return None,
    };
    raw.retain(|key, _| !key.starts_with(SYSTEM_PREFIX));
    Some(Document {
        id,
        attributes: raw,
    })
}

/// JSON query selecting at most `limit` documents.
pub(crate) fn limit_query(limit: u64) -> String {
    serde_json::json!({ "method": "limit", "values": [limit] }).to_string()
}

/// JSON query skipping the first `offset` documents.
pub(crate) fn offset_query(offset: u64) -> String {
    serde_json::json!({ "method": "offset", "values": [offset] }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_documents_without_system_fields() {
        let raw = json!({
            "$id": "6650c1f2",
            "$collectionId": "categories",
            "$databaseId": "food",
            "$createdAt": "2024-05-24T10:00:00.000+00:00",
            "$permissions": [],
            "name": "Pizza",
            "description": "Stone baked"
        });
        let Value::Object(map) = raw else {
            panic!("fixture should be an object");
        };

        let document = decode_document(map).expect("document should decode");

        assert_eq!(document.id, DocumentId::new("6650c1f2"));
        assert_eq!(document.attributes.len(), 2);
        assert_eq!(document.str_attribute("name"), Some("Pizza"));
    }

    #[rstest]
    fn rejects_documents_without_ids() {
        let raw = json!({ "name": "Pizza" });
        let Value::Object(map) = raw else {
            panic!("fixture should be an object");
        };
        assert!(decode_document(map).is_none());
    }

    #[rstest]
    fn deserialises_document_lists() {
        let body = r#"{
            "total": 2,
            "documents": [{ "$id": "a", "name": "Pizza" }, { "$id": "b", "name": "Drinks" }]
        }"#;
        let list: DocumentList = serde_json::from_str(body).expect("list should deserialise");
        assert_eq!(list.total, 2);
        assert_eq!(list.documents.len(), 2);
    }

    #[rstest]
    fn serialises_create_requests() {
        let mut data = Attributes::new();
        data.insert("name".to_owned(), json!("Pizza"));
        let request = CreateDocumentRequest {
            document_id: "unique()",
            data: &data,
        };
        let body = serde_json::to_value(&request).expect("request should serialise");
        assert_eq!(
            body,
            json!({ "documentId": "unique()", "data": { "name": "Pizza" } })
        );
    }

    #[rstest]
    #[case(
        r#"{"message":"Invalid document structure","code":400,"type":"document_invalid_structure"}"#,
        "Invalid document structure (document_invalid_structure)"
    )]
    #[case(r#"{"message":"Not found"}"#, "Not found")]
    #[case("  gateway exploded  ", "gateway exploded")]
    fn describes_error_bodies(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(ErrorBody::describe(raw), expected);
    }

    #[rstest]
    fn builds_pagination_queries() {
        assert_eq!(limit_query(100), r#"{"method":"limit","values":[100]}"#);
        assert_eq!(offset_query(200), r#"{"method":"offset","values":[200]}"#);
    }
}
