//! The document store a seed run writes to.
//!
//! Only three operations are needed: list a collection, create a document,
//! delete a document. Identifier generation belongs to the store; callers
//! request [`NewDocumentId::Unique`] and read the assigned id back from the
//! returned [`Document`].

mod error;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{CollectionId, DatabaseId, DocumentId, NewDocumentId};

pub use error::StoreError;

/// Attribute set of a document, keyed by field name.
pub type Attributes = Map<String, Value>;

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Identifier assigned by the store.
    pub id: DocumentId,
    /// Stored attributes, excluding store metadata.
    pub attributes: Attributes,
}

impl Document {
    /// Convenience accessor for a string attribute.
    #[must_use]
    pub fn str_attribute(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).and_then(Value::as_str)
    }
}

/// Remote document store.
///
/// Futures are not required to be `Send`: the pipeline drives every call
/// from a single task and fans out with combinators rather than spawning.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Return every document currently in `collection`.
    async fn list_documents(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
    ) -> Result<Vec<Document>, StoreError>;

    /// Create a document and return it as stored.
    async fn create_document(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        id: NewDocumentId,
        attributes: Attributes,
    ) -> Result<Document, StoreError>;

    /// Delete the document identified by `id`.
    async fn delete_document(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Result<(), StoreError>;
}

#[async_trait(?Send)]
impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    async fn list_documents(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
    ) -> Result<Vec<Document>, StoreError> {
        (**self).list_documents(database, collection).await
    }

    async fn create_document(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        id: NewDocumentId,
        attributes: Attributes,
    ) -> Result<Document, StoreError> {
        (**self)
            .create_document(database, collection, id, attributes)
            .await
    }

    async fn delete_document(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Result<(), StoreError> {
        (**self).delete_document(database, collection, id).await
    }
}
