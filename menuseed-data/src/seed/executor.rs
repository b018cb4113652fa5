//! Single-document creation.

use log::debug;

use menuseed_core::{
    Attributes, CollectionId, DatabaseId, DocumentId, DocumentStore, NewDocumentId, StoreError,
};

/// Create one document under a store-assigned id and return that id.
///
/// Errors are returned untouched; the calling stage decides what they mean.
///
/// # Errors
///
/// Returns the [`StoreError`] reported by `store`.
pub async fn create_entity<S: DocumentStore + ?Sized>(
    store: &S,
    database: &DatabaseId,
    collection: &CollectionId,
    attributes: Attributes,
) -> Result<DocumentId, StoreError> {
    let document = store
        .create_document(database, collection, NewDocumentId::Unique, attributes)
        .await?;
    debug!("created {} in {collection}", document.id);
    Ok(document.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuseed_core::test_support::{InMemoryStore, block_on_for_tests};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn returns_the_assigned_id() {
        let store = InMemoryStore::new();
        let collection = CollectionId::new("categories");
        let mut attributes = Attributes::new();
        attributes.insert("name".to_owned(), json!("Pizza"));

        let id = block_on_for_tests(create_entity(
            &store,
            &DatabaseId::new("food"),
            &collection,
            attributes,
        ))
        .expect("create succeeds");

        let stored = store.document(&collection, &id).expect("document stored");
        assert_eq!(stored.str_attribute("name"), Some("Pizza"));
    }

    #[rstest]
    fn passes_store_errors_through() {
        let store = InMemoryStore::new();
        let collection = CollectionId::new("categories");
        store.fail_create_at(&collection, 1);

        let err = block_on_for_tests(create_entity(
            &store,
            &DatabaseId::new("food"),
            &collection,
            Attributes::new(),
        ))
        .expect_err("create should fail");

        assert!(matches!(err, StoreError::Rejected { .. }));
    }
}
