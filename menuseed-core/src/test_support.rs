//! Test doubles for exercising seed runs without a live store.
//!
//! [`InMemoryStore`] keeps documents per collection in creation order, assigns
//! sequential identifiers, and can be told to fail specific calls.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap, HashSet},
    future::Future,
};

use async_trait::async_trait;
use tokio::runtime::Builder;

use crate::{
    Attributes, Category, CollectionId, Customization, CustomizationKind, DatabaseId, Dataset,
    Document, DocumentId, DocumentStore, MenuItem, NewDocumentId, StoreError,
};

/// In-memory [`DocumentStore`].
///
/// The database id is accepted but ignored: every collection lives in one
/// shared namespace.
///
/// # Examples
/// ```
/// # use menuseed_core::test_support::{InMemoryStore, block_on_for_tests};
/// # use menuseed_core::{Attributes, CollectionId, DatabaseId, DocumentStore, NewDocumentId};
/// let store = InMemoryStore::new();
/// let database = DatabaseId::new("db");
/// let collection = CollectionId::new("categories");
/// let created = block_on_for_tests(store.create_document(
///     &database,
///     &collection,
///     NewDocumentId::Unique,
///     Attributes::new(),
/// ))
/// .expect("create succeeds");
/// assert_eq!(store.documents(&collection), vec![created]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RefCell<State>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    collections: BTreeMap<CollectionId, Vec<Document>>,
    failing_lists: HashSet<CollectionId>,
    failing_deletes: HashSet<(CollectionId, DocumentId)>,
    failing_creates: HashMap<CollectionId, usize>,
    create_attempts: HashMap<CollectionId, usize>,
    delete_attempts: HashMap<CollectionId, usize>,
}

impl State {
    fn assign_id(&mut self) -> DocumentId {
        self.next_id += 1;
        DocumentId::new(format!("doc-{:04}", self.next_id))
    }
}

impl InMemoryStore {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `count` placeholder documents into `collection`.
    ///
    /// Returns the assigned ids.
    pub fn prefill(&self, collection: &CollectionId, count: usize) -> Vec<DocumentId> {
        let mut state = self.state.borrow_mut();
        (0..count)
            .map(|_| {
                let id = state.assign_id();
                state
                    .collections
                    .entry(collection.clone())
                    .or_default()
                    .push(Document {
                        id: id.clone(),
                        attributes: Attributes::new(),
                    });
                id
            })
            .collect()
    }

    /// Make every listing of `collection` fail.
    pub fn fail_listing(&self, collection: &CollectionId) {
        self.state
            .borrow_mut()
            .failing_lists
            .insert(collection.clone());
    }

    /// Make deleting document `id` from `collection` fail.
    pub fn fail_deleting(&self, collection: &CollectionId, id: &DocumentId) {
        self.state
            .borrow_mut()
            .failing_deletes
            .insert((collection.clone(), id.clone()));
    }

    /// Make the `attempt`-th create call (1-based) against `collection` fail.
    pub fn fail_create_at(&self, collection: &CollectionId, attempt: usize) {
        self.state
            .borrow_mut()
            .failing_creates
            .insert(collection.clone(), attempt);
    }

    /// Snapshot of the documents in `collection`, in creation order.
    #[must_use]
    pub fn documents(&self, collection: &CollectionId) -> Vec<Document> {
        self.state
            .borrow()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of documents in `collection`.
    #[must_use]
    pub fn count(&self, collection: &CollectionId) -> usize {
        self.state
            .borrow()
            .collections
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Look up a document by id.
    #[must_use]
    pub fn document(&self, collection: &CollectionId, id: &DocumentId) -> Option<Document> {
        self.state
            .borrow()
            .collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|document| &document.id == id))
            .cloned()
    }

    /// Number of create calls made against `collection`, failed ones included.
    #[must_use]
    pub fn create_attempts(&self, collection: &CollectionId) -> usize {
        self.state
            .borrow()
            .create_attempts
            .get(collection)
            .copied()
            .unwrap_or_default()
    }

    /// Number of delete calls made against `collection`, failed ones included.
    #[must_use]
    pub fn delete_attempts(&self, collection: &CollectionId) -> usize {
        self.state
            .borrow()
            .delete_attempts
            .get(collection)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait(?Send)]
impl DocumentStore for InMemoryStore {
    async fn list_documents(
        &self,
        _database: &DatabaseId,
        collection: &CollectionId,
    ) -> Result<Vec<Document>, StoreError> {
        let state = self.state.borrow();
        if state.failing_lists.contains(collection) {
            return Err(StoreError::Network {
                url: format!("memory://{collection}"),
                message: "listing disabled".to_owned(),
            });
        }
        Ok(state
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_document(
        &self,
        _database: &DatabaseId,
        collection: &CollectionId,
        id: NewDocumentId,
        attributes: Attributes,
    ) -> Result<Document, StoreError> {
        let mut state = self.state.borrow_mut();
        let attempts = state.create_attempts.entry(collection.clone()).or_default();
        *attempts += 1;
        let attempt = *attempts;
        if state.failing_creates.get(collection) == Some(&attempt) {
            return Err(StoreError::Rejected {
                collection: collection.clone(),
                message: format!("create attempt {attempt} refused"),
            });
        }
        let id = match id {
            NewDocumentId::Unique => state.assign_id(),
            NewDocumentId::Explicit(requested) => {
                let taken = state
                    .collections
                    .get(collection)
                    .is_some_and(|documents| documents.iter().any(|doc| doc.id == requested));
                if taken {
                    return Err(StoreError::Rejected {
                        collection: collection.clone(),
                        message: format!("document {requested} already exists"),
                    });
                }
                requested
            }
        };
        let document = Document { id, attributes };
        state
            .collections
            .entry(collection.clone())
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    async fn delete_document(
        &self,
        _database: &DatabaseId,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        *state
            .delete_attempts
            .entry(collection.clone())
            .or_default() += 1;
        if state
            .failing_deletes
            .contains(&(collection.clone(), id.clone()))
        {
            return Err(StoreError::Http {
                url: format!("memory://{collection}/{id}"),
                status: 500,
                message: "delete disabled".to_owned(),
            });
        }
        let documents = state.collections.entry(collection.clone()).or_default();
        let before = documents.len();
        documents.retain(|document| &document.id != id);
        if documents.len() == before {
            return Err(StoreError::NotFound {
                collection: collection.clone(),
                id: id.clone(),
            });
        }
        Ok(())
    }
}

/// Drive `future` to completion on a fresh current-thread runtime.
///
/// # Panics
///
/// Panics when the Tokio runtime cannot be constructed.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime.block_on(future),
        Err(err) => panic!("failed to build Tokio runtime: {err}"),
    }
}

/// The single-dish dataset: one `Pizza` category, one `Extra Cheese`
/// topping and a `Margherita` that uses both.
#[must_use]
pub fn margherita_dataset() -> Dataset {
    Dataset {
        categories: vec![category("Pizza")],
        customizations: vec![customization("Extra Cheese", CustomizationKind::Topping)],
        menu: vec![menu_item("Margherita", "Pizza", &["Extra Cheese"])],
    }
}

/// Build a category with a generated description.
#[must_use]
pub fn category(name: &str) -> Category {
    Category {
        name: name.to_owned(),
        description: format!("All things {name}"),
    }
}

/// Build a customization priced at 25.
#[must_use]
pub fn customization(name: &str, kind: CustomizationKind) -> Customization {
    Customization {
        name: name.to_owned(),
        price: 25.0,
        kind,
    }
}

/// Build a menu item in `category_name` offering `customizations`.
#[must_use]
pub fn menu_item(name: &str, category_name: &str, customizations: &[&str]) -> MenuItem {
    MenuItem {
        name: name.to_owned(),
        description: format!("{name}, freshly made"),
        image_url: format!("https://img.example.com/{}.png", name.to_lowercase()),
        price: 9.5,
        rating: 4.5,
        calories: 650,
        protein: 25,
        category_name: category_name.to_owned(),
        customizations: customizations
            .iter()
            .map(|entry| (*entry).to_owned())
            .collect(),
    }
}
