//! Core domain types for seeding the food-ordering document store.
//!
//! Responsibilities:
//! - Describe the seed dataset and validate its shape.
//! - Define the [`DocumentStore`] seam the pipeline writes through.
//! - Provide the per-run [`ReferenceIndex`] used to wire cross-collection
//!   references the store does not enforce.
//!
//! Boundaries:
//! - No I/O here; transports and dataset files live in `menuseed-data`.
//!
//! Invariants:
//! - Identifiers are assigned by the store, never invented locally.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod dataset;
mod ids;
pub mod index;
pub mod stage;
pub mod store;
mod target;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use dataset::{
    Category, Customization, CustomizationKind, Dataset, DatasetError, DatasetSource,
    DuplicateName, EntityKind, MenuCustomizationLink, MenuItem,
};
pub use ids::{CollectionId, DatabaseId, DocumentId, NewDocumentId, UNIQUE_ID_SENTINEL};
pub use index::{NameIndex, ReferenceIndex};
pub use stage::{Recovery, Stage};
pub use store::{Attributes, Document, DocumentStore, StoreError};
pub use target::{
    CollectionSet, DEFAULT_CATEGORIES_COLLECTION, DEFAULT_CUSTOMIZATIONS_COLLECTION,
    DEFAULT_MENU_COLLECTION, DEFAULT_MENU_CUSTOMIZATIONS_COLLECTION, SeedTarget,
};
