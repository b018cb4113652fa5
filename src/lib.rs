//! Facade crate for the menuseed seeding pipeline.
//!
//! This crate re-exports the core domain types and, behind the `appwrite`
//! feature, the Appwrite-backed store and the seed pipeline itself.

#![forbid(unsafe_code)]

pub use menuseed_core::{
    Category, CollectionId, CollectionSet, Customization, CustomizationKind, DatabaseId, Dataset,
    DatasetError, DatasetSource, Document, DocumentId, DocumentStore, EntityKind, MenuItem,
    NameIndex, ReferenceIndex, SeedTarget, Stage, StoreError,
};

#[cfg(feature = "appwrite")]
pub use menuseed_data::{
    AppwriteConfig, AppwriteStore, EmbeddedDataset, JsonFileDataset, SeedError, SeedOptions,
    SeedPipeline, SeedReport,
};
