//! I/O side of menu seeding: the Appwrite store client, dataset sources and
//! the seed pipeline that ties them together.
//!
//! The pipeline only depends on [`menuseed_core::DocumentStore`]; swap
//! [`appwrite::AppwriteStore`] for the in-memory store from
//! `menuseed_core::test_support` to exercise it without a network.

#![forbid(unsafe_code)]

pub mod appwrite;
pub mod dataset;
pub mod images;
pub mod seed;

pub use appwrite::{AppwriteConfig, AppwriteStore, ClientBuildError};
pub use dataset::{EmbeddedDataset, JsonFileDataset};
pub use images::{ImageError, ImageResolver, PassthroughImages};
pub use seed::{
    MenuLoad, ResetOutcome, SeedError, SeedOptions, SeedPipeline, SeedReport, SkippedItem,
    SkippedLink, StageFailure,
};
