//! Appwrite transport for the [`DocumentStore`](menuseed_core::DocumentStore)
//! seam.
//!
//! ```no_run
//! use menuseed_data::appwrite::{AppwriteConfig, AppwriteStore};
//!
//! let config = AppwriteConfig::new("https://cloud.appwrite.io/v1", "food-app", "key");
//! let store = AppwriteStore::new(&config)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod wire;

pub use client::{AppwriteConfig, AppwriteStore, ClientBuildError, DEFAULT_USER_AGENT, PAGE_SIZE};
