//! Test helpers for driving CLI commands against an in-memory store.

use super::*;
use crate::seed::{SeedArgs, SeedStoreBuilder};
use camino::Utf8PathBuf;
use menuseed_core::DocumentStore;
use menuseed_core::test_support::InMemoryStore;
use menuseed_data::AppwriteConfig;
use tempfile::TempDir;

/// Hands out a borrowed in-memory store in place of an Appwrite client.
pub(super) struct InMemoryStoreBuilder<'a> {
    pub(super) store: &'a InMemoryStore,
}

impl SeedStoreBuilder for InMemoryStoreBuilder<'_> {
    fn build(&self, _config: &AppwriteConfig) -> Result<Box<dyn DocumentStore + '_>, CliError> {
        Ok(Box::new(self.store))
    }
}

/// Seed arguments with every required connection setting filled in.
pub(super) fn connected_args() -> SeedArgs {
    SeedArgs {
        endpoint: Some("https://appwrite.example.com/v1".to_owned()),
        project: Some("food-app".to_owned()),
        api_key: Some("secret".to_owned()),
        database: Some("food".to_owned()),
        ..SeedArgs::default()
    }
}

/// A scratch directory holding `dataset.json` with the given contents.
pub(super) struct DatasetFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl DatasetFile {
    pub(super) fn new(contents: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("dataset.json");
        std::fs::write(&path, contents).expect("write dataset");
        Self { _dir: dir, path }
    }

    pub(super) fn with_dataset(dataset: &Dataset) -> Self {
        Self::new(&serde_json::to_string_pretty(dataset).expect("serialize dataset"))
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }
}
