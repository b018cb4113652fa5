//! Error types emitted by the menuseed CLI.
//!
//! Keep this error type reasonably small, as most CLI helpers return
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use menuseed_core::DatasetError;
use menuseed_data::{ClientBuildError, SeedError};

/// Errors emitted by the menuseed CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A numeric option is out of range.
    #[error("{field} must be at least 1")]
    ZeroLimit { field: &'static str },
    /// The dataset path does not exist or is not a file.
    #[error("dataset path {path:?} does not exist or is not a file")]
    MissingDataset { path: Utf8PathBuf },
    /// The dataset could not be loaded or failed validation.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Building the Appwrite client failed.
    #[error("failed to build Appwrite client for {endpoint:?}: {source}")]
    BuildStore {
        endpoint: String,
        #[source]
        source: ClientBuildError,
    },
    /// Building the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The seed run aborted.
    #[error("seeding failed: {0}")]
    Seed(#[from] SeedError),
    /// Writing the summary failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
