//! Command-line interface for seeding the food-ordering document store.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use log::warn;

use menuseed_core::{Dataset, DatasetError, DatasetSource};
use menuseed_data::{EmbeddedDataset, JsonFileDataset};

mod error;
mod seed;
mod validate;

pub use error::CliError;

use seed::SeedArgs;
use validate::ValidateArgs;

const ARG_ENDPOINT: &str = "endpoint";
const ARG_PROJECT: &str = "project";
const ARG_API_KEY: &str = "api-key";
const ARG_DATABASE: &str = "database";
const ARG_CATEGORIES_COLLECTION: &str = "categories-collection";
const ARG_CUSTOMIZATIONS_COLLECTION: &str = "customizations-collection";
const ARG_MENU_COLLECTION: &str = "menu-collection";
const ARG_MENU_CUSTOMIZATIONS_COLLECTION: &str = "menu-customizations-collection";
const ARG_DATASET: &str = "dataset";
const ARG_CREATE_LIMIT: &str = "create-limit";
const ARG_DELETE_LIMIT: &str = "delete-limit";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_ENDPOINT: &str = "MENUSEED_CMDS_SEED_ENDPOINT";
const ENV_PROJECT: &str = "MENUSEED_CMDS_SEED_PROJECT";
const ENV_API_KEY: &str = "MENUSEED_CMDS_SEED_API_KEY";
const ENV_DATABASE: &str = "MENUSEED_CMDS_SEED_DATABASE";

/// Run the menuseed CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Seed(args) => seed::run_seed(args),
        Command::Validate(args) => validate::run_validate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "menuseed",
    about = "Populate an Appwrite database with the food-ordering seed dataset",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Clear the target collections and load the dataset into them.
    Seed(SeedArgs),
    /// Check the dataset without contacting the store.
    Validate(ValidateArgs),
}

/// Load the dataset from `path`, or the embedded one, and validate it.
///
/// Duplicate names are allowed but logged: later entries win when
/// references are resolved.
fn load_dataset(path: Option<&Utf8Path>) -> Result<Dataset, CliError> {
    let dataset = match path {
        Some(path) => {
            require_file(path)?;
            JsonFileDataset::new(path).load()?
        }
        None => EmbeddedDataset.load()?,
    };
    dataset.validate()?;
    for duplicate in dataset.duplicate_names() {
        warn!(
            "dataset has {} {} entries named {:?}; references resolve to the last one",
            duplicate.occurrences, duplicate.kind, duplicate.name
        );
    }
    Ok(dataset)
}

fn require_file(path: &Utf8Path) -> Result<(), CliError> {
    match menuseed_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingDataset {
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingDataset {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::Dataset(DatasetError::Read {
            origin: path.to_string(),
            source,
        })),
    }
}

#[cfg(test)]
mod tests;
