//! Seed command implementation.

use std::{io::Write, num::NonZeroUsize, time::Duration};

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use menuseed_core::{CollectionId, CollectionSet, DatabaseId, Dataset, DocumentStore, SeedTarget};
use menuseed_data::{
    AppwriteConfig, AppwriteStore, ResetOutcome, SeedOptions, SeedPipeline, SeedReport,
};

use crate::{
    ARG_API_KEY, ARG_CATEGORIES_COLLECTION, ARG_CREATE_LIMIT, ARG_CUSTOMIZATIONS_COLLECTION,
    ARG_DATABASE, ARG_DATASET, ARG_DELETE_LIMIT, ARG_ENDPOINT, ARG_MENU_COLLECTION,
    ARG_MENU_CUSTOMIZATIONS_COLLECTION, ARG_PROJECT, ARG_TIMEOUT_SECS, CliError, ENV_API_KEY,
    ENV_DATABASE, ENV_ENDPOINT, ENV_PROJECT, load_dataset,
};

/// CLI arguments for the `seed` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Delete every document in the four target collections, then \
                 load categories, customizations and menu items from the \
                 dataset. Connection settings can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Reset and seed the target collections"
)]
#[ortho_config(prefix = "MENUSEED")]
pub(crate) struct SeedArgs {
    /// Appwrite API endpoint, e.g. "https://cloud.appwrite.io/v1".
    #[arg(long = ARG_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    /// Appwrite project id.
    #[arg(long = ARG_PROJECT, value_name = "id")]
    #[serde(default)]
    pub(crate) project: Option<String>,
    /// Server API key with document read/write scope.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Target database id.
    #[arg(long = ARG_DATABASE, value_name = "id")]
    #[serde(default)]
    pub(crate) database: Option<String>,
    /// Override the categories collection id.
    #[arg(long = ARG_CATEGORIES_COLLECTION, value_name = "id")]
    #[serde(default)]
    pub(crate) categories_collection: Option<String>,
    /// Override the customizations collection id.
    #[arg(long = ARG_CUSTOMIZATIONS_COLLECTION, value_name = "id")]
    #[serde(default)]
    pub(crate) customizations_collection: Option<String>,
    /// Override the menu collection id.
    #[arg(long = ARG_MENU_COLLECTION, value_name = "id")]
    #[serde(default)]
    pub(crate) menu_collection: Option<String>,
    /// Override the menu customizations collection id.
    #[arg(long = ARG_MENU_CUSTOMIZATIONS_COLLECTION, value_name = "id")]
    #[serde(default)]
    pub(crate) menu_customizations_collection: Option<String>,
    /// JSON dataset to load instead of the built-in one.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Creates in flight at once within a stage (default 1).
    #[arg(long = ARG_CREATE_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) create_limit: Option<usize>,
    /// Deletes in flight at once per collection (default 16).
    #[arg(long = ARG_DELETE_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) delete_limit: Option<usize>,
    /// Per-request timeout in seconds (default 30).
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl SeedArgs {
    pub(crate) fn into_config(self) -> Result<SeedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SeedConfig::try_from(merged)
    }
}

/// Resolved `seed` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct SeedConfig {
    /// Store connection settings.
    pub(crate) store: AppwriteConfig,
    /// Database and collections to write.
    pub(crate) target: SeedTarget,
    /// Fan-out bounds.
    pub(crate) options: SeedOptions,
    /// Dataset file, if not the embedded one.
    pub(crate) dataset: Option<Utf8PathBuf>,
}

impl TryFrom<SeedArgs> for SeedConfig {
    type Error = CliError;

    fn try_from(args: SeedArgs) -> Result<Self, Self::Error> {
        let endpoint = args.endpoint.ok_or(CliError::MissingArgument {
            field: ARG_ENDPOINT,
            env: ENV_ENDPOINT,
        })?;
        let project = args.project.ok_or(CliError::MissingArgument {
            field: ARG_PROJECT,
            env: ENV_PROJECT,
        })?;
        let api_key = args.api_key.ok_or(CliError::MissingArgument {
            field: ARG_API_KEY,
            env: ENV_API_KEY,
        })?;
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_DATABASE,
        })?;

        let defaults = CollectionSet::default();
        let collections = CollectionSet {
            categories: args
                .categories_collection
                .map_or(defaults.categories, CollectionId::from),
            customizations: args
                .customizations_collection
                .map_or(defaults.customizations, CollectionId::from),
            menu: args.menu_collection.map_or(defaults.menu, CollectionId::from),
            menu_customizations: args
                .menu_customizations_collection
                .map_or(defaults.menu_customizations, CollectionId::from),
        };

        let base = SeedOptions::default();
        let options = base
            .with_create_limit(limit(args.create_limit, ARG_CREATE_LIMIT, base.create_limit)?)
            .with_delete_limit(limit(args.delete_limit, ARG_DELETE_LIMIT, base.delete_limit)?);

        let mut store = AppwriteConfig::new(endpoint, project, api_key);
        if let Some(secs) = args.timeout_secs {
            store = store.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            store,
            target: SeedTarget::new(DatabaseId::new(database)).with_collections(collections),
            options,
            dataset: args.dataset,
        })
    }
}

fn limit(
    value: Option<usize>,
    field: &'static str,
    default: NonZeroUsize,
) -> Result<NonZeroUsize, CliError> {
    value.map_or(Ok(default), |raw| {
        NonZeroUsize::new(raw).ok_or(CliError::ZeroLimit { field })
    })
}

/// Builds the store a seed invocation writes to.
pub(crate) trait SeedStoreBuilder {
    fn build(&self, config: &AppwriteConfig) -> Result<Box<dyn DocumentStore + '_>, CliError>;
}

pub(crate) struct AppwriteStoreBuilder;

impl SeedStoreBuilder for AppwriteStoreBuilder {
    fn build(&self, config: &AppwriteConfig) -> Result<Box<dyn DocumentStore + '_>, CliError> {
        let store = AppwriteStore::new(config).map_err(|source| CliError::BuildStore {
            endpoint: config.endpoint.clone(),
            source,
        })?;
        Ok(Box::new(store))
    }
}

pub(crate) fn run_seed(args: SeedArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_seed_with(args, &AppwriteStoreBuilder, &mut stdout)
}

pub(crate) fn run_seed_with(
    args: SeedArgs,
    builder: &dyn SeedStoreBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let dataset = load_dataset(config.dataset.as_deref())?;
    let store = builder.build(&config.store)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let report = runtime.block_on(execute_seed(&config, &dataset, &*store))?;
    write_seed_summary(writer, &config.target, &report)
}

async fn execute_seed<S: DocumentStore + ?Sized>(
    config: &SeedConfig,
    dataset: &Dataset,
    store: &S,
) -> Result<SeedReport, CliError> {
    let report = SeedPipeline::new(store, config.target.clone())
        .with_options(config.options)
        .run(dataset)
        .await?;
    Ok(report)
}

pub(crate) fn write_seed_summary(
    writer: &mut dyn Write,
    target: &SeedTarget,
    report: &SeedReport,
) -> Result<(), CliError> {
    write_summary_lines(writer, target, report).map_err(CliError::WriteOutput)
}

fn write_summary_lines(
    writer: &mut dyn Write,
    target: &SeedTarget,
    report: &SeedReport,
) -> std::io::Result<()> {
    let menu = &report.menu;
    writeln!(writer, "seeded database {}", target.database)?;
    writeln!(writer, "  categories:     {}", report.categories)?;
    writeln!(writer, "  customizations: {}", report.customizations)?;
    writeln!(
        writer,
        "  menu items:     {} ({} skipped)",
        menu.created,
        menu.skipped_items.len()
    )?;
    writeln!(
        writer,
        "  links:          {} ({} skipped)",
        menu.links,
        menu.skipped_links.len()
    )?;
    for reset in &report.resets {
        if let ResetOutcome::Failed { failure, .. } = reset {
            writeln!(writer, "warning: reset incomplete: {failure}")?;
        }
    }
    for item in &menu.skipped_items {
        writeln!(
            writer,
            "skipped menu item {:?}: category {:?} not found",
            item.name, item.category_name
        )?;
    }
    for link in &menu.skipped_links {
        writeln!(
            writer,
            "skipped link {:?} -> {:?}: customization not found",
            link.menu_item, link.customization
        )?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SeedConfig, CliError> {
    let merged = SeedArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SeedConfig::try_from(merged)
}
