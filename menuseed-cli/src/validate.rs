//! Validate command implementation.

use std::{collections::HashSet, io::Write};

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use menuseed_core::Dataset;

use crate::{ARG_DATASET, CliError, load_dataset};

/// CLI arguments for the `validate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Parse and check a dataset without contacting the store. \
                 Reports entity counts, duplicate names and references \
                 that a seed run would skip.",
    about = "Check a dataset offline"
)]
#[ortho_config(prefix = "MENUSEED")]
pub(crate) struct ValidateArgs {
    /// JSON dataset to check instead of the built-in one.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_validate_with(args, &mut stdout)
}

pub(crate) fn run_validate_with(
    args: ValidateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let dataset = load_dataset(merged.dataset.as_deref())?;
    write_validation(writer, &dataset).map_err(CliError::WriteOutput)
}

fn write_validation(writer: &mut dyn Write, dataset: &Dataset) -> std::io::Result<()> {
    writeln!(
        writer,
        "dataset ok: {} categories, {} customizations, {} menu items",
        dataset.categories.len(),
        dataset.customizations.len(),
        dataset.menu.len()
    )?;
    for duplicate in dataset.duplicate_names() {
        writeln!(
            writer,
            "duplicate {} name {:?} ({} entries)",
            duplicate.kind, duplicate.name, duplicate.occurrences
        )?;
    }
    for problem in dangling_references(dataset) {
        writeln!(writer, "{problem}")?;
    }
    Ok(())
}

/// References a seed run would skip, in dataset order.
fn dangling_references(dataset: &Dataset) -> Vec<String> {
    let categories: HashSet<&str> = dataset
        .categories
        .iter()
        .map(|category| category.name.as_str())
        .collect();
    let customizations: HashSet<&str> = dataset
        .customizations
        .iter()
        .map(|customization| customization.name.as_str())
        .collect();
    let mut problems = Vec::new();
    for item in &dataset.menu {
        if !categories.contains(item.category_name.as_str()) {
            problems.push(format!(
                "menu item {:?} names unknown category {:?}",
                item.name, item.category_name
            ));
            continue;
        }
        for customization in &item.customizations {
            if !customizations.contains(customization.as_str()) {
                problems.push(format!(
                    "menu item {:?} names unknown customization {customization:?}",
                    item.name
                ));
            }
        }
    }
    problems
}
