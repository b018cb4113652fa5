//! Focused unit tests covering seed command configuration and execution.

use super::helpers::{DatasetFile, InMemoryStoreBuilder, connected_args};
use super::*;
use crate::seed::{SeedArgs, SeedConfig, config_from_layers_for_test, run_seed_with};
use menuseed_core::test_support::{InMemoryStore, margherita_dataset};
use menuseed_core::{CollectionSet, EntityKind};
use menuseed_data::{SeedError, StageFailure};
use rstest::rstest;
use std::num::NonZeroUsize;
use std::time::Duration;

#[derive(Debug, Copy, Clone)]
enum Required {
    Endpoint,
    Project,
    ApiKey,
    Database,
}

#[rstest]
#[case::endpoint(Required::Endpoint, ARG_ENDPOINT, ENV_ENDPOINT)]
#[case::project(Required::Project, ARG_PROJECT, ENV_PROJECT)]
#[case::api_key(Required::ApiKey, ARG_API_KEY, ENV_API_KEY)]
#[case::database(Required::Database, ARG_DATABASE, ENV_DATABASE)]
fn converting_seed_without_connection_settings_errors(
    #[case] missing: Required,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let mut args = connected_args();
    match missing {
        Required::Endpoint => args.endpoint = None,
        Required::Project => args.project = None,
        Required::ApiKey => args.api_key = None,
        Required::Database => args.database = None,
    }

    let err = SeedConfig::try_from(args).expect_err("missing setting should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn missing_argument_message_names_flag_and_variable() {
    let args = SeedArgs {
        endpoint: None,
        ..connected_args()
    };
    let err = SeedConfig::try_from(args).expect_err("missing endpoint");
    assert_eq!(
        err.to_string(),
        "missing endpoint (set --endpoint or MENUSEED_CMDS_SEED_ENDPOINT)"
    );
}

#[rstest]
fn seed_config_applies_defaults() {
    let config = SeedConfig::try_from(connected_args()).expect("config should build");

    assert_eq!(config.store.endpoint, "https://appwrite.example.com/v1");
    assert_eq!(config.store.project, "food-app");
    assert_eq!(config.store.timeout, Duration::from_secs(30));
    assert_eq!(&*config.target.database, "food");
    assert_eq!(config.target.collections, CollectionSet::default());
    assert_eq!(config.options, menuseed_data::SeedOptions::default());
    assert!(config.dataset.is_none());
}

#[rstest]
fn seed_config_honours_overrides() {
    let args = SeedArgs {
        categories_collection: Some("cats".to_owned()),
        menu_customizations_collection: Some("links".to_owned()),
        create_limit: Some(4),
        delete_limit: Some(2),
        timeout_secs: Some(5),
        ..connected_args()
    };

    let config = SeedConfig::try_from(args).expect("config should build");
    let defaults = CollectionSet::default();
    assert_eq!(&*config.target.collections.categories, "cats");
    assert_eq!(&*config.target.collections.menu_customizations, "links");
    assert_eq!(config.target.collections.menu, defaults.menu);
    assert_eq!(config.options.create_limit.get(), 4);
    assert_eq!(config.options.delete_limit.get(), 2);
    assert_eq!(config.store.timeout, Duration::from_secs(5));
}

#[rstest]
#[case::create(ARG_CREATE_LIMIT)]
#[case::delete(ARG_DELETE_LIMIT)]
fn zero_limits_are_rejected(#[case] expected_field: &'static str) {
    let mut args = connected_args();
    if expected_field == ARG_CREATE_LIMIT {
        args.create_limit = Some(0);
    } else {
        args.delete_limit = Some(0);
    }

    let err = SeedConfig::try_from(args).expect_err("zero limit should error");
    match err {
        CliError::ZeroLimit { field } => assert_eq!(field, expected_field),
        other => panic!("expected ZeroLimit, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "create_limit": "many" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "endpoint": "https://from-file.example.com/v1",
            "project": "file-project",
            "api_key": "file-key",
            "database": "file-db",
            "delete_limit": 8,
        }),
        None,
    );
    composer.push_environment(json!({
        "project": "env-project",
        "database": "env-db",
    }));
    composer.push_cli(json!({
        "database": "cli-db",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.store.endpoint, "https://from-file.example.com/v1");
    assert_eq!(config.store.project, "env-project");
    assert_eq!(config.store.api_key, "file-key");
    assert_eq!(&*config.target.database, "cli-db");
    assert_eq!(config.options.delete_limit, NonZeroUsize::new(8).expect("non-zero"));
}

#[rstest]
fn seeding_the_embedded_dataset_prints_a_summary() {
    let store = InMemoryStore::new();
    let builder = InMemoryStoreBuilder { store: &store };
    let mut stdout = Vec::new();

    run_seed_with(connected_args(), &builder, &mut stdout).expect("seed should succeed");

    let summary = String::from_utf8(stdout).expect("stdout utf-8");
    assert!(summary.starts_with("seeded database food\n"), "{summary}");
    assert!(summary.contains("categories:     6"), "{summary}");
    assert!(summary.contains("customizations: 18"), "{summary}");
    assert!(summary.contains("menu items:     12 (0 skipped)"), "{summary}");
    assert!(summary.contains("links:          54 (0 skipped)"), "{summary}");

    let collections = CollectionSet::default();
    assert_eq!(store.count(&collections.menu_customizations), 54);
}

#[rstest]
fn seeding_reads_a_dataset_file() {
    let file = DatasetFile::with_dataset(&margherita_dataset());
    let store = InMemoryStore::new();
    let builder = InMemoryStoreBuilder { store: &store };
    let args = SeedArgs {
        dataset: Some(file.path().to_path_buf()),
        ..connected_args()
    };
    let mut stdout = Vec::new();

    run_seed_with(args, &builder, &mut stdout).expect("seed should succeed");

    let collections = CollectionSet::default();
    for collection in collections.all() {
        assert_eq!(store.count(collection), 1, "{collection}");
    }
}

#[rstest]
fn seeding_reports_missing_dataset_files() {
    let file = DatasetFile::new("{}");
    let missing = file.path().with_file_name("absent.json");
    let store = InMemoryStore::new();
    let builder = InMemoryStoreBuilder { store: &store };
    let args = SeedArgs {
        dataset: Some(missing.clone()),
        ..connected_args()
    };

    let err = run_seed_with(args, &builder, &mut Vec::new()).expect_err("missing dataset");
    match err {
        CliError::MissingDataset { path } => assert_eq!(path, missing),
        other => panic!("expected MissingDataset, found {other:?}"),
    }
    assert_eq!(store.create_attempts(&CollectionSet::default().categories), 0);
}

#[rstest]
fn seeding_rejects_directories_as_datasets() {
    let file = DatasetFile::new("{}");
    let dir = file.path().parent().expect("parent").to_path_buf();
    let store = InMemoryStore::new();
    let builder = InMemoryStoreBuilder { store: &store };
    let args = SeedArgs {
        dataset: Some(dir),
        ..connected_args()
    };

    let err = run_seed_with(args, &builder, &mut Vec::new()).expect_err("directory dataset");
    assert!(matches!(err, CliError::MissingDataset { .. }), "{err:?}");
}

#[rstest]
fn invalid_datasets_fail_before_the_store_is_touched() {
    let mut dataset = margherita_dataset();
    if let Some(first) = dataset.categories.first_mut() {
        first.name = "  ".to_owned();
    }
    let file = DatasetFile::with_dataset(&dataset);
    let store = InMemoryStore::new();
    store.prefill(&CollectionSet::default().menu, 3);
    let builder = InMemoryStoreBuilder { store: &store };
    let args = SeedArgs {
        dataset: Some(file.path().to_path_buf()),
        ..connected_args()
    };

    let err = run_seed_with(args, &builder, &mut Vec::new()).expect_err("invalid dataset");
    assert!(
        matches!(err, CliError::Dataset(DatasetError::EmptyName { .. })),
        "{err:?}"
    );
    assert_eq!(store.count(&CollectionSet::default().menu), 3);
}

#[rstest]
fn create_failures_surface_as_seed_errors() {
    let file = DatasetFile::with_dataset(&margherita_dataset());
    let store = InMemoryStore::new();
    let collections = CollectionSet::default();
    store.fail_create_at(&collections.categories, 1);
    let builder = InMemoryStoreBuilder { store: &store };
    let args = SeedArgs {
        dataset: Some(file.path().to_path_buf()),
        ..connected_args()
    };
    let mut stdout = Vec::new();

    let err = run_seed_with(args, &builder, &mut stdout).expect_err("create failure");
    match err {
        CliError::Seed(SeedError::Aborted {
            failure: StageFailure::Create { kind, name, .. },
            ..
        }) => {
            assert_eq!(kind, EntityKind::Category);
            assert_eq!(name, "Pizza");
        }
        other => panic!("expected a seed abort, found {other:?}"),
    }
    assert!(stdout.is_empty());
}
