//! Behavioural tests for [`SeedPipeline`] against the in-memory store.

use std::cell::RefCell;

use menuseed_core::test_support::{
    InMemoryStore, block_on_for_tests, category, customization, margherita_dataset, menu_item,
};
use menuseed_core::{CollectionSet, CustomizationKind, DatabaseId, Dataset, SeedTarget};
use menuseed_data::seed::{ResetOutcome, SeedError, SeedPipeline, SeedReport};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type OutcomeCell = RefCell<Option<Result<SeedReport, SeedError>>>;

#[fixture]
fn store() -> RefCell<InMemoryStore> {
    RefCell::new(InMemoryStore::new())
}

#[fixture]
fn dataset() -> RefCell<Dataset> {
    RefCell::new(Dataset::default())
}

#[fixture]
fn outcome() -> OutcomeCell {
    RefCell::new(None)
}

fn collections() -> CollectionSet {
    CollectionSet::default()
}

fn report(outcome: &OutcomeCell) -> SeedReport {
    match outcome.borrow().as_ref() {
        Some(Ok(report)) => report.clone(),
        Some(Err(err)) => panic!("expected the run to succeed: {err}"),
        None => panic!("the pipeline must run first"),
    }
}

// --- Given steps ---

#[given("an empty store")]
fn empty_store(#[from(store)] store: &RefCell<InMemoryStore>) {
    store.replace(InMemoryStore::new());
}

#[given("a store already holding 5 documents per collection")]
fn stale_store(#[from(store)] store: &RefCell<InMemoryStore>) {
    let cols = collections();
    for collection in cols.all() {
        store.borrow().prefill(collection, 5);
    }
}

#[given("a store whose menu collection cannot be listed")]
fn unlistable_menu(#[from(store)] store: &RefCell<InMemoryStore>) {
    store.borrow().fail_listing(&collections().menu);
}

#[given("the store refuses the first customization")]
fn refuse_first_customization(#[from(store)] store: &RefCell<InMemoryStore>) {
    store.borrow().fail_create_at(&collections().customizations, 1);
}

#[given("the Margherita dataset")]
fn margherita(#[from(dataset)] dataset: &RefCell<Dataset>) {
    dataset.replace(margherita_dataset());
}

#[given("a dataset whose Tiramisu belongs to a missing Desserts category")]
fn orphaned_tiramisu(#[from(dataset)] dataset: &RefCell<Dataset>) {
    dataset.replace(Dataset {
        categories: vec![category("Pizza")],
        customizations: vec![customization("Extra Cheese", CustomizationKind::Topping)],
        menu: vec![
            menu_item("Tiramisu", "Desserts", &["Extra Cheese"]),
            menu_item("Margherita", "Pizza", &["Extra Cheese"]),
        ],
    });
}

// --- When steps ---

#[when("I run the seed pipeline")]
fn run_pipeline(
    #[from(store)] store: &RefCell<InMemoryStore>,
    #[from(dataset)] dataset: &RefCell<Dataset>,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    let guard = store.borrow();
    let pipeline = SeedPipeline::new(&*guard, SeedTarget::new(DatabaseId::new("food")));
    let result = block_on_for_tests(pipeline.run(&dataset.borrow()));
    outcome.replace(Some(result));
}

// --- Then steps ---

#[then("the run succeeds")]
fn run_succeeds(#[from(outcome)] outcome: &OutcomeCell) {
    let _report = report(outcome);
}

#[then("the store holds 1 category, 1 customization, 1 menu item and 1 link")]
fn one_of_each(#[from(store)] store: &RefCell<InMemoryStore>) {
    let guard = store.borrow();
    let cols = collections();
    for collection in cols.all() {
        assert_eq!(guard.count(collection), 1, "{collection}");
    }
}

#[then("Margherita refers to the Pizza category")]
fn margherita_refers_to_pizza(#[from(store)] store: &RefCell<InMemoryStore>) {
    let guard = store.borrow();
    let cols = collections();
    let pizza = guard
        .documents(&cols.categories)
        .into_iter()
        .find(|document| document.str_attribute("name") == Some("Pizza"))
        .expect("Pizza category");
    let margherita = guard
        .documents(&cols.menu)
        .into_iter()
        .find(|document| document.str_attribute("name") == Some("Margherita"))
        .expect("Margherita menu item");
    assert_eq!(margherita.str_attribute("categories"), Some(&*pizza.id));
}

#[then("Tiramisu is reported as skipped")]
fn tiramisu_skipped(#[from(outcome)] outcome: &OutcomeCell) {
    let skipped: Vec<String> = report(outcome)
        .menu
        .skipped_items
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(skipped, ["Tiramisu"]);
}

#[then("the run fails in stage load-customizations")]
fn fails_in_customizations(#[from(outcome)] outcome: &OutcomeCell) {
    match outcome.borrow().as_ref() {
        Some(Err(err)) => assert_eq!(err.stage().name(), "load-customizations"),
        other => panic!("expected the run to fail, got {other:?}"),
    }
}

#[then("no menu items were created")]
fn no_menu_items(#[from(store)] store: &RefCell<InMemoryStore>) {
    assert_eq!(store.borrow().count(&collections().menu), 0);
}

#[then("the menu reset is reported as failed")]
fn menu_reset_failed(#[from(outcome)] outcome: &OutcomeCell) {
    let cols = collections();
    let menu_reset = report(outcome)
        .resets
        .into_iter()
        .find(|reset| reset.collection() == &cols.menu)
        .expect("menu reset outcome");
    assert!(matches!(menu_reset, ResetOutcome::Failed { .. }));
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/seed_pipeline.feature", name = $title)]
        fn $fn_name(store: RefCell<InMemoryStore>, dataset: RefCell<Dataset>, outcome: OutcomeCell) {
            let _ = (store, dataset, outcome);
        }
    };
}

register_scenario!(seeding_margherita, "seeding the Margherita dataset");
register_scenario!(reseeding, "reseeding replaces stale documents");
register_scenario!(
    skipping_unknown_categories,
    "skipping menu items with an unknown category"
);
register_scenario!(
    aborting_on_create_failure,
    "aborting when a customization cannot be created"
);
register_scenario!(
    carrying_on_after_reset_failure,
    "carrying on when a collection cannot be cleared"
);
