//! The seed run: reset the target collections, then load categories,
//! customizations and menu items in that order.
//!
//! Every stage completes before the next begins. Within a stage, creates may
//! overlap up to [`SeedOptions::create_limit`], but results are consumed in
//! dataset order so the reference index and error attribution do not depend
//! on scheduling.
//!
//! ```
//! use menuseed_core::{DatabaseId, SeedTarget};
//! use menuseed_core::test_support::{InMemoryStore, block_on_for_tests, margherita_dataset};
//! use menuseed_data::seed::SeedPipeline;
//!
//! let store = InMemoryStore::new();
//! let pipeline = SeedPipeline::new(&store, SeedTarget::new(DatabaseId::new("food")));
//! let report = block_on_for_tests(pipeline.run(&margherita_dataset()))?;
//! assert_eq!(report.menu.links, 1);
//! # Ok::<(), menuseed_data::seed::SeedError>(())
//! ```

mod error;
mod executor;
mod policy;
mod report;
mod reset;


use std::num::NonZeroUsize;

use futures_util::{StreamExt, TryStreamExt, stream};
use log::{info, warn};

use menuseed_core::{
    Attributes, Category, CollectionId, Customization, Dataset, DocumentId, DocumentStore,
    EntityKind, MenuCustomizationLink, MenuItem, NameIndex, ReferenceIndex, SeedTarget, Stage,
};

use crate::images::{ImageResolver, PassthroughImages};

pub use error::{SeedError, StageFailure};
pub use executor::create_entity;
pub use report::{MenuLoad, SeedReport, SkippedItem, SkippedLink};
pub use reset::{ResetOutcome, reset_collection, reset_collections};

use policy::escalate;
use report::ItemOutcome;

const DEFAULT_DELETE_LIMIT: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

/// Concurrency bounds for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    /// Creates in flight at once within a load stage. `1` is sequential.
    pub create_limit: NonZeroUsize,
    /// Deletes in flight at once per collection during reset.
    pub delete_limit: NonZeroUsize,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            create_limit: NonZeroUsize::MIN,
            delete_limit: DEFAULT_DELETE_LIMIT,
        }
    }
}

impl SeedOptions {
    /// Set the create fan-out.
    #[must_use]
    pub const fn with_create_limit(mut self, limit: NonZeroUsize) -> Self {
        self.create_limit = limit;
        self
    }

    /// Set the delete fan-out.
    #[must_use]
    pub const fn with_delete_limit(mut self, limit: NonZeroUsize) -> Self {
        self.delete_limit = limit;
        self
    }
}

/// Drives one seed run against a [`DocumentStore`].
pub struct SeedPipeline<'a, S: ?Sized> {
    store: &'a S,
    target: SeedTarget,
    options: SeedOptions,
    images: Box<dyn ImageResolver + 'a>,
}

impl<'a, S: DocumentStore + ?Sized> SeedPipeline<'a, S> {
    /// Pipeline writing to `target` with default options and images stored
    /// as given.
    #[must_use]
    pub fn new(store: &'a S, target: SeedTarget) -> Self {
        Self {
            store,
            target,
            options: SeedOptions::default(),
            images: Box::new(PassthroughImages),
        }
    }

    /// Replace the concurrency options.
    #[must_use]
    pub fn with_options(mut self, options: SeedOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve menu item images through `images`.
    #[must_use]
    pub fn with_images(mut self, images: impl ImageResolver + 'a) -> Self {
        self.images = Box::new(images);
        self
    }

    /// Reset every target collection, then load `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] when a create fails. Documents created before the
    /// failure stay in the store.
    pub async fn run(&self, dataset: &Dataset) -> Result<SeedReport, SeedError> {
        info!(
            "seeding database {} ({} categories, {} customizations, {} menu items)",
            self.target.database,
            dataset.categories.len(),
            dataset.customizations.len(),
            dataset.menu.len()
        );
        let resets = self.reset().await?;
        let mut index = ReferenceIndex::default();
        let categories = self
            .load_categories(&dataset.categories, &mut index.categories)
            .await?;
        let customizations = self
            .load_customizations(&dataset.customizations, &mut index.customizations)
            .await?;
        let menu = self.load_menu_items(&dataset.menu, &mut index).await?;
        let report = SeedReport {
            resets,
            categories,
            customizations,
            menu,
        };
        info!(
            "seeding complete: {} categories, {} customizations, {} menu items, {} links",
            report.categories, report.customizations, report.menu.created, report.menu.links
        );
        Ok(report)
    }

    /// Clear all four target collections. Returns once every reset settles.
    ///
    /// # Errors
    ///
    /// See [`reset_collections`].
    pub async fn reset(&self) -> Result<Vec<ResetOutcome>, SeedError> {
        let collections = self.target.collections.all();
        info!("{}: clearing {} collections", Stage::Reset, collections.len());
        reset_collections(
            self.store,
            &self.target.database,
            &collections,
            self.options.delete_limit,
        )
        .await
    }

    /// Create `categories` and record their ids in `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Aborted`] on the first failed create.
    pub async fn load_categories(
        &self,
        categories: &[Category],
        index: &mut NameIndex,
    ) -> Result<usize, SeedError> {
        let entries = categories
            .iter()
            .map(|category| (category.name.as_str(), category.attributes()))
            .collect();
        self.load_named(
            Stage::LoadCategories,
            EntityKind::Category,
            &self.target.collections.categories,
            entries,
            index,
        )
        .await
    }

    /// Create `customizations` and record their ids in `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Aborted`] on the first failed create.
    pub async fn load_customizations(
        &self,
        customizations: &[Customization],
        index: &mut NameIndex,
    ) -> Result<usize, SeedError> {
        let entries = customizations
            .iter()
            .map(|customization| (customization.name.as_str(), customization.attributes()))
            .collect();
        self.load_named(
            Stage::LoadCustomizations,
            EntityKind::Customization,
            &self.target.collections.customizations,
            entries,
            index,
        )
        .await
    }

    /// Create `items` and their customization links.
    ///
    /// Categories and customizations are resolved through `index`, which
    /// must already hold the earlier stages' ids. Items whose category is
    /// unknown are skipped, as are links to unknown customizations.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Aborted`] on the first failed create, whether of
    /// an item or a link.
    pub async fn load_menu_items(
        &self,
        items: &[MenuItem],
        index: &mut ReferenceIndex,
    ) -> Result<MenuLoad, SeedError> {
        let stage = Stage::LoadMenuItems;
        info!(
            "{stage}: creating {} menu items in {}",
            items.len(),
            self.target.collections.menu
        );
        let outcomes: Vec<ItemOutcome> = {
            let categories = &index.categories;
            let customizations = &index.customizations;
            stream::iter(items)
                .map(|item| self.load_menu_item(item, categories, customizations))
                .buffered(self.options.create_limit.get())
                .try_collect()
                .await?
        };
        let mut load = MenuLoad::default();
        for (item, outcome) in items.iter().zip(outcomes) {
            match outcome {
                ItemOutcome::Created {
                    id,
                    links,
                    skipped_links,
                } => {
                    load.created += 1;
                    load.links += links;
                    load.skipped_links.extend(skipped_links);
                    record(stage, EntityKind::MenuItem, &mut index.menu_items, &item.name, id);
                }
                ItemOutcome::MissingCategory(skipped) => load.skipped_items.push(skipped),
            }
        }
        info!(
            "{stage}: created {} menu items and {} links; skipped {} items and {} links",
            load.created,
            load.links,
            load.skipped_items.len(),
            load.skipped_links.len()
        );
        Ok(load)
    }

    async fn load_named(
        &self,
        stage: Stage,
        kind: EntityKind,
        collection: &CollectionId,
        entries: Vec<(&str, Attributes)>,
        index: &mut NameIndex,
    ) -> Result<usize, SeedError> {
        info!("{stage}: creating {} documents in {collection}", entries.len());
        let names: Vec<&str> = entries.iter().map(|(name, _)| *name).collect();
        let ids: Vec<DocumentId> = stream::iter(entries)
            .map(|(name, attributes)| self.create(stage, kind, name, collection, attributes))
            .buffered(self.options.create_limit.get())
            .try_collect()
            .await?;
        let created = ids.len();
        for (name, id) in names.into_iter().zip(ids) {
            record(stage, kind, index, name, id);
        }
        info!("{stage}: created {created} documents in {collection}");
        Ok(created)
    }

    async fn load_menu_item(
        &self,
        item: &MenuItem,
        categories: &NameIndex,
        customizations: &NameIndex,
    ) -> Result<ItemOutcome, SeedError> {
        let stage = Stage::LoadMenuItems;
        let collections = &self.target.collections;
        let Some(category) = categories.resolve(&item.category_name) else {
            warn!(
                "{stage}: category {:?} not found for menu item {:?}; skipping it",
                item.category_name, item.name
            );
            return Ok(ItemOutcome::MissingCategory(SkippedItem {
                name: item.name.clone(),
                category_name: item.category_name.clone(),
            }));
        };
        let image_url = self.image_for(item).await;
        let menu_id = self
            .create(
                stage,
                EntityKind::MenuItem,
                &item.name,
                &collections.menu,
                item.attributes(category, &image_url),
            )
            .await?;

        let mut links = 0;
        let mut skipped_links = Vec::new();
        for name in &item.customizations {
            let Some(customization) = customizations.resolve(name) else {
                info!(
                    "{stage}: customization {name:?} not found for menu item {:?}; skipping link",
                    item.name
                );
                skipped_links.push(SkippedLink {
                    menu_item: item.name.clone(),
                    customization: name.clone(),
                });
                continue;
            };
            let link = MenuCustomizationLink {
                menu: menu_id.clone(),
                customization: customization.clone(),
            };
            self.create(
                stage,
                EntityKind::MenuCustomization,
                &format!("{} / {name}", item.name),
                &collections.menu_customizations,
                link.attributes(),
            )
            .await?;
            links += 1;
        }
        Ok(ItemOutcome::Created {
            id: menu_id,
            links,
            skipped_links,
        })
    }

    /// Create one document, passing a failure through `stage`'s policy.
    ///
    /// A create that fails never yields an id, so even a local policy ends
    /// the stage once the failure has been logged.
    async fn create(
        &self,
        stage: Stage,
        kind: EntityKind,
        name: &str,
        collection: &CollectionId,
        attributes: Attributes,
    ) -> Result<DocumentId, SeedError> {
        create_entity(self.store, &self.target.database, collection, attributes)
            .await
            .map_err(|source| {
                let failure = StageFailure::Create {
                    kind,
                    name: name.to_owned(),
                    collection: collection.clone(),
                    source,
                };
                match escalate(stage, failure) {
                    Ok(logged) => SeedError::Aborted {
                        stage,
                        failure: logged,
                    },
                    Err(aborted) => aborted,
                }
            })
    }

    async fn image_for(&self, item: &MenuItem) -> String {
        match self.images.resolve(&item.image_url).await {
            Ok(url) => url,
            Err(err) => {
                warn!(
                    "{}: {err}; storing the source URL for {:?}",
                    Stage::LoadMenuItems,
                    item.name
                );
                item.image_url.clone()
            }
        }
    }
}

/// Record `id` under `name`; a repeated name keeps the later id.
fn record(stage: Stage, kind: EntityKind, index: &mut NameIndex, name: &str, id: DocumentId) {
    if let Some(previous) = index.record(name, id) {
        warn!(
            "{stage}: duplicate {kind} name {name:?}; later references use the newest document \
             and {previous} is left unreferenced"
        );
    }
}
