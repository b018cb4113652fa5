//! Where a seed run writes: one database and four fixed collections.

use crate::{CollectionId, DatabaseId};

/// Default collection id for categories.
pub const DEFAULT_CATEGORIES_COLLECTION: &str = "categories";
/// Default collection id for customizations.
pub const DEFAULT_CUSTOMIZATIONS_COLLECTION: &str = "customizations";
/// Default collection id for menu items.
pub const DEFAULT_MENU_COLLECTION: &str = "menu";
/// Default collection id for menu/customization join records.
pub const DEFAULT_MENU_CUSTOMIZATIONS_COLLECTION: &str = "menu_customizations";

/// Identifiers of the four collections populated by a seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSet {
    /// Collection receiving category documents.
    pub categories: CollectionId,
    /// Collection receiving customization documents.
    pub customizations: CollectionId,
    /// Collection receiving menu item documents.
    pub menu: CollectionId,
    /// Collection receiving menu/customization link documents.
    pub menu_customizations: CollectionId,
}

impl Default for CollectionSet {
    fn default() -> Self {
        Self {
            categories: CollectionId::from(DEFAULT_CATEGORIES_COLLECTION),
            customizations: CollectionId::from(DEFAULT_CUSTOMIZATIONS_COLLECTION),
            menu: CollectionId::from(DEFAULT_MENU_COLLECTION),
            menu_customizations: CollectionId::from(DEFAULT_MENU_CUSTOMIZATIONS_COLLECTION),
        }
    }
}

impl CollectionSet {
    /// All four collections, in the order the seed run resets them.
    ///
    /// # Examples
    /// ```
    /// # use menuseed_core::CollectionSet;
    /// let names: Vec<String> = CollectionSet::default()
    ///     .all()
    ///     .iter()
    ///     .map(ToString::to_string)
    ///     .collect();
    /// assert_eq!(names, ["categories", "customizations", "menu", "menu_customizations"]);
    /// ```
    #[must_use]
    pub fn all(&self) -> [&CollectionId; 4] {
        [
            &self.categories,
            &self.customizations,
            &self.menu,
            &self.menu_customizations,
        ]
    }
}

/// Database and collections addressed by one run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTarget {
    /// Database holding every target collection.
    pub database: DatabaseId,
    /// Target collections.
    pub collections: CollectionSet,
}

impl SeedTarget {
    /// Target the default collections inside `database`.
    #[must_use]
    pub fn new(database: DatabaseId) -> Self {
        Self {
            database,
            collections: CollectionSet::default(),
        }
    }

    /// Replace the collection ids.
    #[must_use]
    pub fn with_collections(mut self, collections: CollectionSet) -> Self {
        self.collections = collections;
        self
    }
}
