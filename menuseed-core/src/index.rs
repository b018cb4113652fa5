//! Name-to-identifier lookups built while a seed run progresses.
//!
//! Each load stage records the identifier the store assigned to every entity
//! it created; later stages resolve dataset references through these maps.
//! The index belongs to a single run and is never persisted.

use std::collections::HashMap;

use crate::DocumentId;

/// Mapping from an entity's natural name to its store-assigned id.
///
/// Recording a name twice keeps the later id.
///
/// # Examples
/// ```
/// # use menuseed_core::{DocumentId, NameIndex};
/// let mut index = NameIndex::default();
/// index.record("Drinks", DocumentId::new("first"));
/// let replaced = index.record("Drinks", DocumentId::new("second"));
/// assert_eq!(replaced, Some(DocumentId::new("first")));
/// assert_eq!(index.resolve("Drinks"), Some(&DocumentId::new("second")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    entries: HashMap<String, DocumentId>,
}

impl NameIndex {
    /// Record `id` for `name`, returning the id it replaced, if any.
    pub fn record(&mut self, name: impl Into<String>, id: DocumentId) -> Option<DocumentId> {
        self.entries.insert(name.into(), id)
    }

    /// Look up the id recorded for `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&DocumentId> {
        self.entries.get(name)
    }

    /// Number of distinct names recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-run reference index, one independently scoped map per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    /// Category name to category id.
    pub categories: NameIndex,
    /// Customization name to customization id.
    pub customizations: NameIndex,
    /// Menu item name to menu item id.
    pub menu_items: NameIndex,
}
