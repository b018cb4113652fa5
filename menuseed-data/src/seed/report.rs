use menuseed_core::DocumentId;

use super::ResetOutcome;

/// A menu item left out because its category was never created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// Menu item name.
    pub name: String,
    /// Category name that failed to resolve.
    pub category_name: String,
}

/// A customization link left out because the customization was never created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLink {
    /// Menu item the link belonged to.
    pub menu_item: String,
    /// Customization name that failed to resolve.
    pub customization: String,
}

/// Totals from the menu item stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuLoad {
    /// Menu items created.
    pub created: usize,
    /// Customization links created.
    pub links: usize,
    /// Items skipped for an unknown category.
    pub skipped_items: Vec<SkippedItem>,
    /// Links skipped for an unknown customization.
    pub skipped_links: Vec<SkippedLink>,
}

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// One entry per target collection, in reset order.
    pub resets: Vec<ResetOutcome>,
    /// Categories created.
    pub categories: usize,
    /// Customizations created.
    pub customizations: usize,
    /// Menu item stage totals.
    pub menu: MenuLoad,
}

impl SeedReport {
    /// Whether every reset succeeded and nothing was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.resets.iter().all(ResetOutcome::is_cleared)
            && self.menu.skipped_items.is_empty()
            && self.menu.skipped_links.is_empty()
    }
}

/// Result of loading one menu item.
#[derive(Debug)]
pub(crate) enum ItemOutcome {
    Created {
        id: DocumentId,
        links: usize,
        skipped_links: Vec<SkippedLink>,
    },
    MissingCategory(SkippedItem),
}
