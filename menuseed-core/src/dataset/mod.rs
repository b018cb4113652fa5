//! The static seed dataset and the seam through which it is supplied.
//!
//! A [`Dataset`] holds three ordered sequences: categories, customizations and
//! menu items. Menu items refer to the other two by name; those names are
//! resolved against store-assigned identifiers while seeding, not here.
//!
//! Shape defects (missing fields, empty names, bad prices) are programming or
//! configuration mistakes and are reported by [`Dataset::from_json_str`] and
//! [`Dataset::validate`] before any store call is made.

mod entities;
mod error;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

pub use entities::{
    Category, Customization, CustomizationKind, EntityKind, MenuCustomizationLink, MenuItem,
};
pub use error::DatasetError;

/// Complete seed dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Categories, created first.
    pub categories: Vec<Category>,
    /// Customizations, created second.
    pub customizations: Vec<Customization>,
    /// Menu items, created last together with their customization links.
    pub menu: Vec<MenuItem>,
}

/// A natural key that occurs more than once within one entity sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    /// Sequence the name was found in.
    pub kind: EntityKind,
    /// The repeated name.
    pub name: String,
    /// Number of occurrences.
    pub occurrences: usize,
}

impl Dataset {
    /// Parse a dataset from JSON text.
    ///
    /// `origin` names the source in error messages.
    ///
    /// # Examples
    /// ```
    /// # use menuseed_core::Dataset;
    /// let json = r#"{
    ///     "categories": [{ "name": "Pizza", "description": "Stone baked" }],
    ///     "customizations": [{ "name": "Extra Cheese", "price": 25, "type": "topping" }],
    ///     "menu": []
    /// }"#;
    /// let dataset = Dataset::from_json_str("inline", json)?;
    /// assert_eq!(dataset.categories.len(), 1);
    /// # Ok::<(), menuseed_core::DatasetError>(())
    /// ```
    pub fn from_json_str(origin: &str, json: &str) -> Result<Self, DatasetError> {
        serde_json::from_str(json).map_err(|source| DatasetError::Parse {
            origin: origin.to_owned(),
            source,
        })
    }

    /// Check the invariants deserialisation cannot express.
    ///
    /// Duplicate names are not rejected; see [`Dataset::duplicate_names`].
    pub fn validate(&self) -> Result<(), DatasetError> {
        for (position, category) in self.categories.iter().enumerate() {
            require_name(EntityKind::Category, position, &category.name)?;
        }
        for (position, customization) in self.customizations.iter().enumerate() {
            require_name(EntityKind::Customization, position, &customization.name)?;
            require_price(
                EntityKind::Customization,
                &customization.name,
                customization.price,
            )?;
        }
        for (position, item) in self.menu.iter().enumerate() {
            require_name(EntityKind::MenuItem, position, &item.name)?;
            require_price(EntityKind::MenuItem, &item.name, item.price)?;
            if !item.rating.is_finite() {
                return Err(DatasetError::InvalidRating {
                    name: item.name.clone(),
                    rating: item.rating,
                });
            }
        }
        Ok(())
    }

    /// Names repeated within the category, customization or menu sequence.
    ///
    /// Results are ordered by sequence, then by first occurrence.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<DuplicateName> {
        let mut duplicates = find_duplicates(
            EntityKind::Category,
            self.categories.iter().map(|category| category.name.as_str()),
        );
        duplicates.extend(find_duplicates(
            EntityKind::Customization,
            self.customizations
                .iter()
                .map(|customization| customization.name.as_str()),
        ));
        duplicates.extend(find_duplicates(
            EntityKind::MenuItem,
            self.menu.iter().map(|item| item.name.as_str()),
        ));
        duplicates
    }
}

fn require_name(kind: EntityKind, position: usize, name: &str) -> Result<(), DatasetError> {
    if name.trim().is_empty() {
        return Err(DatasetError::EmptyName { kind, position });
    }
    Ok(())
}

fn require_price(kind: EntityKind, name: &str, price: f64) -> Result<(), DatasetError> {
    if price.is_finite() && price >= 0.0 {
        return Ok(());
    }
    Err(DatasetError::InvalidPrice {
        kind,
        name: name.to_owned(),
        price,
    })
}

fn find_duplicates<'a>(
    kind: EntityKind,
    names: impl Iterator<Item = &'a str> + Clone,
) -> Vec<DuplicateName> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names.clone() {
        *counts.entry(name).or_default() += 1;
    }
    let mut reported = HashSet::new();
    names
        .filter_map(|name| {
            let occurrences = counts.get(name).copied().unwrap_or_default();
            (occurrences > 1 && reported.insert(name)).then(|| DuplicateName {
                kind,
                name: name.to_owned(),
                occurrences,
            })
        })
        .collect()
}

/// Read-only supplier of the seed dataset.
///
/// Injected into callers so tests can substitute a hand-built dataset for the
/// embedded one.
pub trait DatasetSource {
    /// Produce the dataset.
    fn load(&self) -> Result<Dataset, DatasetError>;
}

impl DatasetSource for Dataset {
    fn load(&self) -> Result<Dataset, DatasetError> {
        Ok(self.clone())
    }
}
