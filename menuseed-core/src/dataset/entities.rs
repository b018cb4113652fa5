//! Seed entities as they appear in the dataset, plus the attribute sets
//! written to the store for each of them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Attributes, DocumentId};

/// The kinds of record a seed run creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A menu category.
    Category,
    /// An optional extra that can be attached to menu items.
    Customization,
    /// A dish on the menu.
    MenuItem,
    /// A join record binding a menu item to a customization.
    MenuCustomization,
}

impl EntityKind {
    /// Human-readable label used in logs and errors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Customization => "customization",
            Self::MenuItem => "menu item",
            Self::MenuCustomization => "menu customization",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Natural key, expected to be unique within a dataset.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

impl Category {
    /// Attributes stored for this category.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("name".to_owned(), Value::from(self.name.as_str()));
        attributes.insert(
            "description".to_owned(),
            Value::from(self.description.as_str()),
        );
        attributes
    }
}

/// Tag describing what a customization is.
///
/// The well-known tags get their own variants; anything else is preserved
/// verbatim in [`CustomizationKind::Other`].
///
/// # Examples
/// ```
/// # use menuseed_core::CustomizationKind;
/// assert_eq!(CustomizationKind::from("topping"), CustomizationKind::Topping);
/// assert_eq!(CustomizationKind::from("sauce").as_str(), "sauce");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomizationKind {
    /// Added on top of a dish.
    Topping,
    /// Served alongside a dish.
    Side,
    /// Portion size.
    Size,
    /// Pizza crust style.
    Crust,
    /// Any other tag.
    Other(String),
}

impl CustomizationKind {
    /// Tag as written to the store.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Topping => "topping",
            Self::Side => "side",
            Self::Size => "size",
            Self::Crust => "crust",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for CustomizationKind {
    fn from(value: &str) -> Self {
        match value {
            "topping" => Self::Topping,
            "side" => Self::Side,
            "size" => Self::Size,
            "crust" => Self::Crust,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for CustomizationKind {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<CustomizationKind> for String {
    fn from(value: CustomizationKind) -> Self {
        match value {
            CustomizationKind::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for CustomizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optional extra for menu items.
///
/// Only `name`, `price` and `type` are stored; other fields present in the
/// source dataset are ignored when it is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    /// Natural key referenced by [`MenuItem::customizations`].
    pub name: String,
    /// Surcharge; must be finite and non-negative.
    pub price: f64,
    /// Customization tag.
    #[serde(rename = "type")]
    pub kind: CustomizationKind,
}

impl Customization {
    /// Attributes stored for this customization.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("name".to_owned(), Value::from(self.name.as_str()));
        attributes.insert("price".to_owned(), Value::from(self.price));
        attributes.insert("type".to_owned(), Value::from(self.kind.as_str()));
        attributes
    }
}

/// A dish on the menu, referencing its category and customizations by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Natural key.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Image reference stored as-is.
    pub image_url: String,
    /// Price; must be finite and non-negative.
    pub price: f64,
    /// Average rating; must be finite.
    pub rating: f64,
    /// Energy in kilocalories.
    pub calories: u32,
    /// Protein in grams.
    pub protein: u32,
    /// Name of the category this item belongs to.
    pub category_name: String,
    /// Names of the customizations offered with this item, in order.
    #[serde(default)]
    pub customizations: Vec<String>,
}

impl MenuItem {
    /// Attributes stored for this menu item once its category is resolved.
    ///
    /// `category` lands in the singular `categories` relation field, and
    /// `image_url` is whatever reference the caller settled on.
    #[must_use]
    pub fn attributes(&self, category: &DocumentId, image_url: &str) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("name".to_owned(), Value::from(self.name.as_str()));
        attributes.insert(
            "description".to_owned(),
            Value::from(self.description.as_str()),
        );
        attributes.insert("image_url".to_owned(), Value::from(image_url));
        attributes.insert("price".to_owned(), Value::from(self.price));
        attributes.insert("rating".to_owned(), Value::from(self.rating));
        attributes.insert("calories".to_owned(), Value::from(self.calories));
        attributes.insert("protein".to_owned(), Value::from(self.protein));
        attributes.insert("categories".to_owned(), Value::from(category.as_ref()));
        attributes
    }
}

/// Join record binding a created menu item to a created customization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCustomizationLink {
    /// Store id of the menu item.
    pub menu: DocumentId,
    /// Store id of the customization.
    pub customization: DocumentId,
}

impl MenuCustomizationLink {
    /// Attributes stored for this link.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("menu".to_owned(), Value::from(self.menu.as_ref()));
        attributes.insert(
            "customizations".to_owned(),
            Value::from(self.customization.as_ref()),
        );
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("topping", CustomizationKind::Topping)]
    #[case("side", CustomizationKind::Side)]
    #[case("size", CustomizationKind::Size)]
    #[case("crust", CustomizationKind::Crust)]
    #[case("sauce", CustomizationKind::Other("sauce".to_owned()))]
    fn customization_kind_parses_tags(#[case] tag: &str, #[case] expected: CustomizationKind) {
        let parsed: CustomizationKind =
            serde_json::from_value(json!(tag)).expect("tag should deserialise");
        assert_eq!(parsed, expected);
        assert_eq!(String::from(parsed), tag);
    }

    #[rstest]
    fn customization_drops_unforwarded_fields() {
        let customization: Customization = serde_json::from_value(json!({
            "name": "Extra Cheese",
            "price": 25,
            "type": "topping",
            "description": "not stored"
        }))
        .expect("customization should deserialise");

        let attributes = customization.attributes();

        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes.get("name"), Some(&json!("Extra Cheese")));
        assert_eq!(attributes.get("price"), Some(&json!(25.0)));
        assert_eq!(attributes.get("type"), Some(&json!("topping")));
        assert!(attributes.get("description").is_none());
    }

    #[rstest]
    fn menu_item_stores_category_relation_instead_of_name() {
        let item: MenuItem = serde_json::from_value(json!({
            "name": "Margherita",
            "description": "Tomato, mozzarella, basil",
            "image_url": "https://img.example.com/margherita.png",
            "price": 9.5,
            "rating": 4.6,
            "calories": 780,
            "protein": 32,
            "category_name": "Pizza"
        }))
        .expect("menu item should deserialise");

        let attributes = item.attributes(&DocumentId::new("cat-1"), &item.image_url);

        assert!(item.customizations.is_empty());
        assert_eq!(attributes.get("categories"), Some(&json!("cat-1")));
        assert!(attributes.get("category_name").is_none());
        assert!(attributes.get("customizations").is_none());
        assert_eq!(
            attributes.get("image_url"),
            Some(&json!("https://img.example.com/margherita.png"))
        );
    }

    #[rstest]
    fn link_attributes_name_both_sides() {
        let link = MenuCustomizationLink {
            menu: DocumentId::new("menu-1"),
            customization: DocumentId::new("cus-1"),
        };
        let attributes = link.attributes();
        assert_eq!(attributes.get("menu"), Some(&json!("menu-1")));
        assert_eq!(attributes.get("customizations"), Some(&json!("cus-1")));
    }
}
