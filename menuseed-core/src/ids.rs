//! Typed identifiers for databases, collections and documents.
//!
//! The store addresses everything by opaque strings. Wrapping them keeps a
//! collection id from being passed where a document id is expected.

use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};

/// Sentinel understood by Appwrite as "assign a fresh identifier".
pub const UNIQUE_ID_SENTINEL: &str = "unique()";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Construct a new [`", stringify!($name), "`] from an owned or borrowed string.")]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Consume the wrapper and return the inner [`String`].
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Identifier of the target database.
    ///
    /// # Examples
    /// ```
    /// # use menuseed_core::DatabaseId;
    /// let id = DatabaseId::new("food-ordering");
    /// assert_eq!(id.as_ref(), "food-ordering");
    /// ```
    DatabaseId
}

string_id! {
    /// Identifier of a collection inside the target database.
    CollectionId
}

string_id! {
    /// Identifier assigned to a document by the store.
    ///
    /// The pipeline never invents these; it only records what the store
    /// returns from a create call.
    DocumentId
}

/// Identifier requested when creating a document.
///
/// # Examples
/// ```
/// # use menuseed_core::{DocumentId, NewDocumentId};
/// assert_eq!(NewDocumentId::Unique.as_str(), "unique()");
/// let explicit = NewDocumentId::Explicit(DocumentId::new("margherita"));
/// assert_eq!(explicit.as_str(), "margherita");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NewDocumentId {
    /// Let the store generate a fresh identifier.
    #[default]
    Unique,
    /// Request a specific identifier.
    Explicit(DocumentId),
}

impl NewDocumentId {
    /// Wire representation of the requested identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unique => UNIQUE_ID_SENTINEL,
            Self::Explicit(id) => id.as_ref(),
        }
    }
}

impl fmt::Display for NewDocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_serialise_as_plain_strings() {
        let id = DocumentId::new("abc123");
        let json = serde_json::to_string(&id).expect("serialise id");
        assert_eq!(json, "\"abc123\"");
    }

    #[rstest]
    fn ids_round_trip_through_into_inner() {
        let id = CollectionId::from("menu");
        assert_eq!(&*id, "menu");
        assert_eq!(id.into_inner(), "menu");
    }

    #[rstest]
    fn unique_is_the_default_request() {
        assert_eq!(NewDocumentId::default(), NewDocumentId::Unique);
        assert_eq!(NewDocumentId::default().to_string(), UNIQUE_ID_SENTINEL);
    }
}
