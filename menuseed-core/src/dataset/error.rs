//! Errors raised while loading or checking a seed dataset.

use std::io;

use thiserror::Error;

use super::EntityKind;

/// Problems with the seed dataset, caught before the pipeline runs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    /// The dataset could not be read.
    #[error("failed to read dataset from {origin}: {source}")]
    Read {
        /// Where the dataset was read from.
        origin: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The dataset was not valid JSON or lacked a required field.
    #[error("failed to parse dataset from {origin}: {source}")]
    Parse {
        /// Where the dataset was read from.
        origin: String,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// An entity has an empty or whitespace-only name.
    #[error("{kind} at position {position} has an empty name")]
    EmptyName {
        /// Kind of the offending entity.
        kind: EntityKind,
        /// Zero-based position within its sequence.
        position: usize,
    },
    /// A price is negative or not a finite number.
    #[error("{kind} {name:?} has invalid price {price} (expected a finite, non-negative number)")]
    InvalidPrice {
        /// Kind of the offending entity.
        kind: EntityKind,
        /// Name of the offending entity.
        name: String,
        /// Rejected value.
        price: f64,
    },
    /// A rating is not a finite number.
    #[error("menu item {name:?} has invalid rating {rating}")]
    InvalidRating {
        /// Name of the offending menu item.
        name: String,
        /// Rejected value.
        rating: f64,
    },
}
