use thiserror::Error;

use menuseed_core::{CollectionId, EntityKind, Stage, StoreError};

/// A store failure together with what the stage was doing at the time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StageFailure {
    /// Listing a collection failed, so nothing in it was deleted.
    #[error("could not list {collection}: {source}")]
    List {
        /// Collection being cleared.
        collection: CollectionId,
        /// Store error.
        #[source]
        source: StoreError,
    },
    /// Some deletes failed; the rest were still attempted.
    #[error("could not delete {failed} of {listed} documents from {collection}: {source}")]
    Delete {
        /// Collection being cleared.
        collection: CollectionId,
        /// Documents found when listing.
        listed: usize,
        /// Deletes that failed.
        failed: usize,
        /// First delete error observed.
        #[source]
        source: StoreError,
    },
    /// Creating a document failed.
    #[error("could not create {kind} {name:?} in {collection}: {source}")]
    Create {
        /// What was being created.
        kind: EntityKind,
        /// Natural key of the entity, or `item / customization` for links.
        name: String,
        /// Collection the write targeted.
        collection: CollectionId,
        /// Store error.
        #[source]
        source: StoreError,
    },
}

impl StageFailure {
    /// Collection the failed call targeted.
    #[must_use]
    pub const fn collection(&self) -> &CollectionId {
        match self {
            Self::List { collection, .. }
            | Self::Delete { collection, .. }
            | Self::Create { collection, .. } => collection,
        }
    }
}

/// A seed run stopped before completing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    /// A stage whose failures propagate hit a store failure.
    #[error("stage {stage} aborted: {failure}")]
    Aborted {
        /// Stage that was running.
        stage: Stage,
        /// What failed.
        #[source]
        failure: StageFailure,
    },
}

impl SeedError {
    /// Stage the run stopped in.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Aborted { stage, .. } => *stage,
        }
    }
}
