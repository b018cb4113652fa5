//! Clearing target collections before a load.

use std::num::NonZeroUsize;

use futures_util::{
    StreamExt,
    future::{self, join_all},
    stream,
};
use log::info;

use menuseed_core::{CollectionId, DatabaseId, DocumentStore, Stage, StoreError};

use super::{SeedError, StageFailure, policy::escalate};

/// Result of clearing one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Every listed document was deleted.
    Cleared {
        /// Collection that was cleared.
        collection: CollectionId,
        /// Documents deleted.
        deleted: usize,
    },
    /// Listing or at least one delete failed. The failure was logged.
    Failed {
        /// Collection that was being cleared.
        collection: CollectionId,
        /// What went wrong.
        failure: StageFailure,
    },
}

impl ResetOutcome {
    /// Collection this outcome describes.
    #[must_use]
    pub const fn collection(&self) -> &CollectionId {
        match self {
            Self::Cleared { collection, .. } | Self::Failed { collection, .. } => collection,
        }
    }

    /// Whether the collection was fully cleared.
    #[must_use]
    pub const fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared { .. })
    }
}

/// Delete every document in `collection`.
///
/// Deletes run at most `delete_limit` at a time and all of them are
/// attempted even when some fail. Failures follow [`Stage::Reset`]'s policy,
/// so in practice this only returns `Err` if that policy changes.
///
/// # Errors
///
/// Returns [`SeedError::Aborted`] when the reset policy propagates failures.
pub async fn reset_collection<S: DocumentStore + ?Sized>(
    store: &S,
    database: &DatabaseId,
    collection: &CollectionId,
    delete_limit: NonZeroUsize,
) -> Result<ResetOutcome, SeedError> {
    match clear(store, database, collection, delete_limit).await {
        Ok(deleted) => {
            info!("{}: cleared {deleted} documents from {collection}", Stage::Reset);
            Ok(ResetOutcome::Cleared {
                collection: collection.clone(),
                deleted,
            })
        }
        Err(failure) => escalate(Stage::Reset, failure).map(|logged| ResetOutcome::Failed {
            collection: collection.clone(),
            failure: logged,
        }),
    }
}

/// Reset all `collections` concurrently, returning outcomes in input order.
///
/// # Errors
///
/// As for [`reset_collection`].
pub async fn reset_collections<S: DocumentStore + ?Sized>(
    store: &S,
    database: &DatabaseId,
    collections: &[&CollectionId],
    delete_limit: NonZeroUsize,
) -> Result<Vec<ResetOutcome>, SeedError> {
    join_all(
        collections
            .iter()
            .map(|collection| reset_collection(store, database, collection, delete_limit)),
    )
    .await
    .into_iter()
    .collect()
}

async fn clear<S: DocumentStore + ?Sized>(
    store: &S,
    database: &DatabaseId,
    collection: &CollectionId,
    delete_limit: NonZeroUsize,
) -> Result<usize, StageFailure> {
    let documents = store
        .list_documents(database, collection)
        .await
        .map_err(|source| StageFailure::List {
            collection: collection.clone(),
            source,
        })?;
    let listed = documents.len();
    let failures: Vec<StoreError> = stream::iter(&documents)
        .map(|document| store.delete_document(database, collection, &document.id))
        .buffer_unordered(delete_limit.get())
        .filter_map(|outcome| future::ready(outcome.err()))
        .collect()
        .await;
    let failed = failures.len();
    match failures.into_iter().next() {
        None => Ok(listed),
        Some(source) => Err(StageFailure::Delete {
            collection: collection.clone(),
            listed,
            failed,
            source,
        }),
    }
}
