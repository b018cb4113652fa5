use thiserror::Error;

use crate::{CollectionId, DocumentId};

/// Errors reported by a [`DocumentStore`](super::DocumentStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The store answered with an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description supplied by the store.
        message: String,
    },
    /// The request never produced a response.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request exceeded the client timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Fully qualified request URL.
        url: String,
        /// Decoder error description.
        message: String,
    },
    /// The store refused the document (schema mismatch, duplicate id, quota).
    #[error("collection {collection} rejected the document: {message}")]
    Rejected {
        /// Collection the write targeted.
        collection: CollectionId,
        /// Reason given by the store.
        message: String,
    },
    /// The addressed document does not exist.
    #[error("document {id} not found in collection {collection}")]
    NotFound {
        /// Collection that was searched.
        collection: CollectionId,
        /// Missing document id.
        id: DocumentId,
    },
}
