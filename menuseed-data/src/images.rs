//! Image resolution for menu items.
//!
//! A menu item's image URL passes through an [`ImageResolver`] before the item
//! is created, so a deployment can re-host images and store the new location.
//! The default resolver stores the source URL unchanged.

use async_trait::async_trait;
use thiserror::Error;

/// Failure to resolve an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ImageError {
    /// Downloading the source image failed.
    #[error("failed to fetch image {url}: {message}")]
    Fetch {
        /// Source URL.
        url: String,
        /// Failure description.
        message: String,
    },
    /// Storing the image in the target bucket failed.
    #[error("failed to upload image {url}: {message}")]
    Upload {
        /// Source URL.
        url: String,
        /// Failure description.
        message: String,
    },
}

/// Maps a source image URL to the URL stored on the menu item.
#[async_trait(?Send)]
pub trait ImageResolver {
    /// Resolve `image_url`.
    async fn resolve(&self, image_url: &str) -> Result<String, ImageError>;
}

/// Stores the source URL as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughImages;

#[async_trait(?Send)]
impl ImageResolver for PassthroughImages {
    async fn resolve(&self, image_url: &str) -> Result<String, ImageError> {
        Ok(image_url.to_owned())
    }
}
