//! Stable image references for catalog items.
//!
//! The image cache is populated by an external downloader; the catalog only
//! needs a stable key per item. Both the URL shape served by the HTTP layer
//! and the on-disk cache layout are derived from the item id here so the
//! two sides cannot drift apart.

use std::path::{Path, PathBuf};

/// Placeholder file served when an item has no cached image.
pub const NOT_FOUND_IMAGE: &str = "[not_found].png";

/// The two image variants the cache holds per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Small inventory icon.
    Item,
    /// Large collection artwork.
    Collection,
}

impl ImageKind {
    /// Subdirectory name inside the image cache.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Item => "item",
            ImageKind::Collection => "collection",
        }
    }

    /// Parse a cache subdirectory name.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "item" => Some(ImageKind::Item),
            "collection" => Some(ImageKind::Collection),
            _ => None,
        }
    }
}

/// URL under which the HTTP layer serves the image for `item_id`.
pub fn image_url(kind: ImageKind, item_id: u32) -> String {
    format!("/api/v1/items/images/{}/{}.png", kind.as_str(), item_id)
}

/// Local cache path for the image of `item_id`.
pub fn image_path(images_dir: &Path, kind: ImageKind, item_id: u32) -> PathBuf {
    images_dir.join(kind.as_str()).join(format!("{item_id}.png"))
}

/// Local cache path of the placeholder image for `kind`.
pub fn fallback_path(images_dir: &Path, kind: ImageKind) -> PathBuf {
    images_dir.join(kind.as_str()).join(NOT_FOUND_IMAGE)
}
