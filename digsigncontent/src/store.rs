use crate::{ContentItem, Result};
use async_trait::async_trait;

/// Source des éléments publiés d'une catégorie
///
/// Items are returned in the store's natural order. Callers must keep that
/// order. An unknown category is an empty list, not an error.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list_published(&self, category: &str) -> Result<Vec<ContentItem>>;
}

/// Service de redimensionnement d'images
///
/// `ensure_size` returns the public URL of a `width` x `height` rendition of
/// the item's primary image, producing it on demand. Implementations cache
/// their output so repeated calls are cheap.
#[async_trait]
pub trait ImageResizer: Send + Sync {
    async fn ensure_size(&self, item: &ContentItem, width: u32, height: u32) -> Result<String>;
}
