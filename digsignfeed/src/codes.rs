use async_trait::async_trait;
use digsignqrcode::CodeImageCache;

/// Fournisseur d'images de code pour une URL cible
///
/// Failures are reported as `None`: a slide without code is still a slide.
#[async_trait]
pub trait CodeImageProvider: Send + Sync {
    async fn code_url_for(&self, url: &str) -> Option<String>;
}

#[async_trait]
impl CodeImageProvider for CodeImageCache {
    async fn code_url_for(&self, url: &str) -> Option<String> {
        CodeImageCache::code_url_for(self, url).await
    }
}
