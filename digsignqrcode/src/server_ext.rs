//! Implémentation du trait QrCodeExt pour digsignserver

use crate::{CodeImageCache, QrCodeConfigExt};
use async_trait::async_trait;
use digsignserver::Server;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

/// Trait d'extension pour servir le cache de QR codes
#[async_trait]
pub trait QrCodeExt {
    /// Crée le cache et sert son répertoire sous `route`
    ///
    /// # Routes enregistrées
    ///
    /// - `GET {route}/qr-{key}.png` - image PNG du QR code
    async fn init_qrcode_cache(
        &mut self,
        cache_dir: &str,
        route: &str,
    ) -> anyhow::Result<Arc<CodeImageCache>>;

    /// Initialise le cache avec la configuration (`qrcodes.*`)
    async fn init_qrcode_cache_configured(&mut self) -> anyhow::Result<Arc<CodeImageCache>>;
}

#[async_trait]
impl QrCodeExt for Server {
    async fn init_qrcode_cache(
        &mut self,
        cache_dir: &str,
        route: &str,
    ) -> anyhow::Result<Arc<CodeImageCache>> {
        let route = format!("/{}", route.trim_matches('/'));
        let prefix = format!("{}{}", self.info().base_url, route);
        let cache = Arc::new(CodeImageCache::new(cache_dir, &prefix));

        self.add_service(&route, ServeDir::new(cache_dir)).await;

        Ok(cache)
    }

    async fn init_qrcode_cache_configured(&mut self) -> anyhow::Result<Arc<CodeImageCache>> {
        let config = digsignconfig::get_config();
        let cache_dir = config.get_qrcodes_dir()?;
        let route = config.get_qrcodes_route();

        info!("QR code directory {}, route {}", cache_dir, route);

        self.init_qrcode_cache(&cache_dir, &route).await
    }
}
