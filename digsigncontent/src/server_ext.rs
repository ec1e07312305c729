//! Service HTTP des variantes d'images

use crate::{ContentConfigExt, ImageVariants};
use digsignserver::Server;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

/// Trait d'extension pour servir les variantes d'images
pub trait MediaExt {
    /// Crée le générateur de variantes et sert `media_dir` sous `route`
    async fn init_media(&mut self, media_dir: &str, route: &str) -> Arc<ImageVariants>;

    /// Idem, avec `media.directory` et `media.route`
    async fn init_media_configured(&mut self) -> anyhow::Result<Arc<ImageVariants>>;
}

impl MediaExt for Server {
    async fn init_media(&mut self, media_dir: &str, route: &str) -> Arc<ImageVariants> {
        let route = format!("/{}", route.trim_matches('/'));
        let prefix = format!("{}{}", self.info().base_url, route);
        let variants = Arc::new(ImageVariants::new(media_dir, &prefix));

        self.add_service(&route, ServeDir::new(media_dir)).await;
        variants
    }

    async fn init_media_configured(&mut self) -> anyhow::Result<Arc<ImageVariants>> {
        let config = digsignconfig::get_config();
        let media_dir = config.get_media_dir()?;
        let route = config.get_media_route();

        info!("media directory {}, route {}", media_dir, route);

        Ok(self.init_media(&media_dir, &route).await)
    }
}
