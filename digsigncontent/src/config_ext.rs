//! Extension de digsignconfig pour le contenu et les images

use crate::{FsContentStore, ImageVariants};
use anyhow::Result;
use digsignconfig::Config;
use std::sync::Arc;

const DEFAULT_CONTENT_DIR: &str = "content";
const DEFAULT_MEDIA_DIR: &str = "media";
const DEFAULT_MEDIA_ROUTE: &str = "/media";

/// Trait d'extension pour configurer le store de contenu et les variantes
pub trait ContentConfigExt {
    /// Répertoire racine du contenu (default: "content")
    fn get_content_dir(&self) -> Result<String>;

    fn set_content_dir(&self, directory: String) -> Result<()>;

    /// Base des permaliens construits (`content.site_url`, sinon l'URL du serveur)
    fn get_site_url(&self) -> String;

    /// Répertoire des variantes d'images (default: "media")
    fn get_media_dir(&self) -> Result<String>;

    /// Route HTTP des variantes (default: "/media")
    fn get_media_route(&self) -> String;

    fn create_content_store(&self) -> Result<Arc<FsContentStore>>;

    fn create_image_variants(&self) -> Result<Arc<ImageVariants>>;
}

impl ContentConfigExt for Config {
    fn get_content_dir(&self) -> Result<String> {
        self.get_managed_dir(&["content", "directory"], DEFAULT_CONTENT_DIR)
    }

    fn set_content_dir(&self, directory: String) -> Result<()> {
        self.set_managed_dir(&["content", "directory"], directory)
    }

    fn get_site_url(&self) -> String {
        let site = self.get_string_or(&["content", "site_url"], "");
        let site = site.trim().trim_end_matches('/');
        if site.is_empty() {
            self.get_base_url()
        } else {
            site.to_string()
        }
    }

    fn get_media_dir(&self) -> Result<String> {
        self.get_managed_dir(&["media", "directory"], DEFAULT_MEDIA_DIR)
    }

    fn get_media_route(&self) -> String {
        let route = self.get_string_or(&["media", "route"], DEFAULT_MEDIA_ROUTE);
        format!("/{}", route.trim_matches('/'))
    }

    fn create_content_store(&self) -> Result<Arc<FsContentStore>> {
        let dir = self.get_content_dir()?;
        Ok(Arc::new(FsContentStore::new(dir, &self.get_site_url())))
    }

    fn create_image_variants(&self) -> Result<Arc<ImageVariants>> {
        let dir = self.get_media_dir()?;
        let prefix = format!("{}{}", self.get_base_url(), self.get_media_route());
        Ok(Arc::new(ImageVariants::new(dir, &prefix)))
    }
}
