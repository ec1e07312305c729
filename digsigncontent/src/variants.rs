//! Variantes redimensionnées des images, encodées en WebP
//!
//! A variant fits inside the requested box with its aspect ratio kept and is
//! never upscaled. Files are named `{slug}-{w}x{h}.webp` and reused once
//! written.

use crate::{ContentError, ContentItem, ImageResizer, Result};
use async_trait::async_trait;
use image::{DynamicImage, imageops::FilterType};
use std::path::{Path, PathBuf};
use tracing::debug;
use webp::{Encoder, WebPMemory};

const WEBP_QUALITY: f32 = 85.0;

pub fn encode_webp(img: &DynamicImage) -> Vec<u8> {
    let rgba = img.to_rgba8();
    let encoder = Encoder::from_rgba(&rgba, rgba.width(), rgba.height());
    let webp_data: WebPMemory = encoder.encode(WEBP_QUALITY);
    webp_data.to_vec()
}

/// Réduit l'image pour tenir dans `width` x `height`, sans agrandissement
pub fn fit_within(img: DynamicImage, width: u32, height: u32) -> DynamicImage {
    if img.width() <= width && img.height() <= height {
        img
    } else {
        img.resize(width, height, FilterType::Lanczos3)
    }
}

fn build_variant(source: &Path, width: u32, height: u32) -> Result<Vec<u8>> {
    let img = image::open(source)?;
    Ok(encode_webp(&fit_within(img, width, height)))
}

/// Générateur de variantes sur disque
#[derive(Debug, Clone)]
pub struct ImageVariants {
    dir: PathBuf,
    url_prefix: String,
}

impl ImageVariants {
    /// # Arguments
    ///
    /// * `dir` - Répertoire des variantes
    /// * `url_prefix` - Public URL under which `dir` is served
    pub fn new(dir: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn variant_name(slug: &str, width: u32, height: u32) -> String {
        format!("{}-{}x{}.webp", slug, width, height)
    }

    pub fn variant_path(&self, slug: &str, width: u32, height: u32) -> PathBuf {
        self.dir.join(Self::variant_name(slug, width, height))
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.url_prefix, name)
    }
}

#[async_trait]
impl ImageResizer for ImageVariants {
    async fn ensure_size(&self, item: &ContentItem, width: u32, height: u32) -> Result<String> {
        let name = Self::variant_name(&item.slug, width, height);
        let path = self.dir.join(&name);
        if tokio::fs::try_exists(&path).await? {
            return Ok(self.public_url(&name));
        }

        let source = item
            .image
            .as_ref()
            .and_then(|i| i.path.clone())
            .ok_or_else(|| ContentError::NoSourceImage(item.slug.clone()))?;

        let data =
            tokio::task::spawn_blocking(move || build_variant(&source, width, height)).await??;

        tokio::fs::create_dir_all(&self.dir).await?;
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, &data).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(slug = %item.slug, width, height, "Image variant generated");
        Ok(self.public_url(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_keeps_aspect() {
        let img = DynamicImage::new_rgba8(2520, 940);
        let fitted = fit_within(img, 1260, 940);
        assert_eq!((fitted.width(), fitted.height()), (1260, 470));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let img = DynamicImage::new_rgba8(300, 200);
        let fitted = fit_within(img, 1260, 940);
        assert_eq!((fitted.width(), fitted.height()), (300, 200));
    }

    #[test]
    fn test_variant_name() {
        assert_eq!(
            ImageVariants::variant_name("opening-hours", 1260, 940),
            "opening-hours-1260x940.webp"
        );
    }
}
