//! Store de contenu sur disque
//!
//! Layout: `<root>/<category>/<slug>.yaml`, one file per item.
//!
//! ```yaml
//! title: Opening hours
//! status: publish          # default; anything else is not listed
//! image: images/hours.jpg  # relative to the category directory
//! image_url: https://example.org/uploads/hours.jpg
//! body: "<p>Open every day</p>"
//! url: https://example.org/news/opening-hours
//! ```

use crate::{ContentError, ContentItem, ContentStore, ImageRef, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PUBLISHED: &str = "publish";

#[derive(Debug, Deserialize)]
struct ItemFile {
    #[serde(default)]
    title: String,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default)]
    image: Option<PathBuf>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    url: Option<String>,
}

fn default_status() -> String {
    PUBLISHED.to_string()
}

/// Store de contenu lisant des fichiers YAML
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
    site_url: String,
}

impl FsContentStore {
    /// # Arguments
    ///
    /// * `root` - Répertoire contenant un sous-répertoire par catégorie
    /// * `site_url` - Base of the permalinks built for items without `url`
    pub fn new(root: impl Into<PathBuf>, site_url: &str) -> Self {
        Self {
            root: root.into(),
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn category_dir(&self, category: &str) -> Result<PathBuf> {
        let valid = !category.is_empty()
            && category != "."
            && category != ".."
            && !category.contains(['/', '\\']);
        if !valid {
            return Err(ContentError::InvalidCategory(category.to_string()));
        }
        Ok(self.root.join(category))
    }

    async fn item_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if is_yaml && entry.file_type().await?.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    async fn load_item(&self, category: &str, dir: &Path, path: &Path) -> Result<Option<ContentItem>> {
        let text = tokio::fs::read_to_string(path).await?;
        let file: ItemFile = serde_yaml::from_str(&text)?;

        if file.status != PUBLISHED {
            return Ok(None);
        }

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let permalink = file
            .url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| format!("{}/{}/{}", self.site_url, category, slug));

        let image = match (file.image, file.image_url) {
            (None, None) => None,
            (path, url) => Some(ImageRef {
                path: path.map(|p| dir.join(p)),
                url,
            }),
        };

        Ok(Some(ContentItem {
            slug,
            title: file.title,
            permalink,
            body_html: file.body,
            image,
        }))
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn list_published(&self, category: &str) -> Result<Vec<ContentItem>> {
        let dir = self.category_dir(category)?;
        let files = Self::item_files(&dir).await?;

        let mut items = Vec::with_capacity(files.len());
        for path in files {
            match self.load_item(category, &dir, &path).await {
                Ok(Some(item)) => items.push(item),
                Ok(None) => debug!(file = %path.display(), "Unpublished item skipped"),
                Err(e) => warn!(file = %path.display(), error = %e, "Invalid content item skipped"),
            }
        }

        debug!(category, count = items.len(), "Published items listed");
        Ok(items)
    }
}
