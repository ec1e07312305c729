//! Cache disque des QR codes
//!
//! Un fichier PNG par URL cible, nommé d'après un hash de l'URL. Les
//! fichiers ne sont jamais invalidés: une URL donne toujours le même code.

use crate::error::Result;
use crate::render;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

const FILE_PREFIX: &str = "qr-";
const FILE_EXTENSION: &str = ".png";

/// Marker that keeps Apache from rewriting requests to the cache directory
const HTACCESS: &str = "# Allow direct access to QR code images\n\
<IfModule mod_rewrite.c>\n\
RewriteEngine Off\n\
</IfModule>\n";

/// Cache d'images QR code indexé par URL
#[derive(Debug)]
pub struct CodeImageCache {
    dir: PathBuf,
    url_prefix: String,
    generated: AtomicUsize,
}

impl CodeImageCache {
    /// Crée un cache
    ///
    /// # Arguments
    ///
    /// * `dir` - Répertoire de stockage (créé au premier besoin)
    /// * `url_prefix` - Public URL under which `dir` is served
    ///   (ex: "http://192.168.1.10:8080/qrcodes")
    pub fn new(dir: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            generated: AtomicUsize::new(0),
        }
    }

    /// Clé de cache: SHA-256 de l'URL, 16 premiers octets en hexadécimal
    pub fn key_for(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..16])
    }

    /// Nom du fichier pour une URL: `qr-{key}.png`
    pub fn file_name(url: &str) -> String {
        format!("{}{}{}", FILE_PREFIX, Self::key_for(url), FILE_EXTENSION)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self, url: &str) -> PathBuf {
        self.dir.join(Self::file_name(url))
    }

    /// URL publique du code pour `url`, qu'il existe ou non
    pub fn public_url(&self, url: &str) -> String {
        format!("{}/{}", self.url_prefix, Self::file_name(url))
    }

    /// Nombre de codes générés par cette instance
    pub fn generated_count(&self) -> usize {
        self.generated.load(Ordering::Relaxed)
    }

    /// Retourne l'URL publique du code de `url`, en le générant si absent
    ///
    /// An existing file is returned as is. On a miss the directory and its
    /// `.htaccess` marker are (re)created, then the PNG is written to a
    /// temporary file and renamed into place. Two concurrent misses for the
    /// same URL both write identical bytes, and the last rename wins.
    pub async fn get_or_create(&self, url: &str) -> Result<String> {
        let path = self.file_path(url);
        if tokio::fs::try_exists(&path).await? {
            return Ok(self.public_url(url));
        }

        self.ensure_dir().await?;

        let target = url.to_string();
        let png = tokio::task::spawn_blocking(move || render::render_png(&target)).await??;

        let tmp = self.dir.join(format!(
            ".{}.{}.tmp",
            Self::key_for(url),
            uuid::Uuid::new_v4().simple()
        ));
        tokio::fs::write(&tmp, &png).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        self.generated.fetch_add(1, Ordering::Relaxed);
        debug!(url, file = %path.display(), "QR code generated");
        Ok(self.public_url(url))
    }

    /// Comme [`get_or_create`](Self::get_or_create), mais une erreur donne `None`
    pub async fn code_url_for(&self, url: &str) -> Option<String> {
        match self.get_or_create(url).await {
            Ok(code_url) => Some(code_url),
            Err(e) => {
                warn!(url, error = %e, "QR code generation failed");
                None
            }
        }
    }

    /// Supprime tous les QR codes du cache
    ///
    /// Returns the number of removed images. A missing directory is an
    /// empty cache.
    pub async fn purge(&self) -> Result<usize> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(FILE_PREFIX) && name.ends_with(FILE_EXTENSION) {
                tokio::fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        info!(dir = %self.dir.display(), removed, "QR code cache purged");
        Ok(removed)
    }

    async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let marker = self.dir.join(".htaccess");
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&marker)
            .await
        {
            Ok(mut file) => {
                file.write_all(HTACCESS.as_bytes()).await?;
                file.flush().await?;
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
