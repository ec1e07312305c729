//! # digsignqrcode - Cache de QR codes pour l'affichage dynamique
//!
//! Each slide can carry a QR code pointing at the permalink of its source
//! item. This crate renders these codes as PNG files and keeps them on disk,
//! one file per target URL, so a code is generated only once.
//!
//! ## Fonctionnalités
//!
//! - Rendu QR fixe: 200x200 px, zone de silence de 4 modules, noir sur blanc
//! - Nommage déterministe `qr-{sha256[..16]}.png`
//! - Écriture atomique (fichier temporaire puis renommage)
//! - Service HTTP du répertoire (feature `server`)
//!
//! ## Exemple
//!
//! ```rust,no_run
//! use digsignqrcode::CodeImageCache;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = CodeImageCache::new("./qrcodes", "http://localhost:8080/qrcodes");
//!     let url = cache.get_or_create("https://example.org/news/hello").await?;
//!     println!("QR code: {url}");
//!     Ok(())
//! }
//! ```

pub mod cache;
mod config_ext;
pub mod error;
pub mod render;

#[cfg(feature = "server")]
mod server_ext;

pub use cache::CodeImageCache;
pub use config_ext::QrCodeConfigExt;
pub use error::{QrCodeError, Result};

#[cfg(feature = "server")]
pub use server_ext::QrCodeExt;
