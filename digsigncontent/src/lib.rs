//! # digsigncontent - Collaborateurs de contenu pour l'affichage dynamique
//!
//! The slide feed reads published items from a [`ContentStore`] and asks an
//! [`ImageResizer`] for display-sized images. This crate defines both traits
//! and ships one implementation of each:
//!
//! - [`FsContentStore`]: one YAML file per item, one directory per category;
//! - [`ImageVariants`]: WebP variants produced on demand and kept on disk.
//!
//! With the `server` feature, [`MediaExt`] serves the variants directory.

mod config_ext;
pub mod error;
pub mod fs_store;
pub mod model;
pub mod store;
pub mod variants;

#[cfg(feature = "server")]
mod server_ext;

pub use config_ext::ContentConfigExt;
pub use error::{ContentError, Result};
pub use fs_store::FsContentStore;
pub use model::{ContentItem, ImageRef};
pub use store::{ContentStore, ImageResizer};
pub use variants::ImageVariants;

#[cfg(feature = "server")]
pub use server_ext::MediaExt;
