//! # digsignfeed - Flux de diapositives pour l'affichage dynamique
//!
//! Builds the JSON feed polled by the signage carousel: the published items
//! of the configured category become slides, with an optional QR code
//! pointing back at each item, next to the current display settings.
//!
//! ## Architecture
//!
//! - [`SlideSource`]: items → slides (image or HTML), QR codes attached
//! - [`FeedAssembler`]: settings + slides → [`FeedResponse`], fresh per call
//! - [`page`]: HTML shell of the gallery page, three layouts
//! - `FeedExt` (feature `server`): routes on `digsignserver::Server`
//!
//! ## Exemple
//!
//! ```rust,ignore
//! use digsignfeed::{FeedAssembler, FeedExt, SlideSource};
//!
//! let source = SlideSource::new(store, variants, codes);
//! let assembler = Arc::new(FeedAssembler::new(get_config(), source));
//! server.init_feed(assembler).await;
//! ```

pub mod assembler;
pub mod codes;
pub mod error;
pub mod model;
pub mod page;
pub mod settings;
pub mod source;

#[cfg(feature = "server")]
pub mod server_ext;

pub use assembler::FeedAssembler;
pub use codes::CodeImageProvider;
pub use error::{FeedError, Result};
pub use model::{
    DisplaySettings, FeedResponse, FeedUpdate, LayoutType, SettingsPatch, Slide, SlideKind,
};
pub use settings::{PanelContent, SettingsProvider, SignageConfigExt};
pub use source::{SlidePolicy, SlideSource};

#[cfg(feature = "server")]
pub use server_ext::FeedExt;
