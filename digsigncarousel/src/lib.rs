//! # digsigncarousel - Client carrousel du flux d'affichage
//!
//! Client side of the signage feed: polls `/api/slides`, keeps the slides
//! on screen and rotates them. The browser page ships its own script; this
//! crate is the same behaviour for native players and headless checks.
//!
//! ## Architecture
//!
//! - [`CarouselState`]: pure transitions (`reconcile`, `fetch_failed`, `tick`)
//!   returning a [`RenderPlan`]
//! - [`CarouselClient`]: tokio loop with rotation and poll intervals
//! - [`FeedFetcher`] / [`HttpFeedFetcher`]: feed retrieval
//! - [`SlideRenderer`]: [`HtmlRenderer`] (markup) or [`LogRenderer`] (tracing)
//!
//! ## Exemple
//!
//! ```rust,ignore
//! use digsigncarousel::{CarouselClient, EffectiveSettings, HttpFeedFetcher, LogRenderer};
//!
//! let fetcher = Arc::new(HttpFeedFetcher::new("http://localhost:8080/api/slides"));
//! let client = CarouselClient::new(fetcher, LogRenderer::new(), EffectiveSettings::default(), "news");
//! client.run_until(async { tokio::signal::ctrl_c().await.ok(); }).await;
//! ```

pub mod client;
pub mod error;
pub mod fetch;
pub mod render;
pub mod settings;
pub mod state;

pub use client::CarouselClient;
pub use error::{CarouselError, Result};
pub use fetch::{FeedFetcher, HttpFeedFetcher};
pub use render::{Element, HtmlRenderer, LogRenderer, SlideRenderer};
pub use settings::{EffectiveSettings, SettingsChange};
pub use state::{CarouselState, Phase, Placeholder, RenderPlan, TimerCommand, View};
