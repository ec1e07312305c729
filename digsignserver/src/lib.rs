//! # digsignserver - Serveur web haut niveau basé sur Axum
//!
//! Shared HTTP host for the digital-signage crates. Feature crates register
//! their routes through extension traits implemented on [`Server`]
//! (`FeedExt`, `QrCodeExt`, [`ConfigExt`]).
//!
//! ## Fonctionnalités
//!
//! - **API de haut niveau** : routes JSON, handlers avec état, sous-routers
//! - **Logs SSE** : buffer circulaire et flux temps réel (`/log-sse`)
//! - **Fichiers embarqués** : `RustEmbed`
//! - **Documentation OpenAPI** : Swagger UI par API
//! - **Arrêt gracieux** sur Ctrl+C
//!
//! ## Exemple d'utilisation
//!
//! ```rust,no_run
//! use digsignserver::{ServerBuilder, logs::LoggingOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut server = ServerBuilder::new("Signage", "http://localhost:8080", 8080).build();
//!     server.init_logging(LoggingOptions::default()).await;
//!
//!     server.add_route("/api/status", || async {
//!         serde_json::json!({"status": "ok"})
//!     }).await;
//!
//!     server.start().await?;
//!     server.wait().await;
//!     Ok(())
//! }
//! ```

pub mod logs;
pub mod server;
mod config_ext;

pub use config_ext::ConfigExt;
pub use logs::{LogState, LoggingOptions, SseLayer, log_dump, log_sse};
pub use server::{Server, ServerBuilder, ServerInfo};
