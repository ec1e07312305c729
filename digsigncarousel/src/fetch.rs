//! Récupération du flux

use crate::error::{CarouselError, Result};
use async_trait::async_trait;
use digsignfeed::FeedUpdate;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Source d'une mise à jour du flux
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Récupère et décode une réponse du flux
    async fn fetch(&self) -> Result<FeedUpdate>;
}

/// Client HTTP de l'endpoint `/api/slides`
///
/// No timeout by default: a request that hangs is simply superseded by the
/// responses of later polls.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: Client,
    url: String,
    timeout: Option<Duration>,
}

impl HttpFeedFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Utilise un `reqwest::Client` existant
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            timeout: None,
        }
    }

    /// Abandonne les requêtes plus longues que `timeout`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self) -> Result<FeedUpdate> {
        debug!("Fetching slides from {}", self.url);

        let mut request = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(CarouselError::Unavailable(format!(
                "feed returned status: {}",
                response.status()
            )));
        }

        // Décodage strict: une diapositive invalide rejette toute la réponse
        let body = response.bytes().await?;
        let update: FeedUpdate = serde_json::from_slice(&body)?;
        Ok(update)
    }
}
