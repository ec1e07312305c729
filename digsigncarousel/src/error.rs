use thiserror::Error;

/// Erreurs de récupération du flux
#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid feed payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Feed unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
