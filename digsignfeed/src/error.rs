use digsigncontent::ContentError;
use thiserror::Error;

/// Erreurs de construction du flux
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Content store failure: {0}")]
    Content(#[from] ContentError),
}

pub type Result<T> = std::result::Result<T, FeedError>;
