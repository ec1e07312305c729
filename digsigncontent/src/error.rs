use thiserror::Error;

/// Error types for content store and image operations
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Invalid category name: {0:?}")]
    InvalidCategory(String),

    #[error("Item {0} has no local image to resize")]
    NoSourceImage(String),

    #[error("Invalid item file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;
