use thiserror::Error;

/// Erreurs du cache de QR codes
#[derive(Debug, Error)]
pub enum QrCodeError {
    #[error("Cannot encode an empty URL")]
    EmptyUrl,

    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, QrCodeError>;
