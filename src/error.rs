//! Error types for decoding and conversion
//!
//! Operations return these internally; the public boundaries
//! (`load_project`, `convert`, `save_bitmap`, `batch_convert`) log them and
//! report absence or a failure flag instead.

/// Failure while decoding a `.pixil` project file
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The file could not be read
    #[error("failed to read project file: {0}")]
    Io(#[from] std::io::Error),

    /// Not valid JSON, or a required key is missing or has the wrong type
    #[error("malformed project file: {0}")]
    Malformed(String),

    /// The raw pixel array does not cover `width * height` RGBA pixels
    #[error("pixel data size mismatch: expected {expected} samples, found {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The embedded data URI payload is not valid base64
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The embedded image could not be decoded
    #[error("failed to decode embedded image: {0}")]
    Image(#[from] image::ImageError),
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Malformed(e.to_string())
    }
}

/// Failure while converting or saving a bitmap
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested output format is not one we can write
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// An icon entry could not be encoded
    #[error("failed to encode {size}x{size} icon entry: {source}")]
    Icon {
        size: u32,
        #[source]
        source: std::io::Error,
    },
}
