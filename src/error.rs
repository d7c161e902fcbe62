use std::fmt;

/// The main error type for the blockdither crate
#[derive(Debug)]
pub enum BlockDitherError {
    /// A generation parameter is outside its valid domain.
    ///
    /// Raised before any pixel of the working buffer is written.
    InvalidParameter(String),

    /// A generation config could not be parsed
    Config(String),

    /// Error occurred while encoding the output image
    ImageEncode(image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    Io(std::io::Error),
}

impl fmt::Display for BlockDitherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockDitherError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            BlockDitherError::Config(msg) => write!(f, "Config parse error: {}", msg),
            BlockDitherError::ImageEncode(e) => write!(f, "Image encode error: {}", e),
            BlockDitherError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for BlockDitherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlockDitherError::InvalidParameter(_) | BlockDitherError::Config(_) => None,
            BlockDitherError::ImageEncode(e) => Some(e),
            BlockDitherError::Io(e) => Some(e),
        }
    }
}

// From implementations for automatic conversion from common error types

impl From<image::ImageError> for BlockDitherError {
    fn from(err: image::ImageError) -> Self {
        BlockDitherError::ImageEncode(err)
    }
}

impl From<std::io::Error> for BlockDitherError {
    fn from(err: std::io::Error) -> Self {
        BlockDitherError::Io(err)
    }
}

// Convenience type alias for Results using BlockDitherError
pub type Result<T = ()> = std::result::Result<T, BlockDitherError>;
