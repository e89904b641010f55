//! Error type shared by camera configuration and the pixel sinks.

use std::fmt;
use std::io;

/// Failure of a render call.
#[derive(Debug)]
pub enum RenderError {
    /// Camera parameters that cannot produce an image.
    InvalidConfig(String),
    /// The pixel sink could not be written.
    Io(io::Error),
    /// The PNG encoder failed.
    Image(image::ImageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidConfig(msg) => write!(f, "invalid camera configuration: {}", msg),
            RenderError::Io(e) => write!(f, "failed to write image: {}", e),
            RenderError::Image(e) => write!(f, "failed to encode image: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::InvalidConfig(_) => None,
            RenderError::Io(e) => Some(e),
            RenderError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}
