use alloc::boxed::Box;
use alloc::string::String;
use enough::StopReason;

/// Boxed error from an image-decoding collaborator.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Errors from configuring or running a pack.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PackError {
    #[error("unknown pixel format: {0:?}")]
    UnknownFormat(String),

    #[error("unknown byte order: {0:?}")]
    UnknownByteOrder(String),

    #[error("invalid background color: {0:?}")]
    InvalidBackgroundColor(String),

    #[error("image {index} ({name}): {cause}")]
    Image {
        index: usize,
        name: String,
        #[source]
        cause: FrameError,
    },

    #[cfg(feature = "std")]
    #[error("writing image {index} failed: {source}")]
    Sink {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    /// The final flush failed after every block was written.
    #[cfg(feature = "std")]
    #[error("flushing output failed: {0}")]
    Flush(#[source] std::io::Error),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("blob too short for image {index}: need {needed} bytes, got {actual}")]
    Truncated {
        index: usize,
        needed: usize,
        actual: usize,
    },

    #[error("{0} bytes left over after the last image")]
    TrailingBytes(usize),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PackError {
    fn from(r: StopReason) -> Self {
        PackError::Cancelled(r)
    }
}

/// Why a single image could not be packed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FrameError {
    #[error("decode failed: {0}")]
    Decode(#[source] BoxError),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

/// A decode failure reported by the image source for one named image.
///
/// Image sources yield `Result<Frame, SourceError>`; the serializer turns
/// the error into [`PackError::Image`] tagged with the image's position.
#[derive(Debug)]
pub struct SourceError {
    pub name: String,
    pub cause: BoxError,
}

impl SourceError {
    pub fn new(name: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            name: name.into(),
            cause: cause.into(),
        }
    }
}
