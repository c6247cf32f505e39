use enough::Stop;

use alloc::vec::Vec;

use crate::color::Background;
use crate::error::{PackError, SourceError};
use crate::frame::Frame;
use crate::limits::Limits;
use crate::pixel::{ByteOrder, PixelFormat};

/// Settings fixed for one pack run.
///
/// ```
/// use zenfbpack::{Background, ByteOrder, PackConfig, PixelFormat};
///
/// let config = PackConfig::new(PixelFormat::Rgb565)
///     .with_order(ByteOrder::BigEndian)
///     .with_background(Background::BLACK);
/// assert_eq!(config.format.bytes_per_pixel(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PackConfig {
    pub format: PixelFormat,
    pub order: ByteOrder,
    pub background: Background,
    pub limits: Limits,
}

impl PackConfig {
    /// Little-endian, white background, no limits.
    pub fn new(format: PixelFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Build from the three textual settings a user types or picks.
    ///
    /// Fails before any pixel is touched if one of them is malformed.
    pub fn parse(format: &str, order: &str, background: &str) -> Result<Self, PackError> {
        Ok(Self::new(format.parse()?)
            .with_order(order.parse()?)
            .with_background(background.parse()?))
    }

    pub fn with_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Pack frames into one in-memory blob. See [`crate::serialize`].
    pub fn pack<'a, I>(&self, frames: I, stop: impl Stop) -> Result<Vec<u8>, PackError>
    where
        I: IntoIterator<Item = Result<Frame<'a>, SourceError>>,
    {
        crate::serialize::serialize(frames, self, &stop)
    }

    /// Pack frames into a writer, one write per image block.
    /// See [`crate::serialize_to`].
    #[cfg(feature = "std")]
    pub fn pack_to<'a, I, W>(
        &self,
        frames: I,
        sink: &mut W,
        stop: impl Stop,
    ) -> Result<crate::PackSummary, PackError>
    where
        I: IntoIterator<Item = Result<Frame<'a>, SourceError>>,
        W: std::io::Write + ?Sized,
    {
        crate::serialize::serialize_to(frames, self, sink, &stop)
    }
}
