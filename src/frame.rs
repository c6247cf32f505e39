use alloc::borrow::Cow;
use alloc::vec::Vec;

use rgb::RGBA8;

use crate::encode::PixelEncoder;
use crate::error::FrameError;

#[derive(Clone, Debug)]
enum Pixels<'a> {
    /// Interleaved `r,g,b,a` bytes.
    Bytes(Cow<'a, [u8]>),
    Rgba(Cow<'a, [RGBA8]>),
}

/// One decoded source image: RGBA8 pixels in row-major order.
///
/// Pixels may be borrowed or owned. A buffer longer than `width * height`
/// pixels is accepted; the excess is ignored.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    name: Cow<'a, str>,
    pixels: Pixels<'a>,
    pub width: u32,
    pub height: u32,
}

impl<'a> Frame<'a> {
    /// Frame over interleaved RGBA8 bytes.
    pub fn new(
        name: impl Into<Cow<'a, str>>,
        rgba: impl Into<Cow<'a, [u8]>>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            name: name.into(),
            pixels: Pixels::Bytes(rgba.into()),
            width,
            height,
        }
    }

    /// Frame over typed RGBA8 pixels.
    pub fn from_rgba(
        name: impl Into<Cow<'a, str>>,
        pixels: impl Into<Cow<'a, [RGBA8]>>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            name: name.into(),
            pixels: Pixels::Rgba(pixels.into()),
            width,
            height,
        }
    }

    /// Copy an [`imgref::ImgRef`] (any stride) into an owned frame.
    ///
    /// Fails if either dimension does not fit in `u32`.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(
        name: impl Into<Cow<'a, str>>,
        img: imgref::ImgRef<'_, RGBA8>,
    ) -> Result<Self, FrameError> {
        let (width, height) = match (u32::try_from(img.width()), u32::try_from(img.height())) {
            (Ok(w), Ok(h)) => (w, h),
            (w, h) => {
                return Err(FrameError::DimensionsTooLarge {
                    width: w.unwrap_or(u32::MAX),
                    height: h.unwrap_or(u32::MAX),
                });
            }
        };
        let pixels: Vec<RGBA8> = img.rows().flat_map(|row| row.iter().copied()).collect();
        Ok(Self::from_rgba(name, pixels, width, height))
    }

    /// Identifier used in logs and errors, usually a file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixel_count(&self) -> Result<usize, FrameError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or(FrameError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    /// Check that the buffer holds `width * height` pixels.
    pub(crate) fn validate(&self) -> Result<usize, FrameError> {
        let count = self.pixel_count()?;
        let (needed, actual) = match &self.pixels {
            Pixels::Bytes(b) => (
                count.checked_mul(4).ok_or(FrameError::DimensionsTooLarge {
                    width: self.width,
                    height: self.height,
                })?,
                b.len(),
            ),
            Pixels::Rgba(p) => (count, p.len()),
        };
        if actual < needed {
            return Err(FrameError::BufferTooSmall { needed, actual });
        }
        Ok(count)
    }

    /// Encode the first `count` pixels onto `out`.
    pub(crate) fn encode_into(&self, encoder: &PixelEncoder, count: usize, out: &mut Vec<u8>) {
        match &self.pixels {
            Pixels::Bytes(b) => encoder.encode_rgba_bytes(&b[..count * 4], out),
            Pixels::Rgba(p) => {
                for &px in &p[..count] {
                    out.extend_from_slice(&encoder.encode(px));
                }
            }
        }
    }

    /// Take ownership of name and pixel data (copies if borrowed).
    pub fn into_owned(self) -> Frame<'static> {
        Frame {
            name: Cow::Owned(self.name.into_owned()),
            pixels: match self.pixels {
                Pixels::Bytes(b) => Pixels::Bytes(Cow::Owned(b.into_owned())),
                Pixels::Rgba(p) => Pixels::Rgba(Cow::Owned(p.into_owned())),
            },
            width: self.width,
            height: self.height,
        }
    }
}
