//! Reading packed blobs back.
//!
//! The blob has no header, so the caller supplies format, byte order and
//! every image's dimensions out of band. Channels come back holding only the
//! bits the format stores: high bits of each byte for the masked formats, the
//! raw low bits for `RGB666`. Missing alpha reads as 255.

use alloc::string::String;
use alloc::vec::Vec;
use rgb::RGBA8;

use crate::config::PackConfig;
use crate::error::{FrameError, PackError};
use crate::pixel::{ByteOrder, PixelFormat};
use crate::serialize::checked_block_len;

/// Decode one packed pixel from the front of `bytes`.
///
/// Returns `None` if `bytes` is shorter than the format's pixel width.
pub fn decode_pixel(bytes: &[u8], format: PixelFormat, order: ByteOrder) -> Option<RGBA8> {
    let bytes = bytes.get(..format.bytes_per_pixel())?;
    let u16_at = || match order {
        ByteOrder::LittleEndian => u16::from_le_bytes([bytes[0], bytes[1]]),
        ByteOrder::BigEndian => u16::from_be_bytes([bytes[0], bytes[1]]),
    };
    let nib = |v: u16, shift: u32| (((v >> shift) & 0xF) as u8) << 4;

    Some(match format {
        PixelFormat::Argb8888 => {
            let arr = [bytes[0], bytes[1], bytes[2], bytes[3]];
            let v = match order {
                ByteOrder::LittleEndian => u32::from_le_bytes(arr),
                ByteOrder::BigEndian => u32::from_be_bytes(arr),
            };
            RGBA8::new((v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8)
        }
        PixelFormat::Argb1555 => {
            let v = u16_at();
            RGBA8::new(
                ((v & 0x1F) as u8) << 3,
                (((v >> 5) & 0x1F) as u8) << 3,
                (((v >> 10) & 0x1F) as u8) << 3,
                if v & 0x8000 != 0 { 0x80 } else { 0 },
            )
        }
        PixelFormat::Argb4444 => {
            let v = u16_at();
            RGBA8::new(nib(v, 0), nib(v, 4), nib(v, 8), nib(v, 12))
        }
        PixelFormat::Rgb666 => {
            let v = u16_at();
            RGBA8::new(
                ((v >> 12) & 0x0F) as u8,
                ((v >> 6) & 0x3F) as u8,
                (v & 0x3F) as u8,
                255,
            )
        }
        PixelFormat::Rgb565 => {
            let v = u16_at();
            RGBA8::new(
                (((v >> 11) & 0x1F) as u8) << 3,
                (((v >> 5) & 0x3F) as u8) << 2,
                ((v & 0x1F) as u8) << 3,
                255,
            )
        }
        PixelFormat::Rgb444 => {
            let v = u16_at();
            RGBA8::new(nib(v, 8), nib(v, 4), nib(v, 0), 255)
        }
        PixelFormat::Rgb888 => RGBA8::new(bytes[0], bytes[1], bytes[2], 255),
    })
}

/// Split a packed blob into per-image pixel vectors.
///
/// `dims` lists `(width, height)` for every image in order. The blob must be
/// exactly as long as those images imply; padding and spacer contents are
/// not inspected.
pub fn unpack(
    blob: &[u8],
    dims: &[(u32, u32)],
    config: &PackConfig,
) -> Result<Vec<Vec<RGBA8>>, PackError> {
    let bpp = config.format.bytes_per_pixel();
    let mut images = Vec::with_capacity(dims.len());
    let mut rest = blob;

    for (index, &(width, height)) in dims.iter().enumerate() {
        let sizes = (width as usize).checked_mul(height as usize).and_then(|c| {
            let pixel_bytes = c.checked_mul(bpp)?;
            Some((c, pixel_bytes, checked_block_len(pixel_bytes)?))
        });
        let Some((count, pixel_bytes, len)) = sizes else {
            return Err(PackError::Image {
                index,
                name: String::new(),
                cause: FrameError::DimensionsTooLarge { width, height },
            });
        };
        if rest.len() < len {
            return Err(PackError::Truncated {
                index,
                needed: len,
                actual: rest.len(),
            });
        }
        let (block, tail) = rest.split_at(len);
        let mut pixels = Vec::with_capacity(count);
        pixels.extend(
            block[..pixel_bytes]
                .chunks_exact(bpp)
                .filter_map(|c| decode_pixel(c, config.format, config.order)),
        );
        images.push(pixels);
        rest = tail;
    }

    if !rest.is_empty() {
        return Err(PackError::TrailingBytes(rest.len()));
    }
    Ok(images)
}
