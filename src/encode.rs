//! Single-pixel encoder: compositing, bit packing and byte order.

use core::ops::Deref;

use alloc::vec::Vec;
use rgb::{RGB8, RGBA8};

use crate::color::Background;
use crate::config::PackConfig;
use crate::pixel::{ByteOrder, PixelFormat};

/// One encoded pixel: the first `len` bytes of `bytes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedPixel {
    bytes: [u8; 4],
    len: u8,
}

impl Deref for PackedPixel {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// How a packed value turns into bytes.
#[derive(Clone, Copy, Debug)]
enum Emit {
    U32,
    U16,
    /// `r,g,b` bytes, independent of byte order.
    Rgb24,
}

/// Pixel encoder with the format resolved once for a whole run.
#[derive(Clone, Copy, Debug)]
pub struct PixelEncoder {
    pack: fn(RGBA8) -> u32,
    emit: Emit,
    composite: bool,
    order: ByteOrder,
    background: RGB8,
}

impl PixelEncoder {
    pub fn new(config: &PackConfig) -> Self {
        let (pack, emit): (fn(RGBA8) -> u32, Emit) = match config.format {
            PixelFormat::Argb8888 => (pack_argb8888, Emit::U32),
            PixelFormat::Argb1555 => (pack_argb1555, Emit::U16),
            PixelFormat::Argb4444 => (pack_argb4444, Emit::U16),
            PixelFormat::Rgb666 => (pack_rgb666, Emit::U16),
            PixelFormat::Rgb565 => (pack_rgb565, Emit::U16),
            PixelFormat::Rgb444 => (pack_rgb444, Emit::U16),
            PixelFormat::Rgb888 => (pack_rgb888, Emit::Rgb24),
        };
        Self {
            pack,
            emit,
            composite: config.format.composites(),
            order: config.order,
            background: config.background.rgb(),
        }
    }

    /// Encode one pixel.
    #[inline]
    pub fn encode(&self, px: RGBA8) -> PackedPixel {
        let px = if self.composite && px.a < 255 {
            composite(px, self.background)
        } else {
            px
        };
        let value = (self.pack)(px);
        match self.emit {
            Emit::U32 => PackedPixel {
                bytes: match self.order {
                    ByteOrder::LittleEndian => value.to_le_bytes(),
                    ByteOrder::BigEndian => value.to_be_bytes(),
                },
                len: 4,
            },
            Emit::U16 => {
                let v = value as u16;
                let [b0, b1] = match self.order {
                    ByteOrder::LittleEndian => v.to_le_bytes(),
                    ByteOrder::BigEndian => v.to_be_bytes(),
                };
                PackedPixel {
                    bytes: [b0, b1, 0, 0],
                    len: 2,
                }
            }
            Emit::Rgb24 => PackedPixel {
                bytes: [px.r, px.g, px.b, 0],
                len: 3,
            },
        }
    }

    /// Encode a row-major run of RGBA8 bytes (4 per pixel), appending to `out`.
    ///
    /// A trailing partial pixel is ignored; callers validate lengths first.
    pub(crate) fn encode_rgba_bytes(&self, rgba: &[u8], out: &mut Vec<u8>) {
        for c in rgba.chunks_exact(4) {
            out.extend_from_slice(&self.encode(RGBA8::new(c[0], c[1], c[2], c[3])));
        }
    }
}

/// Encode one pixel with an explicit format, byte order and background.
///
/// Convenience over [`PixelEncoder`]; prefer building the encoder once when
/// encoding many pixels.
pub fn encode_pixel(
    pixel: RGBA8,
    format: PixelFormat,
    order: ByteOrder,
    background: Background,
) -> PackedPixel {
    PixelEncoder::new(&PackConfig::new(format).with_order(order).with_background(background))
        .encode(pixel)
}

/// Blend a translucent pixel onto `bg`, keeping its alpha.
///
/// Each channel is `(1 - a/255) * bg + (a/255) * c` in double precision,
/// truncated toward zero.
fn composite(px: RGBA8, bg: RGB8) -> RGBA8 {
    let alpha = f64::from(px.a) / 255.0;
    let blend = |c: u8, b: u8| ((1.0 - alpha) * f64::from(b) + alpha * f64::from(c)) as u8;
    RGBA8::new(blend(px.r, bg.r), blend(px.g, bg.g), blend(px.b, bg.b), px.a)
}

fn pack_argb8888(p: RGBA8) -> u32 {
    (u32::from(p.a) << 24) | (u32::from(p.r) << 16) | (u32::from(p.g) << 8) | u32::from(p.b)
}

fn pack_argb1555(p: RGBA8) -> u32 {
    ((u32::from(p.a) & 0x80) << 8)
        | ((u32::from(p.b) & 0xF8) << 7)
        | ((u32::from(p.g) & 0xF8) << 2)
        | (u32::from(p.r) >> 3)
}

fn pack_argb4444(p: RGBA8) -> u32 {
    ((u32::from(p.a) & 0xF0) << 8)
        | ((u32::from(p.b) & 0xF0) << 4)
        | (u32::from(p.g) & 0xF0)
        | (u32::from(p.r) >> 4)
}

// Low six bits of each channel; bits 16-17 fall off when emitted as u16.
fn pack_rgb666(p: RGBA8) -> u32 {
    ((u32::from(p.r) & 0x3F) << 12) | ((u32::from(p.g) & 0x3F) << 6) | (u32::from(p.b) & 0x3F)
}

fn pack_rgb565(p: RGBA8) -> u32 {
    ((u32::from(p.r) & 0xF8) << 8) | ((u32::from(p.g) & 0xFC) << 3) | (u32::from(p.b) >> 3)
}

fn pack_rgb444(p: RGBA8) -> u32 {
    ((u32::from(p.r) & 0xF0) << 4) | (u32::from(p.g) & 0xF0) | (u32::from(p.b) >> 4)
}

fn pack_rgb888(p: RGBA8) -> u32 {
    (u32::from(p.r) << 16) | (u32::from(p.g) << 8) | u32::from(p.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(px: RGBA8, format: PixelFormat, order: ByteOrder) -> PackedPixel {
        encode_pixel(px, format, order, Background::WHITE)
    }

    #[test]
    fn width_is_fixed_for_every_channel_value() {
        let orders = [ByteOrder::LittleEndian, ByteOrder::BigEndian];
        for format in PixelFormat::ALL {
            for order in orders {
                let e = PixelEncoder::new(&PackConfig::new(format).with_order(order));
                for v in 0..=255u8 {
                    for px in [
                        RGBA8::new(v, 0, 0, 255),
                        RGBA8::new(0, v, 0, 0),
                        RGBA8::new(0, 0, v, 128),
                        RGBA8::new(v, v.wrapping_mul(3), v ^ 0x5A, v),
                    ] {
                        assert_eq!(e.encode(px).len(), format.bytes_per_pixel(), "{format}");
                    }
                }
            }
        }
    }

    #[test]
    fn rgb565_byte_order() {
        let px = RGBA8::new(0xFF, 0, 0, 255);
        assert_eq!(&*enc(px, PixelFormat::Rgb565, ByteOrder::LittleEndian), &[0x00, 0xF8]);
        assert_eq!(&*enc(px, PixelFormat::Rgb565, ByteOrder::BigEndian), &[0xF8, 0x00]);

        let white = RGBA8::new(0xFF, 0xFF, 0xFF, 255);
        assert_eq!(&*enc(white, PixelFormat::Rgb565, ByteOrder::LittleEndian), &[0xFF, 0xFF]);
        assert_eq!(&*enc(white, PixelFormat::Rgb565, ByteOrder::BigEndian), &[0xFF, 0xFF]);
    }

    #[test]
    fn argb8888_layout() {
        let px = RGBA8::new(0x11, 0x22, 0x33, 0xFF);
        assert_eq!(
            &*enc(px, PixelFormat::Argb8888, ByteOrder::BigEndian),
            &[0xFF, 0x11, 0x22, 0x33]
        );
        assert_eq!(
            &*enc(px, PixelFormat::Argb8888, ByteOrder::LittleEndian),
            &[0x33, 0x22, 0x11, 0xFF]
        );
    }

    #[test]
    fn rgb888_ignores_byte_order() {
        let px = RGBA8::new(1, 2, 3, 255);
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
            assert_eq!(&*enc(px, PixelFormat::Rgb888, order), &[1, 2, 3]);
        }
    }

    #[test]
    fn argb1555_puts_blue_high_and_red_low() {
        // a=1, b=31, g=0, r=0
        let px = RGBA8::new(0, 0, 0xFF, 0xFF);
        assert_eq!(&*enc(px, PixelFormat::Argb1555, ByteOrder::BigEndian), &[0xFC, 0x00]);
        let px = RGBA8::new(0xFF, 0, 0, 0xFF);
        assert_eq!(&*enc(px, PixelFormat::Argb1555, ByteOrder::BigEndian), &[0x80, 0x1F]);
    }

    #[test]
    fn argb4444_nibbles() {
        let px = RGBA8::new(0x10, 0x20, 0x30, 0xFF);
        // a=F b=3 g=2 r=1
        assert_eq!(&*enc(px, PixelFormat::Argb4444, ByteOrder::BigEndian), &[0xF3, 0x21]);
    }

    #[test]
    fn rgb444_drops_low_nibbles() {
        let px = RGBA8::new(0xAB, 0xCD, 0xEF, 255);
        assert_eq!(&*enc(px, PixelFormat::Rgb444, ByteOrder::BigEndian), &[0x0A, 0xCE]);
    }

    #[test]
    fn rgb666_truncates_to_sixteen_bits() {
        // r=0x3F: (0x3F << 12) = 0x3F000, only 0xF000 survives.
        let px = RGBA8::new(0x3F, 0, 0, 255);
        assert_eq!(&*enc(px, PixelFormat::Rgb666, ByteOrder::BigEndian), &[0xF0, 0x00]);
        // Low six bits of each channel are used, not the top six.
        let px = RGBA8::new(0xC1, 0xC2, 0xC3, 255);
        let expected: u16 = ((0x01 << 12) | (0x02 << 6) | 0x03) as u16;
        assert_eq!(
            &*enc(px, PixelFormat::Rgb666, ByteOrder::LittleEndian),
            &expected.to_le_bytes()
        );
    }

    #[test]
    fn blend_truncates_toward_zero() {
        let px = RGBA8::new(200, 100, 50, 128);
        let e = enc(px, PixelFormat::Argb8888, ByteOrder::BigEndian);
        assert_eq!(&*e, &[128, 227, 177, 152]);
    }

    #[test]
    fn blend_uses_background() {
        let px = RGBA8::new(255, 255, 255, 0);
        let bg = Background::new(10, 20, 30);
        let e = encode_pixel(px, PixelFormat::Argb8888, ByteOrder::BigEndian, bg);
        assert_eq!(&*e, &[0, 10, 20, 30]);
    }

    #[test]
    fn opaque_pixels_ignore_background() {
        for format in PixelFormat::ALL {
            for v in (0..=255u8).step_by(7) {
                let px = RGBA8::new(v, 255 - v, v / 2, 255);
                let a = encode_pixel(px, format, ByteOrder::LittleEndian, Background::WHITE);
                let b = encode_pixel(px, format, ByteOrder::LittleEndian, Background::new(3, 99, 200));
                assert_eq!(a, b, "{format}");
            }
        }
    }

    #[test]
    fn rgb_formats_never_blend() {
        let px = RGBA8::new(200, 100, 50, 0);
        let bg = Background::new(0, 0, 0);
        assert_eq!(
            &*encode_pixel(px, PixelFormat::Rgb888, ByteOrder::LittleEndian, bg),
            &[200, 100, 50]
        );
        let raw = encode_pixel(px, PixelFormat::Rgb565, ByteOrder::LittleEndian, bg);
        let opaque = encode_pixel(
            RGBA8::new(200, 100, 50, 255),
            PixelFormat::Rgb565,
            ByteOrder::LittleEndian,
            Background::WHITE,
        );
        assert_eq!(raw, opaque);
    }
}
