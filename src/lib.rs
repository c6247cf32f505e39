//! # zenfbpack
//!
//! Packs a list of RGBA images into one headerless binary blob for firmware
//! and hardware framebuffers.
//!
//! ## Output layout
//!
//! For every image, in input order:
//!
//! ```text
//! [pixel bytes, row-major][zero padding to a multiple of 4096][4096 zero bytes]
//! ```
//!
//! There is no header, length prefix, magic number or checksum. Readers must
//! know the image count, dimensions, format and byte order out of band.
//!
//! ## Pixel formats
//!
//! | Format     | Bytes | Layout (MSB → LSB)                          |
//! |------------|-------|---------------------------------------------|
//! | `ARGB8888` | 4     | a8 r8 g8 b8                                 |
//! | `ARGB1555` | 2     | a1 b5 g5 r5                                 |
//! | `ARGB4444` | 2     | a4 b4 g4 r4                                 |
//! | `RGB666`   | 2     | low 16 bits of r6 g6 b6 (low six bits each) |
//! | `RGB565`   | 2     | r5 g6 b5                                    |
//! | `RGB444`   | 2     | 0000 r4 g4 b4                               |
//! | `RGB888`   | 3     | r8, g8, b8 bytes (byte order ignored)       |
//!
//! `ARGB` formats blend translucent pixels onto the configured
//! [`Background`]; `RGB` formats drop alpha without blending.
//!
//! ## Non-Goals
//!
//! - Decoding source image files (bring your own decoder; the `cli` feature
//!   uses the `image` crate)
//! - Dithering or color management
//! - Self-describing output
//!
//! ## Usage
//!
//! ```
//! use zenfbpack::{ByteOrder, Frame, PackConfig, PixelFormat};
//! use enough::Unstoppable;
//!
//! let red = [255u8, 0, 0, 255].repeat(4); // 2x2 RGBA8
//! let frames = [Ok(Frame::new("red.png", red, 2, 2))];
//!
//! let blob = PackConfig::new(PixelFormat::Rgb565)
//!     .with_order(ByteOrder::BigEndian)
//!     .pack(frames, Unstoppable)?;
//!
//! assert_eq!(&blob[..2], &[0xF8, 0x00]);
//! assert_eq!(blob.len(), 8192);
//! # Ok::<(), zenfbpack::PackError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod color;
mod config;
mod decode;
mod encode;
mod error;
mod frame;
mod limits;
mod pixel;
mod serialize;

// Re-exports
pub use color::Background;
pub use config::PackConfig;
pub use decode::{decode_pixel, unpack};
pub use encode::{PackedPixel, PixelEncoder, encode_pixel};
pub use enough::{Stop, Unstoppable};
pub use error::{BoxError, FrameError, PackError, SourceError};
pub use frame::Frame;
pub use limits::Limits;
pub use pixel::{ByteOrder, PixelFormat};
pub use rgb::{RGB8, RGBA8};
pub use serialize::{
    BLOCK_ALIGN, PackSummary, SPACER_LEN, block_len, checked_block_len, padding_for, serialize,
};

#[cfg(feature = "std")]
pub use serialize::serialize_to;
