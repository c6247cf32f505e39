//! Image serializer: encodes frames in order and lays out 4 KiB blocks.
//!
//! Each image becomes `[pixel bytes][zero padding to 4096][4096 zero bytes]`.
//! Blocks are concatenated in input order with no header of any kind.

use alloc::string::ToString;
use alloc::vec::Vec;
use enough::Stop;

use crate::config::PackConfig;
use crate::encode::PixelEncoder;
use crate::error::{FrameError, PackError, SourceError};
use crate::frame::Frame;

/// Alignment of each image's pixel data.
pub const BLOCK_ALIGN: usize = 4096;

/// Size of the all-zero spacer written after every image.
pub const SPACER_LEN: usize = 4096;

/// Zero bytes needed to bring `len` up to a multiple of [`BLOCK_ALIGN`].
///
/// An already-aligned length needs none.
pub const fn padding_for(len: usize) -> usize {
    (BLOCK_ALIGN - len % BLOCK_ALIGN) % BLOCK_ALIGN
}

/// Total bytes one image occupies in the output, given its encoded size.
///
/// Panics on overflow; see [`checked_block_len`].
pub const fn block_len(pixel_bytes: usize) -> usize {
    pixel_bytes + padding_for(pixel_bytes) + SPACER_LEN
}

/// [`block_len`], or `None` if the block would not fit in `usize`.
pub const fn checked_block_len(pixel_bytes: usize) -> Option<usize> {
    match pixel_bytes.checked_add(padding_for(pixel_bytes)) {
        Some(padded) => padded.checked_add(SPACER_LEN),
        None => None,
    }
}

/// Result of a completed run written to a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackSummary {
    pub images: usize,
    pub bytes_written: u64,
}

/// Encode every frame in order into one blob.
///
/// The first failing frame aborts the run; no partial blob is returned.
/// `stop` is consulted before each image.
pub fn serialize<'a, I>(
    frames: I,
    config: &PackConfig,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PackError>
where
    I: IntoIterator<Item = Result<Frame<'a>, SourceError>>,
{
    let encoder = PixelEncoder::new(config);
    let mut out = Vec::new();
    let mut images = 0usize;

    for (index, item) in frames.into_iter().enumerate() {
        stop.check()?;
        let frame = item.map_err(|e| decode_failure(index, e))?;
        append_block(index, &frame, &encoder, config, out.len() as u64, &mut out)?;
        images += 1;
    }

    tracing::info!(
        images,
        bytes = out.len(),
        format = config.format.name(),
        order = config.order.name(),
        "pack complete"
    );
    Ok(out)
}

/// Encode every frame in order, writing each image block to `sink` as soon
/// as it is complete (one `write_all` per image).
///
/// On error the sink may hold a partial artifact which must be discarded.
#[cfg(feature = "std")]
pub fn serialize_to<'a, I, W>(
    frames: I,
    config: &PackConfig,
    sink: &mut W,
    stop: &dyn Stop,
) -> Result<PackSummary, PackError>
where
    I: IntoIterator<Item = Result<Frame<'a>, SourceError>>,
    W: std::io::Write + ?Sized,
{
    let encoder = PixelEncoder::new(config);
    let mut block = Vec::new();
    let mut summary = PackSummary {
        images: 0,
        bytes_written: 0,
    };

    for (index, item) in frames.into_iter().enumerate() {
        stop.check()?;
        let frame = item.map_err(|e| decode_failure(index, e))?;
        block.clear();
        append_block(
            index,
            &frame,
            &encoder,
            config,
            summary.bytes_written,
            &mut block,
        )?;
        sink.write_all(&block)
            .map_err(|source| PackError::Sink { index, source })?;
        summary.images += 1;
        summary.bytes_written += block.len() as u64;
    }
    sink.flush().map_err(PackError::Flush)?;

    tracing::info!(
        images = summary.images,
        bytes = summary.bytes_written,
        format = config.format.name(),
        order = config.order.name(),
        "pack complete"
    );
    Ok(summary)
}

fn decode_failure(index: usize, e: SourceError) -> PackError {
    tracing::warn!(index, name = %e.name, "image source failed");
    PackError::Image {
        index,
        name: e.name,
        cause: FrameError::Decode(e.cause),
    }
}

/// Append one image block to `out`, given that `produced` bytes of output
/// precede it in the run.
fn append_block(
    index: usize,
    frame: &Frame<'_>,
    encoder: &PixelEncoder,
    config: &PackConfig,
    produced: u64,
    out: &mut Vec<u8>,
) -> Result<(), PackError> {
    let image_err = |cause: FrameError| PackError::Image {
        index,
        name: frame.name().to_string(),
        cause,
    };

    let count = frame.validate().map_err(image_err)?;
    config
        .limits
        .check(frame.width, frame.height)
        .map_err(image_err)?;

    let too_large = FrameError::DimensionsTooLarge {
        width: frame.width,
        height: frame.height,
    };
    let Some((pixel_bytes, len)) = count
        .checked_mul(config.format.bytes_per_pixel())
        .and_then(|b| Some((b, checked_block_len(b)?)))
    else {
        return Err(image_err(too_large));
    };
    config
        .limits
        .check_output(produced.saturating_add(len as u64))?;

    out.reserve(len);
    let start = out.len();
    frame.encode_into(encoder, count, out);
    debug_assert_eq!(out.len() - start, pixel_bytes);
    out.resize(start + pixel_bytes + padding_for(pixel_bytes), 0);
    out.resize(start + len, 0);

    tracing::debug!(
        index,
        name = frame.name(),
        width = frame.width,
        height = frame.height,
        pixel_bytes,
        padding = padding_for(pixel_bytes),
        "packed image"
    );
    Ok(())
}
