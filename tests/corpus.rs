//! Test corpus: generated patterns across every format, byte order and size.

use enough::Unstoppable;
use zenfbpack::*;

fn checkerboard(w: usize, h: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * 4;
            if (x + y) % 2 == 0 {
                pixels[off..off + 4].copy_from_slice(&[200, 220, 240, 255]);
            } else {
                pixels[off..off + 4].copy_from_slice(&[10, 40, 70, 100]);
            }
        }
    }
    pixels
}

fn noise_pattern(w: usize, h: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * 4];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

const ORDERS: [ByteOrder; 2] = [ByteOrder::LittleEndian, ByteOrder::BigEndian];

const SIZES: [(u32, u32); 6] = [(1, 1), (3, 7), (16, 16), (64, 32), (100, 41), (257, 3)];

// ── Layout ───────────────────────────────────────────────────────────

#[test]
fn every_block_is_aligned_and_ends_in_a_spacer() {
    for format in PixelFormat::ALL {
        for order in ORDERS {
            let config = PackConfig::new(format).with_order(order);
            let frames: Vec<Result<Frame<'static>, SourceError>> = SIZES
                .iter()
                .map(|&(w, h)| {
                    Ok(Frame::new(
                        format!("{w}x{h}"),
                        noise_pattern(w as usize, h as usize),
                        w,
                        h,
                    ))
                })
                .collect();
            let blob = config.pack(frames, Unstoppable).unwrap();

            let mut offset = 0;
            for &(w, h) in &SIZES {
                let pixel_bytes = (w * h) as usize * format.bytes_per_pixel();
                let len = block_len(pixel_bytes);
                assert_eq!(len % BLOCK_ALIGN, 0, "{format} {w}x{h}");
                let block = &blob[offset..offset + len];
                assert!(
                    block[pixel_bytes..].iter().all(|&b| b == 0),
                    "{format} {order} {w}x{h}: padding or spacer not zero"
                );
                assert!(block[len - SPACER_LEN..].iter().all(|&b| b == 0));
                offset += len;
            }
            assert_eq!(offset, blob.len(), "{format} {order}");
        }
    }
}

#[test]
fn output_length_depends_only_on_sizes() {
    for format in PixelFormat::ALL {
        let config = PackConfig::new(format);
        let a = config
            .pack([Ok(Frame::new("c", checkerboard(100, 41), 100, 41))], Unstoppable)
            .unwrap();
        let b = config
            .pack([Ok(Frame::new("n", noise_pattern(100, 41), 100, 41))], Unstoppable)
            .unwrap();
        assert_eq!(a.len(), b.len(), "{format}");
        assert_eq!(a.len(), block_len(4100 * format.bytes_per_pixel()));
    }
}

// ── Pixel content ────────────────────────────────────────────────────

#[test]
fn blob_pixels_match_single_pixel_encoder() {
    let bg = Background::new(30, 60, 90);
    for format in PixelFormat::ALL {
        for order in ORDERS {
            let rgba = noise_pattern(13, 11);
            let config = PackConfig::new(format).with_order(order).with_background(bg);
            let blob = config
                .pack([Ok(Frame::new("n", &rgba[..], 13, 11))], Unstoppable)
                .unwrap();
            let bpp = format.bytes_per_pixel();
            for (i, c) in rgba.chunks_exact(4).enumerate() {
                let expected = encode_pixel(RGBA8::new(c[0], c[1], c[2], c[3]), format, order, bg);
                assert_eq!(&blob[i * bpp..(i + 1) * bpp], &*expected, "{format} {order} px {i}");
            }
        }
    }
}

#[test]
fn byte_orders_are_mirror_images() {
    let rgba = checkerboard(8, 8);
    for format in PixelFormat::ALL {
        let le = PackConfig::new(format)
            .pack([Ok(Frame::new("c", &rgba[..], 8, 8))], Unstoppable)
            .unwrap();
        let be = PackConfig::new(format)
            .with_order(ByteOrder::BigEndian)
            .pack([Ok(Frame::new("c", &rgba[..], 8, 8))], Unstoppable)
            .unwrap();
        let bpp = format.bytes_per_pixel();
        for (l, b) in le[..64 * bpp].chunks_exact(bpp).zip(be.chunks_exact(bpp)) {
            if format == PixelFormat::Rgb888 {
                assert_eq!(l, b);
            } else {
                let mut r = b.to_vec();
                r.reverse();
                assert_eq!(l, &r[..], "{format}");
            }
        }
    }
}

#[test]
fn opaque_images_ignore_background() {
    let mut rgba = noise_pattern(20, 20);
    for px in rgba.chunks_exact_mut(4) {
        px[3] = 255;
    }
    for format in PixelFormat::ALL {
        let pack = |bg: Background| {
            PackConfig::new(format)
                .with_background(bg)
                .pack([Ok(Frame::new("o", &rgba[..], 20, 20))], Unstoppable)
                .unwrap()
        };
        assert_eq!(pack(Background::WHITE), pack(Background::BLACK), "{format}");
    }
}

#[test]
fn translucent_rgb_formats_ignore_background() {
    let rgba = checkerboard(16, 16);
    for format in [
        PixelFormat::Rgb666,
        PixelFormat::Rgb565,
        PixelFormat::Rgb444,
        PixelFormat::Rgb888,
    ] {
        let pack = |bg: Background| {
            PackConfig::new(format)
                .with_background(bg)
                .pack([Ok(Frame::new("t", &rgba[..], 16, 16))], Unstoppable)
                .unwrap()
        };
        assert_eq!(pack(Background::WHITE), pack(Background::BLACK), "{format}");
    }
    // ...while ARGB formats do blend.
    let pack = |bg: Background| {
        PackConfig::new(PixelFormat::Argb8888)
            .with_background(bg)
            .pack([Ok(Frame::new("t", &rgba[..], 16, 16))], Unstoppable)
            .unwrap()
    };
    assert_ne!(pack(Background::WHITE), pack(Background::BLACK));
}

#[test]
fn unpacked_rgb_pixels_re_encode_identically() {
    let rgba = noise_pattern(9, 9);
    for format in PixelFormat::ALL.into_iter().filter(|f| !f.composites()) {
        for order in ORDERS {
            let config = PackConfig::new(format).with_order(order);
            let blob = config
                .pack([Ok(Frame::new("n", &rgba[..], 9, 9))], Unstoppable)
                .unwrap();
            let images = unpack(&blob, &[(9, 9)], &config).unwrap();
            assert_eq!(images.len(), 1);
            assert_eq!(images[0].len(), 81);
            for (px, c) in images[0].iter().zip(rgba.chunks_exact(4)) {
                let src = RGBA8::new(c[0], c[1], c[2], c[3]);
                assert_eq!(
                    encode_pixel(src, format, order, Background::WHITE),
                    encode_pixel(*px, format, order, Background::WHITE),
                    "{format} {order}"
                );
            }
        }
    }
}
