#![no_main]
use libfuzzer_sys::fuzz_target;
use zenfbpack::*;

fuzz_target!(|data: &[u8]| {
    // Header: format, byte order, background r/g/b, width, height
    let [f, o, r, g, b, w, h, pixels @ ..] = data else {
        return;
    };
    let format = PixelFormat::ALL[*f as usize % PixelFormat::ALL.len()];
    let order = if o & 1 == 0 {
        ByteOrder::LittleEndian
    } else {
        ByteOrder::BigEndian
    };
    let (w, h) = (u32::from(*w % 64), u32::from(*h % 64));
    let config = PackConfig::new(format)
        .with_order(order)
        .with_background(Background::new(*r, *g, *b));

    // Short buffers must fail cleanly, never panic
    let Ok(blob) = config.pack([Ok(Frame::new("fuzz", pixels, w, h))], enough::Unstoppable) else {
        assert!(pixels.len() < (w * h * 4) as usize);
        return;
    };

    let pixel_bytes = (w * h) as usize * format.bytes_per_pixel();
    assert_eq!(blob.len(), block_len(pixel_bytes));
    assert!(blob[pixel_bytes..].iter().all(|&b| b == 0));

    let images = unpack(&blob, &[(w, h)], &config).expect("own output must unpack");
    assert_eq!(images[0].len(), (w * h) as usize);
});
