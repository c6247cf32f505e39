#![no_main]
use libfuzzer_sys::fuzz_target;
use zenfbpack::*;

fuzz_target!(|data: &[u8]| {
    // Arbitrary blobs and dimensions must never panic
    let [f, o, w, h, blob @ ..] = data else {
        return;
    };
    let format = PixelFormat::ALL[*f as usize % PixelFormat::ALL.len()];
    let order = if o & 1 == 0 {
        ByteOrder::LittleEndian
    } else {
        ByteOrder::BigEndian
    };
    let config = PackConfig::new(format).with_order(order);
    let dims = [(u32::from(*w), u32::from(*h)); 2];
    let _ = unpack(blob, &dims, &config);
    let _ = decode_pixel(blob, format, order);
});
