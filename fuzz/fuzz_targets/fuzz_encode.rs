#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::*;

fuzz_target!(|data: &[u8]| {
    // Fuzz the encode configuration space: dims, orientation flags,
    // intensity, palette shape and format all come from the input.
    if data.len() < 8 {
        return;
    }
    let nrow = 1 + (data[0] as usize % 32);
    let ncol = 1 + (data[1] as usize % 32);
    let flags = data[2];
    let format = data[3] % 4;
    let pal_rows = match data[4] % 4 {
        0 => 100,
        1 => 128,
        2 => 256,
        _ => 1,
    };
    let intensity = f64::from(data[5] as i8) / 16.0;

    let rgb_planes = flags & 0b1000 != 0;
    let depth = if rgb_planes { 3 } else { 1 };
    let samples: Vec<f64> = data[6..]
        .iter()
        .cycle()
        .take(nrow * ncol * depth)
        .map(|&b| f64::from(b) / 255.0)
        .collect();
    let buf = if rgb_planes {
        SampleBuffer::rgb(&samples, nrow, ncol)
    } else {
        SampleBuffer::grey(&samples, nrow, ncol)
    };
    let Ok(buf) = buf else { return };

    let palette = Palette::new((0..pal_rows).map(|i| RGB8::new(i as u8, 0, 0)).collect()).ok();

    let mut request = match format {
        0 => EncodeRequest::pgm(),
        1 => EncodeRequest::ppm(),
        2 => EncodeRequest::gif(),
        _ => EncodeRequest::png(),
    }
    .row_major(flags & 0b0001 == 0)
    .flip_y(flags & 0b0010 != 0)
    .invert(flags & 0b0100 != 0)
    .intensity_factor(intensity);
    if let Some(pal) = palette.as_ref() {
        if flags & 0b1_0000 != 0 {
            request = request.with_palette(pal);
        }
    }

    // Shape errors are expected outcomes; panics and malformed magic are not.
    match request.encode_to_vec(&buf, enough::Unstoppable) {
        Ok(bytes) => {
            let magic_ok = match format {
                0 => bytes.starts_with(b"P5"),
                1 => bytes.starts_with(b"P6"),
                2 => bytes.starts_with(b"GIF89a"),
                _ => bytes.starts_with(&[0x89, b'P', b'N', b'G']),
            };
            assert!(magic_ok, "wrong magic for format {format}");
        }
        Err(_) => {}
    }
});
