//! Behaviour tests: orientation, scaling, and input validation across the
//! four encoders.

use enough::Unstoppable;
use zenraster::*;

const PGM_HEADER: &[u8] = b"P5\n2 2\n255\n";

fn q(v: f64) -> u8 {
    (v * 255.0 + 0.5) as u8
}

fn ramp_palette(n: usize) -> Palette {
    Palette::new((0..n).map(|i| RGB8::new(i as u8, 0, 0)).collect()).unwrap()
}

fn pgm_pixels(bytes: &[u8]) -> &[u8] {
    let header_end = bytes
        .windows(4)
        .position(|w| w == b"255\n")
        .map(|p| p + 4)
        .unwrap();
    &bytes[header_end..]
}

// ── Orientation ──────────────────────────────────────────────────────

#[test]
fn row_major_walks_rows() {
    // [[a, b], [c, d]] stored column-major as [a, c, b, d]
    let samples = [0.1, 0.3, 0.2, 0.4];
    let buf = SampleBuffer::grey(&samples, 2, 2).unwrap();
    let out = EncodeRequest::pgm().encode_to_vec(&buf, Unstoppable).unwrap();
    assert_eq!(&out[..PGM_HEADER.len()], PGM_HEADER);
    assert_eq!(pgm_pixels(&out), [q(0.1), q(0.2), q(0.3), q(0.4)]);
}

#[test]
fn flip_y_reverses_row_order() {
    let samples = [0.1, 0.3, 0.2, 0.4];
    let buf = SampleBuffer::grey(&samples, 2, 2).unwrap();
    let out = EncodeRequest::pgm()
        .flip_y(true)
        .encode_to_vec(&buf, Unstoppable)
        .unwrap();
    assert_eq!(pgm_pixels(&out), [q(0.3), q(0.4), q(0.1), q(0.2)]);
}

#[test]
fn transposed_output_swaps_dimensions() {
    // 2x3 buffer: transposed output is 2 wide, 3 tall, and streams the
    // source buffer in storage order
    let samples = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
    let buf = SampleBuffer::grey(&samples, 2, 3).unwrap();

    let row_major = EncodeRequest::pgm().encode_to_vec(&buf, Unstoppable).unwrap();
    assert!(row_major.starts_with(b"P5\n3 2\n255\n"));

    let transposed = EncodeRequest::pgm()
        .row_major(false)
        .encode_to_vec(&buf, Unstoppable)
        .unwrap();
    assert!(transposed.starts_with(b"P5\n2 3\n255\n"));
    let expected: Vec<u8> = samples.iter().map(|&v| q(v)).collect();
    assert_eq!(pgm_pixels(&transposed), expected);
}

// ── Scaling ──────────────────────────────────────────────────────────

#[test]
fn zero_buffer_stays_zero() {
    let samples = [0.0; 4];
    let buf = SampleBuffer::grey(&samples, 2, 2).unwrap();
    let out = EncodeRequest::pgm().encode_to_vec(&buf, Unstoppable).unwrap();
    assert_eq!(pgm_pixels(&out), [0, 0, 0, 0]);
}

#[test]
fn auto_scale_reaches_channel_max() {
    // maximum sample 0.04: auto-scaling must still hit 255
    let samples = [0.0, 0.01, 0.02, 0.04];
    let buf = SampleBuffer::grey(&samples, 2, 2).unwrap();
    let out = EncodeRequest::pgm()
        .intensity_factor(0.0)
        .encode_to_vec(&buf, Unstoppable)
        .unwrap();
    assert_eq!(pgm_pixels(&out).iter().max(), Some(&255));
    assert_eq!(pgm_pixels(&out)[0], 0);
}

#[test]
fn auto_scale_gif_reaches_124() {
    let samples = [0.0, 1.0, 2.0, 5.0];
    let buf = SampleBuffer::grey(&samples, 2, 2).unwrap();
    let pal = ramp_palette(128);
    let out = EncodeRequest::gif()
        .with_palette(&pal)
        .intensity_factor(-1.0)
        .encode_to_vec(&buf, Unstoppable)
        .unwrap();
    // one sub-block of 2 index bytes per row, right after the descriptor
    let data_start = 13 + 128 * 3 + 11;
    let mut indices = Vec::new();
    for block in 0..2 {
        let at = data_start + block * 4;
        assert_eq!(out[at], 3, "length byte: CLEAR + 2 indices");
        assert_eq!(out[at + 1], 0x80);
        indices.extend_from_slice(&out[at + 2..at + 4]);
    }
    assert_eq!(indices.iter().max(), Some(&124));
}

#[test]
fn invert_complements_bytes() {
    let samples = [0.0, 0.25, 0.5, 1.0];
    let buf = SampleBuffer::grey(&samples, 2, 2).unwrap();
    let plain = EncodeRequest::pgm().encode_to_vec(&buf, Unstoppable).unwrap();
    let negative = EncodeRequest::pgm()
        .invert(true)
        .encode_to_vec(&buf, Unstoppable)
        .unwrap();
    let plain = pgm_pixels(&plain);
    let negative = pgm_pixels(&negative);
    for (p, n) in plain.iter().zip(negative) {
        assert_eq!(*n, 255 - p);
    }
}

#[test]
fn intensity_factor_multiplies() {
    let samples = [1.0; 4];
    let buf = SampleBuffer::grey(&samples, 2, 2).unwrap();
    let out = EncodeRequest::pgm()
        .intensity_factor(0.5)
        .encode_to_vec(&buf, Unstoppable)
        .unwrap();
    assert_eq!(pgm_pixels(&out), [128, 128, 128, 128]);
}

// ── Validation ───────────────────────────────────────────────────────

#[test]
fn third_dimension_must_be_three() {
    let samples = [0.0; 8];
    assert!(matches!(
        SampleBuffer::with_dims(&samples, &[2, 2, 2]),
        Err(RasterError::InvalidDimensions(_))
    ));
}

#[test]
fn format_buffer_shape_rules() {
    let grey = [0.0; 4];
    let rgb = [0.0; 12];
    let grey_buf = SampleBuffer::grey(&grey, 2, 2).unwrap();
    let rgb_buf = SampleBuffer::rgb(&rgb, 2, 2).unwrap();
    let pal = ramp_palette(256);

    // PPM without a palette needs three planes
    assert!(matches!(
        EncodeRequest::ppm().encode_to_vec(&grey_buf, Unstoppable),
        Err(RasterError::InvalidDimensions(_))
    ));
    // PGM is single-plane only and takes no palette
    assert!(matches!(
        EncodeRequest::pgm().encode_to_vec(&rgb_buf, Unstoppable),
        Err(RasterError::InvalidDimensions(_))
    ));
    assert!(matches!(
        EncodeRequest::pgm()
            .with_palette(&pal)
            .encode_to_vec(&grey_buf, Unstoppable),
        Err(RasterError::InvalidPalette(_))
    ));
    // GIF is greyscale/indexed only
    assert!(matches!(
        EncodeRequest::gif()
            .with_palette(&pal)
            .encode_to_vec(&rgb_buf, Unstoppable),
        Err(RasterError::InvalidDimensions(_))
    ));
    // palette output over an RGB buffer is a shape error
    assert!(matches!(
        EncodeRequest::ppm()
            .with_palette(&pal)
            .encode_to_vec(&rgb_buf, Unstoppable),
        Err(RasterError::InvalidPalette(_))
    ));
    assert!(matches!(
        EncodeRequest::png()
            .with_palette(&pal)
            .encode_to_vec(&rgb_buf, Unstoppable),
        Err(RasterError::InvalidPalette(_))
    ));
}

#[test]
fn palette_row_count_rules() {
    let grey = [0.0; 4];
    let buf = SampleBuffer::grey(&grey, 2, 2).unwrap();
    let short = ramp_palette(100);

    assert!(matches!(
        EncodeRequest::ppm()
            .with_palette(&short)
            .encode_to_vec(&buf, Unstoppable),
        Err(RasterError::InvalidPalette(_))
    ));
    assert!(matches!(
        EncodeRequest::png()
            .with_palette(&short)
            .encode_to_vec(&buf, Unstoppable),
        Err(RasterError::InvalidPalette(_))
    ));
    assert!(matches!(
        EncodeRequest::gif()
            .with_palette(&short)
            .encode_to_vec(&buf, Unstoppable),
        Err(RasterError::InvalidPalette(_))
    ));
    assert!(matches!(
        EncodeRequest::gif().encode_to_vec(&buf, Unstoppable),
        Err(RasterError::InvalidPalette(_))
    ));

    // GIF accepts both supported table sizes
    for n in [128, 256] {
        let pal = ramp_palette(n);
        EncodeRequest::gif()
            .with_palette(&pal)
            .encode_to_vec(&buf, Unstoppable)
            .unwrap();
    }
}

#[test]
fn errors_leave_no_output() {
    let grey = [0.0; 4];
    let buf = SampleBuffer::grey(&grey, 2, 2).unwrap();
    let short = ramp_palette(100);

    let mut sink = Vec::new();
    let result = EncodeRequest::ppm()
        .with_palette(&short)
        .encode(&buf, &mut sink, Unstoppable);
    assert!(result.is_err());
    assert!(sink.is_empty(), "shape errors must precede any write");
}

#[test]
fn write_to_path_creates_file() {
    let samples = [0.0, 0.5, 0.25, 1.0];
    let buf = SampleBuffer::grey(&samples, 2, 2).unwrap();
    let path = std::env::temp_dir().join("zenraster-write-test.pgm");
    EncodeRequest::pgm()
        .write_to_path(&buf, &path, Unstoppable)
        .unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P5\n2 2\n255\n"));
    std::fs::remove_file(&path).unwrap();
}
