//! PGM/PPM encoder: short ASCII header, then raw scaled bytes.

use std::io::Write;

use enough::Stop;

use crate::error::RasterError;
use crate::palette::Palette;
use crate::sample::SampleBuffer;
use crate::scale::{RowSampler, Scaling};

/// Rows buffered between sink writes. Caps peak memory without the syscall
/// overhead of writing row-by-row.
const BUFFER_ROWS: usize = 20;

/// Encode to P5: one scaled byte per pixel.
pub(crate) fn encode_pgm<W: Write>(
    buf: SampleBuffer<'_>,
    scaling: Scaling,
    row_major: bool,
    flip_y: bool,
    writer: &mut W,
    stop: &dyn Stop,
) -> Result<(), RasterError> {
    if buf.depth() != 1 {
        return Err(RasterError::InvalidDimensions(
            "PGM output requires a single-plane buffer".into(),
        ));
    }
    let sampler = RowSampler::new(buf, scaling, 255.0, row_major, flip_y);
    write_header(writer, "P5", &sampler)?;
    write_rows(writer, &sampler, 1, stop, |row, out| {
        sampler.push_scalar_row(row, out);
    })
}

/// Encode to P6: interleaved RGB triples, either from a three-plane buffer
/// or from a single-plane buffer mapped through a 256-entry palette.
pub(crate) fn encode_ppm<W: Write>(
    buf: SampleBuffer<'_>,
    scaling: Scaling,
    row_major: bool,
    flip_y: bool,
    palette: Option<&Palette>,
    writer: &mut W,
    stop: &dyn Stop,
) -> Result<(), RasterError> {
    match (buf.depth(), palette) {
        (3, None) => {
            let sampler = RowSampler::new(buf, scaling, 255.0, row_major, flip_y);
            write_header(writer, "P6", &sampler)?;
            write_rows(writer, &sampler, 3, stop, |row, out| {
                sampler.push_rgb_row(row, out);
            })
        }
        (1, Some(pal)) => {
            pal.require_full("PPM")?;
            let sampler = RowSampler::new(buf, scaling, 255.0, row_major, flip_y);
            write_header(writer, "P6", &sampler)?;
            write_rows(writer, &sampler, 3, stop, |row, out| {
                sampler.push_palette_row(row, pal, out);
            })
        }
        (_, Some(_)) => Err(RasterError::InvalidPalette(
            "palette output requires a single-plane buffer".into(),
        )),
        (_, None) => Err(RasterError::InvalidDimensions(
            "PPM output requires a 3-plane buffer (or a palette)".into(),
        )),
    }
}

fn write_header<W: Write>(
    writer: &mut W,
    magic: &str,
    sampler: &RowSampler<'_>,
) -> Result<(), RasterError> {
    let (w, h) = (sampler.width(), sampler.height());
    writer.write_all(format!("{magic}\n{w} {h}\n255\n").as_bytes())?;
    Ok(())
}

/// Run `fill` for every output row, flushing to the sink every
/// [`BUFFER_ROWS`] rows and once more at the end.
fn write_rows<W: Write>(
    writer: &mut W,
    sampler: &RowSampler<'_>,
    bytes_per_pixel: usize,
    stop: &dyn Stop,
    mut fill: impl FnMut(usize, &mut Vec<u8>),
) -> Result<(), RasterError> {
    let height = sampler.height();
    let row_bytes = sampler.width() * bytes_per_pixel;
    let mut rows = Vec::with_capacity(BUFFER_ROWS.min(height) * row_bytes);
    for row in 0..height {
        if row % 16 == 0 {
            stop.check()?;
        }
        fill(row, &mut rows);
        if (row + 1) % BUFFER_ROWS == 0 {
            writer.write_all(&rows)?;
            rows.clear();
        }
    }
    writer.write_all(&rows)?;
    Ok(())
}
