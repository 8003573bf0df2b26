//! GIF container: header, logical screen descriptor, 128-entry global
//! colour table, one image descriptor, uncompressed data sub-blocks.

use std::io::Write;

use enough::Stop;

use crate::error::RasterError;
use crate::palette::Palette;
use crate::sample::SampleBuffer;
use crate::scale::{RowSampler, Scaling};

/// Rows buffered between sink writes.
const BUFFER_ROWS: usize = 20;

/// Data bytes per sub-block. With a 7-bit minimum code size, at most 126
/// literals may follow a CLEAR code before the decoder would grow its code
/// width; 120 stays comfortably under that ceiling.
const SUB_BLOCK_DATA: usize = 120;

/// LZW CLEAR code for a 7-bit code size: resets the decoder dictionary.
const CLEAR: u8 = 0x80;

/// Length-1 sub-block holding the STOP code (0x81), then the block
/// terminator.
const END_OF_DATA: [u8; 3] = [0x01, 0x81, 0x00];

const TRAILER: u8 = 0x3B;

/// Indices scale to [0, 124]: three below the 7-bit code space, keeping
/// every pixel byte clear of the CLEAR/STOP codes.
const OUTPUT_MAX: f64 = 127.0 - 3.0;

pub(crate) fn encode_gif<W: Write>(
    buf: SampleBuffer<'_>,
    scaling: Scaling,
    row_major: bool,
    flip_y: bool,
    palette: Option<&Palette>,
    writer: &mut W,
    stop: &dyn Stop,
) -> Result<(), RasterError> {
    if buf.depth() != 1 {
        return Err(RasterError::InvalidDimensions(
            "GIF output requires a single-plane buffer".into(),
        ));
    }
    let table = palette
        .ok_or_else(|| RasterError::InvalidPalette("GIF output requires a palette".into()))?
        .gif_table()?;

    let sampler = RowSampler::new(buf, scaling, OUTPUT_MAX, row_major, flip_y);
    let (width, height) = (sampler.width(), sampler.height());
    if width > usize::from(u16::MAX) || height > usize::from(u16::MAX) {
        return Err(RasterError::DimensionsTooLarge {
            nrow: buf.nrow(),
            ncol: buf.ncol(),
        });
    }

    // Header + logical screen descriptor + global colour table
    let mut head = Vec::with_capacity(13 + 3 * table.len());
    head.extend_from_slice(b"GIF89a");
    head.extend_from_slice(&(width as u16).to_le_bytes());
    head.extend_from_slice(&(height as u16).to_le_bytes());
    head.push(0xF6); // global colour table present, 2^7 entries
    head.push(0x00); // background colour index
    head.push(0x00); // pixel aspect ratio
    for c in &table {
        head.extend_from_slice(&[c.r, c.g, c.b]);
    }
    writer.write_all(&head)?;

    // Image descriptor: full-screen image at (0, 0), no local colour
    // table, LZW minimum code size 7
    let mut descriptor = [0u8; 11];
    descriptor[0] = 0x2C;
    descriptor[5..7].copy_from_slice(&(width as u16).to_le_bytes());
    descriptor[7..9].copy_from_slice(&(height as u16).to_le_bytes());
    descriptor[10] = 0x07;
    writer.write_all(&descriptor)?;

    // Image data: each row split into length-prefixed sub-blocks, every
    // sub-block opening with a CLEAR code
    let mut row = Vec::with_capacity(width);
    let mut out = Vec::new();
    for r in 0..height {
        if r % 16 == 0 {
            stop.check()?;
        }
        row.clear();
        sampler.push_scalar_row(r, &mut row);
        for chunk in row.chunks(SUB_BLOCK_DATA) {
            out.push((chunk.len() + 1) as u8);
            out.push(CLEAR);
            out.extend_from_slice(chunk);
        }
        if (r + 1) % BUFFER_ROWS == 0 {
            writer.write_all(&out)?;
            out.clear();
        }
    }

    out.extend_from_slice(&END_OF_DATA);
    out.push(TRAILER);
    writer.write_all(&out)?;
    Ok(())
}
