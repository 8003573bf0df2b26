//! PNG chunk chain: signature, IHDR, optional PLTE, IDATs, IEND.

use std::io::Write;

use enough::Stop;

use crate::checksum::{Adler32, Crc32, crc32_of};
use crate::error::RasterError;
use crate::palette::Palette;
use crate::sample::SampleBuffer;
use crate::scale::{RowSampler, Scaling};

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Zero-length IEND chunk with its fixed CRC.
const IEND: [u8; 12] = [
    0x00, 0x00, 0x00, 0x00, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82,
];

/// CMF + FLG: 32K window, compressor default. Written once, before the
/// first DEFLATE block.
const ZLIB_HEADER: [u8; 2] = [0x78, 0x01];

/// A stored DEFLATE block's LEN field is 16 bits, which caps both the
/// block and (by the one-block-per-chunk design) each IDAT payload.
const STORED_BLOCK_MAX: usize = 65535;

const COLOUR_GREY: u8 = 0;
const COLOUR_RGB: u8 = 2;
const COLOUR_INDEXED: u8 = 3;

pub(crate) fn encode_png<W: Write>(
    buf: SampleBuffer<'_>,
    scaling: Scaling,
    row_major: bool,
    flip_y: bool,
    palette: Option<&Palette>,
    writer: &mut W,
    stop: &dyn Stop,
) -> Result<(), RasterError> {
    let colour_type = match palette {
        Some(pal) => {
            if buf.depth() != 1 {
                return Err(RasterError::InvalidPalette(
                    "palette output requires a single-plane buffer".into(),
                ));
            }
            pal.require_full("PNG")?;
            COLOUR_INDEXED
        }
        None if buf.depth() == 3 => COLOUR_RGB,
        None => COLOUR_GREY,
    };
    let output_max = match palette {
        Some(pal) => (pal.len() - 1) as f64,
        None => 255.0,
    };

    let sampler = RowSampler::new(buf, scaling, output_max, row_major, flip_y);
    let (width, height) = (sampler.width(), sampler.height());
    if width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(RasterError::DimensionsTooLarge {
            nrow: buf.nrow(),
            ncol: buf.ncol(),
        });
    }

    // Every scanline is one filter-type byte (0 = no filtering) plus its
    // pixel bytes, and must fit in a single stored block.
    let row_bytes = width
        .checked_mul(buf.depth())
        .and_then(|n| n.checked_add(1))
        .ok_or(RasterError::DimensionsTooLarge {
            nrow: buf.nrow(),
            ncol: buf.ncol(),
        })?;
    if row_bytes > STORED_BLOCK_MAX {
        return Err(RasterError::RowTooWide { row_bytes });
    }

    writer.write_all(&SIGNATURE)?;
    write_ihdr(writer, width as u32, height as u32, colour_type)?;
    if let Some(pal) = palette {
        write_plte(writer, pal)?;
    }

    // Batch as many whole scanlines per IDAT as the stored-block LEN
    // field allows; the remainder goes in a final shorter IDAT.
    let rows_per_idat = (STORED_BLOCK_MAX / row_bytes).min(height);
    let mut data = Vec::with_capacity(rows_per_idat * row_bytes);
    let mut adler = Adler32::new();
    let mut first = true;
    let mut buffered = 0;
    for row in 0..height {
        if row % 16 == 0 {
            stop.check()?;
        }
        data.push(0); // filter type: none
        if colour_type == COLOUR_RGB {
            sampler.push_rgb_row(row, &mut data);
        } else {
            sampler.push_scalar_row(row, &mut data);
        }
        buffered += 1;
        if buffered == rows_per_idat {
            write_idat(writer, &data, &mut adler, first, row + 1 == height)?;
            first = false;
            data.clear();
            buffered = 0;
        }
    }
    if buffered > 0 {
        write_idat(writer, &data, &mut adler, first, true)?;
    }

    writer.write_all(&IEND)?;
    Ok(())
}

/// 13-byte IHDR: dimensions big-endian, bit depth 8, compression/filter/
/// interlace 0.
fn write_ihdr<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    colour_type: u8,
) -> std::io::Result<()> {
    let mut chunk = [0u8; 17];
    chunk[..4].copy_from_slice(b"IHDR");
    chunk[4..8].copy_from_slice(&width.to_be_bytes());
    chunk[8..12].copy_from_slice(&height.to_be_bytes());
    chunk[12] = 8; // bit depth
    chunk[13] = colour_type;
    writer.write_all(&13u32.to_be_bytes())?;
    writer.write_all(&chunk)?;
    writer.write_all(&crc32_of(&chunk).to_be_bytes())
}

fn write_plte<W: Write>(writer: &mut W, palette: &Palette) -> std::io::Result<()> {
    let mut chunk = Vec::with_capacity(4 + 3 * palette.len());
    chunk.extend_from_slice(b"PLTE");
    for c in palette.entries() {
        chunk.extend_from_slice(&[c.r, c.g, c.b]);
    }
    writer.write_all(&((chunk.len() - 4) as u32).to_be_bytes())?;
    writer.write_all(&chunk)?;
    writer.write_all(&crc32_of(&chunk).to_be_bytes())
}

/// One IDAT chunk holding one stored DEFLATE block.
///
/// The chunk CRC covers the type plus everything between it and the CRC;
/// the Adler accumulator sees only the literal scanline bytes and is
/// emitted big-endian after the final block's data.
fn write_idat<W: Write>(
    writer: &mut W,
    data: &[u8],
    adler: &mut Adler32,
    first: bool,
    last: bool,
) -> std::io::Result<()> {
    let len = data.len() as u16;
    let mut deflate = [0u8; 5];
    deflate[0] = u8::from(last); // BFINAL, BTYPE 00 (stored)
    deflate[1..3].copy_from_slice(&len.to_le_bytes());
    deflate[3..5].copy_from_slice(&(!len).to_le_bytes());

    let chunk_len = 5 + data.len() + if first { 2 } else { 0 } + if last { 4 } else { 0 };
    writer.write_all(&(chunk_len as u32).to_be_bytes())?;

    let mut crc = Crc32::new();
    writer.write_all(b"IDAT")?;
    crc.update(b"IDAT");
    if first {
        writer.write_all(&ZLIB_HEADER)?;
        crc.update(&ZLIB_HEADER);
    }
    writer.write_all(&deflate)?;
    crc.update(&deflate);
    writer.write_all(data)?;
    crc.update(data);
    adler.update(data);
    if last {
        let trailer = adler.value().to_be_bytes();
        writer.write_all(&trailer)?;
        crc.update(&trailer);
    }
    writer.write_all(&crc.value().to_be_bytes())
}
