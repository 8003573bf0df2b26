//! # zenraster
//!
//! Fast writer for numeric raster buffers: PGM, PPM, GIF and PNG output
//! with no compression and no image-library dependencies.
//!
//! ## Why uncompressed
//!
//! Each format is implemented down to the minimal subset that yields valid
//! files: PNM needs only an ASCII header, GIF is written with the
//! CLEAR-code trick that keeps the LZW decoder in literal mode, and PNG
//! uses stored (raw) DEFLATE blocks with real CRC-32/Adler-32 checksums.
//! Skipping compression keeps the writer allocation-bounded and fast
//! regardless of image size: memory use is capped by a small row buffer,
//! never the full image.
//!
//! ## Input model
//!
//! Input is a flat `&[f64]` sample buffer in column-major layout (the
//! layout used by matrix-oriented hosts), one plane for greyscale or three
//! planes for RGB, wrapped in a [`SampleBuffer`] with explicit dimensions.
//! Samples are nominally in `[0, 1]`; intensity scaling, inversion,
//! transposition and vertical flipping are applied during encoding.
//!
//! ## Non-goals
//!
//! - Decoding (write-only)
//! - Real LZ/Huffman compression
//! - Colour-space conversion beyond linear scaling
//!
//! ## Usage
//!
//! ```
//! use zenraster::{EncodeRequest, SampleBuffer, Unstoppable};
//!
//! let samples: Vec<f64> = (0..12).map(|i| i as f64 / 11.0).collect();
//! let buf = SampleBuffer::grey(&samples, 3, 4)?;
//!
//! let png = EncodeRequest::png().encode_to_vec(&buf, Unstoppable)?;
//! assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
//!
//! let pgm = EncodeRequest::pgm()
//!     .flip_y(true)
//!     .encode_to_vec(&buf, Unstoppable)?;
//! assert!(pgm.starts_with(b"P5\n4 3\n255\n"));
//! # Ok::<(), zenraster::RasterError>(())
//! ```

#![forbid(unsafe_code)]

mod encode;
mod error;
mod palette;
mod sample;
mod scale;

pub mod checksum;

mod gif;
mod pnm;
mod png;

// Re-exports
pub use encode::{EncodeRequest, OutputFormat};
pub use enough::{Stop, Unstoppable};
pub use error::RasterError;
pub use palette::Palette;
pub use rgb::RGB8;
pub use sample::SampleBuffer;
pub use scale::Scaling;
