//! Streaming checksums used by the PNG container: CRC-32 per chunk and
//! Adler-32 over the zlib stream.
//!
//! Public so that callers (and this crate's own conformance tests) can
//! revalidate written output without a second implementation.

mod adler32;
mod crc32;

pub use adler32::Adler32;
pub use crc32::{Crc32, crc32_of};
