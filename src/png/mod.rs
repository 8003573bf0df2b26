//! PNG writer emitting a stored-only zlib/DEFLATE stream.
//!
//! Each IDAT chunk carries exactly one raw (uncompressed) DEFLATE block,
//! so IDAT boundaries and DEFLATE block boundaries coincide and no
//! compressor state spans chunks. The first IDAT prepends the zlib header;
//! the last appends the Adler-32 of the whole scanline stream.

mod encode;

pub(crate) use encode::encode_png;
