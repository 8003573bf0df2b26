//! PNM writers: P5 (PGM binary greyscale) and P6 (PPM binary RGB), plus
//! the palette-expanded P6 path for indexed greyscale data.

mod encode;

pub(crate) use encode::{encode_pgm, encode_ppm};
