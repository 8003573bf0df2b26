//! Shared pixel sampling: one scale factor and rounding offset derived per
//! encode call, one traversal order for every format.
//!
//! The encoders only ever ask for whole output rows; orientation (transpose,
//! vertical flip) and intensity scaling are applied here.

use crate::palette::Palette;
use crate::sample::SampleBuffer;

/// Intensity scaling options, shared by all encoders.
#[derive(Clone, Copy, Debug)]
pub struct Scaling {
    /// Multiplier applied to all samples. Values <= 0 request auto-scaling:
    /// the buffer maximum maps to the full output range.
    pub intensity_factor: f64,
    /// Negate brightness, as if the image were a photographic negative.
    pub invert: bool,
}

impl Default for Scaling {
    fn default() -> Self {
        Scaling {
            intensity_factor: 1.0,
            invert: false,
        }
    }
}

/// Quantize a sample to one output byte.
///
/// Truncates with wrapping (not saturating) semantics: the inverted path
/// relies on `-1.5` plus a negated scale landing in `[-256, -1]` and
/// wrapping to the complemented byte, so the cast must go through a wide
/// signed integer rather than `as u8` directly.
#[inline]
fn quantize(v: f64, scale: f64, offset: f64) -> u8 {
    (v * scale + offset) as i64 as u8
}

/// Row-at-a-time sampler over a [`SampleBuffer`].
///
/// Output geometry: with `row_major` the image is `nrow` rows of `ncol`
/// pixels; without it the transpose, where each output row is a contiguous
/// source column.
pub(crate) struct RowSampler<'a> {
    buf: SampleBuffer<'a>,
    scale: f64,
    offset: f64,
    row_major: bool,
    flip_y: bool,
}

impl<'a> RowSampler<'a> {
    pub(crate) fn new(
        buf: SampleBuffer<'a>,
        scaling: Scaling,
        output_max: f64,
        row_major: bool,
        flip_y: bool,
    ) -> Self {
        let mut scale = output_max;
        if scaling.intensity_factor <= 0.0 {
            scale /= buf.max_sample();
        } else {
            scale *= scaling.intensity_factor;
        }
        let mut offset = 0.5;
        if scaling.invert {
            offset = -1.5;
            scale = -scale;
        }
        RowSampler {
            buf,
            scale,
            offset,
            row_major,
            flip_y,
        }
    }

    pub(crate) fn width(&self) -> usize {
        if self.row_major {
            self.buf.ncol()
        } else {
            self.buf.nrow()
        }
    }

    pub(crate) fn height(&self) -> usize {
        if self.row_major {
            self.buf.nrow()
        } else {
            self.buf.ncol()
        }
    }

    fn src_row(&self, row: usize) -> usize {
        if self.flip_y {
            self.height() - 1 - row
        } else {
            row
        }
    }

    #[inline]
    fn sample(&self, src_row: usize, col: usize, plane: usize) -> u8 {
        let idx = if self.row_major {
            self.buf.index(src_row, col, plane)
        } else {
            self.buf.index_transposed(src_row, col, plane)
        };
        quantize(self.buf.samples()[idx], self.scale, self.offset)
    }

    /// Append output row `row` as single bytes (greyscale or palette index).
    pub(crate) fn push_scalar_row(&self, row: usize, out: &mut Vec<u8>) {
        let src = self.src_row(row);
        for col in 0..self.width() {
            out.push(self.sample(src, col, 0));
        }
    }

    /// Append output row `row` as interleaved R,G,B triples from the three
    /// sample planes.
    pub(crate) fn push_rgb_row(&self, row: usize, out: &mut Vec<u8>) {
        let src = self.src_row(row);
        for col in 0..self.width() {
            out.push(self.sample(src, col, 0));
            out.push(self.sample(src, col, 1));
            out.push(self.sample(src, col, 2));
        }
    }

    /// Append output row `row` with each scaled byte expanded to an RGB
    /// triple through `palette`. The palette must cover the full byte range
    /// (validated by the caller).
    pub(crate) fn push_palette_row(&self, row: usize, palette: &Palette, out: &mut Vec<u8>) {
        let entries = palette.entries();
        let src = self.src_row(row);
        for col in 0..self.width() {
            let c = entries[self.sample(src, col, 0) as usize];
            out.push(c.r);
            out.push(c.g);
            out.push(c.b);
        }
    }
}
