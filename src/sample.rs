//! Flat numeric sample buffers and their index mapping.
//!
//! Samples are stored column-major, the layout used by matrix hosts:
//! `index = row + col * nrow`, with each additional plane offset by
//! `nrow * ncol`. All layout arithmetic lives here so the encoders never
//! touch raw indices.

use crate::error::RasterError;

/// Borrowed buffer of floating-point samples for one encode call.
///
/// `depth` is 1 for greyscale/indexed data and 3 for RGB, where the three
/// channels are separate planes (not interleaved).
#[derive(Clone, Copy, Debug)]
pub struct SampleBuffer<'a> {
    samples: &'a [f64],
    nrow: usize,
    ncol: usize,
    depth: usize,
}

impl<'a> SampleBuffer<'a> {
    /// Single-plane greyscale (or palette-index) buffer.
    pub fn grey(samples: &'a [f64], nrow: usize, ncol: usize) -> Result<Self, RasterError> {
        Self::checked(samples, nrow, ncol, 1)
    }

    /// Three-plane RGB buffer: planes at offsets 0, `nrow*ncol` and
    /// `2*nrow*ncol`.
    pub fn rgb(samples: &'a [f64], nrow: usize, ncol: usize) -> Result<Self, RasterError> {
        Self::checked(samples, nrow, ncol, 3)
    }

    /// Construct from a dims vector: `[nrow, ncol]` for greyscale or
    /// `[nrow, ncol, 3]` for RGB. Any other shape is rejected.
    pub fn with_dims(samples: &'a [f64], dims: &[usize]) -> Result<Self, RasterError> {
        match dims {
            &[nrow, ncol] => Self::grey(samples, nrow, ncol),
            &[nrow, ncol, 3] => Self::rgb(samples, nrow, ncol),
            &[_, _, depth] => Err(RasterError::InvalidDimensions(format!(
                "third dimension must be 3 for RGB, got {depth}"
            ))),
            _ => Err(RasterError::InvalidDimensions(format!(
                "dims must have length 2 or 3, got {}",
                dims.len()
            ))),
        }
    }

    fn checked(
        samples: &'a [f64],
        nrow: usize,
        ncol: usize,
        depth: usize,
    ) -> Result<Self, RasterError> {
        if nrow == 0 || ncol == 0 {
            return Err(RasterError::InvalidDimensions(format!(
                "image dimensions must be nonzero, got {nrow}x{ncol}"
            )));
        }
        let needed = nrow
            .checked_mul(ncol)
            .and_then(|n| n.checked_mul(depth))
            .ok_or(RasterError::DimensionsTooLarge { nrow, ncol })?;
        if samples.len() < needed {
            return Err(RasterError::BufferTooSmall {
                needed,
                actual: samples.len(),
            });
        }
        Ok(SampleBuffer {
            samples,
            nrow,
            ncol,
            depth,
        })
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /// Number of planes: 1 (grey/indexed) or 3 (RGB).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn samples(&self) -> &'a [f64] {
        self.samples
    }

    /// Maximum sample across all planes, for auto-scaling. A buffer whose
    /// maximum is 0 reports 1 so the derived scale stays finite.
    pub(crate) fn max_sample(&self) -> f64 {
        let used = self.nrow * self.ncol * self.depth;
        let max = self.samples[..used]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if max == 0.0 { 1.0 } else { max }
    }

    /// Logical index of the sample at `(row, col)` in `plane`.
    #[inline]
    pub(crate) fn index(&self, row: usize, col: usize, plane: usize) -> usize {
        row + col * self.nrow + plane * self.nrow * self.ncol
    }

    /// Logical index of `(row, col)` in the transposed ("fast") output
    /// orientation, where output rows are contiguous source columns.
    #[inline]
    pub(crate) fn index_transposed(&self, row: usize, col: usize, plane: usize) -> usize {
        row * self.nrow + col + plane * self.nrow * self.ncol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dims_vector_shapes() {
        let samples = [0.0; 24];
        assert!(SampleBuffer::with_dims(&samples, &[4, 6]).is_ok());
        assert!(SampleBuffer::with_dims(&samples, &[2, 4, 3]).is_ok());
        assert!(matches!(
            SampleBuffer::with_dims(&samples, &[4, 6, 2]),
            Err(RasterError::InvalidDimensions(_))
        ));
        assert!(matches!(
            SampleBuffer::with_dims(&samples, &[4]),
            Err(RasterError::InvalidDimensions(_))
        ));
        assert!(matches!(
            SampleBuffer::with_dims(&samples, &[1, 2, 3, 4]),
            Err(RasterError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn rejects_short_and_empty_buffers() {
        let samples = [0.0; 5];
        assert!(matches!(
            SampleBuffer::grey(&samples, 2, 3),
            Err(RasterError::BufferTooSmall {
                needed: 6,
                actual: 5
            })
        ));
        assert!(matches!(
            SampleBuffer::grey(&samples, 0, 3),
            Err(RasterError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn column_major_index_mapping() {
        // 2x3 matrix stored column-major: [a c | b d | e f] per column
        let samples = [0.0; 18];
        let buf = SampleBuffer::rgb(&samples, 2, 3).unwrap();
        assert_eq!(buf.index(0, 0, 0), 0);
        assert_eq!(buf.index(1, 0, 0), 1);
        assert_eq!(buf.index(0, 1, 0), 2);
        assert_eq!(buf.index(1, 2, 0), 5);
        // planes stride by nrow*ncol
        assert_eq!(buf.index(0, 0, 1), 6);
        assert_eq!(buf.index(1, 2, 2), 17);
        // transposed: output row r is source column r
        assert_eq!(buf.index_transposed(0, 0, 0), 0);
        assert_eq!(buf.index_transposed(0, 1, 0), 1);
        assert_eq!(buf.index_transposed(1, 0, 0), 2);
        assert_eq!(buf.index_transposed(2, 1, 1), 11);
    }

    #[test]
    fn max_sample_guards_degenerate_buffers() {
        let zeros = [0.0; 4];
        assert_eq!(SampleBuffer::grey(&zeros, 2, 2).unwrap().max_sample(), 1.0);
        let mixed = [0.25, 0.5, 2.0, 0.0];
        assert_eq!(SampleBuffer::grey(&mixed, 2, 2).unwrap().max_sample(), 2.0);
    }
}
