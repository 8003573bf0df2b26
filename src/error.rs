use enough::StopReason;

/// Errors from raster encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RasterError {
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("sample buffer too small: need {needed} samples, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("dimensions too large: {nrow}x{ncol}")]
    DimensionsTooLarge { nrow: usize, ncol: usize },

    #[error("scanline of {row_bytes} bytes exceeds the 65535-byte stored-block limit")]
    RowTooWide { row_bytes: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for RasterError {
    fn from(r: StopReason) -> Self {
        RasterError::Cancelled(r)
    }
}
