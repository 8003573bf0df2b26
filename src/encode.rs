use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use enough::Stop;

use crate::error::RasterError;
use crate::palette::Palette;
use crate::sample::SampleBuffer;
use crate::scale::Scaling;
use crate::{gif, pnm, png};

/// Output image format.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// P5 — binary greyscale (PGM).
    Pgm,
    /// P6 — binary RGB (PPM), directly or through a 256-entry palette.
    Ppm,
    /// GIF89a with uncompressed LZW data and a 128-colour global table.
    Gif,
    /// PNG with a stored-only DEFLATE stream (colour type 0, 2 or 3).
    Png,
}

/// Builder describing one encode operation.
///
/// Defaults: row-major output, no flip, no inversion, intensity factor
/// 1.0, no palette.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest<'p> {
    format: OutputFormat,
    row_major: bool,
    flip_y: bool,
    scaling: Scaling,
    palette: Option<&'p Palette>,
}

impl<'p> EncodeRequest<'p> {
    pub fn new(format: OutputFormat) -> Self {
        EncodeRequest {
            format,
            row_major: true,
            flip_y: false,
            scaling: Scaling::default(),
            palette: None,
        }
    }

    pub fn pgm() -> Self {
        Self::new(OutputFormat::Pgm)
    }

    pub fn ppm() -> Self {
        Self::new(OutputFormat::Ppm)
    }

    pub fn gif() -> Self {
        Self::new(OutputFormat::Gif)
    }

    pub fn png() -> Self {
        Self::new(OutputFormat::Png)
    }

    /// Emit rows in row-major order (the default). With `false` the image
    /// is written transposed, which streams the column-major source buffer
    /// sequentially and is the faster path for large images.
    pub fn row_major(mut self, row_major: bool) -> Self {
        self.row_major = row_major;
        self
    }

    /// Reverse the row traversal so index `[0, 0]` lands at the bottom-left
    /// of the image instead of the top-left.
    pub fn flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    /// Negate pixel brightness, as a photographic negative.
    pub fn invert(mut self, invert: bool) -> Self {
        self.scaling.invert = invert;
        self
    }

    /// Multiplier applied to all samples; values `<= 0` auto-scale so the
    /// buffer maximum maps to the full output range.
    pub fn intensity_factor(mut self, factor: f64) -> Self {
        self.scaling.intensity_factor = factor;
        self
    }

    /// Colour lookup table for indexed output. Required for GIF; optional
    /// for PPM (exactly 256 rows) and PNG (2–256 rows, colour type 3).
    pub fn with_palette(mut self, palette: &'p Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Encode `buf` into `writer`. Shape validation happens before the
    /// first byte is written; once validation passes the only remaining
    /// failure modes are sink I/O errors and cancellation.
    pub fn encode<W: Write>(
        &self,
        buf: &SampleBuffer<'_>,
        writer: &mut W,
        stop: impl Stop,
    ) -> Result<(), RasterError> {
        let stop: &dyn Stop = &stop;
        match self.format {
            OutputFormat::Pgm => {
                if self.palette.is_some() {
                    return Err(RasterError::InvalidPalette(
                        "PGM output does not take a palette".into(),
                    ));
                }
                pnm::encode_pgm(*buf, self.scaling, self.row_major, self.flip_y, writer, stop)
            }
            OutputFormat::Ppm => pnm::encode_ppm(
                *buf,
                self.scaling,
                self.row_major,
                self.flip_y,
                self.palette,
                writer,
                stop,
            ),
            OutputFormat::Gif => gif::encode_gif(
                *buf,
                self.scaling,
                self.row_major,
                self.flip_y,
                self.palette,
                writer,
                stop,
            ),
            OutputFormat::Png => png::encode_png(
                *buf,
                self.scaling,
                self.row_major,
                self.flip_y,
                self.palette,
                writer,
                stop,
            ),
        }
    }

    /// Encode into a fresh byte vector.
    pub fn encode_to_vec(
        &self,
        buf: &SampleBuffer<'_>,
        stop: impl Stop,
    ) -> Result<Vec<u8>, RasterError> {
        let mut out = Vec::new();
        self.encode(buf, &mut out, stop)?;
        Ok(out)
    }

    /// Create `path` and stream the encoded image into it through a
    /// buffered writer, flushing before return.
    pub fn write_to_path(
        &self,
        buf: &SampleBuffer<'_>,
        path: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<(), RasterError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.encode(buf, &mut writer, stop)?;
        writer.flush()?;
        Ok(())
    }
}
