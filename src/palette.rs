//! Caller-supplied colour lookup tables.

use rgb::RGB8;

use crate::error::RasterError;

/// An ordered RGB lookup table mapping scaled index bytes to colours.
///
/// Construction only bounds the entry count to the byte-indexable range;
/// each encoder applies its own stricter shape rule (256 rows for the
/// PNM/PNG indexed paths, 128 or 256 for GIF).
#[derive(Clone, Debug)]
pub struct Palette {
    entries: Vec<RGB8>,
}

impl Palette {
    pub fn new(entries: Vec<RGB8>) -> Result<Self, RasterError> {
        if entries.is_empty() || entries.len() > 256 {
            return Err(RasterError::InvalidPalette(format!(
                "palette must have 1 to 256 entries, got {}",
                entries.len()
            )));
        }
        Ok(Palette { entries })
    }

    /// Build from `[r, g, b]` rows with values already in `[0, 255]`.
    pub fn from_rows(rows: &[[u8; 3]]) -> Result<Self, RasterError> {
        Self::new(
            rows.iter()
                .map(|&[r, g, b]| RGB8::new(r, g, b))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RGB8] {
        &self.entries
    }

    /// The PNM palette path maps arbitrary index bytes through the table
    /// and the PNG indexed path scales against a fixed 256-colour range,
    /// so both require the table to cover the whole byte range.
    pub(crate) fn require_full(&self, what: &str) -> Result<(), RasterError> {
        if self.entries.len() != 256 {
            return Err(RasterError::InvalidPalette(format!(
                "{what} palette must have exactly 256 rows, got {}",
                self.entries.len()
            )));
        }
        Ok(())
    }

    /// The 128-entry GIF global colour table: a 128-row palette is used
    /// as-is, a 256-row palette is downsampled by taking every second row.
    pub(crate) fn gif_table(&self) -> Result<Vec<RGB8>, RasterError> {
        let step = match self.entries.len() {
            128 => 1,
            256 => 2,
            n => {
                return Err(RasterError::InvalidPalette(format!(
                    "GIF palette must have 128 or 256 rows, got {n}"
                )));
            }
        };
        Ok(self.entries.iter().step_by(step).copied().collect())
    }
}
