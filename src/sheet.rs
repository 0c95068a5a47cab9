use std::io::Cursor;

use image::{ImageFormat, ImageReader, RgbaImage};

use crate::error::{AnimError, AnimResult};

/// Decoded sprite sheet: a vertical strip of square tiles, always RGBA8.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    /// Straight-alpha RGBA8, row-major. Alpha is added when the source has none.
    pub rgba: RgbaImage,
}

impl SpriteSheet {
    /// Decode PNG bytes, forcing four channels.
    pub fn decode(bytes: &[u8]) -> AnimResult<Self> {
        let mut reader = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png);
        // Tall sheets routinely exceed the default allocation limits.
        reader.no_limits();
        let rgba = reader
            .decode()
            .map_err(|e| AnimError::decode(format!("failed to decode sprite sheet: {e}")))?
            .into_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn tile_count(&self) -> AnimResult<u32> {
        tile_count(self.width, self.height)
    }
}

/// Read the sheet dimensions from the PNG header without decoding pixels.
pub fn probe_dimensions(bytes: &[u8]) -> AnimResult<(u32, u32)> {
    let mut reader = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png);
    reader.no_limits();
    reader
        .into_dimensions()
        .map_err(|e| AnimError::decode(format!("failed to read sprite sheet header: {e}")))
}

/// Number of square tiles stacked in a `width` x `height` sheet.
///
/// A zero-height sheet yields zero tiles here; the slicer rejects that.
pub fn tile_count(width: u32, height: u32) -> AnimResult<u32> {
    if width == 0 || !height.is_multiple_of(width) {
        return Err(AnimError::Geometry { width, height });
    }
    Ok(height / width)
}
