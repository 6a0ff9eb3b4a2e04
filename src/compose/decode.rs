use anyhow::Context;

use crate::foundation::error::{MolduraError, MolduraResult};

/// Decoded raster bitmap in straight-alpha RGBA8 form.
#[derive(Debug, Clone)]
pub struct DecodedBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Decoded pixels.
    pub rgba: image::RgbaImage,
}

/// Decode encoded image bytes into an RGBA8 bitmap.
///
/// Zero-dimension results are rejected: a bitmap only counts as decode-ready
/// once its natural dimensions are known and nonzero.
pub fn decode_bitmap(bytes: &[u8]) -> MolduraResult<DecodedBitmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(MolduraError::invalid_input(
            "decoded image has zero dimensions",
        ));
    }

    Ok(DecodedBitmap {
        width,
        height,
        rgba,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/decode.rs"]
mod tests;
