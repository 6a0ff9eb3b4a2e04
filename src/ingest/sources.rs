use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{MolduraError, MolduraResult};
use crate::ingest::payload::{ImagePayload, media_type_for_path};

/// Read a payload from a file on disk, declaring its type from the extension.
pub fn payload_from_file(path: &Path) -> MolduraResult<ImagePayload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))?;
    Ok(ImagePayload::new(media_type_for_path(path), bytes))
}

/// Read a payload from an arbitrary reader (stdin) with a caller-declared type.
pub fn payload_from_reader<R: Read>(mut r: R, media_type: &str) -> MolduraResult<ImagePayload> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes)
        .context("read image bytes from stream")?;
    Ok(ImagePayload::new(media_type, bytes))
}

/// Capture the system clipboard image as a PNG payload.
///
/// The clipboard hands back raw RGBA pixels, so the adapter re-encodes them as
/// PNG before the payload enters the common ingestion contract.
pub fn payload_from_clipboard() -> MolduraResult<ImagePayload> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| anyhow::anyhow!("access clipboard: {e}"))?;
    let img = clipboard
        .get_image()
        .map_err(|_| MolduraError::invalid_input("clipboard does not hold an image"))?;

    let (width, height) = (img.width as u32, img.height as u32);
    let rgba = image::RgbaImage::from_raw(width, height, img.bytes.into_owned())
        .ok_or_else(|| MolduraError::invalid_input("clipboard image has malformed pixel data"))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("encode clipboard image as png")?;

    Ok(ImagePayload::new("image/png", png))
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/sources.rs"]
mod tests;
