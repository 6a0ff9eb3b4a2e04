use std::io::Cursor;

use anyhow::Context;

use crate::compose::decode::{DecodedBitmap, decode_bitmap};
use crate::foundation::error::MolduraResult;
use crate::ingest::payload::ImagePayload;

/// Flatten a base payload and an overlay bitmap into a lossless PNG.
///
/// The output surface is exactly the base image's native resolution. The base
/// is re-decoded from its stored encoded payload on every call and drawn 1:1
/// at the origin; the overlay is stretched to cover the full surface, aspect
/// ratio ignored, and alpha-composited on top. With unchanged inputs the
/// returned bytes are identical call to call.
#[tracing::instrument(skip(base, overlay), fields(overlay_w = overlay.width, overlay_h = overlay.height))]
pub fn composite_png(base: &ImagePayload, overlay: &DecodedBitmap) -> MolduraResult<Vec<u8>> {
    let decoded = decode_bitmap(base.bytes())?;
    let (width, height) = (decoded.width, decoded.height);

    let mut surface = image::RgbaImage::new(width, height);
    image::imageops::overlay(&mut surface, &decoded.rgba, 0, 0);

    let stretched = image::imageops::resize(
        &overlay.rgba,
        width,
        height,
        image::imageops::FilterType::Triangle,
    );
    image::imageops::overlay(&mut surface, &stretched, 0, 0);

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(surface)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("encode composite as png")?;
    Ok(png)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/render.rs"]
mod tests;
