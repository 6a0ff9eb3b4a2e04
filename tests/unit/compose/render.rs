use std::io::Cursor;

use super::*;

fn png_payload(width: u32, height: u32, rgba: [u8; 4]) -> ImagePayload {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    ImagePayload::new("image/png", buf)
}

fn bitmap(width: u32, height: u32, rgba: [u8; 4]) -> DecodedBitmap {
    DecodedBitmap {
        width,
        height,
        rgba: image::RgbaImage::from_pixel(width, height, image::Rgba(rgba)),
    }
}

#[test]
fn output_matches_base_resolution_and_overlay_covers() {
    let base = png_payload(4, 2, [0, 0, 255, 255]);
    let overlay = bitmap(1, 1, [255, 0, 0, 255]);

    let png = composite_png(&base, &overlay).unwrap();
    let out = image::load_from_memory(&png).unwrap().to_rgba8();

    // Native base resolution, not the overlay's.
    assert_eq!(out.dimensions(), (4, 2));
    // The opaque overlay is stretched over the whole surface.
    for px in out.pixels() {
        assert_eq!(px.0, [255, 0, 0, 255]);
    }
}

#[test]
fn transparent_overlay_leaves_the_base_visible() {
    let base = png_payload(3, 3, [10, 200, 30, 255]);
    let overlay = bitmap(2, 2, [255, 0, 0, 0]);

    let png = composite_png(&base, &overlay).unwrap();
    let out = image::load_from_memory(&png).unwrap().to_rgba8();

    assert_eq!(out.dimensions(), (3, 3));
    for px in out.pixels() {
        assert_eq!(px.0, [10, 200, 30, 255]);
    }
}

#[test]
fn repeated_composites_are_byte_identical() {
    let base = png_payload(5, 4, [90, 80, 70, 255]);
    let overlay = bitmap(2, 3, [0, 0, 0, 128]);

    let a = composite_png(&base, &overlay).unwrap();
    let b = composite_png(&base, &overlay).unwrap();
    assert_eq!(a, b);
}

#[test]
fn undecodable_base_payload_is_an_error() {
    let base = ImagePayload::new("image/png", b"junk".to_vec());
    let overlay = bitmap(1, 1, [0, 0, 0, 255]);
    assert!(composite_png(&base, &overlay).is_err());
}
