use std::io::Cursor;

use super::*;

#[test]
fn decode_bitmap_png_dimensions_and_pixels() {
    let img = image::RgbaImage::from_raw(2, 1, vec![10, 20, 30, 255, 40, 50, 60, 128]).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_bitmap(&buf).unwrap();
    assert_eq!(decoded.width, 2);
    assert_eq!(decoded.height, 1);
    assert_eq!(decoded.rgba.get_pixel(0, 0).0, [10, 20, 30, 255]);
    assert_eq!(decoded.rgba.get_pixel(1, 0).0, [40, 50, 60, 128]);
}

#[test]
fn decode_bitmap_rejects_garbage() {
    assert!(decode_bitmap(b"not an image").is_err());
    assert!(decode_bitmap(&[]).is_err());
}
