use std::path::Path;

use super::*;

#[test]
fn image_family_check_trusts_the_declared_type() {
    assert!(ImagePayload::new("image/png", vec![1, 2, 3]).is_image());
    assert!(ImagePayload::new("image/webp", vec![]).is_image());
    assert!(!ImagePayload::new("application/pdf", vec![1]).is_image());
    assert!(!ImagePayload::new("text/plain", b"image/png".to_vec()).is_image());
}

#[test]
fn data_uri_round_trip() {
    let payload = ImagePayload::new("image/jpeg", vec![0xff, 0xd8, 0x00, 0x42]);
    let uri = payload.to_data_uri();
    assert!(uri.starts_with("data:image/jpeg;base64,"));

    let back = ImagePayload::from_data_uri(&uri).unwrap();
    assert_eq!(back, payload);
}

#[test]
fn from_data_uri_rejects_malformed_input() {
    assert!(ImagePayload::from_data_uri("image/png;base64,AAAA").is_err());
    assert!(ImagePayload::from_data_uri("data:image/png,AAAA").is_err());
    assert!(ImagePayload::from_data_uri("data:image/png;base64,@@@").is_err());
}

#[test]
fn media_type_follows_the_extension() {
    assert_eq!(media_type_for_path(Path::new("a/photo.PNG")), "image/png");
    assert_eq!(media_type_for_path(Path::new("photo.jpeg")), "image/jpeg");
    assert_eq!(media_type_for_path(Path::new("photo.jpg")), "image/jpeg");
    assert_eq!(media_type_for_path(Path::new("anim.gif")), "image/gif");
    assert_eq!(
        media_type_for_path(Path::new("doc.pdf")),
        "application/octet-stream"
    );
    assert_eq!(
        media_type_for_path(Path::new("noext")),
        "application/octet-stream"
    );
}
