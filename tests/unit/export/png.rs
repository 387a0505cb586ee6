use super::*;
use crate::foundation::core::Canvas;

#[test]
fn unpremultiply_restores_straight_alpha() {
    let out = unpremultiply_rgba8(&[64, 32, 0, 128, 10, 10, 10, 0, 200, 100, 50, 255]);
    assert_eq!(&out[0..4], &[128, 64, 0, 128]);
    assert_eq!(&out[4..8], &[0, 0, 0, 0]);
    assert_eq!(&out[8..12], &[200, 100, 50, 255]);
}

#[test]
fn encoded_png_decodes_to_same_size() {
    let mut frame = FrameRGBA::transparent(Canvas::new(3, 2).unwrap());
    frame.data[0..4].copy_from_slice(&[255, 0, 0, 255]);
    let bytes = encode_png(&frame).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
}

#[test]
fn malformed_frames_are_rejected() {
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 3],
        premultiplied: true,
    };
    assert!(encode_png(&frame).is_err());
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("kineo-png-{}", std::process::id()));
    let path = dir.join("nested").join("still.png");
    write_png(&path, &FrameRGBA::transparent(Canvas::new(2, 2).unwrap())).unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(dir);
}
