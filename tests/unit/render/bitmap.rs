use super::*;

#[test]
fn new_rejects_zero_and_oversized_dimensions() {
    assert!(matches!(Bitmap::new(0, 4), Err(RenderError::Backend(_))));
    assert!(matches!(Bitmap::new(4, 0), Err(RenderError::Backend(_))));
    assert!(matches!(
        Bitmap::new(u32::from(u16::MAX) + 1, 1),
        Err(RenderError::Backend(_))
    ));
}

#[test]
fn new_bitmap_is_transparent_at_nominal_dpi() {
    let bmp = Bitmap::new(3, 2).unwrap();
    assert_eq!((bmp.width(), bmp.height()), (3, 2));
    assert_eq!(bmp.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(bmp.pixel(3, 0), None);
    assert_eq!(bmp.dpi_x(), NOMINAL_DPI);
    assert_eq!(bmp.dpi_y(), NOMINAL_DPI);
}

#[test]
fn from_rgba8_premultiplies_and_round_trips_through_image() {
    let bmp = Bitmap::from_rgba8(1, 1, &[255, 0, 0, 128]).unwrap();
    assert_eq!(bmp.pixel(0, 0), Some([128, 0, 0, 128]));

    let img = bmp.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
}

#[test]
fn from_rgba8_rejects_wrong_byte_len() {
    assert!(matches!(
        Bitmap::from_rgba8(2, 2, &[0; 12]),
        Err(RenderError::Backend(_))
    ));
}

#[test]
fn decode_garbage_surfaces_wrapped_error() {
    let err = Bitmap::decode(b"not an image").unwrap_err();
    assert!(matches!(err, RenderError::Other(_)));
    assert!(err.to_string().contains("decode image"));
}

#[test]
fn decode_reads_png_bytes() {
    let mut img = image::RgbaImage::new(2, 1);
    img.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let bmp = Bitmap::decode(&bytes).unwrap();
    assert_eq!((bmp.width(), bmp.height()), (2, 1));
    assert_eq!(bmp.pixel(1, 0), Some([0, 255, 0, 255]));
}

#[test]
fn set_resolution_validates_values() {
    let bmp = Bitmap::new(1, 1).unwrap();
    bmp.set_resolution(300.0, 600.0).unwrap();
    assert_eq!((bmp.dpi_x(), bmp.dpi_y()), (300.0, 600.0));
    assert!(bmp.set_resolution(0.0, 96.0).is_err());
    assert!(bmp.set_resolution(96.0, f32::NAN).is_err());
}

#[test]
fn clones_share_pixels() {
    let bmp = Bitmap::new(1, 1).unwrap();
    assert!(!bmp.is_shared());
    let other = bmp.clone();
    assert!(bmp.is_shared());
    other.with_pixels_mut(|px| px.copy_from_slice(&[1, 2, 3, 4]));
    assert_eq!(bmp.pixel(0, 0), Some([1, 2, 3, 4]));
    drop(other);
    assert!(!bmp.is_shared());
}
