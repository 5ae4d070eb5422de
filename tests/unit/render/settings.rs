use super::*;

#[test]
fn only_high_quality_and_antialias_smooth() {
    assert!(SmoothingMode::AntiAlias.is_antialiased());
    assert!(SmoothingMode::HighQuality.is_antialiased());
    assert!(!SmoothingMode::Default.is_antialiased());
    assert!(!SmoothingMode::None.is_antialiased());
    assert!(!SmoothingMode::HighSpeed.is_antialiased());
}

#[test]
fn half_offset_is_native_sampling() {
    assert_eq!(PixelOffsetMode::Half.device_offset(), Vec2::ZERO);
    assert_eq!(PixelOffsetMode::Default.device_offset(), Vec2::new(0.5, 0.5));
}

#[test]
fn high_quality_preset_differs_from_default() {
    let hq = SurfaceSettings::high_quality();
    assert_eq!(hq.text_rendering_hint, TextRenderingHint::AntiAlias);
    assert_eq!(hq.pixel_offset_mode, PixelOffsetMode::Half);
    assert_eq!(hq.compositing_quality, CompositingQuality::HighQuality);
    assert_eq!(hq.text_contrast, 1);
    assert_eq!(SurfaceSettings::default().text_contrast, 4);
}

#[test]
fn settings_deserialize_with_missing_fields() {
    let s: SurfaceSettings = serde_json::from_str(r#"{"pixel_offset_mode":"Half"}"#).unwrap();
    assert_eq!(s.pixel_offset_mode, PixelOffsetMode::Half);
    assert_eq!(s.text_contrast, 4);

    let json = serde_json::to_string(&SurfaceSettings::high_quality()).unwrap();
    let back: SurfaceSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(back, SurfaceSettings::high_quality());
}
