use super::*;
use crate::foundation::core::Color;
use crate::foundation::error::RenderError;
use crate::render::settings::{PixelOffsetMode, TextRenderingHint};

#[test]
fn from_image_applies_high_quality_preset() {
    let bmp = Bitmap::new(4, 4).unwrap();
    let r = SvgRenderer::from_image(&bmp);
    let s = r.surface().settings();
    assert_eq!(s.text_rendering_hint, TextRenderingHint::AntiAlias);
    assert_eq!(s.pixel_offset_mode, PixelOffsetMode::Half);
    assert_eq!(s.text_contrast, 1);
    assert!(bmp.is_shared());
}

#[test]
fn from_surface_keeps_configuration() {
    let bmp = Bitmap::new(4, 4).unwrap();
    let mut surface = Surface::new(&bmp);
    surface.set_smoothing_mode(SmoothingMode::AntiAlias);
    surface.translate(3.0, 4.0, MatrixOrder::Append);

    let r = SvgRenderer::from_surface(surface);
    assert_eq!(r.surface().settings(), SurfaceSettings::default());
    assert_eq!(r.smoothing_mode(), SmoothingMode::AntiAlias);
    assert_eq!(r.transform(), Affine::translate((3.0, 4.0)));
}

#[test]
fn from_nothing_is_one_pixel() {
    let r = SvgRenderer::from_nothing().unwrap();
    assert_eq!((r.surface().width(), r.surface().height()), (1, 1));
    assert_eq!(r.dpi_y(), crate::foundation::core::NOMINAL_DPI);
}

#[test]
fn fresh_renderer_has_empty_context() {
    let mut r = SvgRenderer::from_nothing().unwrap();
    assert!(matches!(r.current_boundable(), Err(RenderError::EmptyContext(_))));
    assert!(matches!(r.pop_boundable(), Err(RenderError::EmptyContext(_))));
}

#[test]
fn properties_pass_through_to_surface() {
    let mut r = SvgRenderer::from_nothing().unwrap();
    r.set_compositing_mode(CompositingMode::SourceCopy);
    r.set_smoothing_mode(SmoothingMode::HighQuality);
    r.set_transform(Affine::scale(2.0));
    assert_eq!(r.surface().compositing_mode(), CompositingMode::SourceCopy);
    assert_eq!(r.surface().smoothing_mode(), SmoothingMode::HighQuality);
    assert_eq!(r.surface().transform(), Affine::scale(2.0));

    r.surface_mut().reset_transform();
    assert_eq!(r.transform(), Affine::IDENTITY);
}

#[test]
fn with_boundable_pops_on_error() {
    let mut r = SvgRenderer::from_nothing().unwrap();
    let res: RenderResult<()> = r.with_boundable(Rc::new(Rect::new(0.0, 0.0, 1.0, 1.0)), |r| {
        assert_eq!(r.boundable_depth(), 1);
        Err(RenderError::backend("subtree failed"))
    });
    assert!(res.is_err());
    assert_eq!(r.boundable_depth(), 0);
}

#[test]
fn with_saved_transform_restores_on_error() {
    let mut r = SvgRenderer::from_nothing().unwrap();
    r.translate(1.0, 1.0, MatrixOrder::Append);
    let before = r.transform();
    let res: RenderResult<()> = r.with_saved_transform(|r| {
        r.rotate(45.0, MatrixOrder::Prepend);
        r.scale(3.0, 3.0, MatrixOrder::Append);
        Err(RenderError::backend("subtree failed"))
    });
    assert!(res.is_err());
    assert_eq!(r.transform(), before);
}

#[test]
fn dispose_through_renderer_releases_surface_once() {
    let bmp = Bitmap::new(2, 2).unwrap();
    let mut r = SvgRenderer::from_image(&bmp);
    r.dispose();
    r.dispose();
    assert!(r.surface().is_disposed());
    assert!(!bmp.is_shared());
    assert!(
        r.fill_path(
            &Color::BLACK.into(),
            &GraphicsPath::rect(Rect::new(0.0, 0.0, 1.0, 1.0))
        )
        .is_err()
    );
}
