use super::*;

fn printer_page() -> Surface {
    let page = Bitmap::new(8, 8).unwrap();
    Surface::for_device(&page, 600.0, 600.0).unwrap()
}

#[test]
fn fixed_dpi_y_shadows_device_resolution() {
    let r = FixedDpiRenderer::fix_dpi_y(printer_page(), 96.0).unwrap();
    assert_eq!(r.dpi_y(), 96.0);
    assert_eq!(r.dpi_x(), 600.0);
    assert_eq!(r.surface().dpi_y(), 600.0);
}

#[test]
fn non_positive_override_is_rejected() {
    for bad in [0.0, -96.0, f32::NAN, f32::INFINITY] {
        let err = FixedDpiRenderer::fix_dpi_y(printer_page(), bad).unwrap_err();
        assert!(matches!(err, RenderError::InvalidMetric(_)), "{bad}");
    }
    let err = MetricOverrideRenderer::new(
        SvgRenderer::from_surface(printer_page()),
        MetricOverrides::fixed_dpi_y(96.0).with_dpi_x(0.0),
    )
    .unwrap_err();
    assert!(err.to_string().contains("dpi_x"));
}

#[test]
fn empty_overrides_delegate_everything() {
    let r = MetricOverrideRenderer::new(
        SvgRenderer::from_surface(printer_page()),
        MetricOverrides::default(),
    )
    .unwrap();
    assert_eq!((r.dpi_x(), r.dpi_y()), (600.0, 600.0));
}

#[test]
fn drawing_state_and_stack_delegate_to_inner() {
    let mut r = FixedDpiRenderer::fix_dpi_y(printer_page(), 96.0).unwrap();
    r.translate(2.0, 0.0, MatrixOrder::Append);
    r.set_clip(&Region::from_rect(Rect::new(0.0, 0.0, 4.0, 4.0)), CombineMode::Replace);
    r.push_boundable(Rc::new(Rect::new(0.0, 0.0, 8.0, 8.0)));

    assert_eq!(r.inner().transform(), Affine::translate((2.0, 0.0)));
    assert!(r.inner().clip().contains(Point::new(1.0, 1.0)));
    assert_eq!(r.inner().boundable_depth(), 1);
    assert_eq!(r.pop_boundable().unwrap().bounds().width(), 8.0);

    r.dispose();
    assert!(r.surface().is_disposed());
    assert!(r.into_inner().surface().is_disposed());
}

#[test]
fn decorates_boxed_renderers() {
    let boxed: Box<dyn Renderer> = Box::new(SvgRenderer::from_surface(printer_page()));
    let r = MetricOverrideRenderer::new(boxed, MetricOverrides::fixed_dpi_y(72.0)).unwrap();
    assert_eq!(r.dpi_y(), 72.0);
    assert_eq!(r.dpi_x(), 600.0);
}

#[test]
fn overrides_deserialize_from_config() {
    let o: MetricOverrides = serde_json::from_str(r#"{"dpi_y":96.0}"#).unwrap();
    assert_eq!(o, MetricOverrides::fixed_dpi_y(96.0));
}
