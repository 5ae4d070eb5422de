use std::rc::Rc;

use crate::foundation::core::{Affine, Point, Rect, is_positive_metric};
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::bitmap::Bitmap;
use crate::render::composite::CompositingMode;
use crate::render::paint::{Brush, GraphicsPath, Pen};
use crate::render::region::{CombineMode, Region};
use crate::render::settings::SmoothingMode;
use crate::render::surface::{GraphicsUnit, MatrixOrder, Surface};
use crate::renderer::boundable::Boundable;
use crate::renderer::svg_renderer::SvgRenderer;
use crate::renderer::{Renderer, SurfaceProvider};

/// Device metrics that shadow what the backend reports. `None` slots fall through.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MetricOverrides {
    /// Horizontal resolution reported instead of the backend value.
    pub dpi_x: Option<f32>,
    /// Vertical resolution reported instead of the backend value.
    pub dpi_y: Option<f32>,
}

impl MetricOverrides {
    /// Override only the vertical resolution.
    pub fn fixed_dpi_y(dpi_y: f32) -> Self {
        Self {
            dpi_x: None,
            dpi_y: Some(dpi_y),
        }
    }

    /// Also override the horizontal resolution.
    pub fn with_dpi_x(mut self, dpi_x: f32) -> Self {
        self.dpi_x = Some(dpi_x);
        self
    }

    fn validate(&self) -> RenderResult<()> {
        for (name, slot) in [("dpi_x", self.dpi_x), ("dpi_y", self.dpi_y)] {
            if let Some(v) = slot
                && !is_positive_metric(v)
            {
                return Err(RenderError::invalid_metric(format!(
                    "{name} override must be greater than zero, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Renderer decorator that returns fixed device metrics and delegates everything else.
///
/// Printers report a resolution that is right for raster placement but wrong for text layout,
/// which expects the nominal 96 DPI used on screen. Wrapping the page renderer with a fixed
/// `dpi_y` keeps font metrics consistent without touching the drawing pipeline.
#[derive(Debug)]
pub struct MetricOverrideRenderer<R> {
    inner: R,
    overrides: MetricOverrides,
}

/// Page renderer with a fixed vertical resolution.
pub type FixedDpiRenderer = MetricOverrideRenderer<SvgRenderer>;

impl<R: Renderer> MetricOverrideRenderer<R> {
    /// Wrap `inner`. Fails with `InvalidMetric` if any override is not finite and > 0.
    pub fn new(inner: R, overrides: MetricOverrides) -> RenderResult<Self> {
        overrides.validate()?;
        tracing::debug!(?overrides, "device metric override installed");
        Ok(Self { inner, overrides })
    }

    /// Installed overrides.
    pub fn overrides(&self) -> MetricOverrides {
        self.overrides
    }

    /// Decorated renderer.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Unwrap the decorated renderer.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl MetricOverrideRenderer<SvgRenderer> {
    /// Renderer over `surface` whose vertical resolution reads as `dpi_y`.
    pub fn fix_dpi_y(surface: Surface, dpi_y: f32) -> RenderResult<Self> {
        Self::new(SvgRenderer::from_surface(surface), MetricOverrides::fixed_dpi_y(dpi_y))
    }
}

impl<R: SurfaceProvider> SurfaceProvider for MetricOverrideRenderer<R> {
    fn surface(&self) -> &Surface {
        self.inner.surface()
    }

    fn surface_mut(&mut self) -> &mut Surface {
        self.inner.surface_mut()
    }
}

impl<R: Renderer> Renderer for MetricOverrideRenderer<R> {
    fn push_boundable(&mut self, boundable: Rc<dyn Boundable>) {
        self.inner.push_boundable(boundable)
    }

    fn current_boundable(&self) -> RenderResult<Rc<dyn Boundable>> {
        self.inner.current_boundable()
    }

    fn pop_boundable(&mut self) -> RenderResult<Rc<dyn Boundable>> {
        self.inner.pop_boundable()
    }

    fn boundable_depth(&self) -> usize {
        self.inner.boundable_depth()
    }

    fn dpi_x(&self) -> f32 {
        self.overrides.dpi_x.unwrap_or_else(|| self.inner.dpi_x())
    }

    fn dpi_y(&self) -> f32 {
        self.overrides.dpi_y.unwrap_or_else(|| self.inner.dpi_y())
    }

    fn draw_image(
        &mut self,
        image: &Bitmap,
        dest: Rect,
        src: Rect,
        unit: GraphicsUnit,
    ) -> RenderResult<()> {
        self.inner.draw_image(image, dest, src, unit)
    }

    fn draw_image_unscaled(&mut self, image: &Bitmap, location: Point) -> RenderResult<()> {
        self.inner.draw_image_unscaled(image, location)
    }

    fn stroke_path(&mut self, pen: &Pen, path: &GraphicsPath) -> RenderResult<()> {
        self.inner.stroke_path(pen, path)
    }

    fn fill_path(&mut self, brush: &Brush, path: &GraphicsPath) -> RenderResult<()> {
        self.inner.fill_path(brush, path)
    }

    fn clip(&self) -> Region {
        self.inner.clip()
    }

    fn set_clip(&mut self, region: &Region, mode: CombineMode) {
        self.inner.set_clip(region, mode)
    }

    fn rotate(&mut self, angle: f64, order: MatrixOrder) {
        self.inner.rotate(angle, order)
    }

    fn scale(&mut self, sx: f64, sy: f64, order: MatrixOrder) {
        self.inner.scale(sx, sy, order)
    }

    fn translate(&mut self, dx: f64, dy: f64, order: MatrixOrder) {
        self.inner.translate(dx, dy, order)
    }

    fn compositing_mode(&self) -> CompositingMode {
        self.inner.compositing_mode()
    }

    fn set_compositing_mode(&mut self, mode: CompositingMode) {
        self.inner.set_compositing_mode(mode)
    }

    fn smoothing_mode(&self) -> SmoothingMode {
        self.inner.smoothing_mode()
    }

    fn set_smoothing_mode(&mut self, mode: SmoothingMode) {
        self.inner.set_smoothing_mode(mode)
    }

    fn transform(&self) -> Affine {
        self.inner.transform()
    }

    fn set_transform(&mut self, transform: Affine) {
        self.inner.set_transform(transform)
    }

    fn dispose(&mut self) {
        self.inner.dispose()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/renderer/metric_override.rs"]
mod tests;
