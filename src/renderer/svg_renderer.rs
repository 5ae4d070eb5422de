use std::rc::Rc;

use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::RenderResult;
use crate::render::bitmap::Bitmap;
use crate::render::composite::CompositingMode;
use crate::render::paint::{Brush, GraphicsPath, Pen};
use crate::render::region::{CombineMode, Region};
use crate::render::settings::{SmoothingMode, SurfaceSettings};
use crate::render::surface::{GraphicsUnit, MatrixOrder, Surface};
use crate::renderer::boundable::{Boundable, BoundableStack};
use crate::renderer::{Renderer, SurfaceProvider};

/// Default renderer: forwards every primitive and property to its [`Surface`] and keeps the
/// boundable context stack alongside it.
#[derive(Debug)]
pub struct SvgRenderer {
    surface: Surface,
    boundables: BoundableStack,
}

impl SvgRenderer {
    fn new(surface: Surface) -> Self {
        Self {
            surface,
            boundables: BoundableStack::new(),
        }
    }

    /// Renderer drawing into `image`, configured for high-quality output (anti-aliased text,
    /// half-pixel offset sampling, high-quality compositing).
    #[tracing::instrument(skip(image), fields(width = image.width(), height = image.height()))]
    pub fn from_image(image: &Bitmap) -> Self {
        Self::new(Surface::with_settings(image, SurfaceSettings::high_quality()))
    }

    /// Renderer over an existing surface (for example a printer page). The surface
    /// configuration is left as is.
    #[tracing::instrument(skip(surface))]
    pub fn from_surface(surface: Surface) -> Self {
        Self::new(surface)
    }

    /// Throwaway renderer over a 1×1 bitmap, for measurement-only passes.
    #[tracing::instrument]
    pub fn from_nothing() -> RenderResult<Self> {
        let image = Bitmap::new(1, 1)?;
        Ok(Self::from_image(&image))
    }
}

impl SurfaceProvider for SvgRenderer {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

impl Renderer for SvgRenderer {
    fn push_boundable(&mut self, boundable: Rc<dyn Boundable>) {
        self.boundables.push(boundable);
    }

    fn current_boundable(&self) -> RenderResult<Rc<dyn Boundable>> {
        self.boundables.current()
    }

    fn pop_boundable(&mut self) -> RenderResult<Rc<dyn Boundable>> {
        self.boundables.pop()
    }

    fn boundable_depth(&self) -> usize {
        self.boundables.len()
    }

    fn dpi_x(&self) -> f32 {
        self.surface.dpi_x()
    }

    fn dpi_y(&self) -> f32 {
        self.surface.dpi_y()
    }

    fn draw_image(
        &mut self,
        image: &Bitmap,
        dest: Rect,
        src: Rect,
        unit: GraphicsUnit,
    ) -> RenderResult<()> {
        self.surface.draw_image(image, dest, src, unit)
    }

    fn draw_image_unscaled(&mut self, image: &Bitmap, location: Point) -> RenderResult<()> {
        self.surface.draw_image_unscaled(image, location)
    }

    fn stroke_path(&mut self, pen: &Pen, path: &GraphicsPath) -> RenderResult<()> {
        self.surface.stroke_path(pen, path)
    }

    fn fill_path(&mut self, brush: &Brush, path: &GraphicsPath) -> RenderResult<()> {
        self.surface.fill_path(brush, path)
    }

    fn clip(&self) -> Region {
        self.surface.clip()
    }

    fn set_clip(&mut self, region: &Region, mode: CombineMode) {
        self.surface.set_clip(region, mode)
    }

    fn rotate(&mut self, angle: f64, order: MatrixOrder) {
        self.surface.rotate(angle, order)
    }

    fn scale(&mut self, sx: f64, sy: f64, order: MatrixOrder) {
        self.surface.scale(sx, sy, order)
    }

    fn translate(&mut self, dx: f64, dy: f64, order: MatrixOrder) {
        self.surface.translate(dx, dy, order)
    }

    fn compositing_mode(&self) -> CompositingMode {
        self.surface.compositing_mode()
    }

    fn set_compositing_mode(&mut self, mode: CompositingMode) {
        self.surface.set_compositing_mode(mode)
    }

    fn smoothing_mode(&self) -> SmoothingMode {
        self.surface.smoothing_mode()
    }

    fn set_smoothing_mode(&mut self, mode: SmoothingMode) {
        self.surface.set_smoothing_mode(mode)
    }

    fn transform(&self) -> Affine {
        self.surface.transform()
    }

    fn set_transform(&mut self, transform: Affine) {
        self.surface.set_transform(transform)
    }

    fn dispose(&mut self) {
        self.surface.dispose()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/renderer/svg_renderer.rs"]
mod tests;
