//! Renderer contract consumed by the document traversal.
//!
//! A [`Renderer`] wraps one backend [`Surface`] and a [`BoundableStack`]. The traversal holds a
//! single renderer for a whole pass: it pushes a boundable when entering an element that
//! establishes a relative frame, draws, and pops on the way out.

use std::rc::Rc;

use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::RenderResult;
use crate::render::bitmap::Bitmap;
use crate::render::composite::CompositingMode;
use crate::render::paint::{Brush, GraphicsPath, Pen};
use crate::render::region::{CombineMode, Region};
use crate::render::settings::SmoothingMode;
use crate::render::surface::{GraphicsUnit, MatrixOrder, Surface};

/// Boundable trait, context stack and scoped push guard.
pub mod boundable;
/// Decorator that substitutes device metrics.
pub mod metric_override;
/// Default adapter over a [`Surface`].
pub mod svg_renderer;

use boundable::{Boundable, BoundableScope};

/// Public drawing contract: primitives, transform and clip control, device metrics, boundable
/// context stack and disposal.
///
/// Draws after [`Renderer::dispose`] fail with a backend error.
pub trait Renderer {
    /// Enter a relative coordinate frame.
    fn push_boundable(&mut self, boundable: Rc<dyn Boundable>);

    /// Innermost frame; `EmptyContext` when nothing was pushed.
    fn current_boundable(&self) -> RenderResult<Rc<dyn Boundable>>;

    /// Leave the innermost frame; `EmptyContext` when nothing was pushed.
    fn pop_boundable(&mut self) -> RenderResult<Rc<dyn Boundable>>;

    /// Number of frames currently pushed.
    fn boundable_depth(&self) -> usize;

    /// Horizontal resolution used by text layout.
    fn dpi_x(&self) -> f32;

    /// Vertical resolution used by text layout.
    fn dpi_y(&self) -> f32;

    /// Draw the `src` part of `image` (in `unit`) scaled into `dest`.
    fn draw_image(
        &mut self,
        image: &Bitmap,
        dest: Rect,
        src: Rect,
        unit: GraphicsUnit,
    ) -> RenderResult<()>;

    /// Draw `image` at its pixel size with its top-left corner at `location`.
    fn draw_image_unscaled(&mut self, image: &Bitmap, location: Point) -> RenderResult<()>;

    /// Stroke the outline of `path`.
    fn stroke_path(&mut self, pen: &Pen, path: &GraphicsPath) -> RenderResult<()>;

    /// Fill the interior of `path`.
    fn fill_path(&mut self, brush: &Brush, path: &GraphicsPath) -> RenderResult<()>;

    /// Active clip in world space.
    fn clip(&self) -> Region;

    /// Combine a world-space region into the active clip.
    fn set_clip(&mut self, region: &Region, mode: CombineMode);

    /// Compose a rotation in degrees.
    fn rotate(&mut self, angle: f64, order: MatrixOrder);

    /// Compose a non-uniform scale.
    fn scale(&mut self, sx: f64, sy: f64, order: MatrixOrder);

    /// Compose a translation.
    fn translate(&mut self, dx: f64, dy: f64, order: MatrixOrder);

    /// How draws blend into the target.
    fn compositing_mode(&self) -> CompositingMode;

    /// Set how draws blend into the target.
    fn set_compositing_mode(&mut self, mode: CompositingMode);

    /// Edge anti-aliasing mode.
    fn smoothing_mode(&self) -> SmoothingMode;

    /// Set the edge anti-aliasing mode.
    fn set_smoothing_mode(&mut self, mode: SmoothingMode);

    /// Current world-to-page transform.
    fn transform(&self) -> Affine;

    /// Replace the world-to-page transform.
    fn set_transform(&mut self, transform: Affine);

    /// Release the backend surface. A second call is a no-op.
    fn dispose(&mut self);

    /// Run `f` with `boundable` pushed; it is popped on every exit path.
    fn with_boundable<T>(
        &mut self,
        boundable: Rc<dyn Boundable>,
        f: impl FnOnce(&mut Self) -> RenderResult<T>,
    ) -> RenderResult<T>
    where
        Self: Sized,
    {
        let mut scope = BoundableScope::new(self, boundable);
        f(&mut *scope)
    }

    /// Run `f` and restore the current transform afterwards, whatever `f` returns.
    fn with_saved_transform<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> RenderResult<T>,
    ) -> RenderResult<T>
    where
        Self: Sized,
    {
        let saved = self.transform();
        let out = f(self);
        self.set_transform(saved);
        out
    }
}

/// Privileged access to the backend surface for collaborators that need to reach past the
/// drawing contract (text layout, host glue).
pub trait SurfaceProvider {
    /// Backend surface.
    fn surface(&self) -> &Surface;

    /// Mutable backend surface.
    fn surface_mut(&mut self) -> &mut Surface;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn push_boundable(&mut self, boundable: Rc<dyn Boundable>) {
        (**self).push_boundable(boundable)
    }

    fn current_boundable(&self) -> RenderResult<Rc<dyn Boundable>> {
        (**self).current_boundable()
    }

    fn pop_boundable(&mut self) -> RenderResult<Rc<dyn Boundable>> {
        (**self).pop_boundable()
    }

    fn boundable_depth(&self) -> usize {
        (**self).boundable_depth()
    }

    fn dpi_x(&self) -> f32 {
        (**self).dpi_x()
    }

    fn dpi_y(&self) -> f32 {
        (**self).dpi_y()
    }

    fn draw_image(
        &mut self,
        image: &Bitmap,
        dest: Rect,
        src: Rect,
        unit: GraphicsUnit,
    ) -> RenderResult<()> {
        (**self).draw_image(image, dest, src, unit)
    }

    fn draw_image_unscaled(&mut self, image: &Bitmap, location: Point) -> RenderResult<()> {
        (**self).draw_image_unscaled(image, location)
    }

    fn stroke_path(&mut self, pen: &Pen, path: &GraphicsPath) -> RenderResult<()> {
        (**self).stroke_path(pen, path)
    }

    fn fill_path(&mut self, brush: &Brush, path: &GraphicsPath) -> RenderResult<()> {
        (**self).fill_path(brush, path)
    }

    fn clip(&self) -> Region {
        (**self).clip()
    }

    fn set_clip(&mut self, region: &Region, mode: CombineMode) {
        (**self).set_clip(region, mode)
    }

    fn rotate(&mut self, angle: f64, order: MatrixOrder) {
        (**self).rotate(angle, order)
    }

    fn scale(&mut self, sx: f64, sy: f64, order: MatrixOrder) {
        (**self).scale(sx, sy, order)
    }

    fn translate(&mut self, dx: f64, dy: f64, order: MatrixOrder) {
        (**self).translate(dx, dy, order)
    }

    fn compositing_mode(&self) -> CompositingMode {
        (**self).compositing_mode()
    }

    fn set_compositing_mode(&mut self, mode: CompositingMode) {
        (**self).set_compositing_mode(mode)
    }

    fn smoothing_mode(&self) -> SmoothingMode {
        (**self).smoothing_mode()
    }

    fn set_smoothing_mode(&mut self, mode: SmoothingMode) {
        (**self).set_smoothing_mode(mode)
    }

    fn transform(&self) -> Affine {
        (**self).transform()
    }

    fn set_transform(&mut self, transform: Affine) {
        (**self).set_transform(transform)
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}
