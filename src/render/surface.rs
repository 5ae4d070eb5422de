use crate::foundation::core::{Affine, Color, Point, Rect, Vec2, is_positive_metric};
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::bitmap::Bitmap;
use crate::render::composite::{CompositingMode, Layer, composite_layer, fill_masked};
use crate::render::paint::{Brush, GraphicsPath, Pen};
use crate::render::region::{CombineMode, Region};
use crate::render::settings::{SmoothingMode, SurfaceSettings};

/// Coverage at or above which an aliased draw paints a pixel.
const ALIAS_THRESHOLD: u8 = 128;

/// Whether a transform operation composes before or after the current transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MatrixOrder {
    /// Applied before the current transform, in local space.
    Prepend,
    /// Applied after the current transform, in world space.
    #[default]
    Append,
}

/// Unit of measure for source rectangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GraphicsUnit {
    /// World coordinates; not meaningful for image sources.
    World,
    /// Display units, which are pixels for bitmaps.
    Display,
    /// Device pixels.
    #[default]
    Pixel,
    /// 1/72 inch.
    Point,
    /// Inches.
    Inch,
    /// 1/300 inch.
    Document,
    /// Millimeters.
    Millimeter,
}

impl GraphicsUnit {
    /// Pixels per unit at resolution `dpi`, or `None` when the unit has no physical size.
    pub fn pixels_per_unit(self, dpi: f32) -> Option<f64> {
        let dpi = f64::from(dpi);
        match self {
            GraphicsUnit::World => None,
            GraphicsUnit::Display | GraphicsUnit::Pixel => Some(1.0),
            GraphicsUnit::Point => Some(dpi / 72.0),
            GraphicsUnit::Inch => Some(dpi),
            GraphicsUnit::Document => Some(dpi / 300.0),
            GraphicsUnit::Millimeter => Some(dpi / 25.4),
        }
    }
}

enum Paint {
    Color(vello_cpu::peniko::Color),
    Image {
        image: vello_cpu::Image,
        transform: Affine,
    },
}

impl Paint {
    fn from_brush(brush: &Brush) -> RenderResult<Self> {
        match brush {
            Brush::Solid(c) => Ok(Paint::Color(c.to_cpu())),
            Brush::Texture { image, transform } => Ok(Paint::Image {
                image: image.to_paint(vello_cpu::peniko::Extend::Repeat)?,
                transform: *transform,
            }),
        }
    }

    fn apply(self, ctx: &mut vello_cpu::RenderContext) {
        match self {
            Paint::Color(c) => {
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(c);
            }
            Paint::Image { image, transform } => {
                ctx.set_paint_transform(affine_to_cpu(transform));
                ctx.set_paint(image);
            }
        }
    }
}

enum Geometry<'a> {
    Fill(&'a GraphicsPath),
    Stroke(&'a GraphicsPath, vello_cpu::kurbo::Stroke),
    Rect(Rect),
}

impl Geometry<'_> {
    fn draw(&self, ctx: &mut vello_cpu::RenderContext) {
        match self {
            Geometry::Fill(path) => {
                ctx.set_fill_rule(path.fill_rule().to_cpu());
                ctx.fill_path(&bezpath_to_cpu(path.bez()));
            }
            Geometry::Stroke(path, stroke) => {
                ctx.set_stroke(stroke.clone());
                ctx.stroke_path(&bezpath_to_cpu(path.bez()));
            }
            Geometry::Rect(r) => {
                ctx.set_fill_rule(vello_cpu::peniko::Fill::NonZero);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1));
            }
        }
    }
}

enum ClipMask {
    Stale,
    Unclipped,
    Mask(Vec<bool>),
}

/// CPU drawing surface over a [`Bitmap`] target, rasterised with `vello_cpu`.
///
/// The surface owns one handle to its target plus the mutable drawing state: transform, clip,
/// compositing and smoothing modes. Each draw is rasterised into a scratch layer and merged
/// into the target immediately, so the bitmap always reflects every completed call.
///
/// The clip is kept in page space (after the current transform, before the pixel offset).
/// Dropping the surface disposes it.
pub struct Surface {
    target: Option<Bitmap>,
    width: u16,
    height: u16,
    dpi_x: f32,
    dpi_y: f32,
    settings: SurfaceSettings,

    compositing_mode: CompositingMode,
    smoothing_mode: SmoothingMode,
    transform: Affine,
    clip: Region,

    clip_mask: ClipMask,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dpi_x", &self.dpi_x)
            .field("dpi_y", &self.dpi_y)
            .field("settings", &self.settings)
            .field("compositing_mode", &self.compositing_mode)
            .field("smoothing_mode", &self.smoothing_mode)
            .field("transform", &self.transform)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl Surface {
    /// Surface over `target` with default settings; resolution comes from the bitmap.
    pub fn new(target: &Bitmap) -> Self {
        Self::with_settings(target, SurfaceSettings::default())
    }

    /// Surface over `target` with explicit `settings`.
    pub fn with_settings(target: &Bitmap, settings: SurfaceSettings) -> Self {
        let (width, height) = target.dims();
        tracing::debug!(width, height, ?settings, "surface created");
        Self {
            target: Some(target.clone()),
            width,
            height,
            dpi_x: target.dpi_x(),
            dpi_y: target.dpi_y(),
            settings,
            compositing_mode: CompositingMode::default(),
            smoothing_mode: SmoothingMode::default(),
            transform: Affine::IDENTITY,
            clip: Region::infinite(),
            clip_mask: ClipMask::Stale,
            ctx: None,
        }
    }

    /// Surface for an output device page that reports its own resolution (e.g. a printer).
    pub fn for_device(target: &Bitmap, dpi_x: f32, dpi_y: f32) -> RenderResult<Self> {
        if !is_positive_metric(dpi_x) || !is_positive_metric(dpi_y) {
            return Err(RenderError::backend(format!(
                "device resolution must be positive, got {dpi_x}x{dpi_y}"
            )));
        }
        let mut s = Self::new(target);
        s.dpi_x = dpi_x;
        s.dpi_y = dpi_y;
        Ok(s)
    }

    /// Target width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Target height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Horizontal resolution reported by the device.
    pub fn dpi_x(&self) -> f32 {
        self.dpi_x
    }

    /// Vertical resolution reported by the device.
    pub fn dpi_y(&self) -> f32 {
        self.dpi_y
    }

    /// Current quality settings.
    pub fn settings(&self) -> SurfaceSettings {
        self.settings
    }

    /// Replace the quality settings.
    pub fn set_settings(&mut self, settings: SurfaceSettings) {
        self.settings = settings;
        self.clip_mask = ClipMask::Stale;
    }

    /// How draws blend into the target.
    pub fn compositing_mode(&self) -> CompositingMode {
        self.compositing_mode
    }

    /// Set how draws blend into the target.
    pub fn set_compositing_mode(&mut self, mode: CompositingMode) {
        self.compositing_mode = mode;
    }

    /// Edge anti-aliasing mode.
    pub fn smoothing_mode(&self) -> SmoothingMode {
        self.smoothing_mode
    }

    /// Set the edge anti-aliasing mode.
    pub fn set_smoothing_mode(&mut self, mode: SmoothingMode) {
        self.smoothing_mode = mode;
    }

    /// Current world-to-page transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replace the world-to-page transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Reset the transform to identity.
    pub fn reset_transform(&mut self) {
        self.transform = Affine::IDENTITY;
    }

    /// Compose a rotation of `angle` degrees.
    pub fn rotate(&mut self, angle: f64, order: MatrixOrder) {
        let th = angle.to_radians();
        self.transform = match order {
            MatrixOrder::Append => self.transform.then_rotate(th),
            MatrixOrder::Prepend => self.transform.pre_rotate(th),
        };
    }

    /// Compose a non-uniform scale.
    pub fn scale(&mut self, sx: f64, sy: f64, order: MatrixOrder) {
        self.transform = match order {
            MatrixOrder::Append => self.transform.then_scale_non_uniform(sx, sy),
            MatrixOrder::Prepend => self.transform.pre_scale_non_uniform(sx, sy),
        };
    }

    /// Compose a translation.
    pub fn translate(&mut self, dx: f64, dy: f64, order: MatrixOrder) {
        let v = Vec2::new(dx, dy);
        self.transform = match order {
            MatrixOrder::Append => self.transform.then_translate(v),
            MatrixOrder::Prepend => self.transform.pre_translate(v),
        };
    }

    /// Active clip in world space.
    ///
    /// A singular transform cannot be inverted; the page-space clip is returned as is.
    pub fn clip(&self) -> Region {
        match invert(self.transform) {
            Some(inv) if !self.clip.is_infinite() => self.clip.transformed(inv),
            _ => self.clip.clone(),
        }
    }

    /// Combine a world-space `region` into the active clip.
    pub fn set_clip(&mut self, region: &Region, mode: CombineMode) {
        let page = region.transformed(self.transform);
        self.clip = self.clip.combine(&page, mode);
        self.clip_mask = ClipMask::Stale;
    }

    /// Remove all clipping.
    pub fn reset_clip(&mut self) {
        self.clip = Region::infinite();
        self.clip_mask = ClipMask::Stale;
    }

    /// Fill the interior of `path` with `brush`.
    pub fn fill_path(&mut self, brush: &Brush, path: &GraphicsPath) -> RenderResult<()> {
        tracing::trace!(fill_rule = ?path.fill_rule(), "fill_path");
        let paint = Paint::from_brush(brush)?;
        self.draw(&Geometry::Fill(path), paint)
    }

    /// Stroke the outline of `path` with `pen`. Negative or non-finite widths fail.
    pub fn stroke_path(&mut self, pen: &Pen, path: &GraphicsPath) -> RenderResult<()> {
        tracing::trace!(width = pen.width, "stroke_path");
        if !pen.width.is_finite() || pen.width < 0.0 {
            return Err(RenderError::backend(format!(
                "pen width must be finite and >= 0, got {}",
                pen.width
            )));
        }
        let paint = Paint::from_brush(&pen.brush)?;
        self.draw(&Geometry::Stroke(path, pen.to_cpu_stroke()), paint)
    }

    /// Draw the `src` part of `image` (measured in `unit`) into `dest` (world space).
    ///
    /// Transform and clip are left untouched.
    pub fn draw_image(
        &mut self,
        image: &Bitmap,
        dest: Rect,
        src: Rect,
        unit: GraphicsUnit,
    ) -> RenderResult<()> {
        tracing::trace!(?dest, ?src, ?unit, "draw_image");
        self.live_target()?;
        let (Some(ux), Some(uy)) = (
            unit.pixels_per_unit(image.dpi_x()),
            unit.pixels_per_unit(image.dpi_y()),
        ) else {
            return Err(RenderError::backend(format!(
                "unsupported source unit {unit:?}"
            )));
        };
        let src_px = Rect::new(src.x0 * ux, src.y0 * uy, src.x1 * ux, src.y1 * uy);
        let (sw, sh) = (src_px.width(), src_px.height());
        if !(sw.is_finite() && sh.is_finite() && sw > 0.0 && sh > 0.0) {
            return Err(RenderError::backend(format!(
                "source rectangle must have positive size, got {src:?}"
            )));
        }
        if dest.width() == 0.0 || dest.height() == 0.0 {
            return Ok(());
        }

        // Negative destination extents mirror the image.
        let paint_transform = Affine::translate(dest.origin().to_vec2())
            * Affine::scale_non_uniform(dest.width() / sw, dest.height() / sh)
            * Affine::translate(-src_px.origin().to_vec2());
        let paint = Paint::Image {
            image: image.to_paint(vello_cpu::peniko::Extend::Pad)?,
            transform: paint_transform,
        };
        self.draw(&Geometry::Rect(dest.abs()), paint)
    }

    /// Draw all of `image` at 1:1 pixel scale with its top-left corner at `location`.
    pub fn draw_image_unscaled(&mut self, image: &Bitmap, location: Point) -> RenderResult<()> {
        let size = (f64::from(image.width()), f64::from(image.height()));
        self.draw_image(
            image,
            Rect::from_origin_size(location, size),
            Rect::from_origin_size(Point::ORIGIN, size),
            GraphicsUnit::Pixel,
        )
    }

    /// Overwrite every pixel inside the clip with `color`.
    pub fn clear(&mut self, color: Color) -> RenderResult<()> {
        let target = self.live_target()?.clone();
        self.ensure_clip_mask();
        let mask = match &self.clip_mask {
            ClipMask::Mask(m) => Some(m.as_slice()),
            ClipMask::Unclipped | ClipMask::Stale => None,
        };
        target.with_pixels_mut(|dst| fill_masked(dst, color.to_premul(), mask));
        Ok(())
    }

    /// Release the target handle and rasteriser state.
    ///
    /// Calling this again is a no-op. Drawing afterwards fails with [`RenderError::Backend`].
    #[tracing::instrument(skip(self))]
    pub fn dispose(&mut self) {
        if self.target.take().is_some() {
            self.ctx = None;
            self.clip_mask = ClipMask::Stale;
            tracing::debug!("surface released");
        }
    }

    /// Return `true` once [`Surface::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.target.is_none()
    }

    /// Bitmap this surface draws into, while not disposed.
    pub fn target(&self) -> Option<&Bitmap> {
        self.target.as_ref()
    }

    fn live_target(&self) -> RenderResult<&Bitmap> {
        self.target
            .as_ref()
            .ok_or_else(|| RenderError::backend("surface disposed"))
    }

    fn device_transform(&self) -> Affine {
        Affine::translate(self.settings.pixel_offset_mode.device_offset()) * self.transform
    }

    fn draw(&mut self, geometry: &Geometry<'_>, paint: Paint) -> RenderResult<()> {
        let target = self.live_target()?.clone();
        let needs_coverage = self.compositing_mode == CompositingMode::SourceCopy;

        let color = self.rasterize(geometry, paint);
        let coverage = needs_coverage.then(|| {
            self.rasterize(
                geometry,
                Paint::Color(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255)),
            )
        });

        self.ensure_clip_mask();
        let mask = match &self.clip_mask {
            ClipMask::Mask(m) => Some(m.as_slice()),
            ClipMask::Unclipped | ClipMask::Stale => None,
        };
        let layer = Layer {
            color: color.data_as_u8_slice(),
            coverage: coverage.as_ref().map(|p| p.data_as_u8_slice()),
            mode: self.compositing_mode,
        };
        target.with_pixels_mut(|dst| composite_layer(dst, &layer, mask))
    }

    fn rasterize(&mut self, geometry: &Geometry<'_>, paint: Paint) -> vello_cpu::Pixmap {
        let (w, h) = (self.width, self.height);
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        let threshold = (!self.smoothing_mode.is_antialiased()).then_some(ALIAS_THRESHOLD);
        ctx.set_aliasing_threshold(threshold);
        ctx.set_transform(affine_to_cpu(self.device_transform()));
        paint.apply(&mut ctx);
        geometry.draw(&mut ctx);
        ctx.flush();

        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        self.ctx = Some(ctx);
        layer
    }

    fn ensure_clip_mask(&mut self) {
        if !matches!(self.clip_mask, ClipMask::Stale) {
            return;
        }
        if self.clip.is_infinite() {
            self.clip_mask = ClipMask::Unclipped;
            return;
        }
        let off = self.settings.pixel_offset_mode.device_offset();
        let (w, h) = (usize::from(self.width), usize::from(self.height));
        let bounds = self.clip.bounds().map(|b| b.inflate(1.0, 1.0));
        let mut mask = vec![false; w * h];
        for y in 0..h {
            for x in 0..w {
                let pt = Point::new(x as f64 + 0.5 - off.x, y as f64 + 0.5 - off.y);
                if bounds.is_some_and(|b| !b.contains(pt)) {
                    continue;
                }
                mask[y * w + x] = self.clip.contains(pt);
            }
        }
        self.clip_mask = ClipMask::Mask(mask);
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Inverse of `a`, or `None` when `a` is singular or not finite.
fn invert(a: Affine) -> Option<Affine> {
    let det = a.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inv = a.inverse();
    inv.as_coeffs().iter().all(|c| c.is_finite()).then_some(inv)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &crate::foundation::core::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
