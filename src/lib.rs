//! Backend-agnostic rendering context for vector-graphics documents.
//!
//! The document traversal draws through a [`Renderer`]:
//!
//! - Create one with [`SvgRenderer::from_image`], [`SvgRenderer::from_surface`] or
//!   [`SvgRenderer::from_nothing`]
//! - Push a [`Boundable`] when entering an element that establishes a relative frame, draw,
//!   and pop on the way out (or use [`Renderer::with_boundable`])
//! - Wrap the renderer in a [`MetricOverrideRenderer`] when the device reports metrics that
//!   text layout must not see (printers)
//!
//! Rasterisation is delegated to `vello_cpu`; this crate only mediates access to it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// CPU backend: bitmaps, surface, regions and paint.
pub mod render;
/// Renderer contract, boundable stack and renderer adapters.
pub mod renderer;

pub use crate::foundation::core::{Affine, BezPath, Color, NOMINAL_DPI, Point, Rect, Vec2};
pub use crate::foundation::error::{RenderError, RenderResult};

pub use crate::render::bitmap::Bitmap;
pub use crate::render::composite::CompositingMode;
pub use crate::render::paint::{Brush, FillRule, GraphicsPath, LineCap, LineJoin, Pen};
pub use crate::render::region::{CombineMode, Region};
pub use crate::render::settings::{
    CompositingQuality, PixelOffsetMode, SmoothingMode, SurfaceSettings, TextRenderingHint,
};
pub use crate::render::surface::{GraphicsUnit, MatrixOrder, Surface};
pub use crate::renderer::boundable::{Boundable, BoundableScope, BoundableStack};
pub use crate::renderer::metric_override::{
    FixedDpiRenderer, MetricOverrideRenderer, MetricOverrides,
};
pub use crate::renderer::svg_renderer::SvgRenderer;
pub use crate::renderer::{Renderer, SurfaceProvider};
