//! Backend drawing surface and the value types it consumes.
//!
//! [`surface::Surface`] adapts a `vello_cpu` rasteriser to an immediate-mode surface over a
//! [`bitmap::Bitmap`].

/// Shared pixel buffers.
pub mod bitmap;
pub(crate) mod composite;
/// Paths, brushes and pens.
pub mod paint;
/// Clip regions.
pub mod region;
/// Per-surface quality settings.
pub mod settings;
/// CPU drawing surface.
pub mod surface;
