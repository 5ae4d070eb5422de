pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Reference resolution (device-independent pixels per inch) used by text layout.
///
/// Bitmaps report this resolution unless told otherwise.
pub const NOMINAL_DPI: f32 = 96.0;

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build a color from straight-alpha channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Premultiplied `[r, g, b, a]` bytes, the layout surfaces store.
    pub fn to_premul(self) -> [u8; 4] {
        let mut px = [self.r, self.g, self.b, self.a];
        crate::foundation::math::premultiply_rgba8_in_place(&mut px);
        px
    }

    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Return `true` when `v` is usable as a resolution or scale metric.
pub(crate) fn is_positive_metric(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
