use crate::foundation::core::Vec2;

/// Anti-aliasing hint for path rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SmoothingMode {
    /// Backend default (aliased).
    #[default]
    Default,
    /// Favor speed (aliased).
    HighSpeed,
    /// Anti-aliased.
    HighQuality,
    /// Aliased.
    None,
    /// Anti-aliased.
    AntiAlias,
}

impl SmoothingMode {
    /// Return `true` when edges keep partial coverage.
    pub fn is_antialiased(self) -> bool {
        matches!(self, SmoothingMode::HighQuality | SmoothingMode::AntiAlias)
    }
}

/// Where pixel centres sit relative to integer coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelOffsetMode {
    /// Pixel centres at integer coordinates.
    #[default]
    Default,
    /// Same as `Default`.
    HighSpeed,
    /// Same as `Half`.
    HighQuality,
    /// Same as `Default`.
    None,
    /// Pixel centres at half-integer coordinates.
    Half,
}

impl PixelOffsetMode {
    /// Shift applied in device space so integer coordinates land where this mode expects.
    pub(crate) fn device_offset(self) -> Vec2 {
        match self {
            PixelOffsetMode::HighQuality | PixelOffsetMode::Half => Vec2::ZERO,
            PixelOffsetMode::Default | PixelOffsetMode::HighSpeed | PixelOffsetMode::None => {
                Vec2::new(0.5, 0.5)
            }
        }
    }
}

/// Glyph rasterisation hint consumed by the text layout layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TextRenderingHint {
    /// Whatever the host text stack prefers.
    #[default]
    SystemDefault,
    /// Aliased glyphs with hinting.
    SingleBitPerPixelGridFit,
    /// Aliased glyphs without hinting.
    SingleBitPerPixel,
    /// Anti-aliased glyphs with hinting.
    AntiAliasGridFit,
    /// Anti-aliased glyphs without hinting.
    AntiAlias,
    /// Subpixel glyphs with hinting.
    ClearTypeGridFit,
}

/// Blending quality requested from the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CompositingQuality {
    /// Backend default.
    #[default]
    Default,
    /// Favor speed.
    HighSpeed,
    /// Favor quality.
    HighQuality,
    /// Blend in gamma-corrected space.
    GammaCorrected,
    /// Blend assuming linear values.
    AssumeLinear,
}

/// Surface configuration that is fixed per output target rather than per draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Glyph rasterisation hint.
    pub text_rendering_hint: TextRenderingHint,
    /// Pixel centre convention.
    pub pixel_offset_mode: PixelOffsetMode,
    /// Blending quality.
    pub compositing_quality: CompositingQuality,
    /// Gamma correction level for anti-aliased text, 0..=12.
    pub text_contrast: u32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            text_rendering_hint: TextRenderingHint::default(),
            pixel_offset_mode: PixelOffsetMode::default(),
            compositing_quality: CompositingQuality::default(),
            text_contrast: 4,
        }
    }
}

impl SurfaceSettings {
    /// Preset for in-memory image targets: anti-aliased text, half-pixel offset sampling and
    /// high-quality compositing.
    pub fn high_quality() -> Self {
        Self {
            text_rendering_hint: TextRenderingHint::AntiAlias,
            pixel_offset_mode: PixelOffsetMode::Half,
            compositing_quality: CompositingQuality::HighQuality,
            text_contrast: 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
