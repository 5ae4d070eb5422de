use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Color, Rect};
use crate::render::bitmap::Bitmap;

/// Interior rule used when filling or hit-testing a path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FillRule {
    /// Even-odd ("alternate") rule.
    #[default]
    EvenOdd,
    /// Non-zero winding rule.
    NonZero,
}

impl FillRule {
    pub(crate) fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::EvenOdd => winding % 2 != 0,
            FillRule::NonZero => winding != 0,
        }
    }

    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Fill {
        match self {
            FillRule::EvenOdd => vello_cpu::peniko::Fill::EvenOdd,
            FillRule::NonZero => vello_cpu::peniko::Fill::NonZero,
        }
    }
}

/// Geometric outline plus the fill rule it is meant to be filled with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphicsPath {
    path: BezPath,
    fill_rule: FillRule,
}

impl GraphicsPath {
    /// Empty path with the even-odd rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing kurbo path.
    pub fn from_bez(path: BezPath) -> Self {
        Self {
            path,
            fill_rule: FillRule::default(),
        }
    }

    /// Closed rectangle outline.
    pub fn rect(rect: Rect) -> Self {
        Self::from_bez(rect.to_path(0.1))
    }

    /// Return a copy using `fill_rule`.
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Underlying kurbo path.
    pub fn bez(&self) -> &BezPath {
        &self.path
    }

    /// Mutable access for incremental construction (`move_to`, `line_to`, ...).
    pub fn bez_mut(&mut self) -> &mut BezPath {
        &mut self.path
    }

    /// Fill rule used for filling and hit-testing.
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Tight bounding box of the outline.
    pub fn bounds(&self) -> Rect {
        self.path.bounding_box()
    }

    /// Hit-test `pt` against the interior using this path's fill rule.
    pub fn contains(&self, pt: kurbo::Point) -> bool {
        self.fill_rule.is_inside(self.path.winding(pt))
    }

    pub(crate) fn transformed(&self, affine: Affine) -> Self {
        Self {
            path: affine * self.path.clone(),
            fill_rule: self.fill_rule,
        }
    }
}

/// Fill style descriptor. Owned by the caller; the surface only reads it.
#[derive(Clone, Debug)]
pub enum Brush {
    /// Uniform color.
    Solid(Color),
    /// Tiled bitmap; `transform` maps bitmap pixels into user space.
    Texture {
        /// Source pixels.
        image: Bitmap,
        /// Bitmap-to-user-space transform.
        transform: Affine,
    },
}

impl From<Color> for Brush {
    fn from(c: Color) -> Self {
        Brush::Solid(c)
    }
}

/// Stroke join style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineJoin {
    /// Sharp corner, bevelled past the miter limit.
    #[default]
    Miter,
    /// Circular arc.
    Round,
    /// Corner cut straight across.
    Bevel,
}

/// Stroke end-cap style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineCap {
    /// Ends exactly at the endpoint.
    #[default]
    Flat,
    /// Extends half the width past the endpoint.
    Square,
    /// Half-disc around the endpoint.
    Round,
}

/// Stroke style descriptor.
#[derive(Clone, Debug)]
pub struct Pen {
    /// Paint used for the stroke area.
    pub brush: Brush,
    /// Stroke width in user units.
    pub width: f64,
    /// Corner style.
    pub join: LineJoin,
    /// End style for open subpaths.
    pub cap: LineCap,
    /// Ratio limit for miter joins.
    pub miter_limit: f64,
    /// Alternating dash/gap lengths in user units; empty means solid.
    pub dash_pattern: Vec<f64>,
    /// Distance into the dash pattern at which the stroke starts.
    pub dash_offset: f64,
}

impl Pen {
    /// Solid pen with default joins and caps.
    pub fn new(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
            join: LineJoin::default(),
            cap: LineCap::default(),
            miter_limit: 10.0,
            dash_pattern: Vec::new(),
            dash_offset: 0.0,
        }
    }

    pub(crate) fn to_cpu_stroke(&self) -> vello_cpu::kurbo::Stroke {
        let join = match self.join {
            LineJoin::Miter => vello_cpu::kurbo::Join::Miter,
            LineJoin::Round => vello_cpu::kurbo::Join::Round,
            LineJoin::Bevel => vello_cpu::kurbo::Join::Bevel,
        };
        let cap = match self.cap {
            LineCap::Flat => vello_cpu::kurbo::Cap::Butt,
            LineCap::Square => vello_cpu::kurbo::Cap::Square,
            LineCap::Round => vello_cpu::kurbo::Cap::Round,
        };
        let stroke = vello_cpu::kurbo::Stroke::new(self.width)
            .with_join(join)
            .with_caps(cap)
            .with_miter_limit(self.miter_limit);
        if self.dash_pattern.is_empty() {
            stroke
        } else {
            stroke.with_dashes(self.dash_offset, self.dash_pattern.iter().copied())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
