use crate::foundation::core::{Affine, Point, Rect};
use crate::render::paint::GraphicsPath;

/// How a new clip region is merged with the active one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CombineMode {
    /// The new region replaces the active one.
    #[default]
    Replace,
    /// Keep the overlap of both.
    Intersect,
    /// Keep either.
    Union,
    /// Keep what is in exactly one of them.
    Xor,
    /// Active region minus the new one.
    Exclude,
    /// New region minus the active one.
    Complement,
}

#[derive(Clone, Debug, PartialEq)]
enum Node {
    Infinite,
    Empty,
    Path(GraphicsPath),
    Combine {
        mode: CombineMode,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
}

/// Area on the drawing plane, built from paths and boolean combinations.
///
/// Regions are kept symbolically; membership is answered per point by [`Region::contains`].
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    node: Node,
}

impl Default for Region {
    fn default() -> Self {
        Self::infinite()
    }
}

impl Region {
    /// The whole plane (no clipping).
    pub fn infinite() -> Self {
        Self {
            node: Node::Infinite,
        }
    }

    /// Contains nothing.
    pub fn empty() -> Self {
        Self { node: Node::Empty }
    }

    /// Region covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::from_path(&GraphicsPath::rect(rect))
    }

    /// Region covering the interior of `path` under its fill rule.
    pub fn from_path(path: &GraphicsPath) -> Self {
        Self {
            node: Node::Path(path.clone()),
        }
    }

    /// Return `true` when the region covers the whole plane.
    pub fn is_infinite(&self) -> bool {
        matches!(self.node, Node::Infinite)
    }

    /// Merge `other` into this region according to `mode`.
    pub fn combine(&self, other: &Region, mode: CombineMode) -> Region {
        use Node::{Empty, Infinite};

        let node = match (mode, &self.node, &other.node) {
            (CombineMode::Replace, _, b) => b.clone(),

            (CombineMode::Intersect, Empty, _) | (CombineMode::Intersect, _, Empty) => Empty,
            (CombineMode::Intersect, Infinite, b) => b.clone(),
            (CombineMode::Intersect, a, Infinite) => a.clone(),

            (CombineMode::Union, Infinite, _) | (CombineMode::Union, _, Infinite) => Infinite,
            (CombineMode::Union | CombineMode::Xor, Empty, b) => b.clone(),
            (CombineMode::Union | CombineMode::Xor, a, Empty) => a.clone(),

            (CombineMode::Exclude, Empty, _) | (CombineMode::Exclude, _, Infinite) => Empty,
            (CombineMode::Exclude, a, Empty) => a.clone(),

            (CombineMode::Complement, _, Empty) | (CombineMode::Complement, Infinite, _) => Empty,
            (CombineMode::Complement, Empty, b) => b.clone(),

            (mode, a, b) => Node::Combine {
                mode,
                lhs: Box::new(a.clone()),
                rhs: Box::new(b.clone()),
            },
        };
        Region { node }
    }

    /// Return `true` when `pt` lies inside the region.
    pub fn contains(&self, pt: Point) -> bool {
        self.node.contains(pt)
    }

    /// Map every outline through `affine`.
    pub fn transformed(&self, affine: Affine) -> Region {
        Region {
            node: self.node.transformed(affine),
        }
    }

    /// Conservative bounding box; `None` means unbounded.
    pub fn bounds(&self) -> Option<Rect> {
        self.node.bounds()
    }
}

impl Node {
    fn contains(&self, pt: Point) -> bool {
        match self {
            Node::Infinite => true,
            Node::Empty => false,
            Node::Path(p) => p.contains(pt),
            Node::Combine { mode, lhs, rhs } => {
                let (a, b) = (lhs.contains(pt), rhs.contains(pt));
                match mode {
                    CombineMode::Replace => b,
                    CombineMode::Intersect => a && b,
                    CombineMode::Union => a || b,
                    CombineMode::Xor => a ^ b,
                    CombineMode::Exclude => a && !b,
                    CombineMode::Complement => b && !a,
                }
            }
        }
    }

    fn transformed(&self, affine: Affine) -> Node {
        match self {
            Node::Infinite => Node::Infinite,
            Node::Empty => Node::Empty,
            Node::Path(p) => Node::Path(p.transformed(affine)),
            Node::Combine { mode, lhs, rhs } => Node::Combine {
                mode: *mode,
                lhs: Box::new(lhs.transformed(affine)),
                rhs: Box::new(rhs.transformed(affine)),
            },
        }
    }

    fn bounds(&self) -> Option<Rect> {
        match self {
            Node::Infinite => None,
            Node::Empty => Some(Rect::ZERO),
            Node::Path(p) => Some(p.bounds()),
            Node::Combine { mode, lhs, rhs } => match mode {
                CombineMode::Replace => rhs.bounds(),
                CombineMode::Intersect => match (lhs.bounds(), rhs.bounds()) {
                    (Some(a), Some(b)) => Some(a.intersect(b)),
                    (Some(a), None) => Some(a),
                    (None, b) => b,
                },
                CombineMode::Union | CombineMode::Xor => {
                    Some(lhs.bounds()?.union(rhs.bounds()?))
                }
                CombineMode::Exclude => lhs.bounds(),
                CombineMode::Complement => rhs.bounds(),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/region.rs"]
mod tests;
