use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::foundation::core::{BezPath, Rect};
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::paint::GraphicsPath;
use crate::renderer::Renderer;

/// Anything that establishes a relative coordinate frame: a viewport, a shape's bounding box,
/// a pattern tile.
///
/// Percentage and `objectBoundingBox` geometry resolves against the innermost boundable on
/// the renderer's stack.
pub trait Boundable {
    /// Bounding rectangle in document units.
    fn bounds(&self) -> Rect;

    /// Outline of the element, when it has one.
    fn path(&self) -> Option<BezPath> {
        None
    }
}

impl Boundable for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

impl Boundable for GraphicsPath {
    fn bounds(&self) -> Rect {
        GraphicsPath::bounds(self)
    }

    fn path(&self) -> Option<BezPath> {
        Some(self.bez().clone())
    }
}

/// LIFO stack of boundable contexts.
///
/// Entries are shared references; ownership stays with the document model.
#[derive(Default)]
pub struct BoundableStack {
    items: Vec<Rc<dyn Boundable>>,
}

impl std::fmt::Debug for BoundableStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundableStack")
            .field("depth", &self.items.len())
            .finish()
    }
}

impl BoundableStack {
    /// Empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new innermost frame.
    pub fn push(&mut self, boundable: Rc<dyn Boundable>) {
        self.items.push(boundable);
        tracing::trace!(depth = self.items.len(), "push boundable");
    }

    /// Innermost boundable, without removing it.
    pub fn current(&self) -> RenderResult<Rc<dyn Boundable>> {
        self.items
            .last()
            .cloned()
            .ok_or_else(|| RenderError::empty_context("no boundable to query"))
    }

    /// Remove and return the innermost frame; `EmptyContext` when empty.
    pub fn pop(&mut self) -> RenderResult<Rc<dyn Boundable>> {
        let top = self
            .items
            .pop()
            .ok_or_else(|| RenderError::empty_context("no boundable to pop"))?;
        tracing::trace!(depth = self.items.len(), "pop boundable");
        Ok(top)
    }

    /// Number of frames on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` when no frame is pushed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Scoped boundable push: the boundable is popped when the scope is dropped.
///
/// Dereferences to the renderer so the subtree can draw through it.
pub struct BoundableScope<'r, R: Renderer + ?Sized> {
    renderer: &'r mut R,
    depth: usize,
}

impl<'r, R: Renderer + ?Sized> BoundableScope<'r, R> {
    /// Push `boundable` onto `renderer` until the scope drops.
    pub fn new(renderer: &'r mut R, boundable: Rc<dyn Boundable>) -> Self {
        renderer.push_boundable(boundable);
        let depth = renderer.boundable_depth();
        Self { renderer, depth }
    }
}

impl<R: Renderer + ?Sized> Deref for BoundableScope<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> DerefMut for BoundableScope<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> Drop for BoundableScope<'_, R> {
    fn drop(&mut self) {
        let leaked = self.renderer.boundable_depth().saturating_sub(self.depth);
        if leaked > 0 {
            tracing::warn!(leaked, depth = self.depth, "unbalanced boundable pushes unwound");
        }
        // Unwind anything the subtree left behind, then our own entry.
        while self.renderer.boundable_depth() >= self.depth {
            if self.renderer.pop_boundable().is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/renderer/boundable.rs"]
mod tests;
