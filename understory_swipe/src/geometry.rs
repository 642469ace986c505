// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rest and open rectangles for a swipeable surface.

use kurbo::{Point, Rect};

/// Horizontal edge a surface opens or is dismissed toward.
///
/// The edge names the side of the container the hidden content is revealed
/// from: opening from the [`Edge::Right`] slides the surface to the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The left side of the container.
    Left,
    /// The right side of the container.
    Right,
}

impl Edge {
    /// Returns the other edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Geometry snapshot supplied by the host on every layout pass.
///
/// All rectangles share the container's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeLayout {
    /// Bounds of the host container (after padding).
    pub container: Rect,
    /// Resting bounds of the swipeable surface, or `None` if the host could
    /// not resolve it during this pass.
    pub surface: Option<Rect>,
    /// Optional sibling whose right edge anchors the surface when it is open
    /// from the left.
    pub left_constraint: Option<Rect>,
    /// Optional sibling whose left edge anchors the surface when it is open
    /// from the right.
    pub right_constraint: Option<Rect>,
}

impl SwipeLayout {
    /// Creates a layout with a resolved surface and no constraint siblings.
    #[must_use]
    pub fn new(container: Rect, surface: Rect) -> Self {
        Self {
            container,
            surface: Some(surface),
            left_constraint: None,
            right_constraint: None,
        }
    }

    /// Creates a layout where the surface could not be resolved.
    #[must_use]
    pub fn without_surface(container: Rect) -> Self {
        Self {
            container,
            ..Self::default()
        }
    }

    /// Sets the sibling that bounds the surface when opened from the left.
    #[must_use]
    pub fn with_left_constraint(mut self, constraint: Rect) -> Self {
        self.left_constraint = Some(constraint);
        self
    }

    /// Sets the sibling that bounds the surface when opened from the right.
    #[must_use]
    pub fn with_right_constraint(mut self, constraint: Rect) -> Self {
        self.right_constraint = Some(constraint);
        self
    }
}

/// Rest and open rectangles derived from a [`SwipeLayout`].
///
/// Both open rectangles have the same size and vertical extent as
/// [`SwipeRects::rest`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeRects {
    /// Surface bounds when closed.
    pub rest: Rect,
    /// Surface bounds when open from the left edge.
    pub open_from_left: Rect,
    /// Surface bounds when open from the right edge.
    pub open_from_right: Rect,
}

impl SwipeRects {
    /// Computes the rectangles for a layout pass.
    ///
    /// Returns `None` when the layout has no surface.
    ///
    /// - Open from the right: the surface's right edge sits on the right
    ///   constraint's left edge, or on the container's left bound.
    /// - Open from the left: the surface's left edge sits on the left
    ///   constraint's right edge, or on the container's right bound.
    #[must_use]
    pub fn from_layout(layout: &SwipeLayout) -> Option<Self> {
        let rest = layout.surface?;
        let width = rest.width();
        let right_limit = layout
            .right_constraint
            .map_or(layout.container.x0, |c| c.x0);
        let left_limit = layout
            .left_constraint
            .map_or(layout.container.x1, |c| c.x1);
        Some(Self {
            rest,
            open_from_left: Rect::new(left_limit, rest.y0, left_limit + width, rest.y1),
            open_from_right: Rect::new(right_limit - width, rest.y0, right_limit, rest.y1),
        })
    }

    /// Returns the open rectangle for `edge`.
    #[must_use]
    pub fn open_rect(&self, edge: Edge) -> Rect {
        match edge {
            Edge::Left => self.open_from_left,
            Edge::Right => self.open_from_right,
        }
    }

    /// Returns the rectangle the surface belongs at for an opened edge
    /// (`None` meaning closed).
    #[must_use]
    pub fn rect_for(&self, opened: Option<Edge>) -> Rect {
        opened.map_or(self.rest, |edge| self.open_rect(edge))
    }

    /// Left coordinate halfway between rest and open-from-left.
    ///
    /// A released surface whose left edge reaches this value has crossed
    /// half of the way open.
    #[must_use]
    pub fn left_open_midpoint(&self) -> f64 {
        self.rest.x0 + (self.open_from_left.x0 - self.rest.x0) / 2.0
    }

    /// Right coordinate halfway between open-from-right and rest.
    #[must_use]
    pub fn right_open_midpoint(&self) -> f64 {
        self.open_from_right.x1 + (self.rest.x1 - self.open_from_right.x1) / 2.0
    }
}

/// Origin that places `rest` fully past `edge`, offset by exactly its width.
#[must_use]
pub fn dismiss_target(rest: Rect, edge: Edge) -> Point {
    match edge {
        Edge::Left => Point::new(rest.x0 - rest.width(), rest.y0),
        Edge::Right => Point::new(rest.x1, rest.y0),
    }
}
