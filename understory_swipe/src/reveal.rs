// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal controller: a surface that swipes open to uncover content behind
//! it and closes back to rest.
//!
//! The controller tracks which edge the surface is open from
//! ([`RevealController::opened_edge`]). That state changes the moment a
//! settle toward a new rect is issued, not when the animation finishes.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect};

use crate::arbiter::{CapturePredicate, DragArbiter, DragPhase, DragPolicy};
use crate::command::CommandOutcome;
use crate::config::{ArbiterConfig, ConfigError};
use crate::event::TouchEvent;
use crate::geometry::{Edge, SwipeLayout, SwipeRects};
use crate::settle::SettleStatus;

/// Which edges a [`RevealController`] may open from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwipeMode {
    /// Only from the right edge; the surface slides left.
    #[default]
    RightEdgeOnly,
    /// Only from the left edge; the surface slides right.
    LeftEdgeOnly,
    /// From either edge.
    BothEdges,
}

impl SwipeMode {
    /// Edge used by [`RevealController::open`].
    #[must_use]
    pub const fn default_edge(self) -> Edge {
        match self {
            Self::LeftEdgeOnly => Edge::Left,
            Self::RightEdgeOnly | Self::BothEdges => Edge::Right,
        }
    }

    /// Returns `true` if the surface may open from `edge`.
    #[must_use]
    pub const fn allows(self, edge: Edge) -> bool {
        matches!(
            (self, edge),
            (Self::BothEdges, _)
                | (Self::RightEdgeOnly, Edge::Right)
                | (Self::LeftEdgeOnly, Edge::Left)
        )
    }
}

/// Construction-time settings for a [`RevealController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Allowed edges.
    pub mode: SwipeMode,
    /// Whether the surface may be dragged beyond its open rect.
    pub allow_overswipe: bool,
    /// Gesture thresholds.
    pub arbiter: ArbiterConfig,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealConfig {
    /// Right-edge reveal with overswipe allowed and default thresholds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: SwipeMode::RightEdgeOnly,
            allow_overswipe: true,
            arbiter: ArbiterConfig::new(),
        }
    }

    /// Sets the swipe mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: SwipeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether overswipe is allowed.
    #[must_use]
    pub const fn with_allow_overswipe(mut self, allow: bool) -> Self {
        self.allow_overswipe = allow;
        self
    }

    /// Sets the gesture thresholds.
    #[must_use]
    pub const fn with_arbiter(mut self, arbiter: ArbiterConfig) -> Self {
        self.arbiter = arbiter;
        self
    }
}

/// Receives open and close transitions of a [`RevealController`].
///
/// Each method is called once per actual change of the opened edge.
pub trait SwipeRevealListener {
    /// The surface started opening from `edge`.
    fn on_swipe_view_opened(&mut self, edge: Edge);

    /// The surface started closing.
    fn on_swipe_view_closed(&mut self);
}

/// Where a released surface should settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealDecision {
    /// Back to rest.
    Close,
    /// Open from the given edge.
    Open(Edge),
}

/// Restricts a proposed left coordinate for `mode`.
///
/// Without overswipe the surface stays between its rest rect and the open
/// rect(s); with overswipe it only may not move past rest away from any
/// allowed edge.
#[must_use]
pub fn clamp_reveal(
    proposed_left: f64,
    rects: &SwipeRects,
    mode: SwipeMode,
    allow_overswipe: bool,
) -> f64 {
    let rest = rects.rest.x0;
    match (mode, allow_overswipe) {
        (SwipeMode::RightEdgeOnly, true) => proposed_left.min(rest),
        (SwipeMode::RightEdgeOnly, false) => {
            bound(proposed_left, rects.open_from_right.x0, rest)
        }
        (SwipeMode::LeftEdgeOnly, true) => proposed_left.max(rest),
        (SwipeMode::LeftEdgeOnly, false) => bound(proposed_left, rest, rects.open_from_left.x0),
        (SwipeMode::BothEdges, true) => proposed_left,
        (SwipeMode::BothEdges, false) => bound(
            proposed_left,
            rects.open_from_right.x0,
            rects.open_from_left.x0,
        ),
    }
}

/// Like `f64::clamp`, but tolerates `min > max` (the upper bound wins).
fn bound(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Picks the settle state for a surface released at `released` moving at
/// `x_velocity` pixels per second.
///
/// 1. Moving back toward rest while open closes.
/// 2. Past halfway to an open rect, or moving toward it, opens. In
///    [`SwipeMode::BothEdges`] the left edge is checked first.
/// 3. Anything else closes.
#[must_use]
pub fn decide_reveal_release(
    released: Rect,
    x_velocity: f64,
    rects: &SwipeRects,
    mode: SwipeMode,
    opened: Option<Edge>,
) -> RevealDecision {
    let closing_from_left = opened == Some(Edge::Left) && x_velocity < 0.0;
    let closing_from_right = opened == Some(Edge::Right) && x_velocity > 0.0;
    let toward_left =
        mode.allows(Edge::Left) && (released.x0 >= rects.left_open_midpoint() || x_velocity > 0.0);
    let toward_right = mode.allows(Edge::Right)
        && (released.x1 <= rects.right_open_midpoint() || x_velocity < 0.0);

    if closing_from_left || closing_from_right {
        RevealDecision::Close
    } else if toward_left {
        RevealDecision::Open(Edge::Left)
    } else if toward_right {
        RevealDecision::Open(Edge::Right)
    } else {
        RevealDecision::Close
    }
}

/// Drag policy and opened-edge state shared with the arbiter.
struct RevealPolicy {
    mode: SwipeMode,
    allow_overswipe: bool,
    rects: Option<SwipeRects>,
    opened: Option<Edge>,
    listener: Option<Box<dyn SwipeRevealListener>>,
}

impl fmt::Debug for RevealPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealPolicy")
            .field("mode", &self.mode)
            .field("allow_overswipe", &self.allow_overswipe)
            .field("rects", &self.rects)
            .field("opened", &self.opened)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl RevealPolicy {
    fn open(&mut self, edge: Edge) -> CommandOutcome {
        if self.opened == Some(edge) {
            return CommandOutcome::AlreadyInState;
        }
        self.opened = Some(edge);
        log::debug!("opening from {edge:?}");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_swipe_view_opened(edge);
        }
        CommandOutcome::Applied
    }

    fn close(&mut self) -> CommandOutcome {
        if self.opened.take().is_none() {
            return CommandOutcome::AlreadyInState;
        }
        log::debug!("closing");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_swipe_view_closed();
        }
        CommandOutcome::Applied
    }
}

impl DragPolicy for RevealPolicy {
    fn clamp_horizontal(&self, proposed_left: f64) -> f64 {
        match &self.rects {
            Some(rects) => clamp_reveal(proposed_left, rects, self.mode, self.allow_overswipe),
            None => proposed_left,
        }
    }

    fn on_release(&mut self, released: Rect, x_velocity: f64) -> Option<Point> {
        let rects = self.rects?;
        let decision = decide_reveal_release(released, x_velocity, &rects, self.mode, self.opened);
        let (outcome, target) = match decision {
            RevealDecision::Close => (self.close(), rects.rest),
            RevealDecision::Open(edge) => (self.open(edge), rects.open_rect(edge)),
        };
        log::debug!(
            "reveal release at left={} -> {decision:?} ({outcome:?})",
            released.x0
        );
        Some(target.origin())
    }
}

/// Swipe-to-reveal state machine for one surface.
///
/// The host feeds layout passes, pointer events and frame ticks; the
/// controller moves the surface (read it back with
/// [`RevealController::surface_rect`]) and reports transitions to its
/// [`SwipeRevealListener`].
#[derive(Debug)]
pub struct RevealController<P = u64> {
    arbiter: DragArbiter<P>,
    policy: RevealPolicy,
}

impl<P: Copy + PartialEq> RevealController<P> {
    /// Creates a closed controller with no surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the arbiter thresholds are invalid.
    pub fn new(config: RevealConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            arbiter: DragArbiter::new(config.arbiter)?,
            policy: RevealPolicy {
                mode: config.mode,
                allow_overswipe: config.allow_overswipe,
                rects: None,
                opened: None,
                listener: None,
            },
        })
    }

    /// Installs or removes the transition listener.
    pub fn set_listener(&mut self, listener: Option<Box<dyn SwipeRevealListener>>) {
        self.policy.listener = listener;
    }

    /// Replaces the arbiter's capture predicate.
    pub fn set_capture_predicate(&mut self, capture: CapturePredicate) {
        self.arbiter.set_capture_predicate(capture);
    }

    /// Applies a layout pass.
    ///
    /// Recomputes the rest and open rects. An idle or settling surface is
    /// placed on the rect for the current opened edge, dropping the settle;
    /// a captured drag keeps its position, re-clamped to the new rects.
    pub fn layout(&mut self, layout: &SwipeLayout) {
        self.policy.rects = SwipeRects::from_layout(layout);
        let rect = self.policy.rects.map(|r| r.rect_for(self.policy.opened));
        self.arbiter.relayout(rect, &self.policy);
        self.arbiter.set_drag_range(layout.container.width());
    }

    /// Rects from the last layout pass.
    #[must_use]
    pub fn rects(&self) -> Option<&SwipeRects> {
        self.policy.rects.as_ref()
    }

    /// Current surface bounds.
    #[must_use]
    pub fn surface_rect(&self) -> Option<Rect> {
        self.arbiter.surface_rect()
    }

    /// See [`DragArbiter::should_intercept`].
    pub fn should_intercept(&mut self, event: &TouchEvent<P>) -> bool {
        self.arbiter.should_intercept(event, &self.policy)
    }

    /// See [`DragArbiter::on_touch`].
    pub fn on_touch(&mut self, event: &TouchEvent<P>) -> bool {
        self.arbiter.on_touch(event, &mut self.policy)
    }

    /// Advances any settle by `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: f64) -> SettleStatus {
        self.arbiter.tick(dt_ms)
    }

    /// Current drag phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.arbiter.phase()
    }

    /// Opens from the mode's default edge.
    pub fn open(&mut self) -> CommandOutcome {
        self.open_from(self.policy.mode.default_edge())
    }

    /// Opens from `edge`.
    ///
    /// Edges the mode does not allow are ignored without a settle. Opening
    /// from the edge that is already open re-issues the settle without
    /// notifying the listener.
    pub fn open_from(&mut self, edge: Edge) -> CommandOutcome {
        if !self.policy.mode.allows(edge) {
            log::debug!("open from {edge:?} ignored in {:?}", self.policy.mode);
            return CommandOutcome::IgnoredInvalidEdge;
        }
        let Some(rects) = self.policy.rects else {
            return CommandOutcome::NoSurface;
        };
        let outcome = self.policy.open(edge);
        self.arbiter.settle_to(rects.open_rect(edge).origin());
        outcome
    }

    /// Closes back to rest.
    pub fn close(&mut self) -> CommandOutcome {
        let Some(rects) = self.policy.rects else {
            return CommandOutcome::NoSurface;
        };
        let outcome = self.policy.close();
        self.arbiter.settle_to(rects.rest.origin());
        outcome
    }

    /// Returns `true` if open, or opening, from either edge.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.policy.opened.is_some()
    }

    /// Returns `true` if open, or opening, from `edge`.
    #[must_use]
    pub fn is_open_from(&self, edge: Edge) -> bool {
        self.policy.opened == Some(edge)
    }

    /// Edge the surface is open (or opening) from.
    #[must_use]
    pub fn opened_edge(&self) -> Option<Edge> {
        self.policy.opened
    }

    /// Configured swipe mode.
    #[must_use]
    pub fn mode(&self) -> SwipeMode {
        self.policy.mode
    }

    /// Whether overswipe is allowed.
    #[must_use]
    pub fn allow_overswipe(&self) -> bool {
        self.policy.allow_overswipe
    }
}
