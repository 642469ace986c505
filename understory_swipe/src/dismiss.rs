// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismiss controller: a surface that swipes fully off either side to signal
//! removal.
//!
//! Dragging is unconstrained. On release the surface either settles back to
//! rest or slides one full width past its rest rect, and the
//! [`DismissListener`] hears about the dismissal as soon as it is committed.
//! A dismissed surface stays dismissed until the host lays it out again or
//! calls [`DismissController::reset`].

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect};

use crate::arbiter::{CapturePredicate, DragArbiter, DragPhase, DragPolicy};
use crate::command::CommandOutcome;
use crate::config::{ArbiterConfig, ConfigError};
use crate::event::TouchEvent;
use crate::geometry::{Edge, SwipeLayout, dismiss_target};
use crate::settle::SettleStatus;

/// Lifecycle of a dismissible surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DismissState {
    /// At, or returning to, rest.
    #[default]
    Resting,
    /// Committed to leaving past `Edge`.
    Dismissed(Edge),
}

/// Construction-time settings for a [`DismissController`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DismissConfig {
    /// Gesture thresholds.
    pub arbiter: ArbiterConfig,
}

/// Receives dismissals from a [`DismissController`].
pub trait DismissListener {
    /// The surface was committed to leaving; fired once per dismissal,
    /// before the slide-out finishes.
    fn on_dismiss(&mut self);
}

/// Where a released surface should settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissDecision {
    /// Back to rest.
    Close,
    /// Off past the given edge.
    Dismiss(Edge),
}

/// Picks the outcome for a surface released at `released`.
///
/// A surface left of rest is dismissed left when moving left or when its
/// right edge is within the first half of the rest width; otherwise one is
/// dismissed right when moving right or when its left edge has reached
/// half the rest width.
#[must_use]
pub fn decide_dismiss_release(released: Rect, x_velocity: f64, rest: Rect) -> DismissDecision {
    let half_width = rest.width() / 2.0;
    if released.x0 < rest.x0 {
        if x_velocity < 0.0 || released.x1 <= half_width {
            return DismissDecision::Dismiss(Edge::Left);
        }
    } else if x_velocity > 0.0 || released.x0 >= half_width {
        return DismissDecision::Dismiss(Edge::Right);
    }
    DismissDecision::Close
}

struct DismissPolicy {
    rest: Option<Rect>,
    state: DismissState,
    listener: Option<Box<dyn DismissListener>>,
}

impl fmt::Debug for DismissPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissPolicy")
            .field("rest", &self.rest)
            .field("state", &self.state)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl DismissPolicy {
    fn dismiss(&mut self, rest: Rect, edge: Edge) -> Point {
        self.state = DismissState::Dismissed(edge);
        log::debug!("dismissing past {edge:?}");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_dismiss();
        }
        dismiss_target(rest, edge)
    }
}

impl DragPolicy for DismissPolicy {
    fn clamp_horizontal(&self, proposed_left: f64) -> f64 {
        proposed_left
    }

    fn on_release(&mut self, released: Rect, x_velocity: f64) -> Option<Point> {
        let rest = self.rest?;
        let decision = decide_dismiss_release(released, x_velocity, rest);
        log::debug!("dismiss release at left={} -> {decision:?}", released.x0);
        Some(match decision {
            DismissDecision::Close => rest.origin(),
            DismissDecision::Dismiss(edge) => self.dismiss(rest, edge),
        })
    }
}

/// Swipe-to-dismiss state machine for one surface.
#[derive(Debug)]
pub struct DismissController<P = u64> {
    arbiter: DragArbiter<P>,
    policy: DismissPolicy,
}

impl<P: Copy + PartialEq> DismissController<P> {
    /// Creates a resting controller with no surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the arbiter thresholds are invalid.
    pub fn new(config: DismissConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            arbiter: DragArbiter::new(config.arbiter)?,
            policy: DismissPolicy {
                rest: None,
                state: DismissState::Resting,
                listener: None,
            },
        })
    }

    /// Installs or removes the dismiss listener.
    pub fn set_listener(&mut self, listener: Option<Box<dyn DismissListener>>) {
        self.policy.listener = listener;
    }

    /// Replaces the arbiter's capture predicate.
    pub fn set_capture_predicate(&mut self, capture: CapturePredicate) {
        self.arbiter.set_capture_predicate(capture);
    }

    /// Applies a layout pass: the controller returns to
    /// [`DismissState::Resting`] and the surface to rest, unless a drag is
    /// captured, in which case the drag continues from where it is.
    pub fn layout(&mut self, layout: &SwipeLayout) {
        self.policy.rest = layout.surface;
        self.policy.state = DismissState::Resting;
        self.arbiter.set_drag_range(layout.container.width());
        self.arbiter.relayout(self.policy.rest, &self.policy);
    }

    /// Puts the surface back at rest without animating.
    pub fn reset(&mut self) {
        self.policy.state = DismissState::Resting;
        self.arbiter.place_surface(self.policy.rest);
    }

    /// Resting bounds from the last layout pass.
    #[must_use]
    pub fn rest_rect(&self) -> Option<Rect> {
        self.policy.rest
    }

    /// Current surface bounds.
    #[must_use]
    pub fn surface_rect(&self) -> Option<Rect> {
        self.arbiter.surface_rect()
    }

    /// See [`DragArbiter::should_intercept`]. A dismissed surface never
    /// intercepts.
    pub fn should_intercept(&mut self, event: &TouchEvent<P>) -> bool {
        if self.is_dismissed() {
            return false;
        }
        self.arbiter.should_intercept(event, &self.policy)
    }

    /// See [`DragArbiter::on_touch`]. Events reaching a dismissed surface
    /// are consumed without effect.
    pub fn on_touch(&mut self, event: &TouchEvent<P>) -> bool {
        if self.is_dismissed() {
            return true;
        }
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

    /// Dismisses past `edge` without a gesture, notifying the listener.
    pub fn dismiss(&mut self, edge: Edge) -> CommandOutcome {
        let Some(rest) = self.policy.rest else {
            return CommandOutcome::NoSurface;
        };
        if self.is_dismissed() {
            return CommandOutcome::AlreadyInState;
        }
        let target = self.policy.dismiss(rest, edge);
        self.arbiter.settle_to(target);
        CommandOutcome::Applied
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DismissState {
        self.policy.state
    }

    /// Returns `true` once a dismissal has been committed.
    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        matches!(self.policy.state, DismissState::Dismissed(_))
    }
}
