// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag arbiter: owns one horizontally draggable surface and turns a pointer
//! stream into clamped drags, release decisions and settle animations.
//!
//! ## Usage
//!
//! 1) After every layout pass, place the surface with
//!    [`DragArbiter::place_surface`] and set the drag range.
//! 2) Ask [`DragArbiter::should_intercept`] before descendants see an event;
//!    once it returns `true`, route the rest of the gesture to
//!    [`DragArbiter::on_touch`].
//! 3) While [`DragArbiter::tick`] returns [`SettleStatus::StillSettling`],
//!    call it again on the next frame.
//!
//! Clamping and release decisions belong to the owner, supplied as a
//! [`DragPolicy`].

use kurbo::{Point, Rect, Vec2};

use crate::config::{ArbiterConfig, ConfigError};
use crate::drag::DragState;
use crate::event::{TouchEvent, TouchPoint};
use crate::settle::{Settle, SettleStatus};
use crate::velocity::VelocityTracker1D;

/// Horizontal clamp and release rules for a dragged surface.
pub trait DragPolicy {
    /// Restricts a proposed left coordinate to the legal range.
    fn clamp_horizontal(&self, proposed_left: f64) -> f64;

    /// Decides where a released surface settles.
    ///
    /// `released` is the surface's bounds at release and `x_velocity` the
    /// horizontal release speed in logical pixels per second (zero below the
    /// minimum fling velocity). Returns the origin to settle to, or `None`
    /// to leave the surface where it is.
    fn on_release(&mut self, released: Rect, x_velocity: f64) -> Option<Point>;
}

/// Predicate deciding whether a pointer at a point may capture the surface.
pub type CapturePredicate = fn(surface: Rect, point: Point) -> bool;

/// Default capture predicate: the point lies within the surface's bounds.
#[must_use]
pub fn hits_surface(surface: Rect, point: Point) -> bool {
    surface.contains(point)
}

/// What the arbiter is doing with its surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// Nothing is moving the surface.
    Idle,
    /// A captured pointer is dragging the surface.
    Dragging,
    /// The surface is animating toward a commanded position.
    Settling,
}

/// Mediates between a multi-pointer event stream and one surface that moves
/// along the horizontal axis.
#[derive(Clone, Debug)]
pub struct DragArbiter<P = u64> {
    config: ArbiterConfig,
    capture: CapturePredicate,
    surface: Option<Rect>,
    drag_range: f64,
    drag: DragState<P>,
    captured: bool,
    velocity: VelocityTracker1D,
    settle: Settle,
}

impl<P: Copy + PartialEq> DragArbiter<P> {
    /// Creates an arbiter without a surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`ArbiterConfig::validate`].
    pub fn new(config: ArbiterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validate()?,
            capture: hits_surface,
            surface: None,
            drag_range: 0.0,
            drag: DragState::default(),
            captured: false,
            velocity: VelocityTracker1D::default(),
            settle: Settle::Idle,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    /// Replaces the capture predicate (default [`hits_surface`]).
    pub fn set_capture_predicate(&mut self, capture: CapturePredicate) {
        self.capture = capture;
    }

    /// Places the surface at `rect`, or detaches it.
    ///
    /// Any drag or settle in progress is dropped.
    pub fn place_surface(&mut self, rect: Option<Rect>) {
        self.surface = rect;
        self.reset_gesture();
        self.settle = Settle::Idle;
    }

    /// Applies a new layout rect for the surface.
    ///
    /// While a drag is captured the surface takes `rect`'s size and vertical
    /// position but keeps its dragged left edge, re-clamped by `policy`, and
    /// the gesture continues. Otherwise this is [`DragArbiter::place_surface`].
    pub fn relayout(&mut self, rect: Option<Rect>, policy: &impl DragPolicy) {
        match (self.captured, self.surface, rect) {
            (true, Some(current), Some(laid_out)) => {
                let left = policy.clamp_horizontal(current.x0);
                log::debug!("relayout during drag, left {} -> {left}", current.x0);
                self.surface = Some(laid_out.with_origin(Point::new(left, laid_out.y0)));
            }
            _ => self.place_surface(rect),
        }
    }

    /// Sets the horizontal range used to scale settle durations, typically
    /// the container width.
    pub fn set_drag_range(&mut self, range: f64) {
        self.drag_range = range;
    }

    /// Current bounds of the surface.
    #[must_use]
    pub fn surface_rect(&self) -> Option<Rect> {
        self.surface
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.captured {
            DragPhase::Dragging
        } else if self.settle.is_settling() {
            DragPhase::Settling
        } else {
            DragPhase::Idle
        }
    }

    /// Origin the surface is settling toward, if any.
    #[must_use]
    pub fn settle_target(&self) -> Option<Point> {
        self.settle.target()
    }

    /// Decides whether this arbiter takes the gesture away from descendants.
    ///
    /// - A down on a settling surface captures immediately.
    /// - Otherwise a down is only remembered; the gesture is captured once
    ///   the same pointer travels more than the touch slop horizontally in a
    ///   direction `policy` allows the surface to move.
    pub fn should_intercept(&mut self, event: &TouchEvent<P>, policy: &impl DragPolicy) -> bool {
        if self.captured {
            return true;
        }
        let Some(surface) = self.surface else {
            return false;
        };
        match event {
            TouchEvent::Down(point) => {
                self.begin_tracking(point);
                if !(self.capture)(surface, point.position) {
                    self.reset_gesture();
                    return false;
                }
                if self.settle.is_settling() {
                    self.capture_surface();
                    return true;
                }
                false
            }
            TouchEvent::Move(point) => self.try_capture_past_slop(surface, point, policy),
            TouchEvent::Up(_) | TouchEvent::Cancel => {
                self.reset_gesture();
                false
            }
        }
    }

    /// Consumes an event of a gesture this arbiter owns.
    ///
    /// Always returns `true`. On release (or cancel) of a captured drag,
    /// `policy` picks the settle target.
    pub fn on_touch(&mut self, event: &TouchEvent<P>, policy: &mut impl DragPolicy) -> bool {
        let Some(surface) = self.surface else {
            return true;
        };
        match event {
            TouchEvent::Down(point) => {
                // A new gesture may not start until the current one ends.
                if self.captured {
                    return true;
                }
                self.begin_tracking(point);
                if (self.capture)(surface, point.position) {
                    self.capture_surface();
                } else {
                    self.reset_gesture();
                }
            }
            TouchEvent::Move(point) => {
                if !self.captured {
                    self.try_capture_past_slop(surface, point, &*policy);
                    return true;
                }
                if let Some(delta) = self.drag.update(point.pointer, point.position) {
                    self.velocity.add(point.time_ms, point.position.x);
                    self.drag_by(delta, &*policy);
                }
            }
            TouchEvent::Up(point) => {
                if !self.drag.is_active_pointer(point.pointer) {
                    return true;
                }
                if self.captured {
                    self.velocity.add(point.time_ms, point.position.x);
                    let x_velocity = self.velocity.velocity_clamped(
                        self.config.min_fling_velocity,
                        self.config.max_fling_velocity,
                    );
                    self.release(x_velocity, policy);
                } else {
                    self.reset_gesture();
                }
            }
            TouchEvent::Cancel => {
                if self.captured {
                    self.release(0.0, policy);
                } else {
                    self.reset_gesture();
                }
            }
        }
        true
    }

    /// Starts sliding the surface toward `target`.
    ///
    /// Non-blocking: progress is made by [`DragArbiter::tick`]. Ends any drag
    /// in progress. Returns `true` if an animation is now running; settling
    /// to the current position, or without a surface, returns `false`.
    pub fn settle_to(&mut self, target: Point) -> bool {
        let Some(surface) = self.surface else {
            return false;
        };
        self.reset_gesture();
        self.settle = Settle::start(surface.origin(), target, self.drag_range);
        if self.settle.is_settling() {
            log::debug!("settling from {:?} to {target:?}", surface.origin());
        }
        self.settle.is_settling()
    }

    /// Advances the settle animation by `dt_ms` milliseconds.
    ///
    /// Once this returns [`SettleStatus::Idle`] the surface is exactly at its
    /// target and no further ticks are needed.
    pub fn tick(&mut self, dt_ms: f64) -> SettleStatus {
        let Some(origin) = self.settle.advance(dt_ms) else {
            return SettleStatus::Idle;
        };
        if let Some(surface) = self.surface {
            self.surface = Some(surface.with_origin(origin));
        }
        if self.settle.is_settling() {
            SettleStatus::StillSettling
        } else {
            log::debug!("settled at {origin:?}");
            SettleStatus::Idle
        }
    }

    /// Stops any drag or settle; a settling surface jumps to its target.
    pub fn abort(&mut self) {
        self.reset_gesture();
        if let (Some(target), Some(surface)) = (self.settle.target(), self.surface) {
            self.surface = Some(surface.with_origin(target));
        }
        self.settle = Settle::Idle;
    }

    fn begin_tracking(&mut self, point: &TouchPoint<P>) {
        self.drag.start(point.pointer, point.position);
        self.velocity.reset();
        self.velocity.add(point.time_ms, point.position.x);
    }

    fn try_capture_past_slop(
        &mut self,
        surface: Rect,
        point: &TouchPoint<P>,
        policy: &impl DragPolicy,
    ) -> bool {
        if !self.drag.is_tracking() {
            return false;
        }
        let Some(offset) = self.drag.total_offset(point.pointer, point.position) else {
            return false;
        };
        self.drag.update(point.pointer, point.position);
        self.velocity.add(point.time_ms, point.position.x);
        if offset.x.abs() <= self.config.touch_slop || !(self.capture)(surface, point.position) {
            return false;
        }
        // Leave the gesture to others if the surface cannot move this way.
        if policy.clamp_horizontal(surface.x0 + offset.x) == surface.x0 {
            return false;
        }
        self.capture_surface();
        true
    }

    fn capture_surface(&mut self) {
        if self.settle.is_settling() {
            log::debug!("capture interrupted a settle");
        }
        self.settle = Settle::Idle;
        self.captured = true;
        log::debug!("captured surface {:?}", self.surface);
    }

    fn drag_by(&mut self, delta: Vec2, policy: &impl DragPolicy) {
        let Some(surface) = self.surface else {
            return;
        };
        let left = policy.clamp_horizontal(surface.x0 + delta.x);
        let moved = surface + Vec2::new(left - surface.x0, delta.y);
        // Feed the vertical delta back so the surface stays on its track.
        let corrected = moved - Vec2::new(0.0, moved.y0 - surface.y0);
        log::trace!("drag to left={left} (proposed {})", surface.x0 + delta.x);
        self.surface = Some(corrected);
    }

    fn release(&mut self, x_velocity: f64, policy: &mut impl DragPolicy) {
        self.reset_gesture();
        let Some(surface) = self.surface else {
            return;
        };
        log::debug!("released at left={} with x velocity {x_velocity}", surface.x0);
        if let Some(target) = policy.on_release(surface, x_velocity) {
            self.settle_to(target);
        }
    }

    fn reset_gesture(&mut self) {
        self.captured = false;
        self.drag.end();
        self.velocity.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Free horizontal drag that settles back to `home` on release.
    struct Spring {
        home: Point,
        releases: usize,
        last_velocity: Option<f64>,
    }

    impl Spring {
        fn new() -> Self {
            Self {
                home: Point::ZERO,
                releases: 0,
                last_velocity: None,
            }
        }
    }

    impl DragPolicy for Spring {
        fn clamp_horizontal(&self, proposed_left: f64) -> f64 {
            proposed_left
        }

        fn on_release(&mut self, _released: Rect, x_velocity: f64) -> Option<Point> {
            self.releases += 1;
            self.last_velocity = Some(x_velocity);
            Some(self.home)
        }
    }

    /// Only allows the surface to move left of zero.
    struct LeftOnly;

    impl DragPolicy for LeftOnly {
        fn clamp_horizontal(&self, proposed_left: f64) -> f64 {
            proposed_left.min(0.0)
        }

        fn on_release(&mut self, _released: Rect, _x_velocity: f64) -> Option<Point> {
            None
        }
    }

    fn arbiter() -> DragArbiter {
        let mut arbiter = DragArbiter::new(ArbiterConfig::new()).unwrap();
        arbiter.place_surface(Some(Rect::new(0.0, 0.0, 100.0, 40.0)));
        arbiter.set_drag_range(100.0);
        arbiter
    }

    fn settle_fully(arbiter: &mut DragArbiter) {
        while arbiter.tick(16.0) == SettleStatus::StillSettling {}
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ArbiterConfig::new().with_touch_slop(f64::NAN);
        assert!(DragArbiter::<u64>::new(config).is_err());
    }

    #[test]
    fn down_outside_surface_is_not_captured() {
        let mut arbiter = arbiter();
        let mut policy = Spring::new();
        arbiter.on_touch(&TouchEvent::down(0, Point::new(150.0, 10.0), 0), &mut policy);
        assert_eq!(arbiter.phase(), DragPhase::Idle);

        arbiter.on_touch(&TouchEvent::moved(0, Point::new(100.0, 10.0), 10), &mut policy);
        assert_eq!(arbiter.surface_rect().unwrap().x0, 0.0);
    }

    #[test]
    fn drag_applies_clamped_horizontal_delta() {
        let mut arbiter = arbiter();
        let mut policy = LeftOnly;
        assert!(arbiter.on_touch(&TouchEvent::down(0, Point::new(50.0, 10.0), 0), &mut policy));
        assert_eq!(arbiter.phase(), DragPhase::Dragging);

        arbiter.on_touch(&TouchEvent::moved(0, Point::new(20.0, 10.0), 10), &mut policy);
        assert_eq!(arbiter.surface_rect().unwrap().x0, -30.0);

        // Moving right past zero is clamped.
        arbiter.on_touch(&TouchEvent::moved(0, Point::new(90.0, 10.0), 20), &mut policy);
        assert_eq!(arbiter.surface_rect().unwrap().x0, 0.0);
    }

    #[test]
    fn vertical_motion_does_not_drift_the_surface() {
        let mut arbiter = arbiter();
        let mut policy = Spring::new();
        arbiter.on_touch(&TouchEvent::down(0, Point::new(50.0, 10.0), 0), &mut policy);
        arbiter.on_touch(&TouchEvent::moved(0, Point::new(40.0, 30.0), 10), &mut policy);
        arbiter.on_touch(&TouchEvent::moved(0, Point::new(30.0, -5.0), 20), &mut policy);

        let rect = arbiter.surface_rect().unwrap();
        assert_eq!(rect, Rect::new(-20.0, 0.0, 80.0, 40.0));
    }

    #[test]
    fn other_pointers_do_not_move_the_surface() {
        let mut arbiter = arbiter();
        let mut policy = Spring::new();
        arbiter.on_touch(&TouchEvent::down(1, Point::new(50.0, 10.0), 0), &mut policy);
        arbiter.on_touch(&TouchEvent::moved(2, Point::new(0.0, 10.0), 10), &mut policy);
        arbiter.on_touch(&TouchEvent::up(2, Point::new(0.0, 10.0), 20), &mut policy);

        assert_eq!(arbiter.phase(), DragPhase::Dragging);
        assert_eq!(arbiter.surface_rect().unwrap().x0, 0.0);
        assert_eq!(policy.releases, 0);
    }

    #[test]
    fn second_down_during_gesture_is_ignored() {
        let mut arbiter = arbiter();
        let mut policy = Spring::new();
        arbiter.on_touch(&TouchEvent::down(1, Point::new(50.0, 10.0), 0), &mut policy);
        arbiter.on_touch(&TouchEvent::down(2, Point::new(60.0, 10.0), 5), &mut policy);
        arbiter.on_touch(&TouchEvent::moved(1, Point::new(40.0, 10.0), 10), &mut policy);

        assert_eq!(arbiter.surface_rect().unwrap().x0, -10.0);
    }

    #[test]
    fn slow_release_reports_zero_velocity_and_settles() {
        let mut arbiter = arbiter();
        let mut policy = Spring::new();
        arbiter.on_touch(&TouchEvent::down(0, Point::new(50.0, 10.0), 0), &mut policy);
        // 1 px per 10 ms = 100 px/s, under the 400 px/s minimum.
        arbiter.on_touch(&TouchEvent::moved(0, Point::new(49.0, 10.0), 10), &mut policy);
        arbiter.on_touch(&TouchEvent::moved(0, Point::new(48.0, 10.0), 20), &mut policy);
        arbiter.on_touch(&TouchEvent::up(0, Point::new(48.0, 10.0), 20), &mut policy);

        assert_eq!(policy.releases, 1);
        assert_eq!(policy.last_velocity, Some(0.0));
        assert_eq!(arbiter.phase(), DragPhase::Settling);

        settle_fully(&mut arbiter);
        assert_eq!(arbiter.phase(), DragPhase::Idle);
        assert_eq!(arbiter.surface_rect().unwrap().origin(), Point::ZERO);
    }

    #[test]
    fn fast_release_reports_signed_velocity() {
        let mut arbiter = arbiter();
        let mut policy = Spring::new();
        arbiter.on_touch(&TouchEvent::down(0, Point::new(90.0, 10.0), 0), &mut policy);
        arbiter.on_touch(&TouchEvent::moved(0, Point::new(70.0, 10.0), 10), &mut policy);
        arbiter.on_touch(&TouchEvent::moved(0, Point::new(50.0, 10.0), 20), &mut policy);
        arbiter.on_touch(&TouchEvent::up(0, Point::new(30.0, 10.0), 30), &mut policy);

        let velocity = policy.last_velocity.unwrap();
        assert!(velocity <= -400.0, "expected a leftward fling, got {velocity}");
    }

    #[test]
    fn cancel_releases_with_zero_velocity() {
        let mut arbiter = arbiter();
        let mut policy = Spring::new();
        arbiter.on_touch(&TouchEvent::down(0, Point::new(90.0, 10.0), 0), &mut policy);
        arbiter.on_touch(&TouchEvent::moved(0, Point::new(40.0, 10.0), 10), &mut policy);
        arbiter.on_touch(&TouchEvent::Cancel, &mut policy);

        assert_eq!(policy.releases, 1);
        assert_eq!(policy.last_velocity, Some(0.0));
        assert_eq!(arbiter.settle_target(), Some(Point::ZERO));
    }

    #[test]
    fn intercept_waits_for_slop() {
        let mut arbiter = arbiter();
        let policy = Spring::new();
        assert!(!arbiter.should_intercept(&TouchEvent::down(0, Point::new(50.0, 10.0), 0), &policy));
        assert!(!arbiter.should_intercept(&TouchEvent::moved(0, Point::new(45.0, 10.0), 10), &policy));
        assert!(arbiter.should_intercept(&TouchEvent::moved(0, Point::new(40.0, 10.0), 20), &policy));
        assert_eq!(arbiter.phase(), DragPhase::Dragging);
        // Crossing the slop does not move the surface by itself.
        assert_eq!(arbiter.surface_rect().unwrap().x0, 0.0);
    }

    #[test]
    fn intercept_skips_directions_the_policy_forbids() {
        let mut arbiter = arbiter();
        let policy = LeftOnly;
        arbiter.should_intercept(&TouchEvent::down(0, Point::new(50.0, 10.0), 0), &policy);
        assert!(!arbiter.should_intercept(&TouchEvent::moved(0, Point::new(70.0, 10.0), 10), &policy));
        assert!(arbiter.should_intercept(&TouchEvent::moved(0, Point::new(30.0, 10.0), 20), &policy));
    }

    #[test]
    fn intercept_ignores_points_off_the_surface() {
        let mut arbiter = arbiter();
        let policy = Spring::new();
        assert!(!arbiter.should_intercept(&TouchEvent::down(0, Point::new(150.0, 10.0), 0), &policy));
        assert!(!arbiter.should_intercept(&TouchEvent::moved(0, Point::new(50.0, 10.0), 10), &policy));
    }

    #[test]
    fn down_on_settling_surface_captures_immediately() {
        let mut arbiter = arbiter();
        let policy = Spring::new();
        assert!(arbiter.settle_to(Point::new(-100.0, 0.0)));
        arbiter.tick(16.0);
        let mid = arbiter.surface_rect().unwrap();

        let down = TouchEvent::down(0, Point::new(mid.x0 + 10.0, 10.0), 0);
        assert!(arbiter.should_intercept(&down, &policy));
        assert_eq!(arbiter.phase(), DragPhase::Dragging);
        assert_eq!(arbiter.surface_rect(), Some(mid));
    }

    #[test]
    fn custom_capture_predicate() {
        fn left_half(surface: Rect, point: Point) -> bool {
            point.x < surface.center().x && surface.contains(point)
        }
        let mut arbiter = arbiter();
        arbiter.set_capture_predicate(left_half);
        let mut policy = Spring::new();

        arbiter.on_touch(&TouchEvent::down(0, Point::new(80.0, 10.0), 0), &mut policy);
        assert_eq!(arbiter.phase(), DragPhase::Idle);
        arbiter.on_touch(&TouchEvent::Cancel, &mut policy);
        arbiter.on_touch(&TouchEvent::down(0, Point::new(20.0, 10.0), 0), &mut policy);
        assert_eq!(arbiter.phase(), DragPhase::Dragging);
    }

    #[test]
    fn settle_to_current_position_is_a_no_op() {
        let mut arbiter = arbiter();
        assert!(!arbiter.settle_to(Point::ZERO));
        assert_eq!(arbiter.tick(16.0), SettleStatus::Idle);
    }

    #[test]
    fn abort_jumps_to_target() {
        let mut arbiter = arbiter();
        arbiter.settle_to(Point::new(-100.0, 0.0));
        arbiter.tick(16.0);
        arbiter.abort();

        assert_eq!(arbiter.phase(), DragPhase::Idle);
        assert_eq!(arbiter.surface_rect().unwrap().x0, -100.0);
    }

    #[test]
    fn relayout_keeps_a_captured_drag() {
        let mut arbiter = arbiter();
        let mut policy = LeftOnly;
        arbiter.on_touch(&TouchEvent::down(0, Point::new(50.0, 10.0), 0), &mut policy);
        arbiter.on_touch(&TouchEvent::moved(0, Point::new(20.0, 10.0), 16), &mut policy);

        arbiter.relayout(Some(Rect::new(0.0, 5.0, 80.0, 45.0)), &policy);
        assert_eq!(arbiter.phase(), DragPhase::Dragging);
        assert_eq!(arbiter.surface_rect(), Some(Rect::new(-30.0, 5.0, 50.0, 45.0)));

        arbiter.on_touch(&TouchEvent::moved(0, Point::new(10.0, 10.0), 32), &mut policy);
        assert_eq!(arbiter.surface_rect().unwrap().x0, -40.0);
    }

    #[test]
    fn relayout_snaps_a_settling_surface() {
        let mut arbiter = arbiter();
        assert!(arbiter.settle_to(Point::new(-60.0, 0.0)));
        arbiter.relayout(Some(Rect::new(0.0, 0.0, 100.0, 40.0)), &Spring::new());
        assert_eq!(arbiter.phase(), DragPhase::Idle);
        assert_eq!(arbiter.surface_rect(), Some(Rect::new(0.0, 0.0, 100.0, 40.0)));
    }

    #[test]
    fn without_surface_everything_is_inert() {
        let mut arbiter = DragArbiter::<u64>::new(ArbiterConfig::new()).unwrap();
        let mut policy = Spring::new();
        assert!(!arbiter.should_intercept(&TouchEvent::down(0, Point::ZERO, 0), &policy));
        assert!(arbiter.on_touch(&TouchEvent::down(0, Point::ZERO, 0), &mut policy));
        assert!(!arbiter.settle_to(Point::new(10.0, 0.0)));
        assert_eq!(arbiter.tick(16.0), SettleStatus::Idle);
        assert_eq!(arbiter.phase(), DragPhase::Idle);
    }
}
