// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_swipe --heading-base-level=0

//! Understory Swipe: horizontal swipe-to-reveal and swipe-to-dismiss gesture
//! resolution.
//!
//! This crate decides, frame by frame, where a horizontally draggable surface
//! may move inside its container and, on release, which end state it settles
//! to. It does no rendering and reads no OS input; the host supplies
//! geometry, pointer events and frame ticks, and reads back the surface
//! rectangle.
//!
//! - **Arbiter** ([`DragArbiter`]): gesture capture, pointer tracking,
//!   release velocity and the settle animation, with clamping and release
//!   decisions delegated to a [`DragPolicy`].
//! - **Reveal** ([`RevealController`]): a surface that swipes open from the
//!   left, the right, or both edges to uncover content behind it, and closes
//!   back to rest. See [`SwipeMode`] and [`clamp_reveal`].
//! - **Dismiss** ([`DismissController`]): a surface that swipes fully off
//!   either side to signal removal.
//! - **Geometry** ([`SwipeLayout`], [`SwipeRects`]): rest and open rectangles
//!   recomputed on every layout pass.
//!
//! ## Quick Start
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_swipe::{
//!     Edge, RevealConfig, RevealController, SettleStatus, SwipeLayout, TouchEvent,
//! };
//!
//! let mut reveal = RevealController::<u64>::new(RevealConfig::new()).unwrap();
//!
//! // A 320 px row with 96 px of actions behind its right end.
//! let row = Rect::new(0.0, 0.0, 320.0, 56.0);
//! let actions = Rect::new(224.0, 0.0, 320.0, 56.0);
//! reveal.layout(&SwipeLayout::new(row, row).with_right_constraint(actions));
//!
//! // Drag left by 100 px, pause, then lift.
//! reveal.on_touch(&TouchEvent::down(0, Point::new(300.0, 28.0), 0));
//! reveal.on_touch(&TouchEvent::moved(0, Point::new(240.0, 28.0), 16));
//! reveal.on_touch(&TouchEvent::moved(0, Point::new(200.0, 28.0), 32));
//! reveal.on_touch(&TouchEvent::up(0, Point::new(200.0, 28.0), 200));
//!
//! // Past halfway: the row is opening from the right edge.
//! assert!(reveal.is_open_from(Edge::Right));
//!
//! // Drive the settle from the redraw loop.
//! while reveal.tick(16.0) == SettleStatus::StillSettling {}
//! assert_eq!(reveal.surface_rect(), Some(Rect::new(-96.0, 0.0, 224.0, 56.0)));
//! ```
//!
//! ## Event Routing
//!
//! Call `should_intercept` with each event before descendants see it. Once it
//! returns `true`, send the rest of the gesture to `on_touch`. Events that
//! start directly on the surface may go straight to `on_touch`.
//!
//! Cancelling a captured drag is treated as a release with zero velocity, so
//! the surface always settles to a consistent open, closed or dismissed
//! state.
//!
//! ## Commands
//!
//! Programmatic commands (`open`, `close`, `dismiss`) return a
//! [`CommandOutcome`] that tells an applied transition apart from a no-op
//! caused by a disallowed edge, a missing surface, or the controller already
//! being in the requested state.
//!
//! ## Logging
//!
//! Capture, release decisions and settle progress are reported through the
//! [`log`] facade at `debug` level, drag moves at `trace`. No logger is
//! installed by this crate.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc` for boxed listeners.
//!
//! ## Features
//!
//! - `std` (default): enables `kurbo/std`.
//! - `libm`: enables `kurbo/libm` for `no_std` targets.
//! - `ui_events_adapter`: `adapters::ui_events` converts
//!   `ui_events::pointer::PointerEvent` into [`TouchEvent`].

#![no_std]

extern crate alloc;

pub mod adapters;

mod arbiter;
mod command;
mod config;
mod dismiss;
mod drag;
mod event;
mod geometry;
mod reveal;
mod settle;
mod velocity;

pub use arbiter::{CapturePredicate, DragArbiter, DragPhase, DragPolicy, hits_surface};
pub use command::CommandOutcome;
pub use config::{
    ArbiterConfig, ConfigError, DEFAULT_MAX_FLING_VELOCITY, DEFAULT_MIN_FLING_VELOCITY,
    DEFAULT_TOUCH_SLOP,
};
pub use dismiss::{
    DismissConfig, DismissController, DismissDecision, DismissListener, DismissState,
    decide_dismiss_release,
};
pub use event::{TouchEvent, TouchPoint};
pub use geometry::{Edge, SwipeLayout, SwipeRects, dismiss_target};
pub use reveal::{
    RevealConfig, RevealController, RevealDecision, SwipeMode, SwipeRevealListener,
    clamp_reveal, decide_reveal_release,
};
pub use settle::SettleStatus;
