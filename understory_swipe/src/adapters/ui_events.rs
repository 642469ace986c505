// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `ui-events` adapter: feed `PointerEvent`s to swipe controllers.
//!
//! Positions are taken in logical pixels and timestamps converted from
//! nanoseconds to milliseconds. The pointer identifier is the event's
//! `Option<PointerId>`, so controllers driven through this adapter are
//! `RevealController<Option<PointerId>>` or
//! `DismissController<Option<PointerId>>`.
//!
//! ## Example
//!
//! ```no_run
//! use ui_events::pointer::{PointerEvent, PointerId};
//! use understory_swipe::adapters::ui_events::touch_event_from_pointer_event;
//! use understory_swipe::{RevealConfig, RevealController};
//!
//! fn handle(controller: &mut RevealController<Option<PointerId>>, event: &PointerEvent) -> bool {
//!     match touch_event_from_pointer_event(event) {
//!         Some(touch) => controller.on_touch(&touch),
//!         None => false,
//!     }
//! }
//!
//! let controller: RevealController<Option<PointerId>> =
//!     RevealController::new(RevealConfig::new()).unwrap();
//! # let _ = (handle, controller);
//! ```

use ::ui_events::pointer::{PointerEvent, PointerId, PointerState};

use crate::event::{TouchEvent, TouchPoint};

/// Converts a pointer event into a touch event.
///
/// Down, move, up and cancel map one to one. Other events (enter, leave,
/// scroll, gestures) return `None`.
#[must_use]
pub fn touch_event_from_pointer_event(event: &PointerEvent) -> Option<TouchEvent<Option<PointerId>>> {
    match event {
        PointerEvent::Down(e) => Some(TouchEvent::Down(touch_point(e.pointer.pointer_id, &e.state))),
        PointerEvent::Move(e) => Some(TouchEvent::Move(touch_point(
            e.pointer.pointer_id,
            &e.current,
        ))),
        PointerEvent::Up(e) => Some(TouchEvent::Up(touch_point(e.pointer.pointer_id, &e.state))),
        PointerEvent::Cancel(_) => Some(TouchEvent::Cancel),
        _ => None,
    }
}

fn touch_point(pointer: Option<PointerId>, state: &PointerState) -> TouchPoint<Option<PointerId>> {
    TouchPoint::new(pointer, state.logical_point(), nanos_to_millis(state.time))
}

fn nanos_to_millis(nanos: u64) -> u64 {
    nanos / 1_000_000
}
