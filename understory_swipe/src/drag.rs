// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture pointer tracking: which pointer owns the gesture and how far
//! it has travelled.

use kurbo::{Point, Vec2};

/// Transient pointer state for one gesture.
///
/// Created on pointer down and discarded on release or cancel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DragState<P> {
    /// Pointer that owns the gesture.
    pointer: Option<P>,
    /// Position of the initial down.
    start_pos: Option<Point>,
    /// Last position seen for the owning pointer.
    last_pos: Option<Point>,
}

impl<P> Default for DragState<P> {
    fn default() -> Self {
        Self {
            pointer: None,
            start_pos: None,
            last_pos: None,
        }
    }
}

impl<P: Copy + PartialEq> DragState<P> {
    /// Start tracking `pointer` from `pos`, replacing any previous gesture.
    pub(crate) fn start(&mut self, pointer: P, pos: Point) {
        self.pointer = Some(pointer);
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Returns `true` if `pointer` owns the current gesture.
    pub(crate) fn is_active_pointer(&self, pointer: P) -> bool {
        self.pointer == Some(pointer)
    }

    /// Record a new position for `pointer`, returning the delta since the
    /// previous one.
    ///
    /// Samples from other pointers are ignored.
    pub(crate) fn update(&mut self, pointer: P, pos: Point) -> Option<Vec2> {
        if !self.is_active_pointer(pointer) {
            return None;
        }
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    /// Offset of `current_pos` from the initial down of `pointer`.
    pub(crate) fn total_offset(&self, pointer: P, current_pos: Point) -> Option<Vec2> {
        if !self.is_active_pointer(pointer) {
            return None;
        }
        self.start_pos.map(|start| current_pos - start)
    }

    /// Forget the current gesture.
    pub(crate) fn end(&mut self) {
        self.pointer = None;
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a pointer is being tracked.
    pub(crate) fn is_tracking(&self) -> bool {
        self.pointer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_tracks_nothing() {
        let drag = DragState::<u64>::default();
        assert!(!drag.is_tracking());
        assert!(!drag.is_active_pointer(0));
    }

    #[test]
    fn update_returns_incremental_deltas() {
        let mut drag = DragState::default();
        drag.start(1_u64, Point::new(0.0, 0.0));

        assert_eq!(drag.update(1, Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(1, Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(
            drag.total_offset(1, Point::new(8.0, 7.0)),
            Some(Vec2::new(8.0, 7.0))
        );
    }

    #[test]
    fn other_pointers_are_ignored() {
        let mut drag = DragState::default();
        drag.start(1_u64, Point::new(10.0, 10.0));

        assert_eq!(drag.update(2, Point::new(50.0, 50.0)), None);
        assert_eq!(drag.total_offset(2, Point::new(50.0, 50.0)), None);
        // The owning pointer's last position is untouched.
        assert_eq!(drag.update(1, Point::new(12.0, 10.0)), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn end_resets_state() {
        let mut drag = DragState::default();
        drag.start(7_u64, Point::new(1.0, 2.0));
        drag.end();

        assert!(!drag.is_tracking());
        assert_eq!(drag.update(7, Point::new(3.0, 4.0)), None);
    }

    #[test]
    fn start_overwrites_previous_gesture() {
        let mut drag = DragState::default();
        drag.start(1_u64, Point::new(0.0, 0.0));
        drag.update(1, Point::new(10.0, 10.0));

        drag.start(2, Point::new(50.0, 60.0));
        assert!(!drag.is_active_pointer(1));
        assert_eq!(
            drag.total_offset(2, Point::new(55.0, 65.0)),
            Some(Vec2::new(5.0, 5.0))
        );
    }
}
