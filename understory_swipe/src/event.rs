// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch events consumed by the drag arbiter.

use kurbo::Point;

/// A single pointer sample.
///
/// `P` is the host's pointer identifier type. Positions are in the
/// container's coordinate space; timestamps are in milliseconds from any
/// monotonic origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint<P = u64> {
    /// Identifier of the pointer that produced this sample.
    pub pointer: P,
    /// Pointer position.
    pub position: Point,
    /// Sample time in milliseconds.
    pub time_ms: u64,
}

impl<P> TouchPoint<P> {
    /// Creates a new pointer sample.
    #[must_use]
    pub fn new(pointer: P, position: Point, time_ms: u64) -> Self {
        Self {
            pointer,
            position,
            time_ms,
        }
    }
}

/// Pointer events for one gesture, delivered in arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchEvent<P = u64> {
    /// A pointer went down.
    Down(TouchPoint<P>),
    /// A pointer moved.
    Move(TouchPoint<P>),
    /// A pointer went up.
    Up(TouchPoint<P>),
    /// The host aborted the gesture for every pointer.
    Cancel,
}

impl<P> TouchEvent<P> {
    /// Shorthand for [`TouchEvent::Down`].
    #[must_use]
    pub fn down(pointer: P, position: Point, time_ms: u64) -> Self {
        Self::Down(TouchPoint::new(pointer, position, time_ms))
    }

    /// Shorthand for [`TouchEvent::Move`].
    #[must_use]
    pub fn moved(pointer: P, position: Point, time_ms: u64) -> Self {
        Self::Move(TouchPoint::new(pointer, position, time_ms))
    }

    /// Shorthand for [`TouchEvent::Up`].
    #[must_use]
    pub fn up(pointer: P, position: Point, time_ms: u64) -> Self {
        Self::Up(TouchPoint::new(pointer, position, time_ms))
    }

    /// Returns the pointer sample carried by this event, if any.
    #[must_use]
    pub fn point(&self) -> Option<&TouchPoint<P>> {
        match self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) => Some(p),
            Self::Cancel => None,
        }
    }
}
