// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle animation: slide the surface from where it is to a commanded
//! origin, advanced by host-driven ticks.

use kurbo::Point;

/// Settle duration for a slide across the whole drag range is twice this.
const BASE_SETTLE_DURATION_MS: f64 = 256.0;

/// Upper bound on any settle.
const MAX_SETTLE_DURATION_MS: f64 = 600.0;

/// Result of advancing a settle by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleStatus {
    /// No settle is running; the surface is at its commanded position.
    Idle,
    /// The surface is still moving; tick again on the next frame.
    StillSettling,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SettleAnimation {
    start: Point,
    target: Point,
    duration_ms: f64,
    elapsed_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum Settle {
    #[default]
    Idle,
    Settling(SettleAnimation),
}

impl Settle {
    /// Plans a slide from `from` to `to`.
    ///
    /// `range` is the horizontal drag range used to scale the duration.
    /// Returns [`Settle::Idle`] when the surface is already there.
    pub(crate) fn start(from: Point, to: Point, range: f64) -> Self {
        if from == to {
            return Self::Idle;
        }
        Self::Settling(SettleAnimation {
            start: from,
            target: to,
            duration_ms: settle_duration_ms(from, to, range),
            elapsed_ms: 0.0,
        })
    }

    pub(crate) fn is_settling(&self) -> bool {
        matches!(self, Self::Settling(_))
    }

    pub(crate) fn target(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Settling(anim) => Some(anim.target),
        }
    }

    /// Advances by `dt_ms` and returns the new origin.
    ///
    /// Becomes [`Settle::Idle`] once the target is reached; the returned
    /// origin is then exactly the target.
    pub(crate) fn advance(&mut self, dt_ms: f64) -> Option<Point> {
        let Self::Settling(anim) = self else {
            return None;
        };
        anim.elapsed_ms += dt_ms.max(0.0);
        let t = if anim.duration_ms > 0.0 {
            (anim.elapsed_ms / anim.duration_ms).min(1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            let target = anim.target;
            *self = Self::Idle;
            return Some(target);
        }
        Some(anim.start.lerp(anim.target, ease_out_quint(t)))
    }
}

/// `(distance / range + 1) * base`, capped.
fn settle_duration_ms(from: Point, to: Point, range: f64) -> f64 {
    let dx = (to.x - from.x).abs();
    let distance = if dx > 0.0 { dx } else { (to.y - from.y).abs() };
    let fraction = if range > 0.0 { distance / range } else { 0.0 };
    ((fraction + 1.0) * BASE_SETTLE_DURATION_MS).min(MAX_SETTLE_DURATION_MS)
}

fn ease_out_quint(t: f64) -> f64 {
    let u = t - 1.0;
    u * u * u * u * u + 1.0
}
