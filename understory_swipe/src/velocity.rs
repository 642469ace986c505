// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal release velocity, estimated with the impulse strategy.
//!
//! Each segment between consecutive samples contributes kinetic energy;
//! the velocity is recovered from the accumulated work (`E = v² / 2`).

/// Ring buffer size for velocity samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this many milliseconds of the newest one are used.
const HORIZON_MS: u64 = 100;

/// A gap this long between two samples means the pointer had stopped.
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: u64,
    position: f64,
}

/// 1D velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub(crate) struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }
}

impl VelocityTracker1D {
    /// Adds a position sample.
    pub(crate) fn add(&mut self, time_ms: u64, position: f64) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second, or `0.0` with fewer than two usable
    /// samples.
    pub(crate) fn velocity(&self) -> f64 {
        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut positions = [0.0_f64; HISTORY_SIZE];
        let mut times = [0.0_f64; HISTORY_SIZE];
        let mut count = 0;
        let mut current = self.index;
        let mut previous = newest;

        while let Some(sample) = self.samples[current] {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            let gap = previous.time_ms.abs_diff(sample.time_ms);
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            previous = sample;

            positions[count] = sample.position;
            times[count] = -(age as f64);
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            current = if current == 0 {
                HISTORY_SIZE - 1
            } else {
                current - 1
            };
        }

        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Velocity with magnitude below `min` reported as zero and magnitude
    /// above `max` clamped to `max`.
    pub(crate) fn velocity_clamped(&self, min: f64, max: f64) -> f64 {
        clamp_magnitude(self.velocity(), min, max)
    }

    /// Drops every sample.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Zero below `min`, saturate at `max`, preserve the sign.
pub(crate) fn clamp_magnitude(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let magnitude = value.abs();
    if magnitude < min {
        0.0
    } else if magnitude > max {
        if value > 0.0 { max } else { -max }
    } else {
        value
    }
}

/// `positions[0]` is the newest sample; `times` are non-positive ages.
fn impulse_velocity(positions: &[f64], times: &[f64]) -> f64 {
    if positions.len() < 2 {
        return 0.0;
    }

    let start = positions.len() - 1;
    let mut work = 0.0;
    let mut next_time = times[start];
    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / (current_time - next_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work)
}

fn kinetic_energy_to_velocity(kinetic_energy: f64) -> f64 {
    let speed = libm::sqrt(2.0 * kinetic_energy.abs());
    if kinetic_energy < 0.0 { -speed } else { speed }
}
