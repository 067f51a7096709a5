//! Release-velocity estimation for settle decisions.
//!
//! Impulse-strategy velocity calculation over a short ring buffer of recent
//! pointer samples, one axis per tracker. Velocity is derived from the
//! kinetic energy the gesture imparted rather than a straight line fit,
//! which behaves better for the flick-then-hold patterns drawers see.

use sideswipe_core::Point;

/// Ring buffer size for pointer samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute to the estimate.
const HORIZON_MS: i64 = 100;

/// A gap longer than this means the pointer effectively stopped.
const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy)]
struct Sample {
    time_ms: i64,
    position: f32,
}

#[derive(Clone)]
struct VelocityAxis {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl VelocityAxis {
    fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    fn add(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    fn reset(&mut self) {
        self.samples.iter_mut().for_each(|s| *s = None);
        self.index = 0;
    }

    /// Velocity in units/second, 0.0 when there is not enough recent data.
    fn velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut current = self.index;
        while let Some(sample) = self.samples[current] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            if age > HORIZON_MS as f32 {
                break;
            }
            if count > 0 {
                let prev_time = newest.time_ms - (-times[count - 1]) as i64;
                if (prev_time - sample.time_ms) > ASSUME_STOPPED_MS {
                    break;
                }
            }

            positions[count] = sample.position;
            times[count] = -age;

            current = if current == 0 {
                HISTORY_SIZE - 1
            } else {
                current - 1
            };
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions, &times, count) * 1000.0
    }
}

/// Impulse velocity in units/ms: integrates work done between samples and
/// converts the accumulated kinetic energy back to a signed speed.
fn impulse_velocity(positions: &[f32; HISTORY_SIZE], times: &[f32; HISTORY_SIZE], count: usize) -> f32 {
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let start = count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let delta = positions[i] - positions[i - 1];
        let v_curr = delta / (current_time - next_time);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with unit mass, preserving sign.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Two-axis pointer velocity tracker.
#[derive(Clone)]
pub struct VelocityTracker {
    x: VelocityAxis,
    y: VelocityAxis,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            x: VelocityAxis::new(),
            y: VelocityAxis::new(),
        }
    }

    pub fn add_movement(&mut self, time_ms: i64, position: Point) {
        self.x.add(time_ms, position.x);
        self.y.add(time_ms, position.y);
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }

    /// Raw (x, y) velocity in px/sec.
    pub fn velocity(&self) -> (f32, f32) {
        (self.x.velocity(), self.y.velocity())
    }

    /// Velocity with a fling floor and a magnitude cap, per axis: anything
    /// below `min` is treated as no fling at all.
    pub fn velocity_clamped(&self, min: f32, max: f32) -> (f32, f32) {
        let (vx, vy) = self.velocity();
        (clamp_magnitude(vx, min, max), clamp_magnitude(vy, min, max))
    }
}

fn clamp_magnitude(value: f32, min: f32, max: f32) -> f32 {
    let magnitude = value.abs();
    if magnitude < min {
        0.0
    } else if magnitude > max {
        value.signum() * max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32) -> Point {
        Point::new(x, 0.0)
    }

    #[test]
    fn empty_tracker_reports_zero() {
        let tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), (0.0, 0.0));
    }

    #[test]
    fn constant_motion_estimates_speed() {
        let mut tracker = VelocityTracker::new();
        // 100 px per 10 ms = 10000 px/s.
        for i in 0..4 {
            tracker.add_movement(i * 10, point(i as f32 * 100.0));
        }
        let (vx, _) = tracker.velocity();
        assert!((vx - 10_000.0).abs() < 1_000.0, "expected ~10000, got {vx}");
    }

    #[test]
    fn leftward_motion_is_negative() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(0, point(300.0));
        tracker.add_movement(10, point(200.0));
        tracker.add_movement(20, point(100.0));
        let (vx, _) = tracker.velocity();
        assert!(vx < 0.0, "expected negative velocity, got {vx}");
    }

    #[test]
    fn below_fling_floor_collapses_to_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(0, point(0.0));
        tracker.add_movement(100, point(5.0));
        let (vx, _) = tracker.velocity_clamped(400.0, 8_000.0);
        assert_eq!(vx, 0.0);
    }

    #[test]
    fn above_cap_is_clamped() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(0, point(0.0));
        tracker.add_movement(1, point(10_000.0));
        let (vx, _) = tracker.velocity_clamped(400.0, 8_000.0);
        assert_eq!(vx, 8_000.0);
    }

    #[test]
    fn reset_forgets_history() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(0, point(0.0));
        tracker.add_movement(10, point(100.0));
        tracker.reset();
        assert_eq!(tracker.velocity(), (0.0, 0.0));
    }

    #[test]
    fn stale_samples_do_not_contribute() {
        let mut tracker = VelocityTracker::new();
        tracker.add_movement(0, point(0.0));
        tracker.add_movement(150, point(100.0));
        tracker.add_movement(160, point(200.0));
        tracker.add_movement(170, point(300.0));
        let (vx, _) = tracker.velocity();
        assert!(vx > 0.0, "recent samples should drive the estimate");
    }
}
