#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use bevy_ecs::prelude::Resource;
use std::time::Instant;

/// Converts wall-clock time into discrete logic cycles at a configurable
/// rate, independent of the render frame rate.
///
/// Crossed cycle boundaries are banked and handed out one per
/// `has_elapsed_cycle` call, so no cycle is ever lost; the frame loop
/// queries once per frame, which caps logic at one tick per frame and
/// leaves any surplus banked. Progress toward the next cycle is kept in
/// milliseconds, so changing the rate mid-cycle revalues the banked
/// fraction against the new rate on the next update.
#[derive(Resource, Debug, Clone)]
pub struct LogicClock {
    millis_per_cycle: f32,
    last_update: Instant,
    elapsed_cycles: u32,
    excess_millis: f32,
    paused: bool,
}

impl LogicClock {
    #[must_use]
    pub fn new(cycles_per_second: f32) -> Self {
        Self {
            millis_per_cycle: 1000.0 / cycles_per_second,
            last_update: Instant::now(),
            elapsed_cycles: 0,
            excess_millis: 0.0,
            paused: false,
        }
    }

    /// Changes the rate without resetting accumulated progress.
    pub fn set_cycles_per_second(&mut self, rate: f32) {
        self.millis_per_cycle = 1000.0 / rate;
    }

    #[must_use]
    pub fn cycles_per_second(&self) -> f32 {
        1000.0 / self.millis_per_cycle
    }

    /// Call once per frame. Measures the wall time since the previous
    /// call and banks any whole cycles crossed. While paused, wall time
    /// passes unbanked and previously banked progress is retained.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub fn update_at(&mut self, now: Instant) {
        let wall_millis = now.saturating_duration_since(self.last_update).as_secs_f32() * 1000.0;
        if !self.paused {
            let delta = wall_millis + self.excess_millis;
            self.elapsed_cycles += (delta / self.millis_per_cycle) as u32;
            self.excess_millis = delta % self.millis_per_cycle;
        }
        self.last_update = now;
    }

    /// Consumes and reports one banked cycle per call.
    pub fn has_elapsed_cycle(&mut self) -> bool {
        if self.elapsed_cycles > 0 {
            self.elapsed_cycles -= 1;
            true
        } else {
            false
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Zeroes banked cycles and fractional progress. Rate and the pause
    /// flag are left as they are.
    pub fn reset(&mut self) {
        self.elapsed_cycles = 0;
        self.excess_millis = 0.0;
        self.last_update = Instant::now();
    }
}
