//! # Frame Clock
//!
//! A monotonic time accumulator that advances by a fixed increment per tick and
//! drives the day/night cycle.
//!
//! Time is derived from the tick count (`ticks * increment`) rather than summed,
//! so `brightness` after `t` ticks is exactly `sin(increment * t) * 0.5 + 0.5`
//! however long the loop has been running.
//!
//! The day/night label is a plain threshold with no hysteresis. Near the
//! threshold it can flip on consecutive ticks.

use std::fmt;

use crate::config::ClockConfig;

/// Weights applied to brightness to produce the background clear color.
pub const SKY_COLOR_WEIGHTS: [f32; 3] = [0.1, 0.2, 0.4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Day => f.write_str("Day"),
            TimeOfDay::Night => f.write_str("Night"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    ticks: u64,
    increment: f64,
    night_threshold: f64,
}

impl FrameClock {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            ticks: 0,
            increment: config.increment,
            night_threshold: config.night_threshold,
        }
    }

    /// Advances by one tick and returns the new brightness.
    pub fn advance(&mut self) -> f64 {
        self.ticks += 1;
        self.brightness()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.increment
    }

    /// `sin(time) * 0.5 + 0.5`, in `[0, 1]`.
    pub fn brightness(&self) -> f64 {
        brightness_at(self.time())
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        if self.brightness() < self.night_threshold {
            TimeOfDay::Night
        } else {
            TimeOfDay::Day
        }
    }

    /// Background RGBA for the current brightness.
    pub fn clear_color(&self) -> [f32; 4] {
        let b = self.brightness() as f32;
        [
            SKY_COLOR_WEIGHTS[0] * b,
            SKY_COLOR_WEIGHTS[1] * b,
            SKY_COLOR_WEIGHTS[2] * b,
            1.0,
        ]
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}

pub fn brightness_at(time: f64) -> f64 {
    time.sin() * 0.5 + 0.5
}
