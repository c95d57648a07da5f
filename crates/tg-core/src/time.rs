//! Trip clock.
//!
//! # Design
//!
//! A trip is timed by accumulating fractional segment durations onto a
//! wall-clock start time.  Durations are applied at microsecond resolution so
//! the drift over a several-thousand-segment trip stays far below the
//! one-second resolution of the written timestamps.

use std::fmt;

use chrono::{Duration, NaiveDateTime, Timelike};

/// Format of every timestamp written to a trajectory file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Monotonic wall clock advanced segment by segment during simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripClock {
    now: NaiveDateTime,
}

impl TripClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self { now: start }
    }

    #[inline]
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Hour of day (0–23) of the current time.
    #[inline]
    pub fn hour(&self) -> u32 {
        self.now.hour()
    }

    /// Advance by `secs` seconds.  Negative or non-finite values are ignored
    /// so the clock never runs backwards.
    pub fn advance_secs(&mut self, secs: f64) {
        if !secs.is_finite() || secs <= 0.0 {
            return;
        }
        let micros = (secs * 1_000_000.0).round() as i64;
        self.now += Duration::microseconds(micros);
    }
}

impl fmt::Display for TripClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.now.format(TIMESTAMP_FORMAT))
    }
}
