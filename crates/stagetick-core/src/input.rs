//! Minutes/seconds duration inputs.
//!
//! Models the pair of numeric entry fields a timer reads its countdown
//! duration from. Fields hold raw strings; reading parses, clamps and
//! writes the normalized values back, so malformed input is silently
//! coerced rather than rejected.

use serde::{Deserialize, Serialize};

pub const MINUTES_MAX: u64 = 599;
pub const SECONDS_MAX: u64 = 59;

fn clamp(value: u64, min: u64, max: u64) -> u64 {
    value.min(max).max(min)
}

fn parse_field(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}

/// A minutes/seconds field pair with a disabled flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationInput {
    minutes: String,
    seconds: String,
    #[serde(default)]
    disabled: bool,
}

impl DurationInput {
    pub fn new(minutes: u64, seconds: u64) -> Self {
        Self {
            minutes: minutes.to_string(),
            seconds: seconds.to_string(),
            disabled: false,
        }
    }

    pub fn minutes(&self) -> &str {
        &self.minutes
    }

    pub fn seconds(&self) -> &str {
        &self.seconds
    }

    /// Overwrite the raw minutes field. Ignored while disabled.
    pub fn set_minutes(&mut self, raw: &str) {
        if !self.disabled {
            self.minutes = raw.to_string();
        }
    }

    /// Overwrite the raw seconds field. Ignored while disabled.
    pub fn set_seconds(&mut self, raw: &str) {
        if !self.disabled {
            self.seconds = raw.to_string();
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Parse both fields, clamp them to their valid ranges, write the
    /// clamped values back, and return the total duration in milliseconds.
    ///
    /// A field that fails to parse counts as 0. Minutes clamp to
    /// [0, 599], seconds to [0, 59].
    pub fn read_duration_ms(&mut self) -> u64 {
        let minutes = clamp(parse_field(&self.minutes), 0, MINUTES_MAX);
        let seconds = clamp(parse_field(&self.seconds), 0, SECONDS_MAX);
        self.minutes = minutes.to_string();
        self.seconds = seconds.to_string();
        (minutes * 60 + seconds) * 1000
    }

    /// Like [`read_duration_ms`](Self::read_duration_ms) but without the
    /// write-back, for callers that only need the value.
    pub fn peek_duration_ms(&self) -> u64 {
        let minutes = clamp(parse_field(&self.minutes), 0, MINUTES_MAX);
        let seconds = clamp(parse_field(&self.seconds), 0, SECONDS_MAX);
        (minutes * 60 + seconds) * 1000
    }

    /// Set both fields from a millisecond count (truncated to seconds).
    pub fn set_from_ms(&mut self, milliseconds: u64) {
        let (minutes, seconds) = crate::format::input_fields_from_ms(milliseconds);
        self.minutes = minutes.to_string();
        self.seconds = seconds.to_string();
    }
}

impl Default for DurationInput {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
