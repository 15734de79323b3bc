//! A single countdown stage with lockable duration inputs.

use serde::{Deserialize, Serialize};

use crate::format::format_time;
use crate::input::DurationInput;

/// One countdown stage. Independent of its siblings; the sequencer drives
/// it through the public operations only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    label: String,
    inputs: DurationInput,
    duration_ms: u64,
    remaining_ms: u64,
    /// Toast shown when this stage finishes.
    #[serde(default)]
    completion_message: Option<String>,
}

impl CountdownTimer {
    pub fn new(label: impl Into<String>, minutes: u64, seconds: u64) -> Self {
        let mut timer = Self {
            label: label.into(),
            inputs: DurationInput::new(minutes, seconds),
            duration_ms: 0,
            remaining_ms: 0,
            completion_message: None,
        };
        timer.capture_duration();
        timer
    }

    pub fn with_completion_message(mut self, message: impl Into<String>) -> Self {
        self.completion_message = Some(message.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn completion_message(&self) -> Option<&str> {
        self.completion_message.as_deref()
    }

    pub fn inputs(&self) -> &DurationInput {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut DurationInput {
        &mut self.inputs
    }

    pub fn is_locked(&self) -> bool {
        self.inputs.is_disabled()
    }

    pub fn display(&self) -> String {
        format_time(self.remaining_ms)
    }

    /// Re-read (and clamp) the duration from the input fields, reset the
    /// remaining time to it, and return it.
    pub fn capture_duration(&mut self) -> u64 {
        self.duration_ms = self.inputs.read_duration_ms();
        self.remaining_ms = self.duration_ms;
        self.duration_ms
    }

    /// Consume `delta_ms` of the remaining time. Returns true when the
    /// stage is finished (including when it already was; that case changes
    /// nothing).
    pub fn tick(&mut self, delta_ms: u64) -> bool {
        if self.remaining_ms == 0 {
            return true;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(delta_ms);
        self.remaining_ms == 0
    }

    /// Disable or enable the duration inputs. While locked, writes to the
    /// fields are suppressed, so no input-driven resync can occur.
    pub fn lock_inputs(&mut self, locked: bool) {
        self.inputs.set_disabled(locked);
    }

    /// Re-sync duration and remaining time from the current input values.
    /// No-op while locked.
    pub fn reset_to_inputs(&mut self) {
        if !self.is_locked() {
            self.capture_duration();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_resets_remaining() {
        let mut timer = CountdownTimer::new("Heat", 0, 5);
        timer.tick(2_000);
        assert_eq!(timer.remaining_ms(), 3_000);
        assert_eq!(timer.capture_duration(), 5_000);
        assert_eq!(timer.remaining_ms(), 5_000);
    }

    #[test]
    fn tick_saturates_at_zero() {
        let mut timer = CountdownTimer::new("Heat", 0, 1);
        assert!(!timer.tick(400));
        assert!(timer.tick(5_000));
        assert_eq!(timer.remaining_ms(), 0);
        assert_eq!(timer.display(), "00 : 00");
    }

    #[test]
    fn finished_timer_ticks_are_no_ops() {
        let mut timer = CountdownTimer::new("Heat", 0, 0);
        assert!(timer.tick(1_000));
        assert!(timer.tick(1_000));
        assert_eq!(timer.remaining_ms(), 0);
    }

    #[test]
    fn locked_inputs_suppress_resync() {
        let mut timer = CountdownTimer::new("Heat", 0, 10);
        timer.lock_inputs(true);
        timer.inputs_mut().set_seconds("59");
        timer.tick(4_000);
        timer.reset_to_inputs();
        assert_eq!(timer.remaining_ms(), 6_000);

        timer.lock_inputs(false);
        timer.reset_to_inputs();
        assert_eq!(timer.remaining_ms(), 10_000);
    }
}
