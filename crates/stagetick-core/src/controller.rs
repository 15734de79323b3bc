//! Timer controller: the single up/down timer widget.
//!
//! Binds an [`ElapsedClock`] to its duration inputs and button surface.
//! An explicit instance with scoped lifetime rather than ambient globals,
//! serializable so the CLI can carry one across invocations.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::clock::{Direction, ElapsedClock};
use crate::events::Event;
use crate::input::DurationInput;
use crate::now_ms;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimerController {
    clock: ElapsedClock,
    inputs: DurationInput,
}

impl TimerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> &ElapsedClock {
        &self.clock
    }

    pub fn inputs(&self) -> &DurationInput {
        &self.inputs
    }

    /// Write both duration fields, normalize them, and apply the new
    /// countdown duration. Clears a stale completion.
    pub fn set_inputs(&mut self, minutes: &str, seconds: &str) {
        self.inputs.set_minutes(minutes);
        self.inputs.set_seconds(seconds);
        let duration = self.inputs.read_duration_ms();
        self.clock.set_duration_ms(duration);
    }

    pub fn press_start_stop(&mut self) -> Option<Event> {
        self.press_start_stop_at(now_ms())
    }

    pub fn press_start_stop_at(&mut self, now: u64) -> Option<Event> {
        if self.clock.is_running() {
            self.clock.stop()
        } else {
            self.sync_duration();
            self.clock.start_at(now)
        }
    }

    pub fn press_reset(&mut self) -> Option<Event> {
        self.clock.reset()
    }

    pub fn press_direction_toggle(&mut self) -> Vec<Event> {
        self.press_direction_toggle_at(now_ms())
    }

    pub fn press_direction_toggle_at(&mut self, now: u64) -> Vec<Event> {
        self.sync_duration();
        self.clock.toggle_direction_at(now)
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now: u64) -> Option<Event> {
        self.clock.tick_at(now)
    }

    pub fn display(&self) -> String {
        self.clock.display()
    }

    pub fn mode_label(&self) -> &'static str {
        match self.clock.direction() {
            Direction::Up => "Counting up",
            Direction::Down => "Counting down",
        }
    }

    pub fn start_stop_label(&self) -> &'static str {
        if self.clock.is_running() {
            "Pause"
        } else {
            "Start"
        }
    }

    /// Full state snapshot for `timer status`.
    pub fn snapshot(&self) -> Event {
        Event::ClockSnapshot {
            state: self.clock.state(),
            direction: self.clock.direction(),
            elapsed_ms: self.clock.elapsed_ms(),
            duration_ms: self.clock.duration_ms(),
            display: self.display(),
            at: Utc::now(),
        }
    }

    // A completed clock is also fully elapsed, so clearing the completion
    // flag here does not lose the rewind-on-restart behavior: start_at
    // rewinds via the elapsed-vs-duration check. A pure read suffices;
    // set_inputs already normalized the fields.
    fn sync_duration(&mut self) {
        let duration = self.inputs.peek_duration_ms();
        self.clock.set_duration_ms(duration);
    }
}
