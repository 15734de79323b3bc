//! The elapsed clock: a toggleable count-up/count-down state machine.
//!
//! The clock is wall-clock based and has no internal thread -- the caller
//! invokes `tick()` periodically. Elapsed time accumulates as the delta
//! between successive ticks, so pauses and scheduler jitter never cause
//! drift: the displayed value always reflects real elapsed time while
//! running.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v (count-down reaches zero)
//!        Completed
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::format::format_time;
use crate::now_ms;

/// Message shown when a countdown is started with no duration configured.
pub const SET_DURATION_MESSAGE: &str = "Set a countdown duration first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Delta-accumulating up/down counter.
///
/// `base_elapsed_ms` only advances while running, by the wall-clock delta
/// since the last tick. In count-down mode it is clamped to the configured
/// duration at exhaustion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElapsedClock {
    direction: Direction,
    /// Configured countdown duration in milliseconds.
    duration_ms: u64,
    /// Milliseconds accumulated across all running periods.
    base_elapsed_ms: u64,
    /// Timestamp (ms since epoch) of the last tick while running.
    #[serde(default)]
    last_tick_ms: Option<u64>,
    running: bool,
    completed: bool,
}

impl ElapsedClock {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            duration_ms: 0,
            base_elapsed_ms: 0,
            last_tick_ms: None,
            running: false,
            completed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.base_elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn state(&self) -> ClockState {
        if self.completed {
            ClockState::Completed
        } else if self.running {
            ClockState::Running
        } else if self.base_elapsed_ms > 0 {
            ClockState::Paused
        } else {
            ClockState::Idle
        }
    }

    /// The value to display: elapsed time counting up, remaining time
    /// counting down.
    pub fn display_ms(&self) -> u64 {
        match self.direction {
            Direction::Up => self.base_elapsed_ms,
            Direction::Down => self.duration_ms.saturating_sub(self.base_elapsed_ms),
        }
    }

    pub fn display(&self) -> String {
        format_time(self.display_ms())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the countdown duration. Clears a previous completion so the
    /// next start counts down from the new value.
    pub fn set_duration_ms(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
        self.completed = false;
    }

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    /// Enter Running. Counting down with a zero duration is refused with a
    /// `StartRejected` event and no state change. A completed (or fully
    /// elapsed) countdown restarts from the full duration. No-op while
    /// already running.
    pub fn start_at(&mut self, now: u64) -> Option<Event> {
        if self.direction == Direction::Down {
            if self.duration_ms == 0 {
                return Some(Event::StartRejected {
                    message: SET_DURATION_MESSAGE.into(),
                    at: Utc::now(),
                });
            }
            if self.completed || self.base_elapsed_ms >= self.duration_ms {
                self.base_elapsed_ms = 0;
                self.completed = false;
            }
        }

        if self.running {
            return None;
        }
        self.running = true;
        self.last_tick_ms = Some(now);
        Some(Event::ClockStarted {
            direction: self.direction,
            at: Utc::now(),
        })
    }

    /// Pause. Idempotent; clears the tick anchor so a later resume does
    /// not absorb the paused interval.
    pub fn stop(&mut self) -> Option<Event> {
        self.last_tick_ms = None;
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::ClockPaused {
            elapsed_ms: self.base_elapsed_ms,
            at: Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Advance by the wall-clock delta since the previous tick. Only
    /// effective while running. Returns `ClockCompleted` when a countdown
    /// exhausts; the clock clamps to the duration and stops.
    pub fn tick_at(&mut self, now: u64) -> Option<Event> {
        if !self.running {
            return None;
        }
        let last = self.last_tick_ms.unwrap_or(now);
        let delta = now.saturating_sub(last);
        self.last_tick_ms = Some(now);
        self.base_elapsed_ms += delta;

        if self.direction == Direction::Down && self.base_elapsed_ms >= self.duration_ms {
            self.base_elapsed_ms = self.duration_ms;
            self.completed = true;
            self.running = false;
            self.last_tick_ms = None;
            return Some(Event::ClockCompleted {
                duration_ms: self.duration_ms,
                at: Utc::now(),
            });
        }
        None
    }

    /// Back to zero elapsed; stops if running.
    pub fn reset(&mut self) -> Option<Event> {
        self.stop();
        self.base_elapsed_ms = 0;
        self.completed = false;
        Some(Event::ClockReset { at: Utc::now() })
    }

    pub fn toggle_direction(&mut self) -> Vec<Event> {
        self.toggle_direction_at(now_ms())
    }

    /// Flip between count-up and count-down. Elapsed time resets to the
    /// new mode's zero point. A clock that was running keeps running
    /// (unless the new mode refuses to start, e.g. zero countdown
    /// duration).
    pub fn toggle_direction_at(&mut self, now: u64) -> Vec<Event> {
        let was_running = self.running;
        self.stop();
        self.direction = self.direction.flipped();
        self.base_elapsed_ms = 0;
        self.completed = false;

        let mut events = vec![Event::DirectionToggled {
            direction: self.direction,
            was_running,
            at: Utc::now(),
        }];
        if was_running {
            if let Some(event) = self.start_at(now) {
                events.push(event);
            }
        }
        events
    }
}

impl Default for ElapsedClock {
    fn default() -> Self {
        Self::new(Direction::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_up_clock(start: u64) -> ElapsedClock {
        let mut clock = ElapsedClock::new(Direction::Up);
        clock.start_at(start);
        clock
    }

    #[test]
    fn elapsed_accumulates_wall_clock_deltas() {
        let mut clock = running_up_clock(1_000);
        clock.tick_at(1_250);
        clock.tick_at(1_700);
        assert_eq!(clock.elapsed_ms(), 700);
        assert_eq!(clock.display(), "00 : 00");
        clock.tick_at(61_000);
        assert_eq!(clock.elapsed_ms(), 60_000);
        assert_eq!(clock.display(), "01 : 00");
    }

    #[test]
    fn elapsed_is_constant_while_paused() {
        let mut clock = running_up_clock(0);
        clock.tick_at(500);
        clock.stop();
        assert_eq!(clock.state(), ClockState::Paused);
        clock.tick_at(10_000);
        assert_eq!(clock.elapsed_ms(), 500);
    }

    #[test]
    fn resume_does_not_absorb_the_paused_interval() {
        let mut clock = running_up_clock(0);
        clock.tick_at(1_000);
        clock.stop();
        clock.start_at(5_000);
        clock.tick_at(5_400);
        assert_eq!(clock.elapsed_ms(), 1_400);
    }

    #[test]
    fn start_is_a_no_op_while_running() {
        let mut clock = running_up_clock(0);
        clock.tick_at(300);
        assert!(clock.start_at(10_000).is_none());
        clock.tick_at(10_100);
        // The tick anchor was not disturbed by the redundant start.
        assert_eq!(clock.elapsed_ms(), 10_100);
    }

    #[test]
    fn countdown_with_zero_duration_is_rejected() {
        let mut clock = ElapsedClock::new(Direction::Down);
        let event = clock.start_at(0);
        assert!(matches!(event, Some(Event::StartRejected { .. })));
        assert!(!clock.is_running());
        assert_eq!(clock.state(), ClockState::Idle);
    }

    #[test]
    fn countdown_completes_and_clamps() {
        let mut clock = ElapsedClock::new(Direction::Down);
        clock.set_duration_ms(2_000);
        clock.start_at(0);
        assert!(clock.tick_at(1_500).is_none());
        assert_eq!(clock.display(), "00 : 00"); // 500ms left, truncated
        let event = clock.tick_at(2_100);
        assert!(matches!(event, Some(Event::ClockCompleted { .. })));
        assert!(clock.is_completed());
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_ms(), 2_000);
        assert_eq!(clock.display(), "00 : 00");
    }

    #[test]
    fn ticks_after_completion_are_no_ops() {
        let mut clock = ElapsedClock::new(Direction::Down);
        clock.set_duration_ms(1_000);
        clock.start_at(0);
        clock.tick_at(1_000);
        assert!(clock.is_completed());
        assert!(clock.tick_at(5_000).is_none());
        assert_eq!(clock.elapsed_ms(), 1_000);
    }

    #[test]
    fn restart_after_completion_counts_down_again() {
        let mut clock = ElapsedClock::new(Direction::Down);
        clock.set_duration_ms(1_000);
        clock.start_at(0);
        clock.tick_at(1_000);
        assert!(clock.is_completed());

        let event = clock.start_at(2_000);
        assert!(matches!(event, Some(Event::ClockStarted { .. })));
        assert!(!clock.is_completed());
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(clock.display(), "00 : 01");
    }

    #[test]
    fn reset_returns_to_idle_zero() {
        let mut clock = running_up_clock(0);
        clock.tick_at(3_000);
        clock.reset();
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(clock.state(), ClockState::Idle);
        assert!(!clock.is_running());
    }

    #[test]
    fn toggle_preserves_running_state() {
        let mut clock = ElapsedClock::new(Direction::Up);
        clock.set_duration_ms(10_000);
        clock.start_at(0);
        clock.tick_at(2_000);

        let events = clock.toggle_direction_at(2_000);
        assert!(matches!(events[0], Event::DirectionToggled { was_running: true, .. }));
        assert_eq!(clock.direction(), Direction::Down);
        assert!(clock.is_running());
        // Reset to the new mode's zero point: full duration remaining.
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(clock.display(), "00 : 10");
    }

    #[test]
    fn toggle_to_zero_duration_countdown_stops_with_rejection() {
        let mut clock = ElapsedClock::new(Direction::Up);
        clock.start_at(0);
        let events = clock.toggle_direction_at(1_000);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], Event::StartRejected { .. }));
        assert!(!clock.is_running());
    }

    #[test]
    fn toggle_while_paused_stays_paused() {
        let mut clock = ElapsedClock::new(Direction::Up);
        clock.set_duration_ms(5_000);
        let events = clock.toggle_direction_at(0);
        assert_eq!(events.len(), 1);
        assert!(!clock.is_running());
        assert_eq!(clock.display(), "00 : 05");
    }
}
