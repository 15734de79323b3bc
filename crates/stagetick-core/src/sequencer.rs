//! Drives an ordered list of countdown stages to completion.
//!
//! One stage is active at a time. When it exhausts, the sequencer emits
//! its completion message and advances strictly forward to the next stage
//! with a positive duration, finishing when none remains. Zero-duration
//! stages are always skipped, including as the starting point.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::countdown::CountdownTimer;
use crate::events::Event;

/// Message shown when a sequence is started with no positive stage.
pub const SET_STAGE_DURATION_MESSAGE: &str = "Set a duration for at least one timer.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequencer {
    timers: Vec<CountdownTimer>,
    active_index: Option<usize>,
    running: bool,
}

impl Sequencer {
    pub fn new(timers: Vec<CountdownTimer>) -> Self {
        Self {
            timers,
            active_index: None,
            running: false,
        }
    }

    pub fn timers(&self) -> &[CountdownTimer] {
        &self.timers
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_timer(&self) -> Option<&CountdownTimer> {
        self.active_index.and_then(|i| self.timers.get(i))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Capture every stage's duration from its inputs and pick the first
    /// stage with a positive duration. Fails (false) when every stage is
    /// zero; in that case nothing is locked and no index is set.
    pub fn initialize(&mut self) -> bool {
        for timer in &mut self.timers {
            timer.capture_duration();
        }
        let first = self
            .timers
            .iter()
            .position(|t| t.duration_ms() > 0);
        let Some(index) = first else {
            return false;
        };
        for timer in &mut self.timers {
            timer.lock_inputs(true);
        }
        self.active_index = Some(index);
        true
    }

    /// Initialize and start running. Emits `SequenceStarted` on success,
    /// `StartRejected` when every stage has zero duration.
    pub fn start(&mut self) -> Event {
        if !self.initialize() {
            return Event::StartRejected {
                message: SET_STAGE_DURATION_MESSAGE.into(),
                at: Utc::now(),
            };
        }
        self.running = true;
        let index = self.active_index.unwrap_or(0);
        Event::SequenceStarted {
            stage_index: index,
            stage_label: self.timers[index].label().to_string(),
            at: Utc::now(),
        }
    }

    /// Feed a wall-clock delta to the active stage. Returns the events the
    /// delta produced: stage completion, advance, or sequence finish.
    pub fn on_tick(&mut self, delta_ms: u64) -> Vec<Event> {
        let Some(index) = self.active_index else {
            return Vec::new();
        };
        let finished = match self.timers.get_mut(index) {
            Some(timer) => timer.tick(delta_ms),
            None => return Vec::new(),
        };
        if !finished {
            return Vec::new();
        }

        let mut events = vec![Event::StageCompleted {
            stage_index: index,
            stage_label: self.timers[index].label().to_string(),
            message: self.timers[index].completion_message().map(String::from),
            at: Utc::now(),
        }];

        // Strictly forward; zero-duration stages are skipped.
        let next = self
            .timers
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, t)| t.duration_ms() > 0)
            .map(|(i, _)| i);

        match next {
            Some(next_index) => {
                self.active_index = Some(next_index);
                events.push(Event::StageAdvanced {
                    stage_index: next_index,
                    stage_label: self.timers[next_index].label().to_string(),
                    remaining_ms: self.timers[next_index].remaining_ms(),
                    at: Utc::now(),
                });
            }
            None => {
                self.finish();
                events.push(Event::SequenceFinished { at: Utc::now() });
            }
        }
        events
    }

    /// End of the run: unlock inputs, clear the active stage. Remaining
    /// values are left where the run put them.
    pub fn finish(&mut self) {
        self.running = false;
        self.active_index = None;
        for timer in &mut self.timers {
            timer.lock_inputs(false);
        }
    }

    /// User-initiated abort: like `finish`, but in-progress countdown
    /// state is discarded by resyncing every stage from its inputs.
    pub fn stop(&mut self) -> Event {
        self.finish();
        for timer in &mut self.timers {
            timer.reset_to_inputs();
        }
        Event::SequenceStopped { at: Utc::now() }
    }
}
