use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{ClockState, Direction};

/// Every state change in the system produces an Event.
/// The CLI renders them; the notifier turns some of them into toasts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ClockStarted {
        direction: Direction,
        at: DateTime<Utc>,
    },
    ClockPaused {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero: the clock clamped to the configured
    /// duration, displayed `00 : 00` and stopped.
    ClockCompleted {
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    ClockReset {
        at: DateTime<Utc>,
    },
    DirectionToggled {
        direction: Direction,
        was_running: bool,
        at: DateTime<Utc>,
    },
    /// A start was refused (zero countdown duration, or a sequence with no
    /// positive stage). Carries the user-facing message.
    StartRejected {
        message: String,
        at: DateTime<Utc>,
    },
    ClockSnapshot {
        state: ClockState,
        direction: Direction,
        elapsed_ms: u64,
        duration_ms: u64,
        display: String,
        at: DateTime<Utc>,
    },
    SequenceStarted {
        stage_index: usize,
        stage_label: String,
        at: DateTime<Utc>,
    },
    StageCompleted {
        stage_index: usize,
        stage_label: String,
        message: Option<String>,
        at: DateTime<Utc>,
    },
    StageAdvanced {
        stage_index: usize,
        stage_label: String,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    SequenceFinished {
        at: DateTime<Utc>,
    },
    SequenceStopped {
        at: DateTime<Utc>,
    },
}
