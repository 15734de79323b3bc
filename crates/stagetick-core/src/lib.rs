//! # stagetick core library
//!
//! Core logic for the stagetick timers: a single toggleable up/down timer
//! and a sequential multi-stage countdown, both driven by wall-clock
//! delta accumulation rather than fixed per-tick increments.
//!
//! ## Architecture
//!
//! - **ElapsedClock / TimerController**: the up/down timer state machine
//!   and its input/button wiring. No internal threads; the caller ticks it.
//! - **CountdownTimer / Sequencer**: ordered countdown stages, one active
//!   at a time, advancing past zero-duration stages.
//! - **Ticker**: tokio-backed periodic driver producing wall-clock deltas
//!   over a channel.
//! - **Storage**: TOML configuration and JSON state persistence under
//!   `~/.config/stagetick/`.

pub mod clock;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod events;
pub mod format;
pub mod input;
pub mod notify;
pub mod sequencer;
pub mod storage;
pub mod ticker;

pub use clock::{ClockState, Direction, ElapsedClock};
pub use controller::TimerController;
pub use countdown::CountdownTimer;
pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use format::format_time;
pub use input::DurationInput;
pub use notify::{Notifier, Toast, ToastVariant};
pub use sequencer::Sequencer;
pub use storage::Config;
pub use ticker::Ticker;

/// Milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
