//! Transient user notifications ("toasts").
//!
//! The core only models the toast and decides which events produce one;
//! how a toast is actually presented (desktop notification, console line)
//! is up to the [`Notifier`] implementation the frontend supplies.

use serde::{Deserialize, Serialize};

use crate::events::Event;

pub const DEFAULT_TIMEOUT_MS: u64 = 2_500;
pub const COMPLETION_TIMEOUT_MS: u64 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Error,
}

/// Ephemeral notification record. No persisted identity; the presenter
/// dismisses it after `timeout_ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
    pub timeout_ms: u64,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: ToastVariant::Default,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: ToastVariant::Error,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Presentation seam for toasts.
pub trait Notifier {
    fn show(&mut self, toast: Toast);
}

/// The toast an event surfaces to the user, if any.
pub fn toast_for_event(event: &Event) -> Option<Toast> {
    match event {
        Event::StartRejected { message, .. } => Some(Toast::error(message.clone())),
        Event::ClockCompleted { .. } => {
            Some(Toast::info("Time's up!").with_timeout(COMPLETION_TIMEOUT_MS))
        }
        Event::StageCompleted { message, .. } => {
            message.as_ref().map(|m| Toast::info(m.clone()))
        }
        _ => None,
    }
}

/// Collects toasts instead of showing them. Test helper.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub shown: Vec<Toast>,
}

impl Notifier for MemoryNotifier {
    fn show(&mut self, toast: Toast) {
        self.shown.push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Direction, ElapsedClock};
    use crate::sequencer::SET_STAGE_DURATION_MESSAGE;
    use chrono::Utc;

    #[test]
    fn rejection_becomes_an_error_toast() {
        let mut clock = ElapsedClock::new(Direction::Down);
        let event = clock.start_at(0).expect("rejection event");
        let toast = toast_for_event(&event).expect("toast");
        assert_eq!(toast.variant, ToastVariant::Error);
        assert_eq!(toast.message, "Set a countdown duration first.");
        assert_eq!(toast.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn completion_toast_has_the_longer_timeout() {
        let mut clock = ElapsedClock::new(Direction::Down);
        clock.set_duration_ms(1_000);
        clock.start_at(0);
        let event = clock.tick_at(1_000).expect("completion event");
        let toast = toast_for_event(&event).expect("toast");
        assert_eq!(toast.message, "Time's up!");
        assert_eq!(toast.timeout_ms, COMPLETION_TIMEOUT_MS);
    }

    #[test]
    fn stage_without_message_is_silent() {
        let event = Event::StageCompleted {
            stage_index: 0,
            stage_label: "Heat".into(),
            message: None,
            at: Utc::now(),
        };
        assert!(toast_for_event(&event).is_none());
    }

    #[test]
    fn sequence_rejection_message_passes_through() {
        let event = Event::StartRejected {
            message: SET_STAGE_DURATION_MESSAGE.into(),
            at: Utc::now(),
        };
        let toast = toast_for_event(&event).expect("toast");
        assert_eq!(toast.message, "Set a duration for at least one timer.");
    }

    #[test]
    fn memory_notifier_records_in_order() {
        let mut notifier = MemoryNotifier::default();
        notifier.show(Toast::info("one"));
        notifier.show(Toast::error("two"));
        assert_eq!(notifier.shown.len(), 2);
        assert_eq!(notifier.shown[1].variant, ToastVariant::Error);
    }
}
