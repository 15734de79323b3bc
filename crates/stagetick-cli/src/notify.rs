//! Toast presentation backends.

use stagetick_core::storage::Config;
use stagetick_core::{Notifier, Toast, ToastVariant};

/// Prints toasts to stderr so they do not interleave with JSON output.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&mut self, toast: Toast) {
        match toast.variant {
            ToastVariant::Error => eprintln!("!! {}", toast.message),
            ToastVariant::Default => eprintln!("** {}", toast.message),
        }
    }
}

/// Desktop notifications with a console fallback when the notification
/// daemon is unavailable.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn show(&mut self, toast: Toast) {
        let summary = match toast.variant {
            ToastVariant::Error => "stagetick error",
            ToastVariant::Default => "stagetick",
        };
        let shown = notify_rust::Notification::new()
            .summary(summary)
            .body(&toast.message)
            .timeout(notify_rust::Timeout::Milliseconds(toast.timeout_ms as u32))
            .show();
        if let Err(e) = shown {
            log::debug!("desktop notification failed, using console: {e}");
            ConsoleNotifier.show(toast);
        }
    }
}

/// Swallows toasts; used when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn show(&mut self, _toast: Toast) {}
}

/// Pick the notifier the configuration asks for.
pub fn from_config(config: &Config) -> Box<dyn Notifier> {
    if !config.notifications.enabled {
        Box::new(NullNotifier)
    } else if config.notifications.desktop {
        Box::new(DesktopNotifier)
    } else {
        Box::new(ConsoleNotifier)
    }
}
