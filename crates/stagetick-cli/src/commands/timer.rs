use clap::Subcommand;
use stagetick_core::storage::{self, Config};
use stagetick_core::{Event, Notifier, TimerController, Ticker};
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::notify;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Set the countdown duration inputs
    Set {
        /// Minutes (0-599, clamped)
        #[arg(long, default_value = "0")]
        minutes: String,
        /// Seconds (0-59, clamped)
        #[arg(long, default_value = "0")]
        seconds: String,
    },
    /// Start (or resume) the timer
    Start,
    /// Pause the timer
    Pause,
    /// Switch between count-up and count-down
    Toggle,
    /// Reset elapsed time to zero
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Run in the foreground, updating the display until done
    Watch,
}

fn emit(event: &Event, notifier: &mut dyn Notifier) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    if let Some(toast) = stagetick_core::notify::toast_for_event(event) {
        notifier.show(toast);
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let mut notifier = notify::from_config(&config);
    let mut controller = storage::load_controller();

    match action {
        TimerAction::Set { minutes, seconds } => {
            controller.set_inputs(&minutes, &seconds);
            emit(&controller.snapshot(), notifier.as_mut())?;
        }
        TimerAction::Start => {
            // Catch up on elapsed time before deciding anything; a
            // countdown may have finished since the last command.
            if let Some(event) = controller.tick() {
                emit(&event, notifier.as_mut())?;
            }
            if !controller.clock().is_running() {
                if let Some(event) = controller.press_start_stop() {
                    emit(&event, notifier.as_mut())?;
                }
            } else {
                emit(&controller.snapshot(), notifier.as_mut())?;
            }
        }
        TimerAction::Pause => {
            if let Some(event) = controller.tick() {
                emit(&event, notifier.as_mut())?;
            }
            if controller.clock().is_running() {
                if let Some(event) = controller.press_start_stop() {
                    emit(&event, notifier.as_mut())?;
                }
            } else {
                emit(&controller.snapshot(), notifier.as_mut())?;
            }
        }
        TimerAction::Toggle => {
            if let Some(event) = controller.tick() {
                emit(&event, notifier.as_mut())?;
            }
            for event in controller.press_direction_toggle() {
                emit(&event, notifier.as_mut())?;
            }
        }
        TimerAction::Reset => {
            if let Some(event) = controller.press_reset() {
                emit(&event, notifier.as_mut())?;
            }
        }
        TimerAction::Status => {
            // Tick to account for wall-clock time since the last command.
            if let Some(event) = controller.tick() {
                emit(&event, notifier.as_mut())?;
            }
            emit(&controller.snapshot(), notifier.as_mut())?;
        }
        TimerAction::Watch => {
            watch(&mut controller, &config, notifier.as_mut())?;
        }
    }

    storage::save_controller(&controller)?;
    Ok(())
}

/// Foreground loop: poll at the configured cadence, rewriting the display
/// line, until the countdown completes or Ctrl-C pauses the timer.
fn watch(
    controller: &mut TimerController,
    config: &Config,
    notifier: &mut dyn Notifier,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        if !controller.clock().is_running() {
            if let Some(event) = controller.press_start_stop() {
                if matches!(event, Event::StartRejected { .. }) {
                    if let Some(toast) = stagetick_core::notify::toast_for_event(&event) {
                        notifier.show(toast);
                    }
                    return Ok(());
                }
            }
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::start(Duration::from_millis(config.timer.poll_interval_ms), tx);

        let result = loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    controller.tick();
                    controller.press_start_stop();
                    println!();
                    break Ok(());
                }
                delta = rx.recv() => {
                    if delta.is_none() {
                        break Ok(());
                    }
                    // The ticker only paces the loop; the clock measures
                    // its own wall-clock delta.
                    let completed = controller.tick();
                    print!("\r{}  {}", controller.mode_label(), controller.display());
                    std::io::stdout().flush()?;
                    if let Some(event) = completed {
                        println!();
                        if let Some(toast) = stagetick_core::notify::toast_for_event(&event) {
                            notifier.show(toast);
                        }
                        break Ok(());
                    }
                }
            }
        };
        ticker.stop();
        result
    })
}
