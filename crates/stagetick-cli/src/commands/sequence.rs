use clap::Subcommand;
use stagetick_core::storage::{Config, StageConfig};
use stagetick_core::{CountdownTimer, Event, Notifier, Sequencer, Ticker};
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::notify;

#[derive(Subcommand)]
pub enum SequenceAction {
    /// Run the staged countdown to completion
    Run {
        /// Stage spec `LABEL=MM:SS` or `LABEL=MM:SS=MESSAGE`; repeatable.
        /// Defaults to the configured stage list.
        #[arg(long = "stage")]
        stages: Vec<String>,
    },
    /// Print the configured stages as JSON
    Show,
}

pub fn run(action: SequenceAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    match action {
        SequenceAction::Run { stages } => run_sequence(&config, &stages),
        SequenceAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config.sequence.stages)?);
            Ok(())
        }
    }
}

/// Parse a `LABEL=MM:SS[=MESSAGE]` stage spec. Out-of-range or malformed
/// numbers are left to the duration inputs to clamp.
fn parse_stage(spec: &str) -> Result<StageConfig, String> {
    let mut parts = spec.splitn(3, '=');
    let label = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing label in stage spec '{spec}'"))?;
    let time = parts
        .next()
        .ok_or_else(|| format!("missing duration in stage spec '{spec}' (want LABEL=MM:SS)"))?;
    let message = parts.next().map(String::from);

    let (minutes, seconds) = match time.split_once(':') {
        Some((m, s)) => (
            m.trim().parse::<u64>().unwrap_or(0),
            s.trim().parse::<u64>().unwrap_or(0),
        ),
        None => (time.trim().parse::<u64>().unwrap_or(0), 0),
    };

    Ok(StageConfig {
        label: label.to_string(),
        minutes,
        seconds,
        message,
    })
}

fn build_timers(stages: &[StageConfig]) -> Vec<CountdownTimer> {
    stages
        .iter()
        .map(|s| {
            let timer = CountdownTimer::new(&s.label, s.minutes, s.seconds);
            match &s.message {
                Some(message) => timer.with_completion_message(message),
                None => timer,
            }
        })
        .collect()
}

fn run_sequence(config: &Config, specs: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut notifier = notify::from_config(config);

    let stages = if specs.is_empty() {
        config.sequence.stages.clone()
    } else {
        specs
            .iter()
            .map(|s| parse_stage(s))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut sequencer = Sequencer::new(build_timers(&stages));
    let started = sequencer.start();
    println!("{}", serde_json::to_string_pretty(&started)?);
    if matches!(started, Event::StartRejected { .. }) {
        if let Some(toast) = stagetick_core::notify::toast_for_event(&started) {
            notifier.show(toast);
        }
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(drive(&mut sequencer, config, notifier.as_mut()))
}

/// Frame-cadence loop: feed measured deltas to the sequencer, render the
/// active stage, surface stage toasts, stop on Ctrl-C.
async fn drive(
    sequencer: &mut Sequencer,
    config: &Config,
    notifier: &mut dyn Notifier,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ticker = Ticker::start(
        Duration::from_millis(config.sequence.frame_interval_ms),
        tx,
    );

    let result = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                let event = sequencer.stop();
                println!();
                println!("{}", serde_json::to_string_pretty(&event)?);
                break Ok(());
            }
            delta = rx.recv() => {
                let Some(delta) = delta else {
                    break Ok(());
                };
                let events = sequencer.on_tick(delta);
                if let Some(active) = sequencer.active_timer() {
                    print!("\r{}  {}", active.label(), active.display());
                    std::io::stdout().flush()?;
                }
                let mut finished = false;
                for event in &events {
                    if let Some(toast) = stagetick_core::notify::toast_for_event(event) {
                        notifier.show(toast);
                    }
                    match event {
                        Event::StageAdvanced { stage_label, .. } => {
                            println!();
                            log::info!("advanced to stage {stage_label}");
                        }
                        Event::SequenceFinished { .. } => {
                            println!();
                            println!("{}", serde_json::to_string_pretty(event)?);
                            finished = true;
                        }
                        _ => {}
                    }
                }
                if finished {
                    break Ok(());
                }
            }
        }
    };
    ticker.stop();
    result
}
