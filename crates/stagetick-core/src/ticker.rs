//! Periodic delta producer.
//!
//! A started ticker fires at a fixed cadence and, on each fire, sends the
//! wall-clock delta since the previous fire over a channel. The delta is
//! always measured, never the nominal period, so the consumer's elapsed
//! bookkeeping stays correct under scheduler jitter.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::now_ms;

/// Cadence of the single-timer polling loop.
pub const POLL_PERIOD: Duration = Duration::from_millis(200);
/// Cadence of the sequencer loop, roughly one fire per rendered frame.
pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Spawned periodic driver. `stop()` (or drop) aborts the task; once the
/// sender is gone no further delta can be observed on the channel.
#[derive(Debug)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a driver that sends wall-clock deltas every `period`.
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration, tx: mpsc::UnboundedSender<u64>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; it anchors the clock.
            interval.tick().await;
            let mut last = now_ms();
            loop {
                interval.tick().await;
                let now = now_ms();
                let delta = now.saturating_sub(last);
                last = now;
                if tx.send(delta).is_err() {
                    break;
                }
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Idempotent. Aborts the driving task and drops its sender.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deltas_add_up_to_wall_clock_time() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = now_ms();
        let _ticker = Ticker::start(Duration::from_millis(10), tx);

        let mut total = 0u64;
        for _ in 0..5 {
            total += rx.recv().await.expect("ticker delta");
        }
        let elapsed = now_ms().saturating_sub(start);
        // Deltas are measured wall-clock time, so their sum cannot exceed
        // the time that actually passed.
        assert!(total <= elapsed + 1);
    }

    #[tokio::test]
    async fn stop_closes_the_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::start(Duration::from_millis(5), tx);
        rx.recv().await.expect("first delta");
        ticker.stop();
        ticker.stop(); // idempotent

        // Drain whatever was in flight; the channel then closes for good.
        while rx.recv().await.is_some() {}
        assert!(rx.recv().await.is_none());
    }
}
