//! Periodic progress sampling.
//!
//! The sampler runs on its own thread, reads the open handle every interval and
//! sends a `ProgressUpdate` to the UI thread. It never touches UI state itself.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::AudioHandle;

/// One reading of the playback position, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Playback session that produced this reading.
    pub session: u64,
    pub position: Duration,
    pub total: Duration,
    /// `MM:SS / MM:SS`
    pub label: String,
    /// 0..=100
    pub percent: u16,
    /// The track played through to its end.
    pub finished: bool,
}

/// Format a `Duration` as `MM:SS`, truncating partial seconds.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format the `elapsed / total` label.
pub fn format_progress(position: Duration, total: Duration) -> String {
    format!("{} / {}", format_mmss(position), format_mmss(total))
}

/// Percentage of `total` covered by `position`. An unknown (zero) total reads as 0.
pub fn progress_percent(position: Duration, total: Duration) -> u16 {
    let total_us = total.as_micros();
    if total_us == 0 {
        return 0;
    }
    let pct = position.as_micros() * 100 / total_us;
    pct.min(100) as u16
}

/// Take one reading from `handle`.
pub fn sample(handle: &dyn AudioHandle, session: u64) -> ProgressUpdate {
    let total = handle.duration();
    let finished = handle.is_finished();
    // A drained sink may report a stale position; pin it to the end.
    let position = if finished && !total.is_zero() {
        total
    } else {
        handle.position()
    };

    ProgressUpdate {
        session,
        position,
        total,
        label: format_progress(position, total),
        percent: progress_percent(position, total),
        finished,
    }
}

struct Running {
    stop_tx: Sender<()>,
    join: JoinHandle<()>,
}

/// A cancellable repeating timer that publishes progress readings.
pub struct Sampler {
    interval: Duration,
    updates: Sender<ProgressUpdate>,
    running: Option<Running>,
}

impl Sampler {
    pub fn new(interval: Duration, updates: Sender<ProgressUpdate>) -> Self {
        Self {
            interval,
            updates,
            running: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start sampling `handle`, replacing any timer already running.
    ///
    /// The first reading is sent immediately, then one per interval until
    /// `stop` is called or the receiving side goes away.
    pub fn start(&mut self, handle: Arc<dyn AudioHandle>, session: u64) {
        self.stop();

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let updates = self.updates.clone();
        let interval = self.interval;

        let join = thread::spawn(move || {
            loop {
                if updates.send(sample(handle.as_ref(), session)).is_err() {
                    break;
                }
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop requested, or the sampler was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        debug!(session, interval_ms = interval.as_millis() as u64, "sampler started");
        self.running = Some(Running { stop_tx, join });
    }

    /// Cancel the timer and wait for its thread. No update is sent after this returns.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.stop_tx.send(());
            if running.join.join().is_err() {
                warn!("sampler thread panicked");
            } else {
                debug!("sampler stopped");
            }
        }
    }

    /// Send a single reading right away, outside the timer.
    pub fn publish_now(&self, handle: &dyn AudioHandle, session: u64) {
        let _ = self.updates.send(sample(handle, session));
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.stop();
    }
}
