//! Background adaptation scheduler on tokio.
//!
//! Wakes on the configured interval or when queued feedback reaches the
//! trigger, and runs due cycles on the blocking pool so the runtime's
//! worker threads keep serving requests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::engine::CompassEngine;

/// Handle to a running scheduler. Dropping it also ends the loop, after any
/// cycle in flight.
#[derive(Debug)]
pub struct SchedulerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

impl SchedulerHandle {
    /// Signal the loop to exit and wait for it. Returns the number of cycles
    /// it ran.
    pub async fn stop(self) -> u64 {
        let _ = self.stop.send(true);
        match self.task.await {
            Ok(cycles) => cycles,
            Err(e) => {
                tracing::warn!(error = %e, "adaptation scheduler task failed");
                0
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl CompassEngine {
    /// Spawn the adaptation scheduler on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn spawn_scheduler(self: &Arc<Self>) -> SchedulerHandle {
        let (stop, mut stopped) = watch::channel(false);
        let engine = Arc::clone(self);
        let wake = self.wake_handle();
        let period = Duration::from_secs(self.config().adaptation.cycle_interval_secs.max(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut cycles = 0u64;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = wake.notified() => {}
                    _ = stopped.changed() => break,
                }
                if engine.is_shut_down() {
                    break;
                }
                if !engine.cycle_due() {
                    continue;
                }

                let worker = Arc::clone(&engine);
                match tokio::task::spawn_blocking(move || worker.run_adaptation_cycle()).await {
                    Ok(Ok(report)) => {
                        cycles += 1;
                        tracing::debug!(cycle = report.cycle, "scheduled cycle finished");
                    }
                    Ok(Err(e)) => tracing::warn!(error = %e, "scheduled cycle failed"),
                    Err(e) => tracing::error!(error = %e, "scheduled cycle panicked"),
                }
            }
            tracing::info!(cycles, "adaptation scheduler stopped");
            cycles
        });

        SchedulerHandle { stop, task }
    }
}
