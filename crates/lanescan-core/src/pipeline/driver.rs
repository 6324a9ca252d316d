use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::error::{LaneScanError, Result};
use crate::sink::FrameSink;
use crate::source::{FrameSource, SourceId};

use super::config::{DriverOptions, Pacing};
use super::orchestrator::FrameCycleOrchestrator;
use super::types::CycleStatus;

/// Orchestrator shared between the driver thread and its owner.
pub type SharedOrchestrator<S> = Arc<Mutex<FrameCycleOrchestrator<S>>>;

/// Why the driver thread ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExitReason {
    /// `stop` was called.
    #[default]
    Stopped,
    /// The source ran out of frames.
    Exhausted,
    /// `max_cycles` was reached.
    CycleLimit,
    /// The session was stopped on the orchestrator directly.
    SessionEnded,
    /// The source stopped reporting itself opened mid-session.
    SourceLost,
    /// A cycle panicked while holding the orchestrator lock.
    Poisoned,
}

/// Counters over one driven session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverSummary {
    pub cycles: u64,
    pub processed: u64,
    pub empty: u64,
    pub faults: u64,
    pub segments: u64,
    pub sink_errors: u64,
    pub exit: ExitReason,
    /// The in-flight cycle outlived the bounded shutdown wait.
    pub shutdown_timed_out: bool,
}

/// Drives an orchestrator from a dedicated thread, one cycle per tick.
pub struct SessionDriver<S: FrameSource + 'static> {
    orchestrator: SharedOrchestrator<S>,
    stop_tx: mpsc::Sender<()>,
    done_rx: mpsc::Receiver<DriverSummary>,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl<S: FrameSource + 'static> SessionDriver<S> {
    /// Start a session on `id` and spawn the cycle thread.
    ///
    /// Fails without spawning anything if the source cannot be opened.
    pub fn start<K>(
        orchestrator: SharedOrchestrator<S>,
        id: &SourceId,
        sink: K,
        options: DriverOptions,
    ) -> Result<Self>
    where
        K: FrameSink + 'static,
    {
        lock(&orchestrator)?.start_session(id)?;

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel::<DriverSummary>();
        let interval = options.interval();

        let worker_orch = Arc::clone(&orchestrator);
        let handle = std::thread::Builder::new()
            .name("lanescan-cycle".into())
            .spawn(move || {
                let summary = cycle_loop(&worker_orch, sink, &options, &stop_rx);
                if let Ok(mut orch) = lock(&worker_orch) {
                    orch.stop_session();
                }
                let _ = done_tx.send(summary);
            })?;

        info!(
            source = %id,
            interval_ms = interval.as_millis() as u64,
            "Session driver started"
        );
        Ok(Self {
            orchestrator,
            stop_tx,
            done_rx,
            handle: Some(handle),
            interval,
        })
    }

    /// Block until the driver ends on its own (source exhausted, cycle limit,
    /// session stopped elsewhere).
    pub fn wait(mut self) -> Result<DriverSummary> {
        let summary = self
            .done_rx
            .recv()
            .map_err(|_| LaneScanError::DriverPoisoned)?;
        self.join();
        Ok(summary)
    }

    /// Request a stop and wait up to one frame interval for the in-flight
    /// cycle.
    ///
    /// On timeout the call returns anyway with `shutdown_timed_out` set and
    /// no counters. The cycle thread is detached; it sees the stop once its
    /// cycle ends and stops the session itself, releasing the source.
    pub fn stop(mut self) -> DriverSummary {
        let _ = self.stop_tx.send(());

        match self.done_rx.recv_timeout(self.interval) {
            Ok(summary) => {
                self.join();
                summary
            }
            Err(RecvTimeoutError::Timeout) => {
                let err = LaneScanError::ShutdownTimeout {
                    waited_ms: self.interval.as_millis() as u64,
                };
                warn!(error = %err, "Stopping the frame capture anyway");
                // Detach: never block on the cycle still holding the lock.
                drop(self.handle.take());
                DriverSummary {
                    exit: ExitReason::Stopped,
                    shutdown_timed_out: true,
                    ..DriverSummary::default()
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                // The thread is gone, so the lock is free (possibly poisoned).
                self.join();
                self.force_teardown();
                DriverSummary {
                    exit: ExitReason::Poisoned,
                    ..DriverSummary::default()
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Stop the session even if a panicked cycle poisoned the lock.
    fn force_teardown(&self) {
        let mut orch = self
            .orchestrator
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        orch.stop_session();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Session driver thread panicked");
            }
        }
    }
}

impl<S: FrameSource + 'static> Drop for SessionDriver<S> {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.stop_tx.send(());
            self.join();
        }
    }
}

fn lock<S: FrameSource>(
    orchestrator: &SharedOrchestrator<S>,
) -> Result<MutexGuard<'_, FrameCycleOrchestrator<S>>> {
    orchestrator.lock().map_err(|_| LaneScanError::DriverPoisoned)
}

fn cycle_loop<S, K>(
    orchestrator: &SharedOrchestrator<S>,
    mut sink: K,
    options: &DriverOptions,
    stop_rx: &mpsc::Receiver<()>,
) -> DriverSummary
where
    S: FrameSource,
    K: FrameSink,
{
    let interval = options.interval();
    let mut summary = DriverSummary::default();
    let mut next_tick = Instant::now();

    loop {
        let output = {
            let mut orch = match lock(orchestrator) {
                Ok(orch) => orch,
                Err(e) => {
                    error!(error = %e, "Cycle thread cannot take the orchestrator");
                    summary.exit = ExitReason::Poisoned;
                    return summary;
                }
            };
            // Checked under the lock, so a stop never interrupts a cycle.
            if stop_requested(stop_rx) {
                summary.exit = ExitReason::Stopped;
                return summary;
            }
            orch.run_cycle()
        };

        let Some(output) = output else {
            summary.exit = ExitReason::SessionEnded;
            return summary;
        };

        summary.cycles += 1;
        summary.segments += output.segment_count() as u64;
        match &output.status {
            CycleStatus::Processed => summary.processed += 1,
            CycleStatus::NoFrame | CycleStatus::EmptyFrame => summary.empty += 1,
            CycleStatus::Fault { .. } | CycleStatus::SourceLost => summary.faults += 1,
        }

        if output.status == CycleStatus::SourceLost {
            warn!(cycles = summary.cycles, "Frame source lost, ending session");
            summary.exit = ExitReason::SourceLost;
            return summary;
        }

        if output.status == CycleStatus::NoFrame && options.stop_when_exhausted {
            debug!(cycles = summary.cycles, "Frame source exhausted");
            summary.exit = ExitReason::Exhausted;
            return summary;
        }

        if let Err(e) = sink.present(output) {
            warn!(error = %e, "Display sink rejected a frame");
            summary.sink_errors += 1;
        }

        if options.max_cycles.is_some_and(|max| summary.cycles >= max) {
            summary.exit = ExitReason::CycleLimit;
            return summary;
        }

        if options.pacing == Pacing::RealTime {
            next_tick += interval;
            let now = Instant::now();
            if next_tick <= now {
                // Overran the interval: run the next cycle immediately, no catch-up burst.
                next_tick = now;
            } else {
                match stop_rx.recv_timeout(next_tick - now) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        summary.exit = ExitReason::Stopped;
                        return summary;
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                }
            }
        }
    }
}

fn stop_requested(stop_rx: &mpsc::Receiver<()>) -> bool {
    !matches!(stop_rx.try_recv(), Err(TryRecvError::Empty))
}
