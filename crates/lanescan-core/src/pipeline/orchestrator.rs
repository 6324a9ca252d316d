use tracing::{debug, error, info, warn};

use crate::consts::FRAME_INTERVAL_MS;
use crate::error::{LaneScanError, Result};
use crate::frame::BgrFrame;
use crate::source::{FrameSource, SourceId};

use super::process::FramePipeline;
use super::types::{CycleOutput, CycleStatus, SessionState};

/// Runs one acquisition -> processing -> emission pass per call and owns the
/// session's elapsed-time counter.
///
/// Not reentrant: every operation takes `&mut self`.
pub struct FrameCycleOrchestrator<S: FrameSource> {
    source: S,
    pipeline: FramePipeline,
    state: SessionState,
    elapsed_ms: u64,
    cycle_index: u64,
}

impl<S: FrameSource> FrameCycleOrchestrator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pipeline: FramePipeline::new(),
            state: SessionState::Idle,
            elapsed_ms: 0,
            cycle_index: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state == SessionState::Capturing
    }

    /// Milliseconds of session time the next cycle will be evaluated at.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Open `id` and begin capturing with the counter at zero.
    ///
    /// A running session is torn down first. If the source cannot be opened
    /// the orchestrator stays idle and `SourceUnavailable` is returned.
    pub fn start_session(&mut self, id: &SourceId) -> Result<()> {
        if self.is_capturing() {
            debug!("Restarting active session");
        }
        self.source.release();
        self.state = SessionState::Idle;
        self.elapsed_ms = 0;
        self.cycle_index = 0;

        let opened = self.source.open(id).and_then(|()| {
            if self.source.is_opened() {
                Ok(())
            } else {
                Err(LaneScanError::SourceUnavailable {
                    source_id: id.to_string(),
                    reason: "source reports not opened".into(),
                })
            }
        });
        if let Err(e) = opened {
            error!(source = %id, error = %e, "Failed to open frame source");
            self.source.release();
            return Err(e);
        }

        self.state = SessionState::Capturing;
        info!(source = %id, "Capture session started");
        Ok(())
    }

    /// End the session and release the source. No-op when idle.
    pub fn stop_session(&mut self) {
        if !self.is_capturing() {
            return;
        }
        info!(
            cycles = self.cycle_index,
            elapsed_ms = self.elapsed_ms,
            "Capture session stopped"
        );
        self.state = SessionState::Idle;
        self.elapsed_ms = 0;
        self.cycle_index = 0;
        self.source.release();
    }

    /// Run one cycle. Returns `None` without touching the source when idle.
    ///
    /// The counter advances by one frame interval on every cycle, including
    /// cycles that skip processing.
    pub fn run_cycle(&mut self) -> Option<CycleOutput> {
        if !self.is_capturing() {
            return None;
        }

        let elapsed_ms = self.elapsed_ms;
        let cycle_index = self.cycle_index;
        let output = self.acquire_and_process(elapsed_ms, cycle_index);

        self.elapsed_ms += FRAME_INTERVAL_MS;
        self.cycle_index += 1;

        debug!(
            cycle = cycle_index,
            elapsed_ms,
            segments = output.segment_count(),
            status = ?output.status,
            "Cycle complete"
        );
        Some(output)
    }

    fn acquire_and_process(&mut self, elapsed_ms: u64, cycle_index: u64) -> CycleOutput {
        if !self.source.is_opened() {
            warn!(cycle = cycle_index, "Frame source is not opened");
            return CycleOutput::skipped(
                BgrFrame::empty(),
                elapsed_ms,
                cycle_index,
                CycleStatus::SourceLost,
            );
        }

        let mut frame = match self.source.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                return CycleOutput::skipped(
                    BgrFrame::empty(),
                    elapsed_ms,
                    cycle_index,
                    CycleStatus::NoFrame,
                );
            }
            Err(e) => {
                warn!(cycle = cycle_index, error = %e, "Frame read failed");
                return CycleOutput::skipped(
                    BgrFrame::empty(),
                    elapsed_ms,
                    cycle_index,
                    CycleStatus::Fault {
                        reason: e.to_string(),
                    },
                );
            }
        };

        if frame.is_empty() {
            debug!(cycle = cycle_index, "Empty frame, skipping processing");
            return CycleOutput::skipped(frame, elapsed_ms, cycle_index, CycleStatus::EmptyFrame);
        }

        match self.pipeline.process(&mut frame, elapsed_ms) {
            Ok(regions) => CycleOutput {
                frame,
                regions,
                elapsed_ms,
                cycle_index,
                status: CycleStatus::Processed,
            },
            Err(e) => {
                error!(
                    cycle = cycle_index,
                    elapsed_ms,
                    processing_fault = e.is_processing_fault(),
                    error = %e,
                    "Frame processing failed"
                );
                CycleOutput::skipped(
                    frame,
                    elapsed_ms,
                    cycle_index,
                    CycleStatus::Fault {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }
}
