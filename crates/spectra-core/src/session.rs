//! Consumer side of the compute pipeline.
//!
//! A [`SpectrumSession`] owns the single computation context of one active
//! view, builds requests from the current samples and settings, and decides
//! which responses may be applied. Responses carry no request identity, so
//! staleness is judged by size alone: a response whose dimensions differ
//! from the session's current size is discarded as if it never arrived.

use crate::fft::FftError;
use crate::image::{canonicalize_for_theme, SampleSource};
use crate::pipeline::{
    compute, ComputeFn, FftWorker, PipelineError, TransformResponse, WorkerEvent,
};
use crate::settings::Settings;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// What happened when one worker event was consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// A current response replaced the displayed spectrum.
    Applied,
    /// A response for an outdated size was dropped.
    Discarded { width: u32, height: u32 },
    /// The current request was rejected; the previous spectrum is kept.
    Failed(FftError),
    /// No event arrived within the timeout.
    TimedOut,
}

/// Request/response state for one view.
pub struct SpectrumSession {
    worker: Option<FftWorker>,
    compute: ComputeFn,
    width: u32,
    height: u32,
    settings: Settings,
    is_dark: bool,
    spectrum: Option<TransformResponse>,
    transforming: bool,
}

impl SpectrumSession {
    /// Start a session for a `width × height` grid with default settings.
    pub fn new(width: u32, height: u32) -> Result<Self, PipelineError> {
        Self::with_compute(width, height, Arc::new(compute))
    }

    pub(crate) fn with_compute(
        width: u32,
        height: u32,
        compute: ComputeFn,
    ) -> Result<Self, PipelineError> {
        let worker = FftWorker::spawn_with(Arc::clone(&compute))?;
        Ok(Self {
            worker: Some(worker),
            compute,
            width,
            height,
            settings: Settings::default(),
            is_dark: true,
            spectrum: None,
            transforming: false,
        })
    }

    /// Current desired size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings used for subsequent requests.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Set the effective theme used to canonicalize samples.
    pub fn set_dark(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
    }

    /// Change the desired size.
    ///
    /// A displayed spectrum of a different size is dropped immediately.
    /// Responses still in flight for the old size will be discarded.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if self
            .spectrum
            .as_ref()
            .is_some_and(|s| !s.matches_size(width, height))
        {
            self.spectrum = None;
        }
    }

    /// Submit the source's samples and mark the session as transforming.
    pub fn transform(&mut self, source: &impl SampleSource) -> Result<(), PipelineError> {
        self.post(source, true)
    }

    /// Submit the source's samples without touching the pending indicator.
    ///
    /// Used after size or setting changes where no progress is shown.
    pub fn recompute(&mut self, source: &impl SampleSource) -> Result<(), PipelineError> {
        self.post(source, false)
    }

    fn post(
        &mut self,
        source: &impl SampleSource,
        mark_transforming: bool,
    ) -> Result<(), PipelineError> {
        let worker = self.worker.as_ref().ok_or_else(unavailable)?;

        let samples = canonicalize_for_theme(source.samples(), self.is_dark);
        let request = self.settings.request_for(self.width, self.height, samples);

        if let Err(e) = worker.submit(request) {
            self.lose_worker();
            return Err(e);
        }
        if mark_transforming {
            self.transforming = true;
        }
        Ok(())
    }

    /// Consume every event that is already available.
    pub fn poll(&mut self) -> Result<Vec<SessionUpdate>, PipelineError> {
        let mut updates = Vec::new();
        loop {
            let next = match self.worker.as_ref() {
                Some(worker) => worker.try_recv(),
                None => return Err(unavailable()),
            };
            match next {
                Ok(Some(event)) => updates.push(self.apply(event)),
                Ok(None) => return Ok(updates),
                Err(e) => {
                    self.lose_worker();
                    return Err(e);
                }
            }
        }
    }

    /// Block for the next event, up to `timeout`.
    pub fn wait(&mut self, timeout: Duration) -> Result<SessionUpdate, PipelineError> {
        let worker = self.worker.as_ref().ok_or_else(unavailable)?;
        match worker.recv_timeout(timeout) {
            Ok(Some(event)) => Ok(self.apply(event)),
            Ok(None) => Ok(SessionUpdate::TimedOut),
            Err(e) => {
                self.lose_worker();
                Err(e)
            }
        }
    }

    fn apply(&mut self, event: WorkerEvent) -> SessionUpdate {
        let (width, height) = event.size();
        if (width, height) != (self.width, self.height) {
            debug!(
                width,
                height,
                current_width = self.width,
                current_height = self.height,
                "discarding stale response"
            );
            return SessionUpdate::Discarded { width, height };
        }

        self.transforming = false;
        match event {
            WorkerEvent::Completed(response) => {
                self.spectrum = Some(response);
                SessionUpdate::Applied
            }
            WorkerEvent::Failed { error, .. } => SessionUpdate::Failed(error),
        }
    }

    /// The spectrum for the current size, if one has arrived.
    pub fn spectrum(&self) -> Option<&TransformResponse> {
        self.spectrum
            .as_ref()
            .filter(|s| s.matches_size(self.width, self.height))
    }

    /// Whether a user-initiated transform is still outstanding.
    pub fn is_transforming(&self) -> bool {
        self.transforming
    }

    /// Whether the computation context is alive.
    pub fn is_available(&self) -> bool {
        self.worker.is_some()
    }

    /// Replace the computation context with a fresh one.
    ///
    /// Requests still queued on the old context are discarded; only a
    /// computation already running is waited for. The displayed spectrum
    /// is kept.
    pub fn restart(&mut self) -> Result<(), PipelineError> {
        self.worker = None;
        self.transforming = false;
        self.worker = Some(FftWorker::spawn_with(Arc::clone(&self.compute))?);
        debug!("computation context restarted");
        Ok(())
    }

    fn lose_worker(&mut self) {
        warn!("computation context lost; transform unavailable");
        self.worker = None;
        self.transforming = false;
    }
}

fn unavailable() -> PipelineError {
    PipelineError::Unavailable("computation context is not running".to_string())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
