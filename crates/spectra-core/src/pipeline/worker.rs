//! The isolated computation context: one worker thread per session.
//!
//! Uses a crossbar pattern: the caller sends commands over one channel and
//! the worker sends events back over another.

use super::message::{PipelineError, TransformRequest, TransformResponse, WorkerEvent};
use crate::fft::FftError;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Function the worker runs for every request.
pub(crate) type ComputeFn =
    Arc<dyn Fn(TransformRequest) -> Result<TransformResponse, FftError> + Send + Sync>;

/// Commands from the caller to the worker.
enum WorkerMsg {
    /// Compute a spectrum.
    Transform(TransformRequest),
    /// Stop the worker loop.
    Close,
}

/// Handle to the computation context.
///
/// Dropping the handle discards every queued request and waits only for the
/// computation already running, if any.
pub struct FftWorker {
    tx: Sender<WorkerMsg>,
    rx: Receiver<WorkerEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FftWorker {
    /// Start a worker running [`compute`](super::compute).
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Unavailable`] if the thread cannot be
    /// started (for example on targets without thread support).
    pub fn spawn() -> Result<Self, PipelineError> {
        Self::spawn_with(Arc::new(super::compute))
    }

    /// Start a worker running a custom compute function.
    pub(crate) fn spawn_with(compute: ComputeFn) -> Result<Self, PipelineError> {
        let (tx_to_worker, rx_in_worker) = channel();
        let (tx_to_caller, rx_from_worker) = channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_in_worker = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("spectra-fft".to_string())
            .spawn(move || run(rx_in_worker, tx_to_caller, stop_in_worker, compute))
            .map_err(|e| {
                PipelineError::Unavailable(format!("failed to start computation context: {e}"))
            })?;

        debug!("FFT worker started");

        Ok(Self {
            tx: tx_to_worker,
            rx: rx_from_worker,
            stop,
            handle: Some(handle),
        })
    }

    /// Hand a request to the worker and return immediately.
    ///
    /// The request (and its sample buffer) is moved into the worker.
    pub fn submit(&self, request: TransformRequest) -> Result<(), PipelineError> {
        debug!(width = request.width, height = request.height, "submit");
        self.tx
            .send(WorkerMsg::Transform(request))
            .map_err(|_| stopped())
    }

    /// Take the next event if one is ready.
    pub fn try_recv(&self) -> Result<Option<WorkerEvent>, PipelineError> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(stopped()),
        }
    }

    /// Block until the next event arrives.
    pub fn recv(&self) -> Result<WorkerEvent, PipelineError> {
        self.rx.recv().map_err(|_| stopped())
    }

    /// Block until the next event arrives or `timeout` elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<WorkerEvent>, PipelineError> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(stopped()),
        }
    }
}

impl Drop for FftWorker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        // Wakes a worker blocked on an empty queue.
        let _ = self.tx.send(WorkerMsg::Close);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("FFT worker terminated abnormally");
            }
        }
    }
}

fn stopped() -> PipelineError {
    PipelineError::Unavailable("computation context has stopped".to_string())
}

/// Worker event loop. Each request runs to completion before the next one
/// is taken; once `stop` is set, nothing further is started.
fn run(
    rx: Receiver<WorkerMsg>,
    tx: Sender<WorkerEvent>,
    stop: Arc<AtomicBool>,
    compute: ComputeFn,
) {
    while let Ok(msg) = rx.recv() {
        if stop.load(Ordering::Acquire) {
            break;
        }
        match msg {
            WorkerMsg::Close => break,
            WorkerMsg::Transform(request) => {
                let (width, height) = (request.width, request.height);
                let event = match compute(request) {
                    Ok(response) => WorkerEvent::Completed(response),
                    Err(error) => {
                        warn!(width, height, %error, "transform request rejected");
                        WorkerEvent::Failed {
                            width,
                            height,
                            error,
                        }
                    }
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    }

    debug!("FFT worker shutdown");
}
