//! Progress reporting and cooperative cancellation.

use std::fmt::{self, Display};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A progress update that could not be delivered.
///
/// Never fails a run; the engine logs it and continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressError {
    message: String,
}

impl ProgressError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Progress report failed: {}", self.message)
    }
}

impl std::error::Error for ProgressError {}

/// Receives coarse percentage updates for a run.
///
/// Implemented for closures, so a channel sender or a push-notification
/// client can be wired in directly:
///
/// ```
/// use std::sync::mpsc;
/// use std::sync::Mutex;
/// use u_dispatch::ga::{ProgressError, ProgressReporter};
///
/// let (tx, rx) = mpsc::channel();
/// let tx = Mutex::new(tx);
/// let reporter = move |run: &str, percent: f64| {
///     tx.lock()
///         .map_err(|e| ProgressError::new(e.to_string()))?
///         .send((run.to_string(), percent))
///         .map_err(|e| ProgressError::new(e.to_string()))
/// };
/// reporter.report("run-1", 20.0).unwrap();
/// assert_eq!(rx.recv().unwrap(), ("run-1".to_string(), 20.0));
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Reports that `run_id` has reached `percent` (0–100, may be fractional).
    fn report(&self, run_id: &str, percent: f64) -> Result<(), ProgressError>;
}

impl<F> ProgressReporter for F
where
    F: Fn(&str, f64) -> Result<(), ProgressError> + Send + Sync,
{
    fn report(&self, run_id: &str, percent: f64) -> Result<(), ProgressError> {
        self(run_id, percent)
    }
}

/// A reporter that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn report(&self, _run_id: &str, _percent: f64) -> Result<(), ProgressError> {
        Ok(())
    }
}

/// Cooperative cancellation flag, checked by the engine between generations.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
