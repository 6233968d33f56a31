//! Cancellation and deadline recognition.
//!
//! The boundary treats two root causes specially: the client cancelling the
//! request, and the request deadline expiring. Which concrete error values
//! mean "cancelled" or "deadline exceeded" depends on the runtime, so
//! recognition is a capability ([`SignalDetector`]) rather than a hard-coded
//! type check. This crate ships detectors for its own marker types and,
//! behind features, for tokio and async-std.
//!
//! Any `Fn(&(dyn Error + 'static)) -> Option<Signal>` closure is a detector,
//! which is the quickest way to plug in another runtime:
//!
//! ```rust
//! use apperr::signals::{Signal, SignalDetector};
//! use std::error::Error;
//! use std::io;
//!
//! let io_timeouts = |root: &(dyn Error + 'static)| {
//!     root.downcast_ref::<io::Error>()
//!         .filter(|e| e.kind() == io::ErrorKind::TimedOut)
//!         .map(|_| Signal::DeadlineExceeded)
//! };
//! let err = io::Error::from(io::ErrorKind::TimedOut);
//! assert_eq!(io_timeouts.detect(&err), Some(Signal::DeadlineExceeded));
//! ```

use std::error::Error;

/// Special failure class observed at the root of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The client abandoned the request.
    Cancelled,
    /// The request's deadline expired.
    DeadlineExceeded,
}

/// Capability check applied to the root cause of a failure.
pub trait SignalDetector: Send + Sync {
    /// Classify `root`, or `None` if it is an ordinary failure.
    fn detect(&self, root: &(dyn Error + 'static)) -> Option<Signal>;
}

impl<F> SignalDetector for F
where
    F: Fn(&(dyn Error + 'static)) -> Option<Signal> + Send + Sync,
{
    fn detect(&self, root: &(dyn Error + 'static)) -> Option<Signal> {
        self(root)
    }
}

/// Marker root cause for a request cancelled by its client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[error("context canceled")]
pub struct Cancelled;

/// Marker root cause for a request whose deadline expired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[error("context deadline exceeded")]
pub struct DeadlineExceeded;

/// Recognizes [`Cancelled`] and [`DeadlineExceeded`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSignals;

impl SignalDetector for BuiltinSignals {
    fn detect(&self, root: &(dyn Error + 'static)) -> Option<Signal> {
        if root.is::<DeadlineExceeded>() {
            Some(Signal::DeadlineExceeded)
        } else if root.is::<Cancelled>() {
            Some(Signal::Cancelled)
        } else {
            None
        }
    }
}

/// Recognizes `tokio::time::error::Elapsed` as a deadline and cancelled
/// `JoinError`s as cancellation.
#[cfg(feature = "tokio")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSignals;

#[cfg(feature = "tokio")]
impl SignalDetector for TokioSignals {
    fn detect(&self, root: &(dyn Error + 'static)) -> Option<Signal> {
        if root.is::<tokio::time::error::Elapsed>() {
            return Some(Signal::DeadlineExceeded);
        }
        root.downcast_ref::<tokio::task::JoinError>()
            .filter(|join| join.is_cancelled())
            .map(|_| Signal::Cancelled)
    }
}

/// Recognizes `async_std::future::TimeoutError` as a deadline.
#[cfg(feature = "async_std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct AsyncStdSignals;

#[cfg(feature = "async_std")]
impl SignalDetector for AsyncStdSignals {
    fn detect(&self, root: &(dyn Error + 'static)) -> Option<Signal> {
        root.is::<async_std::future::TimeoutError>()
            .then_some(Signal::DeadlineExceeded)
    }
}

/// Detectors for every runtime compiled in.
pub fn default_detectors() -> Vec<Box<dyn SignalDetector>> {
    #[allow(unused_mut)]
    let mut detectors: Vec<Box<dyn SignalDetector>> = vec![Box::new(BuiltinSignals)];
    #[cfg(feature = "tokio")]
    detectors.push(Box::new(TokioSignals));
    #[cfg(feature = "async_std")]
    detectors.push(Box::new(AsyncStdSignals));
    detectors
}
