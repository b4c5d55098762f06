//! Single-shot result handles for work that completes outside the caller's tick.
//!
//! Both the update check and path queries hand back a [`Pending`] when they
//! start. The owner polls it from its own tick; nothing blocks and nothing is
//! delivered on another thread's behalf. Dropping the handle abandons the
//! work: whoever holds the [`Completer`] simply finds nobody listening.

use tokio::sync::oneshot::{self, error::TryRecvError};

/// State of a [`Pending`] handle after a poll.
#[derive(Debug, PartialEq, Eq)]
pub enum PollState<T> {
    /// The work has not finished yet.
    Pending,
    /// The work finished with this value. The handle is spent afterwards.
    Ready(T),
    /// The producer went away without delivering a value.
    Abandoned,
}

/// Receiving half of a single-shot result.
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<T>,
}

/// Sending half of a single-shot result.
#[derive(Debug)]
pub struct Completer<T> {
    tx: oneshot::Sender<T>,
}

impl<T> Pending<T> {
    /// Creates a connected completer/handle pair.
    pub fn channel() -> (Completer<T>, Pending<T>) {
        let (tx, rx) = oneshot::channel();
        (Completer { tx }, Pending { rx })
    }

    /// Creates a handle that is already resolved with `value`.
    pub fn ready(value: T) -> Self {
        let (completer, pending) = Self::channel();
        completer.complete(value);
        pending
    }

    /// Checks for completion without blocking.
    pub fn poll(&mut self) -> PollState<T> {
        match self.rx.try_recv() {
            Ok(value) => PollState::Ready(value),
            Err(TryRecvError::Empty) => PollState::Pending,
            Err(TryRecvError::Closed) => PollState::Abandoned,
        }
    }
}

impl<T> Completer<T> {
    /// Delivers the result. A dropped handle means the owner lost interest,
    /// so the value is discarded.
    pub fn complete(self, value: T) {
        if self.tx.send(value).is_err() {
            log::trace!("Pending result dropped before completion was delivered");
        }
    }

    /// Whether the receiving handle has been dropped.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}
