//! The host side of an authentication attempt.
//!
//! A strategy reports its result by calling exactly one method of the
//! [`Signals`] capability the host hands to
//! [`Strategy::authenticate`](crate::Strategy::authenticate). Hosts that
//! would rather receive a value can use [`SignalRecorder`] or [`channel`].

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::Error;

/// Status code of the missing-credentials failure.
pub const BAD_REQUEST: u16 = 400;

/// Outcome-signalling capability implemented by the host framework.
///
/// Exactly one method is called per authentication attempt. The call may
/// happen on another thread when the verify callback completes later, hence
/// the `Send` bound.
pub trait Signals<U>: Send {
    /// The attempt authenticated `user`.
    fn success(&mut self, user: U, info: Option<Value>);

    /// The attempt was rejected. `status` is set when the rejection maps to a
    /// specific HTTP status, such as 400 for missing credentials.
    fn fail(&mut self, challenge: Option<Value>, status: Option<u16>);

    /// The attempt could not be completed.
    fn error(&mut self, err: Error);
}

/// One emitted signal, as a value.
#[derive(Debug)]
pub enum Signal<U> {
    /// See [`Signals::success`]
    Success {
        /// Authenticated user
        user: U,
        /// Optional extra information from the verify callback
        info: Option<Value>,
    },
    /// See [`Signals::fail`]
    Fail {
        /// Optional challenge or diagnostic information
        challenge: Option<Value>,
        /// Optional HTTP status
        status: Option<u16>,
    },
    /// See [`Signals::error`]
    Error(Error),
}

impl<U> Signal<U> {
    /// Returns `true` for a success signal.
    pub fn is_success(&self) -> bool {
        matches!(self, Signal::Success { .. })
    }

    /// Returns `true` for a fail signal.
    pub fn is_fail(&self) -> bool {
        matches!(self, Signal::Fail { .. })
    }

    /// Returns `true` for an error signal.
    pub fn is_error(&self) -> bool {
        matches!(self, Signal::Error(_))
    }

    /// Returns the HTTP status of a fail signal, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Signal::Fail { status, .. } => *status,
            _ => None,
        }
    }

    /// Replays this signal onto a host's [`Signals`] implementation.
    pub fn deliver(self, signals: &mut dyn Signals<U>) {
        match self {
            Signal::Success { user, info } => signals.success(user, info),
            Signal::Fail { challenge, status } => signals.fail(challenge, status),
            Signal::Error(err) => signals.error(err),
        }
    }
}

/// Records emitted signals in memory.
///
/// Clones share the same record, so one clone can be handed to the strategy
/// while the host keeps another.
#[derive(Debug)]
pub struct SignalRecorder<U> {
    signals: Arc<Mutex<Vec<Signal<U>>>>,
}

impl<U> SignalRecorder<U> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            signals: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the number of signals recorded so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes and returns every recorded signal, oldest first.
    pub fn take(&self) -> Vec<Signal<U>> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Signal<U>>> {
        self.signals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, signal: Signal<U>) {
        self.lock().push(signal);
    }
}

impl<U> Clone for SignalRecorder<U> {
    fn clone(&self) -> Self {
        Self {
            signals: Arc::clone(&self.signals),
        }
    }
}

impl<U> Default for SignalRecorder<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Send> Signals<U> for SignalRecorder<U> {
    fn success(&mut self, user: U, info: Option<Value>) {
        self.push(Signal::Success { user, info });
    }

    fn fail(&mut self, challenge: Option<Value>, status: Option<u16>) {
        self.push(Signal::Fail { challenge, status });
    }

    fn error(&mut self, err: Error) {
        self.push(Signal::Error(err));
    }
}

/// Sends emitted signals over a channel.
///
/// Created by [`channel`]. A signal sent after the receiver is gone is
/// dropped.
#[derive(Debug)]
pub struct ChannelSignals<U> {
    sender: Sender<Signal<U>>,
}

impl<U> ChannelSignals<U> {
    fn send(&self, signal: Signal<U>) {
        if self.sender.send(signal).is_err() {
            tracing::debug!("signal receiver dropped before the attempt completed");
        }
    }
}

impl<U: Send> Signals<U> for ChannelSignals<U> {
    fn success(&mut self, user: U, info: Option<Value>) {
        self.send(Signal::Success { user, info });
    }

    fn fail(&mut self, challenge: Option<Value>, status: Option<u16>) {
        self.send(Signal::Fail { challenge, status });
    }

    fn error(&mut self, err: Error) {
        self.send(Signal::Error(err));
    }
}

/// Creates a channel-backed signal sink.
///
/// Useful when the verify callback completes on another thread: the host
/// blocks on (or polls) the receiver for the single signal.
///
/// # Examples
///
/// ```
/// use jblocal::signal::{channel, Signals};
/// use serde_json::json;
///
/// let (mut sink, receiver) = channel::<String>();
/// sink.fail(Some(json!({ "message": "nope" })), Some(400));
///
/// let signal = receiver.recv().unwrap();
/// assert!(signal.is_fail());
/// assert_eq!(signal.status(), Some(400));
/// ```
pub fn channel<U>() -> (ChannelSignals<U>, Receiver<Signal<U>>) {
    let (sender, receiver) = mpsc::channel();
    (ChannelSignals { sender }, receiver)
}
