//! Verification outcomes and the single-use completion handle.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::error::BoxError;
use crate::logging::AttemptLog;
use crate::signal::Signals;
use crate::Error;

/// Result of a verify callback.
pub enum Outcome<U> {
    /// Verification could not be carried out
    Error(BoxError),
    /// The credentials did not identify a user
    Rejected(Option<Value>),
    /// The credentials identified `user`
    Authenticated(U, Option<Value>),
}

impl<U> fmt::Debug for Outcome<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Outcome::Rejected(info) => f.debug_tuple("Rejected").field(info).finish(),
            // The user type is opaque here.
            Outcome::Authenticated(_, info) => {
                f.debug_tuple("Authenticated").field(&"..").field(info).finish()
            }
        }
    }
}

/// Shared state behind a [`Done`] handle.
///
/// Holds the host's signal sink until the first completion takes it. If the
/// last reference goes away while the sink is still here, nobody completed
/// the attempt and an error is emitted instead.
pub(crate) struct Slot<U> {
    sink: Mutex<Option<Box<dyn Signals<U>>>>,
    log: AttemptLog,
}

impl<U> Slot<U> {
    pub(crate) fn new(sink: Box<dyn Signals<U>>, log: AttemptLog) -> Self {
        Self {
            sink: Mutex::new(Some(sink)),
            log,
        }
    }

    pub(crate) fn take(&self) -> Option<Box<dyn Signals<U>>> {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub(crate) fn log(&self) -> &AttemptLog {
        &self.log
    }
}

impl<U> Drop for Slot<U> {
    fn drop(&mut self) {
        let sink = self
            .sink
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(mut sink) = sink {
            if std::thread::panicking() {
                self.log
                    .error(format_args!("completion handle dropped during a panic"));
                sink.error(Error::VerifyPanicked(
                    "completion handle dropped during a panic".to_string(),
                ));
            } else {
                self.log
                    .error(format_args!("completion handle dropped without an outcome"));
                sink.error(Error::Abandoned);
            }
        }
    }
}

/// Completion handle passed to the verify callback.
///
/// Consuming methods make it usable at most once. Dropping it without
/// completing reports [`Error::Abandoned`] to the host, so every attempt
/// produces exactly one signal.
///
/// `Done` is `Send + 'static`: it may be moved to another thread and
/// completed later, for example after a database round-trip.
pub struct Done<U> {
    slot: Arc<Slot<U>>,
}

impl<U> Done<U> {
    pub(crate) fn new(slot: Arc<Slot<U>>) -> Self {
        Self { slot }
    }

    /// Reports the outcome of verification.
    pub fn complete(self, outcome: Outcome<U>) {
        let log = self.slot.log();
        let Some(mut sink) = self.slot.take() else {
            log.debug(format_args!("attempt already completed, outcome ignored"));
            return;
        };

        match outcome {
            Outcome::Error(err) => {
                log.error(format_args!("verification error: {}", err));
                sink.error(err.into());
            }
            Outcome::Rejected(info) => {
                log.warn(format_args!("credentials rejected"));
                sink.fail(info, None);
            }
            Outcome::Authenticated(user, info) => {
                log.info(format_args!("authenticated"));
                sink.success(user, info);
            }
        }
    }

    /// Reports an authenticated user.
    pub fn success(self, user: U) {
        self.complete(Outcome::Authenticated(user, None));
    }

    /// Reports an authenticated user with extra information.
    pub fn success_with_info(self, user: U, info: Value) {
        self.complete(Outcome::Authenticated(user, Some(info)));
    }

    /// Reports that the credentials did not identify a user.
    pub fn reject(self) {
        self.complete(Outcome::Rejected(None));
    }

    /// Reports a rejection with diagnostic information.
    pub fn reject_with_info(self, info: Value) {
        self.complete(Outcome::Rejected(Some(info)));
    }

    /// Reports that verification could not be carried out.
    pub fn error(self, err: impl Into<BoxError>) {
        self.complete(Outcome::Error(err.into()));
    }
}

impl<U> fmt::Debug for Done<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done")
            .field("strategy", &self.slot.log().strategy())
            .field("request_id", &self.slot.log().request_id())
            .finish_non_exhaustive()
    }
}

/// Renders a caught panic payload as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
