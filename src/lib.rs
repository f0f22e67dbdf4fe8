//! Form-credential authentication strategy with a guest bypass.
//!
//! This crate provides one pluggable authentication strategy for host
//! frameworks that dispatch login requests to named strategies:
//! - **Extraction**: email, password, guest flag and OC flag are read from the
//!   parsed request body, under configurable (optionally nested) field names
//! - **Guest rule**: unless the guest flag is set, email and password must
//!   both be present, otherwise the attempt fails with status 400
//! - **Verification**: the application's verify callback receives a
//!   [`Credentials`] record and completes a single-use [`Done`] handle
//! - **Signalling**: the outcome reaches the host as exactly one of
//!   `success`, `fail` or `error` on its [`Signals`] sink
//!
//! # Core Types
//!
//! - [`LocalStrategy`]: the strategy, built from [`StrategyOptions`] and a verify callback
//! - [`Strategy`]: the trait a host registry dispatches through
//! - [`Credentials`]: the record handed to the verify callback
//! - [`Done`] / [`Outcome`]: how the verify callback reports its result
//! - [`Signals`]: the host capability receiving the result
//!
//! # Examples
//!
//! ```
//! use jblocal::signal::{Signal, SignalRecorder};
//! use jblocal::{AuthenticateOptions, LocalStrategy, Strategy};
//! use serde_json::{json, Value};
//!
//! let strategy: LocalStrategy<Value, Value> = LocalStrategy::new(|_request, credentials, done| {
//!     if credentials.is_guest {
//!         done.success(json!({ "guest": true }))
//!     } else {
//!         done.reject_with_info(json!({ "reason": "unknown user" }))
//!     }
//! });
//!
//! let recorder = SignalRecorder::<Value>::new();
//! strategy.authenticate(
//!     &json!({ "isGuest": "1" }),
//!     &AuthenticateOptions::default(),
//!     Box::new(recorder.clone()),
//! );
//!
//! let signals = recorder.take();
//! assert_eq!(signals.len(), 1);
//! assert!(signals[0].is_success());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod coerce;
mod credentials;
mod error;
mod logging;
pub mod lookup;
mod options;
mod outcome;
mod password;
pub mod signal;
mod strategy;
pub mod web;

pub use credentials::Credentials;
pub use error::{BoxError, Error};
pub use logging::AttemptLog;
pub use options::{
    AuthenticateOptions, StrategyOptions, DEFAULT_BAD_REQUEST_MESSAGE, DEFAULT_EMAIL_FIELD,
    DEFAULT_IS_GUEST_FIELD, DEFAULT_IS_OC_FIELD, DEFAULT_PASSWORD_FIELD,
};
pub use outcome::{Done, Outcome};
pub use password::Password;
pub use signal::{Signal, Signals};
pub use strategy::{
    LocalStrategy, LocalStrategyBuilder, Strategy, Verify, DEFAULT_STRATEGY_NAME,
};
