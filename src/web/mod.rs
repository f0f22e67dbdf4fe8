//! Request boundary.
//!
//! The strategy never sees a framework's request type directly. It reads the
//! parsed body through [`ExtractFormBody`], which framework integrations
//! implement for their own request types. [`FormRequest`] is an owned,
//! framework-free request for hosts that already hold a parsed body, and for
//! tests.
//!
//! # Integration Flow
//!
//! ```text
//! HTTP Request
//!   ↓
//! Body-parsing middleware produces a JSON value
//!   ↓
//! Framework request implements ExtractFormBody (or builds a FormRequest)
//!   ↓
//! Host calls Strategy::authenticate with its Signals sink
//!   ↓
//! Exactly one of success / fail / error
//! ```

mod adapter;
mod extract;

pub use adapter::FormRequest;
pub use extract::ExtractFormBody;
