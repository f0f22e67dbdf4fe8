use std::fmt;

use serde::{Serialize, Serializer};

/// A submitted password.
///
/// The value is redacted from `Debug` and `Display` output so that logging a
/// [`Credentials`](crate::Credentials) record never leaks it. Reading the
/// plaintext requires the explicit [`expose_secret`](Self::expose_secret) call.
///
/// Serialization writes the plaintext. Verify callbacks that forward the
/// record to an identity backend rely on this.
///
/// # Examples
///
/// ```
/// use jblocal::Password;
///
/// let password = Password::new("hunter2");
/// assert_eq!(format!("{:?}", password), "[REDACTED]");
/// assert_eq!(password.expose_secret(), "hunter2");
/// ```
// Do NOT derive Clone or Debug; both would make accidental exposure easy.
#[derive(PartialEq, Eq)]
pub struct Password {
    inner: String,
}

impl Password {
    /// Wraps a submitted password.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Returns the plaintext password.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// Returns `true` if no password was submitted.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Consumes the wrapper, returning the plaintext.
    pub fn into_inner(self) -> String {
        self.inner
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}
