use std::fmt;

/// Boxed error reported by a verify callback.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the local strategy.
///
/// `InvalidConfiguration` is returned at construction time. The other
/// variants never escape `authenticate`; they are delivered to the host
/// through [`Signals::error`](crate::Signals::error).
#[derive(Debug)]
pub enum Error {
    /// The strategy was built without a required piece, such as the verify callback
    InvalidConfiguration(String),
    /// The verify callback reported an error
    Verify(BoxError),
    /// The verify callback panicked before completing
    VerifyPanicked(String),
    /// The completion handle was dropped without reporting an outcome
    Abandoned,
}

impl Error {
    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Verify(err) => write!(f, "Verification failed: {}", err),
            Error::VerifyPanicked(msg) => write!(f, "Verify callback panicked: {}", msg),
            Error::Abandoned => write!(f, "Verify callback dropped its completion handle"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Verify(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<BoxError> for Error {
    fn from(err: BoxError) -> Self {
        Error::Verify(err)
    }
}
