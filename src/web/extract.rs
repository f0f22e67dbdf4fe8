//! Extraction boundary trait for web integration.

use serde_json::Value;

/// Exposes the parsed body of a framework-specific request.
///
/// Framework integrations implement this trait so the strategy can read
/// credentials without depending on the framework.
///
/// This trait intentionally does NOT parse bodies: form or JSON decoding is
/// the body parser's job. A request whose body was never parsed returns
/// `None` from [`form_body`](Self::form_body) and reads as an empty form.
///
/// # Examples
///
/// ```
/// use jblocal::web::ExtractFormBody;
/// use serde_json::Value;
///
/// struct MyFrameworkRequest {
///     id: String,
///     parsed: Option<Value>,
/// }
///
/// impl ExtractFormBody for MyFrameworkRequest {
///     fn form_body(&self) -> Option<&Value> {
///         self.parsed.as_ref()
///     }
///
///     fn request_id(&self) -> Option<&str> {
///         Some(self.id.as_str())
///     }
/// }
/// ```
pub trait ExtractFormBody {
    /// Returns the parsed request body, if any.
    fn form_body(&self) -> Option<&Value>;

    /// Returns an identifier used to correlate log events.
    fn request_id(&self) -> Option<&str> {
        None
    }
}

/// A bare JSON value is its own body.
impl ExtractFormBody for Value {
    fn form_body(&self) -> Option<&Value> {
        Some(self)
    }
}

impl<T: ExtractFormBody + ?Sized> ExtractFormBody for &T {
    fn form_body(&self) -> Option<&Value> {
        (**self).form_body()
    }

    fn request_id(&self) -> Option<&str> {
        (**self).request_id()
    }
}
