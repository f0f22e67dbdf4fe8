//! Owned request adapter.

use serde_json::{Map, Value};

use super::ExtractFormBody;

/// A framework-free request carrying a request ID and a parsed body.
///
/// Framework-specific code can implement `From<FrameworkRequest>` for
/// `FormRequest` instead of implementing [`ExtractFormBody`] directly.
///
/// # Examples
///
/// ```
/// use jblocal::web::{ExtractFormBody, FormRequest};
/// use serde_json::json;
///
/// let mut request = FormRequest::new("req-12345");
/// request.add_field("email", "a@b.com");
/// request.add_field("isGuest", "0");
///
/// assert_eq!(request.request_id(), Some("req-12345"));
/// assert_eq!(
///     request.form_body(),
///     Some(&json!({ "email": "a@b.com", "isGuest": "0" }))
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormRequest {
    request_id: String,
    body: Value,
}

impl FormRequest {
    /// Creates a request with an empty body.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            body: Value::Object(Map::new()),
        }
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Sets a top-level body field.
    ///
    /// A non-object body is replaced by an empty object first.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        if !self.body.is_object() {
            self.body = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.body {
            map.insert(name.into(), value.into());
        }
    }

    /// Returns the body.
    pub fn body(&self) -> &Value {
        &self.body
    }
}

impl ExtractFormBody for FormRequest {
    fn form_body(&self) -> Option<&Value> {
        Some(&self.body)
    }

    fn request_id(&self) -> Option<&str> {
        Some(self.request_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_request_new() {
        let request = FormRequest::new("req-test");
        assert_eq!(request.request_id(), Some("req-test"));
        assert_eq!(request.body(), &json!({}));
    }

    #[test]
    fn add_field_overwrites() {
        let mut request = FormRequest::new("req-1");
        request.add_field("email", "first");
        request.add_field("email", "second");

        assert_eq!(request.body(), &json!({ "email": "second" }));
    }

    #[test]
    fn add_field_accepts_nested_values() {
        let mut request = FormRequest::new("req-1");
        request.add_field("user", json!({ "email": "a@b.com" }));
        request.add_field("isOc", 1);

        assert_eq!(request.body()["user"]["email"], json!("a@b.com"));
        assert_eq!(request.body()["isOc"], json!(1));
    }

    #[test]
    fn add_field_on_scalar_body_resets_it() {
        let mut request = FormRequest::new("req-1").with_body(json!("raw text"));
        request.add_field("email", "a@b.com");

        assert_eq!(request.body(), &json!({ "email": "a@b.com" }));
    }

    #[test]
    fn with_body_replaces() {
        let request = FormRequest::new("req-1").with_body(json!({ "password": "p" }));
        assert_eq!(request.form_body(), Some(&json!({ "password": "p" })));
    }
}
