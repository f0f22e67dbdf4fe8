use serde::Serialize;

use crate::Password;

/// Credentials extracted from one authentication attempt.
///
/// Serializes with the key casing identity backends expect:
///
/// ```
/// use jblocal::{Credentials, Password};
/// use serde_json::json;
///
/// let credentials = Credentials {
///     email: "a@b.com".to_string(),
///     password: Password::new("p"),
///     is_guest: false,
///     is_oc: false,
/// };
///
/// assert_eq!(
///     serde_json::to_value(&credentials).unwrap(),
///     json!({ "Email": "a@b.com", "IsGuest": false, "IsOC": false, "Password": "p" })
/// );
/// ```
///
/// `Debug` output redacts the password.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Submitted email, empty when absent
    #[serde(rename = "Email")]
    pub email: String,
    /// Whether the attempt is a guest login
    #[serde(rename = "IsGuest")]
    pub is_guest: bool,
    /// Application-specific OC flag, passed through uninterpreted
    #[serde(rename = "IsOC")]
    pub is_oc: bool,
    /// Submitted password, empty when absent
    #[serde(rename = "Password")]
    pub password: Password,
}

impl Credentials {
    /// Returns `true` if both email and password are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}
