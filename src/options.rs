//! Strategy configuration.

use serde::Deserialize;

/// Default body field holding the email address.
pub const DEFAULT_EMAIL_FIELD: &str = "email";
/// Default body field holding the password.
pub const DEFAULT_PASSWORD_FIELD: &str = "password";
/// Default body field holding the guest flag.
pub const DEFAULT_IS_GUEST_FIELD: &str = "isGuest";
/// Default body field holding the OC flag.
pub const DEFAULT_IS_OC_FIELD: &str = "isOc";
/// Default message of the missing-credentials failure.
pub const DEFAULT_BAD_REQUEST_MESSAGE: &str = "Missing credentials";

/// Construction-time options of a [`LocalStrategy`](crate::LocalStrategy).
///
/// Field names may be nested paths (see [`lookup`](crate::lookup::lookup)).
/// An empty field name is treated like an absent one and falls back to its
/// default when the strategy is built.
///
/// Deserializes from camelCase keys, so options can live in the host's
/// configuration file:
///
/// ```
/// use jblocal::StrategyOptions;
///
/// let options: StrategyOptions = serde_json::from_str(
///     r#"{ "emailField": "user[email]", "passReqToCallback": true }"#,
/// ).unwrap();
///
/// assert_eq!(options.email_field, "user[email]");
/// assert_eq!(options.password_field, "password");
/// assert!(options.pass_request_to_callback);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategyOptions {
    /// Field holding the email address
    pub email_field: String,
    /// Field holding the password
    pub password_field: String,
    /// Field holding the guest flag
    pub is_guest_field: String,
    /// Field holding the OC flag
    pub is_oc_field: String,
    /// Whether the request is passed to the verify callback
    #[serde(rename = "passReqToCallback", alias = "passRequestToCallback")]
    pub pass_request_to_callback: bool,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            email_field: DEFAULT_EMAIL_FIELD.to_string(),
            password_field: DEFAULT_PASSWORD_FIELD.to_string(),
            is_guest_field: DEFAULT_IS_GUEST_FIELD.to_string(),
            is_oc_field: DEFAULT_IS_OC_FIELD.to_string(),
            pass_request_to_callback: false,
        }
    }
}

impl StrategyOptions {
    /// Sets the email field name.
    pub fn email_field(mut self, field: impl Into<String>) -> Self {
        self.email_field = field.into();
        self
    }

    /// Sets the password field name.
    pub fn password_field(mut self, field: impl Into<String>) -> Self {
        self.password_field = field.into();
        self
    }

    /// Sets the guest flag field name.
    pub fn is_guest_field(mut self, field: impl Into<String>) -> Self {
        self.is_guest_field = field.into();
        self
    }

    /// Sets the OC flag field name.
    pub fn is_oc_field(mut self, field: impl Into<String>) -> Self {
        self.is_oc_field = field.into();
        self
    }

    /// Passes the request as first argument to the verify callback.
    pub fn pass_request_to_callback(mut self, pass: bool) -> Self {
        self.pass_request_to_callback = pass;
        self
    }

    /// Replaces empty field names with their defaults.
    pub(crate) fn resolved(self) -> Self {
        fn or_default(field: String, default: &str) -> String {
            if field.is_empty() {
                default.to_string()
            } else {
                field
            }
        }

        Self {
            email_field: or_default(self.email_field, DEFAULT_EMAIL_FIELD),
            password_field: or_default(self.password_field, DEFAULT_PASSWORD_FIELD),
            is_guest_field: or_default(self.is_guest_field, DEFAULT_IS_GUEST_FIELD),
            is_oc_field: or_default(self.is_oc_field, DEFAULT_IS_OC_FIELD),
            pass_request_to_callback: self.pass_request_to_callback,
        }
    }
}

/// Per-call options of [`Strategy::authenticate`](crate::Strategy::authenticate).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthenticateOptions {
    /// Message of the missing-credentials failure
    pub bad_request_message: Option<String>,
}

impl AuthenticateOptions {
    /// Sets the message reported when email or password is missing.
    pub fn bad_request_message(mut self, message: impl Into<String>) -> Self {
        self.bad_request_message = Some(message.into());
        self
    }

    /// Returns the missing-credentials message, or the default.
    ///
    /// An empty message counts as unset.
    pub fn bad_request_message_or_default(&self) -> &str {
        match self.bad_request_message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => DEFAULT_BAD_REQUEST_MESSAGE,
        }
    }
}
