use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;

use crate::coerce::{self, FlagParse};
use crate::logging::AttemptLog;
use crate::lookup::lookup;
use crate::options::{AuthenticateOptions, StrategyOptions};
use crate::outcome::{panic_message, Done, Slot};
use crate::signal::{Signals, BAD_REQUEST};
use crate::web::ExtractFormBody;
use crate::{Credentials, Error, Password};

/// Name under which the local strategy registers by default.
pub const DEFAULT_STRATEGY_NAME: &str = "jblocal";

/// A pluggable authentication method.
///
/// The host looks strategies up by [`name`](Self::name) and calls
/// [`authenticate`](Self::authenticate) once per attempt, passing the
/// [`Signals`] capability through which the strategy reports exactly one
/// result.
pub trait Strategy<R: ?Sized, U> {
    /// Registry name of the strategy.
    fn name(&self) -> &str;

    /// Runs one authentication attempt against `request`.
    fn authenticate(
        &self,
        request: &R,
        options: &AuthenticateOptions,
        signals: Box<dyn Signals<U>>,
    );
}

/// Application-supplied credential check.
///
/// `request` is `Some` only when the strategy was configured with
/// `pass_request_to_callback`. The check reports its result through `done`,
/// either before returning or later from another thread.
///
/// Closures with the matching signature implement this trait.
pub trait Verify<R: ?Sized, U>: Send + Sync {
    /// Checks `credentials` and completes `done`.
    fn verify(&self, request: Option<&R>, credentials: Credentials, done: Done<U>);
}

impl<R, U, F> Verify<R, U> for F
where
    R: ?Sized,
    F: Fn(Option<&R>, Credentials, Done<U>) + Send + Sync,
{
    fn verify(&self, request: Option<&R>, credentials: Credentials, done: Done<U>) {
        self(request, credentials, done)
    }
}

/// Authenticates requests from email/password form fields, with a guest
/// flag that waives the credential check.
///
/// # Examples
///
/// ```
/// use jblocal::signal::{Signal, SignalRecorder};
/// use jblocal::web::FormRequest;
/// use jblocal::{AuthenticateOptions, LocalStrategy, Strategy};
///
/// let strategy: LocalStrategy<FormRequest, String> =
///     LocalStrategy::new(|_request, credentials, done| {
///         if credentials.password.expose_secret() == "secret" {
///             done.success(credentials.email)
///         } else {
///             done.reject()
///         }
///     });
///
/// let mut request = FormRequest::new("req-1");
/// request.add_field("email", "a@b.com");
/// request.add_field("password", "secret");
///
/// let recorder = SignalRecorder::<String>::new();
/// strategy.authenticate(&request, &AuthenticateOptions::default(), Box::new(recorder.clone()));
///
/// match recorder.take().pop() {
///     Some(Signal::Success { user, .. }) => assert_eq!(user, "a@b.com"),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub struct LocalStrategy<R: ?Sized, U> {
    name: String,
    options: StrategyOptions,
    verifier: Box<dyn Verify<R, U>>,
}

impl<R: ?Sized, U> LocalStrategy<R, U> {
    /// Creates a strategy with default options.
    pub fn new<F>(verify: F) -> Self
    where
        F: Fn(Option<&R>, Credentials, Done<U>) + Send + Sync + 'static,
    {
        Self::with_options(StrategyOptions::default(), verify)
    }

    /// Creates a strategy with the given options.
    pub fn with_options<F>(options: StrategyOptions, verify: F) -> Self
    where
        F: Fn(Option<&R>, Credentials, Done<U>) + Send + Sync + 'static,
    {
        Self {
            name: DEFAULT_STRATEGY_NAME.to_string(),
            options: options.resolved(),
            verifier: Box::new(verify),
        }
    }

    /// Starts building a strategy.
    pub fn builder() -> LocalStrategyBuilder<R, U> {
        LocalStrategyBuilder::new()
    }

    /// Returns the resolved options.
    pub fn options(&self) -> &StrategyOptions {
        &self.options
    }

    /// Reads the credentials out of a request body.
    ///
    /// Missing fields read as empty text or a clear flag. This does not
    /// apply the guest rule; see [`Strategy::authenticate`].
    pub fn extract(&self, body: &Value) -> Credentials {
        self.extract_logged(body, &AttemptLog::new(self.name.as_str(), None))
    }

    fn extract_logged(&self, body: &Value, log: &AttemptLog) -> Credentials {
        let email = coerce::text_field(lookup(body, &self.options.email_field));
        let password = coerce::text_field(lookup(body, &self.options.password_field));
        let is_guest = coerce::flag_field(lookup(body, &self.options.is_guest_field));
        let is_oc = coerce::flag_field(lookup(body, &self.options.is_oc_field));

        if is_guest == FlagParse::NotANumber {
            log.debug(format_args!(
                "field '{}' is not an integer, treating as guest",
                self.options.is_guest_field
            ));
        }
        if is_oc == FlagParse::NotANumber {
            log.debug(format_args!(
                "field '{}' is not an integer, treating as set",
                self.options.is_oc_field
            ));
        }

        Credentials {
            email,
            is_guest: is_guest.is_set(),
            is_oc: is_oc.is_set(),
            password: Password::new(password),
        }
    }
}

impl<R: ?Sized, U> fmt::Debug for LocalStrategy<R, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStrategy")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<R, U> Strategy<R, U> for LocalStrategy<R, U>
where
    R: ExtractFormBody + ?Sized,
    U: 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn authenticate(
        &self,
        request: &R,
        options: &AuthenticateOptions,
        mut signals: Box<dyn Signals<U>>,
    ) {
        let log = AttemptLog::new(self.name.as_str(), request.request_id());
        let empty = Value::Null;
        let body = request.form_body().unwrap_or(&empty);

        let credentials = self.extract_logged(body, &log);
        log.debug(format_args!("extracted {:?}", credentials));

        if !credentials.is_guest && !credentials.is_complete() {
            let message = options.bad_request_message_or_default();
            log.warn(format_args!("missing credentials"));
            signals.fail(
                Some(serde_json::json!({ "message": message })),
                Some(BAD_REQUEST),
            );
            return;
        }

        let slot = Arc::new(Slot::new(signals, log));
        let done = Done::new(Arc::clone(&slot));
        let forwarded = if self.options.pass_request_to_callback {
            Some(request)
        } else {
            None
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.verifier.verify(forwarded, credentials, done)
        }));

        if let Err(payload) = result {
            let message = panic_message(payload.as_ref());
            match slot.take() {
                Some(mut sink) => {
                    slot.log()
                        .error(format_args!("verify callback panicked: {}", message));
                    sink.error(Error::VerifyPanicked(message));
                }
                None => slot.log().debug(format_args!(
                    "verify callback panicked after completing: {}",
                    message
                )),
            }
        }
    }
}

/// Builder for [`LocalStrategy`].
///
/// [`build`](Self::build) fails with [`Error::InvalidConfiguration`] when no
/// verify callback was supplied.
pub struct LocalStrategyBuilder<R: ?Sized, U> {
    name: Option<String>,
    options: StrategyOptions,
    verifier: Option<Box<dyn Verify<R, U>>>,
}

impl<R: ?Sized, U> LocalStrategyBuilder<R, U> {
    /// Creates a builder with default options and no verify callback.
    pub fn new() -> Self {
        Self {
            name: None,
            options: StrategyOptions::default(),
            verifier: None,
        }
    }

    /// Overrides the registry name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the options.
    pub fn options(mut self, options: StrategyOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the verify callback from a closure.
    pub fn verify<F>(self, verify: F) -> Self
    where
        F: Fn(Option<&R>, Credentials, Done<U>) + Send + Sync + 'static,
    {
        self.verifier(verify)
    }

    /// Sets the verify callback from any [`Verify`] implementation.
    pub fn verifier<V>(mut self, verifier: V) -> Self
    where
        V: Verify<R, U> + 'static,
    {
        self.verifier = Some(Box::new(verifier));
        self
    }

    /// Builds the strategy.
    pub fn build(self) -> Result<LocalStrategy<R, U>, Error> {
        let verifier = self.verifier.ok_or_else(|| {
            Error::invalid_configuration("local strategy requires a verify callback")
        })?;

        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_STRATEGY_NAME.to_string(),
        };

        Ok(LocalStrategy {
            name,
            options: self.options.resolved(),
            verifier,
        })
    }
}

impl<R: ?Sized, U> Default for LocalStrategyBuilder<R, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized, U> fmt::Debug for LocalStrategyBuilder<R, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStrategyBuilder")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("has_verifier", &self.verifier.is_some())
            .finish()
    }
}
