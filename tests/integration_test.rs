use jblocal::signal::{Signal, SignalRecorder};
use jblocal::{
    AuthenticateOptions, Credentials, Error, LocalStrategy, Strategy, StrategyOptions,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Captured = Arc<Mutex<Vec<Value>>>;

/// Builds a strategy whose verifier records the serialized credentials and
/// authenticates with `{"id": 1}`.
fn capturing(options: StrategyOptions) -> (LocalStrategy<Value, Value>, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);

    let strategy = LocalStrategy::with_options(
        options,
        move |_request, credentials: Credentials, done| {
            sink.lock()
                .unwrap()
                .push(serde_json::to_value(&credentials).unwrap());
            done.success(json!({ "id": 1 }));
        },
    );

    (strategy, captured)
}

fn authenticate(
    strategy: &LocalStrategy<Value, Value>,
    body: Value,
    options: &AuthenticateOptions,
) -> Vec<Signal<Value>> {
    let recorder = SignalRecorder::<Value>::new();
    strategy.authenticate(&body, options, Box::new(recorder.clone()));
    recorder.take()
}

fn expect_bad_request(signals: &[Signal<Value>], message: &str) {
    assert_eq!(signals.len(), 1, "exactly one signal");
    match &signals[0] {
        Signal::Fail { challenge, status } => {
            assert_eq!(challenge, &Some(json!({ "message": message })));
            assert_eq!(*status, Some(400));
        }
        other => panic!("expected fail, got {:?}", other),
    }
}

#[test]
fn building_without_verifier_is_invalid_configuration() {
    let result = LocalStrategy::<Value, Value>::builder()
        .options(StrategyOptions::default().email_field("login"))
        .build();

    match result {
        Err(Error::InvalidConfiguration(message)) => assert!(message.contains("verify")),
        other => panic!("expected invalid configuration, got {:?}", other),
    }
}

#[test]
fn missing_password_fails_with_400() {
    let (strategy, captured) = capturing(StrategyOptions::default());

    let signals = authenticate(
        &strategy,
        json!({ "email": "a@b.com", "isGuest": "0" }),
        &AuthenticateOptions::default(),
    );

    expect_bad_request(&signals, "Missing credentials");
    assert!(captured.lock().unwrap().is_empty());
}

#[test]
fn missing_email_without_guest_field_fails() {
    let (strategy, _) = capturing(StrategyOptions::default());

    let signals = authenticate(
        &strategy,
        json!({ "password": "p" }),
        &AuthenticateOptions::default(),
    );

    expect_bad_request(&signals, "Missing credentials");
}

#[test]
fn custom_bad_request_message() {
    let (strategy, _) = capturing(StrategyOptions::default());
    let options = AuthenticateOptions::default().bad_request_message("Please log in");

    let signals = authenticate(&strategy, json!({}), &options);

    expect_bad_request(&signals, "Please log in");
}

#[test]
fn guest_flag_bypasses_presence_check() {
    for guest in [json!("1"), json!("abc"), json!(1), json!("-3"), json!(true)] {
        let (strategy, captured) = capturing(StrategyOptions::default());

        let signals = authenticate(
            &strategy,
            json!({ "isGuest": guest.clone() }),
            &AuthenticateOptions::default(),
        );

        assert_eq!(signals.len(), 1);
        assert!(signals[0].is_success(), "guest value {} should bypass", guest);
        assert_eq!(captured.lock().unwrap()[0]["IsGuest"], json!(true));
    }
}

#[test]
fn fractional_guest_flag_does_not_bypass() {
    for guest in [json!(0.000001), json!(0.5)] {
        let (strategy, captured) = capturing(StrategyOptions::default());

        let signals = authenticate(
            &strategy,
            json!({ "isGuest": guest }),
            &AuthenticateOptions::default(),
        );

        expect_bad_request(&signals, "Missing credentials");
        assert!(captured.lock().unwrap().is_empty());
    }
}

#[test]
fn full_credentials_round_trip() {
    let (strategy, captured) = capturing(StrategyOptions::default());

    authenticate(
        &strategy,
        json!({ "email": "a@b.com", "password": "p", "isGuest": "0", "isOc": "0" }),
        &AuthenticateOptions::default(),
    );

    assert_eq!(
        captured.lock().unwrap().as_slice(),
        &[json!({ "Email": "a@b.com", "IsGuest": false, "IsOC": false, "Password": "p" })]
    );
}

#[test]
fn guest_only_body_still_verifies() {
    let (strategy, captured) = capturing(StrategyOptions::default());

    authenticate(
        &strategy,
        json!({ "isGuest": "1" }),
        &AuthenticateOptions::default(),
    );

    assert_eq!(
        captured.lock().unwrap().as_slice(),
        &[json!({ "Email": "", "IsGuest": true, "IsOC": false, "Password": "" })]
    );
}

#[test]
fn oc_flag_passes_through() {
    let (strategy, captured) = capturing(StrategyOptions::default());

    authenticate(
        &strategy,
        json!({ "email": "a@b.com", "password": "p", "isOc": "1" }),
        &AuthenticateOptions::default(),
    );

    assert_eq!(captured.lock().unwrap()[0]["IsOC"], json!(true));
}

#[test]
fn authenticated_user_and_info_reach_success() {
    let strategy: LocalStrategy<Value, Value> = LocalStrategy::new(|_, _, done| {
        done.success_with_info(json!({ "id": 1 }), json!({ "extra": true }))
    });

    let signals = authenticate(
        &strategy,
        json!({ "email": "a@b.com", "password": "p" }),
        &AuthenticateOptions::default(),
    );

    assert_eq!(signals.len(), 1);
    match &signals[0] {
        Signal::Success { user, info } => {
            assert_eq!(user, &json!({ "id": 1 }));
            assert_eq!(info, &Some(json!({ "extra": true })));
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[test]
fn rejection_reaches_fail_with_info() {
    let strategy: LocalStrategy<Value, Value> =
        LocalStrategy::new(|_, _, done| done.reject_with_info(json!({ "reason": "bad" })));

    let signals = authenticate(
        &strategy,
        json!({ "email": "a@b.com", "password": "wrong" }),
        &AuthenticateOptions::default(),
    );

    assert_eq!(signals.len(), 1);
    match &signals[0] {
        Signal::Fail { challenge, status } => {
            assert_eq!(challenge, &Some(json!({ "reason": "bad" })));
            assert_eq!(*status, None);
        }
        other => panic!("expected fail, got {:?}", other),
    }
}

#[test]
fn verify_error_reaches_error() {
    let strategy: LocalStrategy<Value, Value> =
        LocalStrategy::new(|_, _, done| done.error("database unavailable"));

    let signals = authenticate(
        &strategy,
        json!({ "email": "a@b.com", "password": "p" }),
        &AuthenticateOptions::default(),
    );

    assert_eq!(signals.len(), 1);
    match &signals[0] {
        Signal::Error(Error::Verify(err)) => assert_eq!(err.to_string(), "database unavailable"),
        other => panic!("expected verify error, got {:?}", other),
    }
}

#[test]
fn panicking_verifier_reaches_error() {
    let strategy: LocalStrategy<Value, Value> =
        LocalStrategy::new(|_, _, _| panic!("lookup exploded"));

    let signals = authenticate(
        &strategy,
        json!({ "email": "a@b.com", "password": "p" }),
        &AuthenticateOptions::default(),
    );

    assert_eq!(signals.len(), 1);
    match &signals[0] {
        Signal::Error(Error::VerifyPanicked(message)) => assert_eq!(message, "lookup exploded"),
        other => panic!("expected panic error, got {:?}", other),
    }
}

#[test]
fn nested_field_names_resolve() {
    let (strategy, captured) = capturing(
        StrategyOptions::default()
            .email_field("user.email")
            .password_field("user[password]"),
    );

    let signals = authenticate(
        &strategy,
        json!({ "user": { "email": "a@b.com", "password": "p" } }),
        &AuthenticateOptions::default(),
    );

    assert!(signals[0].is_success());
    assert_eq!(captured.lock().unwrap()[0]["Email"], json!("a@b.com"));
}

#[test]
fn absent_intermediate_segment_uses_default() {
    let (strategy, captured) = capturing(
        StrategyOptions::default()
            .email_field("user.email")
            .is_guest_field("flags.guest"),
    );

    let signals = authenticate(
        &strategy,
        json!({ "account": { "email": "a@b.com" } }),
        &AuthenticateOptions::default(),
    );

    expect_bad_request(&signals, "Missing credentials");
    assert!(captured.lock().unwrap().is_empty());
}

#[test]
fn options_loaded_from_json() {
    let options: StrategyOptions = serde_json::from_value(json!({
        "emailField": "login",
        "passwordField": "secret"
    }))
    .unwrap();
    let (strategy, captured) = capturing(options);

    let signals = authenticate(
        &strategy,
        json!({ "login": "a@b.com", "secret": "p" }),
        &AuthenticateOptions::default(),
    );

    assert!(signals[0].is_success());
    assert_eq!(captured.lock().unwrap()[0]["Password"], json!("p"));
}
