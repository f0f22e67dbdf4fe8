//! Nested field lookup over a parsed request body.
//!
//! Form parsers turn `user[email]=a@b.com` into a nested object, and JSON
//! bodies nest naturally. A configured field name may therefore be a path.
//! Both dotted (`user.email`) and bracket (`user[email]`) notation are
//! accepted, and may be mixed (`user[emails].0`).

use serde_json::Value;

/// Splits a field name into its path segments.
///
/// Empty segments are dropped, so `"user..email"` and `"user[]email"` both
/// resolve like `"user.email"`.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(|c: char| c == '.' || c == '[' || c == ']')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Resolves `path` inside `body`.
///
/// An exact top-level key always wins, so a flat body with a literal
/// `"user.email"` key still resolves. Otherwise the path is descended one
/// segment at a time through objects (by key) and arrays (by index).
///
/// Returns `None` if any segment is absent or if the walk reaches a scalar
/// before the path is exhausted. Never panics.
///
/// # Examples
///
/// ```
/// use jblocal::lookup::lookup;
/// use serde_json::json;
///
/// let body = json!({ "user": { "email": "a@b.com" } });
/// assert_eq!(lookup(&body, "user.email"), Some(&json!("a@b.com")));
/// assert_eq!(lookup(&body, "user[email]"), Some(&json!("a@b.com")));
/// assert_eq!(lookup(&body, "account.email"), None);
/// ```
pub fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = body.as_object().and_then(|map| map.get(path)) {
        return Some(value);
    }

    let parts = segments(path);
    if parts.is_empty() {
        return None;
    }

    let mut current = body;
    for part in parts {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
