//! Coercion of loosely typed form values.
//!
//! Browsers submit everything as strings, while JSON clients send numbers and
//! booleans. These helpers give every value one consistent reading:
//!
//! - a value is *falsy* when it is absent, `null`, `false`, `0` or `""`
//! - text fields read falsy values as the empty string
//! - flag fields read the leading base-10 integer of the value's text, and
//!   are set unless that integer is exactly zero

use serde_json::Value;

/// How a flag field's value parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagParse {
    /// Parsed to zero, or the field was falsy. The flag is clear.
    Zero,
    /// Parsed to a non-zero integer. The flag is set.
    NonZero,
    /// No leading integer. The flag is set.
    NotANumber,
}

impl FlagParse {
    /// Returns the flag's boolean reading.
    ///
    /// Anything other than an exact zero counts as set, including text with
    /// no leading integer.
    pub fn is_set(self) -> bool {
        self != FlagParse::Zero
    }
}

/// Returns `true` if `value` is present and not falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Renders a value as text the way a form field would read it.
///
/// Strings are returned as-is, numbers and booleans in their usual
/// notation, arrays and objects as compact JSON.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Reads a text field. Falsy values become the empty string.
pub fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(Some(v)) => to_text(v),
        _ => String::new(),
    }
}

/// Parses the leading base-10 integer of `text`.
///
/// Leading whitespace is skipped, one optional sign is accepted, and digits
/// are consumed until the first non-digit. Returns `None` when no digit
/// follows, which covers the empty string and text such as `"abc"`.
///
/// # Examples
///
/// ```
/// use jblocal::coerce::parse_int;
///
/// assert_eq!(parse_int("42"), Some(42.0));
/// assert_eq!(parse_int("  -7px"), Some(-7.0));
/// assert_eq!(parse_int("0x1"), Some(0.0));
/// assert_eq!(parse_int("abc"), None);
/// ```
pub fn parse_int(text: &str) -> Option<f64> {
    let trimmed = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: Vec<u32> = unsigned.chars().map_while(|c| c.to_digit(10)).collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .iter()
        .fold(0.0_f64, |acc, digit| acc * 10.0 + f64::from(*digit));
    Some(if negative { -magnitude } else { magnitude })
}

/// Reads a flag field.
///
/// Falsy values read as [`FlagParse::Zero`]. Numbers are read by magnitude:
/// fractions in `[1e-6, 1)` print as `0.xxx` and read as zero, smaller ones
/// print in exponent form and read their leading mantissa digit. Anything
/// else is rendered as text and parsed with [`parse_int`].
pub fn flag_field(value: Option<&Value>) -> FlagParse {
    let value = match value {
        Some(v) if is_truthy(Some(v)) => v,
        _ => return FlagParse::Zero,
    };

    if let Value::Number(n) = value {
        return match n.as_f64().map(f64::abs) {
            Some(magnitude) if (1e-6..1.0).contains(&magnitude) => FlagParse::Zero,
            _ => FlagParse::NonZero,
        };
    }

    match parse_int(&to_text(value)) {
        Some(n) if n == 0.0 => FlagParse::Zero,
        Some(_) => FlagParse::NonZero,
        None => FlagParse::NotANumber,
    }
}
