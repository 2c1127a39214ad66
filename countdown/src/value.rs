//! Integer-or-NaN numbers held by the counter
//!
//! Numeric text typed into the panel is parsed leniently: the longest
//! integer prefix wins and anything unparseable becomes NaN. NaN is not an
//! error; it flows through arithmetic and rendering like any other value.

use std::fmt;

/// A 64-bit integer, or NaN.
///
/// Two NaNs compare equal, so re-parsing garbage does not count as a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Value(Option<i64>);

impl Value {
    pub const NAN: Value = Value(None);

    pub const fn new(n: i64) -> Self {
        Self(Some(n))
    }

    pub fn get(self) -> Option<i64> {
        self.0
    }

    pub fn is_nan(self) -> bool {
        self.0.is_none()
    }

    /// Parse the integer prefix of `text`.
    ///
    /// Leading whitespace and one sign are accepted, then the longest run of
    /// ASCII digits. `"12abc"` is 12, `"  -7"` is -7, `""` and `"-"` are NaN.
    /// Prefixes that do not fit in an `i64` are NaN.
    pub fn parse_int(text: &str) -> Self {
        let text = text.trim_start();
        let sign_len = usize::from(text.starts_with(['+', '-']));
        let digits = text[sign_len..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return Self::NAN;
        }
        Self(text[..sign_len + digits].parse().ok())
    }

    /// `self + diff` when counting up, `self - diff` when counting down.
    ///
    /// NaN in either operand, or overflow, yields NaN.
    pub fn step(self, diff: Value, up: bool) -> Value {
        let (Some(count), Some(diff)) = (self.0, diff.0) else {
            return Self::NAN;
        };
        let delta = if up { Some(diff) } else { diff.checked_neg() };
        Self(delta.and_then(|d| count.checked_add(d)))
    }

    /// Text for a numeric input field; NaN leaves the field empty.
    pub fn field_text(self) -> String {
        self.0.map(|n| n.to_string()).unwrap_or_default()
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::new(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("NaN"),
        }
    }
}
