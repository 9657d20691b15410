//! A single configuration value kept as text and as a number
//!
//! Every [`ConfigEntry`] stores the raw text it was built from together with
//! a best-effort numeric reading of that text. The numeric reading follows
//! stream-extraction rules: leading whitespace is skipped and the longest
//! decimal prefix is converted. If no prefix parses, the exact sentinels
//! `inf`, `-inf` and `nan` are recognised.

use crate::core::error::{ConfigError, Result};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A configuration value in both textual and numeric form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigEntry {
    /// Original text, kept verbatim
    raw: String,
    /// `raw` interpreted as a number (0 when interpretation failed)
    numeric: f64,
    /// Whether `raw` parsed as a number or a sentinel
    success: bool,
}

/// The result of a lenient typed extraction
///
/// `value` is always usable. `ok` is false when a diagnostic was emitted
/// while producing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coerced<T> {
    pub value: T,
    pub ok: bool,
}

impl<T> Coerced<T> {
    /// Take the value regardless of success
    pub fn into_value(self) -> T {
        self.value
    }

    /// Whether the extraction was clean
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// The value if the extraction was clean
    pub fn ok_value(self) -> Option<T> {
        if self.ok {
            Some(self.value)
        } else {
            None
        }
    }
}

impl ConfigEntry {
    /// Create an entry from text, interpreting it numerically right away
    pub fn new(raw: impl Into<String>) -> Self {
        let mut entry = Self::default();
        entry.reinit(raw);
        entry
    }

    /// Replace the text and recompute the numeric reading
    pub fn reinit(&mut self, raw: impl Into<String>) -> &mut Self {
        self.raw = raw.into();
        match parse_numeric(&self.raw) {
            Some(value) => {
                self.numeric = value;
                self.success = true;
            },
            None => {
                self.numeric = 0.0;
                self.success = false;
            },
        }
        self
    }

    /// The original text
    pub fn text(&self) -> &str {
        &self.raw
    }

    /// The numeric reading of the text
    pub fn numeric_value(&self) -> f64 {
        self.numeric
    }

    /// Whether the text parsed as a number or sentinel
    pub fn success(&self) -> bool {
        self.success
    }

    /// Whether the text is empty (the state of a never-specified token)
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Extract as `T`, warning about (but recovering from) any problem
    pub fn extract<T: FromEntry>(&self) -> Coerced<T> {
        let (value, problem) = T::convert(self);
        if let Some(err) = &problem {
            err.warn("ConfigEntry::extract");
        }
        Coerced {
            value,
            ok: problem.is_none(),
        }
    }

    /// Extract as `T`, failing on any problem instead of warning
    pub fn try_extract<T: FromEntry>(&self) -> Result<T> {
        match T::convert(self) {
            (value, None) => Ok(value),
            (_, Some(err)) => Err(err),
        }
    }

    pub fn as_string(&self) -> Coerced<String> {
        self.extract()
    }

    pub fn as_f32(&self) -> Coerced<f32> {
        self.extract()
    }

    pub fn as_f64(&self) -> Coerced<f64> {
        self.extract()
    }

    /// Same as [`ConfigEntry::as_f64`]
    pub fn as_float(&self) -> Coerced<f64> {
        self.extract()
    }

    pub fn as_int(&self) -> Coerced<i32> {
        self.extract()
    }

    pub fn as_uint(&self) -> Coerced<u32> {
        self.extract()
    }

    pub fn as_bool(&self) -> Coerced<bool> {
        self.extract()
    }

    pub fn as_char(&self) -> Coerced<char> {
        self.extract()
    }
}

impl fmt::Display for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for ConfigEntry {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ConfigEntry {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl FromStr for ConfigEntry {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Types a [`ConfigEntry`] can be extracted as
pub trait FromEntry: Sized {
    /// Name used in diagnostics
    const TYPE_NAME: &'static str;

    /// Convert the entry, returning the value and the problem met, if any
    fn convert(entry: &ConfigEntry) -> (Self, Option<ConfigError>);
}

impl FromEntry for String {
    const TYPE_NAME: &'static str = "string";

    fn convert(entry: &ConfigEntry) -> (Self, Option<ConfigError>) {
        (entry.raw.clone(), None)
    }
}

impl FromEntry for f64 {
    const TYPE_NAME: &'static str = "double";

    fn convert(entry: &ConfigEntry) -> (Self, Option<ConfigError>) {
        (entry.numeric, not_numeric::<Self>(entry))
    }
}

impl FromEntry for f32 {
    const TYPE_NAME: &'static str = "float";

    fn convert(entry: &ConfigEntry) -> (Self, Option<ConfigError>) {
        (entry.numeric as f32, not_numeric::<Self>(entry))
    }
}

impl FromEntry for i32 {
    const TYPE_NAME: &'static str = "int";

    fn convert(entry: &ConfigEntry) -> (Self, Option<ConfigError>) {
        integral(entry, |v| v as i32, f64::from)
    }
}

impl FromEntry for u32 {
    const TYPE_NAME: &'static str = "unsigned int";

    fn convert(entry: &ConfigEntry) -> (Self, Option<ConfigError>) {
        integral(entry, |v| v as u32, f64::from)
    }
}

impl FromEntry for bool {
    const TYPE_NAME: &'static str = "bool";

    fn convert(entry: &ConfigEntry) -> (Self, Option<ConfigError>) {
        // NaN compares unequal to zero, so it reads as true (and then
        // fails the round-trip check below).
        integral(entry, |v| v != 0.0, |b| f64::from(u8::from(b)))
    }
}

impl FromEntry for char {
    const TYPE_NAME: &'static str = "char";

    fn convert(entry: &ConfigEntry) -> (Self, Option<ConfigError>) {
        let mut chars = entry.raw.chars();
        match (chars.next(), chars.next()) {
            (None, _) => ('\0', None),
            (Some(c), None) => (c, None),
            (Some(c), Some(_)) => (
                c,
                Some(ConfigError::NotSingleChar {
                    raw: entry.raw.clone(),
                }),
            ),
        }
    }
}

fn not_numeric<T: FromEntry>(entry: &ConfigEntry) -> Option<ConfigError> {
    if entry.success {
        None
    } else {
        Some(ConfigError::NotNumeric {
            raw: entry.raw.clone(),
            target: T::TYPE_NAME,
        })
    }
}

/// Cast to an integral type and check the cast by widening it back
fn integral<T: FromEntry + Copy>(
    entry: &ConfigEntry,
    cast: impl Fn(f64) -> T,
    widen: impl Fn(T) -> f64,
) -> (T, Option<ConfigError>) {
    let value = cast(entry.numeric);
    if let Some(err) = not_numeric::<T>(entry) {
        return (value, Some(err));
    }
    if widen(value) != entry.numeric {
        return (
            value,
            Some(ConfigError::PrecisionLoss {
                raw: entry.raw.clone(),
                target: T::TYPE_NAME,
            }),
        );
    }
    (value, None)
}

/// Interpret text as a number the way a formatted stream read does,
/// falling back to the `inf`/`-inf`/`nan` sentinels.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    if let Some(prefix) = decimal_prefix(raw) {
        // Out of range counts as a failed read, not as infinity
        return prefix.parse::<f64>().ok().filter(|value| value.is_finite());
    }
    match raw {
        "inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        "nan" => Some(f64::NAN),
        _ => None,
    }
}

/// The longest `[+-]digits[.digits][(e|E)[+-]digits]` prefix after leading whitespace.
///
/// An exponent marker without digits makes the whole read fail.
fn decimal_prefix(raw: &str) -> Option<&str> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digit_count += frac_end - (end + 1);
        end = frac_end;
    }
    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end == exp {
            return None;
        }
        end = exp_end;
    }
    Some(&s[..end])
}
