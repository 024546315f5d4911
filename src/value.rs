//! The stored value type and its lossy coercions.
//!
//! Values are kept exactly as they were written. Coercion only happens on read,
//! and it never fails: anything that does not convert cleanly yields the target
//! type's zero value (`""`, `0`, `0.0`, `false`).
//!
//! Coercion follows the textual form of the stored value. A string `"8080"` reads
//! as int `8080`, a float `3.0` reads as int `3` but `3.5` reads as `0`, an int
//! `1` reads as bool `true`. Inserted [`ConfigOption`] records are not settings
//! and coerce to zero values throughout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::ConfigOption;

/// A single stored setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Option(Box<ConfigOption>),
}

impl Value {
    /// Text form of the value, `None` for option records.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Option(_) => None,
        }
    }

    pub fn coerce_string(&self) -> String {
        self.as_text().unwrap_or_default()
    }

    pub fn coerce_int(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            Value::Str(s) => s.parse().unwrap_or(0),
            Value::Float(f) => float_to_int(*f),
            Value::Bool(_) | Value::Option(_) => 0,
        }
    }

    pub fn coerce_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Str(s) => parse_bool(s).unwrap_or(false),
            Value::Int(i) => *i == 1,
            Value::Float(f) => *f == 1.0,
            Value::Option(_) => false,
        }
    }

    pub fn coerce_f64(&self) -> f64 {
        match self {
            Value::Float(f) => *f,
            Value::Int(i) => *i as f64,
            Value::Str(s) => parse_float(s),
            Value::Bool(_) | Value::Option(_) => 0.0,
        }
    }

    pub fn coerce_f32(&self) -> f32 {
        match self {
            Value::Float(f) => {
                let narrowed = *f as f32;
                // Out of f32 range reads as a failed conversion.
                if f.is_finite() && narrowed.is_infinite() {
                    0.0
                } else {
                    narrowed
                }
            }
            Value::Int(i) => *i as f32,
            Value::Str(s) => parse_float(s),
            Value::Bool(_) | Value::Option(_) => 0.0,
        }
    }
}

/// Parse decimal or exponent text at the target width. Text that overflows
/// the width reads as zero; only an explicit `inf`/`infinity` yields infinity.
fn parse_float<F>(s: &str) -> F
where
    F: std::str::FromStr + Default + Into<f64> + Copy,
{
    let Ok(parsed) = s.parse::<F>() else {
        return F::default();
    };
    if parsed.into().is_infinite() && !is_inf_spelling(s) {
        return F::default();
    }
    parsed
}

fn is_inf_spelling(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn float_to_int(f: f64) -> i64 {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        f as i64
    } else {
        0
    }
}

/// Parse the conventional boolean spellings: `1 t T TRUE true True` and
/// `0 f F FALSE false False`. Anything else is `None`.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Option(opt) => write!(f, "<option {}>", opt.name),
            other => write!(f, "{}", other.coerce_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i.into())
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Value::Int(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    /// Widens through the shortest text form, so `0.1_f32` is stored as `0.1`
    /// rather than `0.10000000149011612`.
    fn from(f: f32) -> Self {
        Value::Float(f.to_string().parse().unwrap_or(f.into()))
    }
}

impl From<ConfigOption> for Value {
    fn from(opt: ConfigOption) -> Self {
        Value::Option(Box::new(opt))
    }
}
