//! Exact-decimal JSON numbers.
//!
//! A [`Number`] keeps the literal text it was written with, so `1.50`
//! serializes back as `1.50`, while equality and hashing go through a
//! normalized decimal key so that `1`, `1.00` and `1e0` compare equal. No
//! binary floating-point conversion happens on the parse or render path.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;

use thiserror::Error;

/// The text did not match the JSON numeric grammar (or its exponent was
/// beyond what the normalizer can represent).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid JSON number literal {literal:?}")]
pub struct NumberError {
    literal: String,
}

/// An exact decimal value with its original textual scale preserved.
#[derive(Debug, Clone)]
pub struct Number {
    literal: String,
    key: Key,
}

/// Normalized decimal: value = (-1)^neg × digits × 10^exponent, with
/// `digits` stripped of leading and trailing zeros. All textual spellings
/// of one value share one key; every zero collapses to `{+, "0", 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Key {
    neg: bool,
    digits: String,
    exponent: i64,
}

impl Number {
    /// The literal text, exactly as parsed or constructed.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// The value as an `i64`, when the literal is a plain decimal integer
    /// in range.
    pub fn as_i64(&self) -> Option<i64> {
        self.literal.parse().ok()
    }

    /// The value as the nearest `f64`. Lossy for literals beyond double
    /// precision; `None` only when the magnitude overflows to infinity.
    pub fn as_f64(&self) -> Option<f64> {
        self.literal.parse().ok().filter(|v: &f64| v.is_finite())
    }

    /// Converts a finite `f64` through its shortest decimal rendering.
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() {
            format!("{value}").parse().ok()
        } else {
            None
        }
    }

    fn from_integer_literal(literal: String) -> Self {
        let key = decompose(&literal).expect("integer literal is a valid JSON number");
        Self { literal, key }
    }
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match decompose(text) {
            Some(key) => Ok(Self {
                literal: text.to_owned(),
                key,
            }),
            None => Err(NumberError {
                literal: text.to_owned(),
            }),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl Deref for Number {
    type Target = str;

    fn deref(&self) -> &str {
        &self.literal
    }
}

macro_rules! number_from_integer {
    ($($t:ty),*) => {$(
        impl From<$t> for Number {
            fn from(value: $t) -> Self {
                Self::from_integer_literal(value.to_string())
            }
        }
    )*};
}

number_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// Validates `text` against the JSON numeric grammar and computes the
/// normalized key. `None` when the grammar is violated or the exponent
/// arithmetic leaves `i64`.
fn decompose(text: &str) -> Option<Key> {
    let bytes = text.as_bytes();
    let mut i = 0;

    let neg = bytes.first() == Some(&b'-');
    if neg {
        i += 1;
    }

    let int_start = i;
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return None,
    }
    let int_end = i;

    let frac_start;
    let frac_end;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_start = i;
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
        frac_end = i;
        if frac_start == frac_end {
            return None;
        }
    } else {
        frac_start = i;
        frac_end = i;
    }

    let mut exp: i64 = 0;
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        let exp_neg = match bytes.get(i) {
            Some(b'+') => {
                i += 1;
                false
            }
            Some(b'-') => {
                i += 1;
                true
            }
            _ => false,
        };
        let exp_start = i;
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
        if exp_start == i {
            return None;
        }
        for b in &bytes[exp_start..i] {
            exp = exp
                .checked_mul(10)?
                .checked_add(i64::from(b - b'0'))?;
        }
        if exp_neg {
            exp = -exp;
        }
    }

    if i != bytes.len() {
        return None;
    }

    let mut coefficient = String::with_capacity(int_end - int_start + frac_end - frac_start);
    coefficient.push_str(&text[int_start..int_end]);
    coefficient.push_str(&text[frac_start..frac_end]);
    let mut exponent = exp.checked_sub(i64::try_from(frac_end - frac_start).ok()?)?;

    let first = coefficient.bytes().position(|b| b != b'0');
    let last = coefficient.bytes().rposition(|b| b != b'0');
    match (first, last) {
        (Some(first), Some(last)) => {
            exponent = exponent.checked_add(i64::try_from(coefficient.len() - 1 - last).ok()?)?;
            Some(Key {
                neg,
                digits: coefficient[first..=last].to_owned(),
                exponent,
            })
        }
        _ => Some(Key {
            neg: false,
            digits: "0".to_owned(),
            exponent: 0,
        }),
    }
}
