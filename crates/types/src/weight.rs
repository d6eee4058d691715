// crates/types/src/weight.rs
//! Fixed-point weight and effort values.
//!
//! Weights carry exactly two fractional digits and are held as integer
//! hundredths of a kilogram. Effort (`weight × reps`) uses the same scale, so
//! per-bucket sums are exact; floats only appear at the JSON boundary.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;

/// Largest magnitude accepted from a float, in hundredths. Keeps `f64`
/// conversions exact (2^53) with room to spare.
const MAX_FLOAT_HUNDREDTHS: f64 = 1e15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightParseError {
    #[error("weight is empty")]
    Empty,

    #[error("invalid weight '{0}': expected a decimal number such as 82.5")]
    Invalid(String),

    #[error("weight '{0}' is out of range")]
    OutOfRange(String),
}

/// A weight in kilograms with two fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kilograms {
    hundredths: i64,
}

impl Kilograms {
    pub const ZERO: Self = Self { hundredths: 0 };

    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self { hundredths }
    }

    /// Whole kilograms, for literals in tests and fixtures.
    pub const fn from_whole(kg: i64) -> Self {
        Self {
            hundredths: kg * 100,
        }
    }

    pub const fn hundredths(self) -> i64 {
        self.hundredths
    }

    /// Round a float to the nearest hundredth. `None` for NaN, infinities and
    /// values too large to represent exactly.
    pub fn from_f64(value: f64) -> Option<Self> {
        scaled_from_f64(value).map(Self::from_hundredths)
    }

    pub fn as_f64(self) -> f64 {
        self.hundredths as f64 / 100.0
    }

    /// `weight × reps` at the same fixed-point scale.
    pub fn times(self, reps: i64) -> Effort {
        Effort::from_hundredths(self.hundredths.saturating_mul(reps))
    }
}

impl FromStr for Kilograms {
    type Err = WeightParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s).map(Self::from_hundredths)
    }
}

impl fmt::Display for Kilograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hundredths(f, self.hundredths)
    }
}

impl Serialize for Kilograms {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hundredths(self.hundredths, serializer)
    }
}

impl<'de> Deserialize<'de> for Kilograms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_any(HundredthsVisitor)
            .map(Self::from_hundredths)
    }
}

/// Training volume: summed `weight_kg × reps`, in hundredths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Effort {
    hundredths: i64,
}

impl Effort {
    pub const ZERO: Self = Self { hundredths: 0 };

    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self { hundredths }
    }

    pub const fn hundredths(self) -> i64 {
        self.hundredths
    }

    pub fn as_f64(self) -> f64 {
        self.hundredths as f64 / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.hundredths == 0
    }
}

impl Add for Effort {
    type Output = Effort;

    fn add(self, rhs: Effort) -> Effort {
        Effort::from_hundredths(self.hundredths.saturating_add(rhs.hundredths))
    }
}

impl AddAssign for Effort {
    fn add_assign(&mut self, rhs: Effort) {
        *self = *self + rhs;
    }
}

impl Sum for Effort {
    fn sum<I: Iterator<Item = Effort>>(iter: I) -> Effort {
        iter.fold(Effort::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Effort> for Effort {
    fn sum<I: Iterator<Item = &'a Effort>>(iter: I) -> Effort {
        iter.copied().sum()
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hundredths(f, self.hundredths)
    }
}

impl Serialize for Effort {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hundredths(self.hundredths, serializer)
    }
}

// ============================================================================
// Fixed-point helpers
// ============================================================================

/// Parse a plain decimal string ("82", "82.5", "-2.25") into hundredths.
/// A third fractional digit rounds half away from zero; further digits are
/// ignored.
fn parse_hundredths(raw: &str) -> Result<i64, WeightParseError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(WeightParseError::Empty);
    }

    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(WeightParseError::Invalid(raw.to_string()));
    }

    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| WeightParseError::OutOfRange(raw.to_string()))?
    };

    let mut digits = frac.bytes().map(|b| i64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = i64::from(digits.next().is_some_and(|d| d >= 5));

    let magnitude = whole_value
        .checked_mul(100)
        .and_then(|v| v.checked_add(tenths * 10 + hundredths + round_up))
        .ok_or_else(|| WeightParseError::OutOfRange(raw.to_string()))?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn scaled_from_f64(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let scaled = (value * 100.0).round();
    if scaled.abs() > MAX_FLOAT_HUNDREDTHS {
        return None;
    }
    Some(scaled as i64)
}

fn write_hundredths(f: &mut fmt::Formatter<'_>, hundredths: i64) -> fmt::Result {
    let sign = if hundredths < 0 { "-" } else { "" };
    let abs = hundredths.unsigned_abs();
    let (whole, frac) = (abs / 100, abs % 100);
    match frac {
        0 => write!(f, "{sign}{whole}"),
        f2 if f2 % 10 == 0 => write!(f, "{sign}{whole}.{}", f2 / 10),
        f2 => write!(f, "{sign}{whole}.{f2:02}"),
    }
}

/// Whole values go out as JSON integers, everything else as floats.
fn serialize_hundredths<S: Serializer>(hundredths: i64, serializer: S) -> Result<S::Ok, S::Error> {
    if hundredths % 100 == 0 {
        serializer.serialize_i64(hundredths / 100)
    } else {
        serializer.serialize_f64(hundredths as f64 / 100.0)
    }
}

/// Accepts JSON numbers and decimal strings.
struct HundredthsVisitor;

impl<'de> Visitor<'de> for HundredthsVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a weight in kilograms, as a number or decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        v.checked_mul(100)
            .ok_or_else(|| E::custom(WeightParseError::OutOfRange(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .ok_or_else(|| E::custom(WeightParseError::OutOfRange(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        scaled_from_f64(v).ok_or_else(|| E::custom(WeightParseError::OutOfRange(v.to_string())))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        parse_hundredths(v).map_err(E::custom)
    }
}
