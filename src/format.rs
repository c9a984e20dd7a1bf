//! Display formatting for converted values, French convention: `1 234,57`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Shown in place of a value that cannot be displayed.
pub const ERROR_DISPLAY: &str = "Erreur";
/// Fraction digits kept in auto mode.
pub const AUTO_MAX_DECIMALS: u8 = 6;
pub const MAX_DECIMALS: u8 = 100;

const DECIMAL_SEPARATOR: char = ',';
const GROUP_SEPARATOR: char = ' ';
const GROUP_SIZE: usize = 3;
// Longer than the complete decimal expansion of any finite f64.
const EXACT_DIGITS: usize = 1100;
// From here on every f64 is integral and fixed notation stops rounding.
const FIXED_NOTATION_LIMIT: f64 = 1e21;

/// Serialized as `"auto"` or the bare number of decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Up to six decimals, trailing zeros trimmed, integers shown bare.
    #[default]
    Auto,
    /// At most this many decimals.
    Fixed(u8),
}

impl Precision {
    pub fn max_decimals(self) -> u8 {
        match self {
            Precision::Auto => AUTO_MAX_DECIMALS,
            Precision::Fixed(decimals) => decimals.min(MAX_DECIMALS),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Auto => f.write_str("auto"),
            Precision::Fixed(decimals) => write!(f, "{decimals}"),
        }
    }
}

impl Serialize for Precision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Precision::Auto => serializer.serialize_str("auto"),
            Precision::Fixed(decimals) => serializer.serialize_u8(*decimals),
        }
    }
}

impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Decimals(u64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Decimals(decimals) => decimals.to_string().parse::<Precision>(),
            Raw::Text(text) => text.parse::<Precision>(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrecisionError {
    #[error("precision must be `auto` or a number of decimals, got {0:?}")]
    Invalid(String),
    #[error("precision must be at most 100 decimals, got {0}")]
    TooLarge(u64),
}

impl FromStr for Precision {
    type Err = PrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Precision::Auto);
        }
        let decimals: u64 = trimmed
            .parse()
            .map_err(|_| PrecisionError::Invalid(s.to_string()))?;
        if decimals > u64::from(MAX_DECIMALS) {
            return Err(PrecisionError::TooLarge(decimals));
        }
        Ok(Precision::Fixed(decimals as u8))
    }
}

/// Formats `value` for display.
///
/// Non-finite values render as [`ERROR_DISPLAY`]. Integers in auto mode keep
/// no decimals. Everything else is first rounded to the allowed number of
/// decimals (ties away from zero, on the exact binary value), re-read, then
/// shown with trailing zeros removed.
pub fn format_number(value: f64, precision: Precision) -> String {
    if !value.is_finite() {
        return ERROR_DISPLAY.to_string();
    }
    if precision == Precision::Auto && value.fract() == 0.0 {
        return render(value, 0);
    }

    let max_decimals = usize::from(precision.max_decimals());
    let rounded = if value.abs() < FIXED_NOTATION_LIMIT {
        to_fixed(value, max_decimals)
            .parse::<f64>()
            .unwrap_or(value)
    } else {
        value
    };
    render(rounded, max_decimals)
}

/// Fixed-point text for `value` with exactly `decimals` fraction digits,
/// rounded from its exact binary expansion.
fn to_fixed(value: f64, decimals: usize) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (integer, fraction) = round_half_up(&exact, decimals);
    let sign = if value < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    }
}

/// Grouped display text with at most `max_decimals` fraction digits, rounded
/// from the shortest representation that round-trips to `value`.
fn render(value: f64, max_decimals: usize) -> String {
    let shortest = format!("{}", value.abs());
    let (integer, fraction) = round_half_up(&shortest, max_decimals);
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(integer.len() * 2 + fraction.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(&integer));
    if !fraction.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
    }
    out
}

/// Rounds plain decimal text (`digits[.digits]`) half up to `decimals`
/// fraction digits, padding with zeros, and returns integer and fraction digits.
fn round_half_up(text: &str, decimals: usize) -> (String, String) {
    let (integer, fraction) = text.split_once('.').unwrap_or((text, ""));

    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .collect();
    let round_up = fraction
        .as_bytes()
        .get(decimals)
        .is_some_and(|digit| *digit >= b'5');
    if round_up {
        carry_one(&mut digits);
    }

    let split = digits.len() - decimals;
    let fraction_digits = digits.split_off(split);
    (
        String::from_utf8_lossy(&digits).into_owned(),
        String::from_utf8_lossy(&fraction_digits).into_owned(),
    )
}

fn carry_one(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / GROUP_SIZE);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % GROUP_SIZE == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
