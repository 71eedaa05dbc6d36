use std::fmt;
use std::str::FromStr;

use super::NumberError;

/// Maximum number of significant digits the store accepts.
pub const MAX_SIGNIFICANT_DIGITS: usize = 38;

/// Largest decimal exponent of the leading digit (9.99…E+125).
pub const MAX_MAGNITUDE: i64 = 125;

/// Smallest decimal exponent of the leading digit (1E-130).
pub const MIN_MAGNITUDE: i64 = -130;

// Exponents larger than this are out of range for any mantissa.
const SATURATED_EXPONENT: i64 = 1 << 40;

/// An exact-precision decimal number.
///
/// The value is `digits × 10^exponent`, where `digits` holds the significant
/// digits with no leading or trailing zeros. Zero is stored as `"0"` with
/// exponent 0 and is never negative, so numerically equal inputs (`10`, `10.0`,
/// `1e1`) produce equal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreNumber {
    negative: bool,
    digits: String,
    exponent: i32,
}

impl StoreNumber {
    /// Returns zero.
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: "0".to_string(),
            exponent: 0,
        }
    }

    /// Parses a decimal literal.
    ///
    /// Accepts an optional sign, an integer part, an optional fraction and an
    /// optional exponent (`-12.50e3`). Either the integer part or the fraction
    /// may be empty, but not both.
    pub fn parse(text: &str) -> Result<Self, NumberError> {
        if text.is_empty() {
            return Err(NumberError::Empty);
        }

        let invalid = || NumberError::Invalid(text.to_string());

        let (negative, unsigned) = if let Some(rest) = text.strip_prefix('-') {
            (true, rest)
        } else {
            (false, text.strip_prefix('+').unwrap_or(text))
        };

        let (mantissa, exponent_text) = match unsigned.find(|c| c == 'e' || c == 'E') {
            Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
            None => (unsigned, None),
        };

        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !is_ascii_digits(integer) || !is_ascii_digits(fraction) {
            return Err(invalid());
        }

        let exponent = match exponent_text {
            Some(exp) => parse_exponent(exp).ok_or_else(invalid)?,
            None => 0,
        };

        let mut digits = format!("{integer}{fraction}");
        let mut exponent = exponent - fraction.len() as i64;

        let leading_zeros = digits.len() - digits.trim_start_matches('0').len();
        digits.drain(..leading_zeros);
        if digits.is_empty() {
            return Ok(Self::zero());
        }

        let trailing_zeros = digits.len() - digits.trim_end_matches('0').len();
        digits.truncate(digits.len() - trailing_zeros);
        exponent += trailing_zeros as i64;

        if digits.len() > MAX_SIGNIFICANT_DIGITS {
            return Err(NumberError::TooPrecise {
                digits: digits.len(),
                max: MAX_SIGNIFICANT_DIGITS,
            });
        }

        let magnitude = exponent + digits.len() as i64 - 1;
        if !(MIN_MAGNITUDE..=MAX_MAGNITUDE).contains(&magnitude) {
            return Err(NumberError::OutOfRange(text.to_string()));
        }

        let exponent =
            i32::try_from(exponent).map_err(|_| NumberError::OutOfRange(text.to_string()))?;

        Ok(Self {
            negative,
            digits,
            exponent,
        })
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    /// Returns true if the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true if the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        self.exponent >= 0
    }

    /// Number of significant digits.
    pub fn significant_digits(&self) -> usize {
        self.digits.len()
    }

    /// Positional decimal text, as persisted by the store.
    ///
    /// Integers are written without a decimal point (`1000`), fractional
    /// values with the minimal number of fraction digits (`10.5`). No
    /// exponent notation is used.
    pub fn to_store_text(&self) -> String {
        let mut text = String::with_capacity(self.digits.len() + 8);
        if self.negative {
            text.push('-');
        }

        if self.exponent >= 0 {
            text.push_str(&self.digits);
            text.extend(std::iter::repeat('0').take(self.exponent as usize));
            return text;
        }

        let fraction_len = self.exponent.unsigned_abs() as usize;
        if fraction_len < self.digits.len() {
            let (integer, fraction) = self.digits.split_at(self.digits.len() - fraction_len);
            text.push_str(integer);
            text.push('.');
            text.push_str(fraction);
        } else {
            text.push_str("0.");
            text.extend(std::iter::repeat('0').take(fraction_len - self.digits.len()));
            text.push_str(&self.digits);
        }
        text
    }
}

impl fmt::Display for StoreNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_store_text())
    }
}

impl FromStr for StoreNumber {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_ascii_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    };

    if digits.is_empty() || !is_ascii_digits(digits) {
        return None;
    }

    let magnitude = digits
        .bytes()
        .try_fold(0i64, |acc, b| {
            acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
        })
        .unwrap_or(SATURATED_EXPONENT)
        .min(SATURATED_EXPONENT);

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(text: &str) -> StoreNumber {
        StoreNumber::parse(text).unwrap()
    }

    #[test]
    fn test_parse_integer() {
        let number = n("10");
        assert!(number.is_integer());
        assert!(!number.is_negative());
        assert_eq!(number.to_store_text(), "10");
    }

    #[test]
    fn test_parse_fraction() {
        let number = n("10.50");
        assert!(!number.is_integer());
        assert_eq!(number.to_store_text(), "10.5");
        assert_eq!(number.significant_digits(), 3);
    }

    #[test]
    fn test_equal_values_compare_equal() {
        assert_eq!(n("10"), n("10.0"));
        assert_eq!(n("10"), n("1e1"));
        assert_eq!(n("0.5"), n(".5"));
        assert_eq!(n("+7"), n("7"));
        assert_ne!(n("7"), n("-7"));
    }

    #[test]
    fn test_zero_is_never_negative() {
        assert_eq!(n("-0"), StoreNumber::zero());
        assert_eq!(n("-0.000"), StoreNumber::zero());
        assert!(n("0e99999").is_zero());
        assert_eq!(n("-0").to_store_text(), "0");
    }

    #[test]
    fn test_exponent_notation_is_expanded() {
        assert_eq!(n("1.5e3").to_store_text(), "1500");
        assert_eq!(n("15E-3").to_store_text(), "0.015");
        assert_eq!(n("-2.5e+2").to_store_text(), "-250");
    }

    #[test]
    fn test_small_fraction_text() {
        assert_eq!(n("0.0001").to_store_text(), "0.0001");
        assert_eq!(n("-0.25").to_store_text(), "-0.25");
        assert_eq!(n("123.456").to_store_text(), "123.456");
    }

    #[test]
    fn test_rejects_malformed_text() {
        assert_eq!(StoreNumber::parse(""), Err(NumberError::Empty));
        for text in ["abc", ".", "-", "1.2.3", "1e", "1e+", "--1", "1_000", " 1", "0x10"] {
            assert!(
                matches!(StoreNumber::parse(text), Err(NumberError::Invalid(_))),
                "expected {text:?} to be invalid"
            );
        }
    }

    #[test]
    fn test_precision_limit() {
        let max = "1".repeat(MAX_SIGNIFICANT_DIGITS);
        assert!(StoreNumber::parse(&max).is_ok());

        let too_many = "1".repeat(MAX_SIGNIFICANT_DIGITS + 1);
        assert_eq!(
            StoreNumber::parse(&too_many),
            Err(NumberError::TooPrecise {
                digits: 39,
                max: MAX_SIGNIFICANT_DIGITS
            })
        );

        // Trailing zeros are not significant.
        let padded = format!("1{}", "0".repeat(60));
        assert!(StoreNumber::parse(&padded).is_ok());
    }

    #[test]
    fn test_magnitude_limits() {
        assert!(StoreNumber::parse("9.9e125").is_ok());
        assert!(StoreNumber::parse("1e-130").is_ok());
        assert!(matches!(
            StoreNumber::parse("1e126"),
            Err(NumberError::OutOfRange(_))
        ));
        assert!(matches!(
            StoreNumber::parse("1e-131"),
            Err(NumberError::OutOfRange(_))
        ));
        assert!(matches!(
            StoreNumber::parse("1e99999999999999999999"),
            Err(NumberError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_display_matches_store_text() {
        let number = n("-3.14159");
        assert_eq!(number.to_string(), number.to_store_text());
        assert_eq!("42".parse::<StoreNumber>().unwrap(), n("42"));
    }
}
