//! Exact rational numbers.
//!
//! This module provides the scalar type for all matrix arithmetic. Values
//! are kept reduced with a positive denominator at all times, so structural
//! equality is value equality.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use thiserror::Error;

/// Errors produced when constructing or parsing a [`Rational`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RationalError {
    /// A zero denominator, or division by a zero rational.
    #[error("division by zero")]
    DivisionByZero,

    /// Text that is not an integer, decimal, or fraction literal.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
}

/// An exact rational number.
///
/// Rationals are always stored in lowest terms with a positive denominator;
/// zero is stored as 0/1. The type is immutable: every operation returns a
/// new value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a rational from an integer numerator and denominator.
    ///
    /// A negative denominator flips both signs; the result is reduced by
    /// their greatest common divisor.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::DivisionByZero`] if the denominator is zero.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, RationalError> {
        Self::from_bigint(IBig::from(numerator), IBig::from(denominator))
    }

    /// Creates a rational from big-integer parts.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::DivisionByZero`] if the denominator is zero.
    pub fn from_bigint(numerator: IBig, denominator: IBig) -> Result<Self, RationalError> {
        if denominator == IBig::ZERO {
            return Err(RationalError::DivisionByZero);
        }
        let numerator = if DashuSigned::is_negative(&denominator) {
            -numerator
        } else {
            numerator
        };
        Ok(Self(RBig::from_parts(numerator, denominator.unsigned_abs())))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(RBig::from(IBig::from(n)))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> IBig {
        self.0.numerator().clone()
    }

    /// Returns the denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> IBig {
        IBig::from(self.0.denominator().clone())
    }

    /// Returns (numerator, denominator) as machine integers, if they fit.
    #[must_use]
    pub fn to_i64_pair(&self) -> Option<(i64, i64)> {
        let num: i64 = self.numerator().try_into().ok()?;
        let den: i64 = self.denominator().try_into().ok()?;
        Some((num, den))
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the negation.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self(-&self.0)
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::DivisionByZero`] if the value is zero.
    pub fn recip(&self) -> Result<Self, RationalError> {
        if self.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self(self.0.clone().inv()))
    }

    /// Divides by another rational.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::DivisionByZero`] if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, RationalError> {
        if rhs.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self(&self.0 / &rhs.0))
    }

    /// Converts to a floating value.
    ///
    /// Lossy. This exists for magnitude comparisons (partial pivoting);
    /// exactness-sensitive checks must use [`Zero::is_zero`] or `==`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Rational> for Rational {
    type Output = Self;

    fn add(self, rhs: &Rational) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Rational> for Rational {
    type Output = Self;

    fn sub(self, rhs: &Rational) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Rational> for Rational {
    type Output = Self;

    fn mul(self, rhs: &Rational) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(i64::from(n))
    }
}

impl FromStr for Rational {
    type Err = RationalError;

    /// Parses an integer (`"3"`), a decimal (`"0.25"`), or a fraction
    /// (`"2/3"`, `"1.5/2"`).
    ///
    /// Decimal literals are converted by reading the digit string directly
    /// (`"0.25"` becomes 25/100 before reduction), so parsing never goes
    /// through floating point.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((num, den)) = s.split_once('/') {
            let num = parse_decimal(num.trim())?;
            let den = parse_decimal(den.trim())?;
            return num.checked_div(&den);
        }
        parse_decimal(s)
    }
}

/// Parses an integer or decimal literal with an optional leading sign.
fn parse_decimal(s: &str) -> Result<Rational, RationalError> {
    let invalid = || RationalError::InvalidNumber(s.to_string());
    if s.is_empty() {
        return Err(invalid());
    }
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    // Only one sign, and only at the front.
    if digits.starts_with(['+', '-']) {
        return Err(invalid());
    }

    let (numerator, denominator) = match digits.split_once('.') {
        None => (
            IBig::from_str_radix(digits, 10).map_err(|_| invalid())?,
            UBig::ONE,
        ),
        Some((int_part, frac_part)) => {
            if frac_part.is_empty() && int_part.is_empty() {
                return Err(invalid());
            }
            // Shift the decimal point away: "0.25" reads as 25 over 10^2.
            let joined = format!("{int_part}{frac_part}");
            let numerator = IBig::from_str_radix(&joined, 10).map_err(|_| invalid())?;
            (numerator, UBig::from(10u8).pow(frac_part.len()))
        }
    };

    let numerator = if negative { -numerator } else { numerator };
    Ok(Rational(RBig::from_parts(numerator, denominator)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn test_basic_ops() {
        let a = rat(1, 2);
        let b = rat(1, 3);

        // 1/2 + 1/3 = 5/6
        assert_eq!(a.clone() + b.clone(), rat(5, 6));
        // 1/2 - 1/3 = 1/6
        assert_eq!(a.clone() - b.clone(), rat(1, 6));
        // 1/2 * 1/3 = 1/6
        assert_eq!(a.clone() * b.clone(), rat(1, 6));
        // (1/2) / (1/3) = 3/2
        assert_eq!(a.checked_div(&b).unwrap(), rat(3, 2));
    }

    #[test]
    fn test_reduction_and_sign() {
        // 4/6 reduces to 2/3
        assert_eq!(rat(4, 6).to_i64_pair(), Some((2, 3)));
        // Negative denominator normalizes into the numerator
        assert_eq!(rat(1, -2).to_i64_pair(), Some((-1, 2)));
        assert_eq!(rat(-1, -2).to_i64_pair(), Some((1, 2)));
        // Zero is always 0/1
        assert_eq!(rat(0, -7).to_i64_pair(), Some((0, 1)));
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Rational::new(1, 0), Err(RationalError::DivisionByZero));
        assert_eq!(
            rat(1, 2).checked_div(&Rational::zero()),
            Err(RationalError::DivisionByZero)
        );
        assert_eq!(Rational::zero().recip(), Err(RationalError::DivisionByZero));
    }

    #[test]
    fn test_display() {
        assert_eq!(rat(3, 1).to_string(), "3");
        assert_eq!(rat(2, 3).to_string(), "2/3");
        assert_eq!(rat(-2, 3).to_string(), "-2/3");
        assert_eq!(Rational::zero().to_string(), "0");
    }

    #[test]
    fn test_parse_integer_and_fraction() {
        assert_eq!("3".parse::<Rational>().unwrap(), rat(3, 1));
        assert_eq!(" -4 ".parse::<Rational>().unwrap(), rat(-4, 1));
        assert_eq!("2/3".parse::<Rational>().unwrap(), rat(2, 3));
        assert_eq!("-4/6".parse::<Rational>().unwrap(), rat(-2, 3));
        assert_eq!("1 / 2".parse::<Rational>().unwrap(), rat(1, 2));
    }

    #[test]
    fn test_parse_decimal_exact() {
        assert_eq!("0.25".parse::<Rational>().unwrap(), rat(1, 4));
        assert_eq!("-1.5".parse::<Rational>().unwrap(), rat(-3, 2));
        assert_eq!(".5".parse::<Rational>().unwrap(), rat(1, 2));
        // Decimal numerator inside a fraction, like the coefficient syntax
        assert_eq!("1.5/2".parse::<Rational>().unwrap(), rat(3, 4));
        // 0.1 is exactly 1/10, not the nearest double
        assert_eq!("0.1".parse::<Rational>().unwrap(), rat(1, 10));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "abc", "1..2", "1/2/3", "--3", "1e3", "."] {
            assert!(
                matches!(bad.parse::<Rational>(), Err(RationalError::InvalidNumber(_))),
                "expected InvalidNumber for {bad:?}"
            );
        }
        assert_eq!(
            "1/0".parse::<Rational>(),
            Err(RationalError::DivisionByZero)
        );
    }

    #[test]
    fn test_to_f64() {
        assert!((rat(1, 2).to_f64() - 0.5).abs() < 1e-12);
        assert!((rat(-7, 4).to_f64() + 1.75).abs() < 1e-12);
    }
}
