//! Exact rational number type
//!
//! An arbitrary-precision rational backed by `BigInt` numerator and
//! denominator, kept in canonical form: reduced to lowest terms with a
//! strictly positive denominator. All arithmetic is exact.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Exact rational number (numerator / denominator)
///
/// Invariant: `gcd(|numerator|, denominator) = 1` and `denominator > 0`.
/// Because the representation is canonical, the derived structural equality
/// coincides with numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: BigInt,
    denominator: BigInt,
}

impl Rational {
    /// Create a rational from numerator and denominator.
    ///
    /// Fails with [`Error::DivisionByZero`] if the denominator is zero.
    /// The sign is normalized into the numerator and the fraction is
    /// reduced by the gcd.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Result<Self> {
        let mut numerator = numerator.into();
        let mut denominator = denominator.into();

        if denominator.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }

        let g = numerator.gcd(&denominator);
        if !g.is_one() {
            numerator /= &g;
            denominator /= &g;
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Create a rational from an integer.
    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self {
            numerator: n.into(),
            denominator: BigInt::one(),
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Sign of the value: -1, 0 or 1.
    pub fn sign(&self) -> i32 {
        match self.numerator.sign() {
            num_bigint::Sign::Minus => -1,
            num_bigint::Sign::NoSign => 0,
            num_bigint::Sign::Plus => 1,
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    /// Largest integer `<= self` (truncation toward negative infinity).
    ///
    /// This is not truncation toward zero: `(-1/2).floor() == -1`.
    pub fn floor(&self) -> BigInt {
        self.numerator.div_floor(&self.denominator)
    }

    /// Smallest integer `>= self`, i.e. `-((-self).floor())`.
    pub fn ceil(&self) -> BigInt {
        -(-&self.numerator).div_floor(&self.denominator)
    }

    /// Exact division, failing with [`Error::DivisionByZero`] on a zero
    /// divisor.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        if rhs.numerator.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Rational::new(
            &self.numerator * &rhs.denominator,
            &self.denominator * &rhs.numerator,
        )
    }

    pub fn min(self, other: Self) -> Self {
        if self <= other { self } else { other }
    }

    pub fn max(self, other: Self) -> Self {
        if self >= other { self } else { other }
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::from_integer(0)
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::from_integer(1)
    }

    fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    /// Total order by cross-multiplication, valid because denominators are
    /// always positive.
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Rational {
        let numerator =
            &self.numerator * &rhs.denominator + &rhs.numerator * &self.denominator;
        let denominator = &self.denominator * &rhs.denominator;
        // denominator is a product of positive values, so new cannot fail
        Rational::new(numerator, denominator).expect("nonzero denominator")
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Rational {
        let numerator =
            &self.numerator * &rhs.denominator - &rhs.numerator * &self.denominator;
        let denominator = &self.denominator * &rhs.denominator;
        Rational::new(numerator, denominator).expect("nonzero denominator")
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Rational {
        let numerator = &self.numerator * &rhs.numerator;
        let denominator = &self.denominator * &rhs.denominator;
        Rational::new(numerator, denominator).expect("nonzero denominator")
    }
}

impl Div for Rational {
    type Output = Self;

    /// Exact division.
    ///
    /// Panics on a zero divisor; use [`Rational::checked_div`] where the
    /// divisor is not known to be nonzero.
    fn div(self, rhs: Self) -> Self {
        &self / &rhs
    }
}

impl Div for &Rational {
    type Output = Rational;

    fn div(self, rhs: Self) -> Rational {
        self.checked_div(rhs).expect("division by zero rational")
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_one() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for Rational {
    type Err = Error;

    /// Parse `n` or `n/d` with optional leading sign and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::InvalidLiteral(s.to_string());
        let trimmed = s.trim();

        match trimmed.split_once('/') {
            Some((num, den)) => {
                let numerator = BigInt::from_str(num.trim()).map_err(|_| bad())?;
                let denominator = BigInt::from_str(den.trim()).map_err(|_| bad())?;
                if denominator.is_zero() {
                    return Err(Error::DivisionByZero);
                }
                Rational::new(numerator, denominator)
            }
            None => {
                let numerator = BigInt::from_str(trimmed).map_err(|_| bad())?;
                Ok(Rational::from_integer(numerator))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn arithmetic_is_exact() {
        let a = r(1, 2);
        let b = r(1, 3);

        assert_eq!(a.clone() + b.clone(), r(5, 6));
        assert_eq!(a.clone() - b.clone(), r(1, 6));
        assert_eq!(a.clone() * b.clone(), r(1, 6));
        assert_eq!(a / b, r(3, 2));
    }

    #[test]
    fn construction_reduces_to_lowest_terms() {
        assert_eq!(r(4, 8), r(1, 2));
        assert_eq!(r(-6, -8), r(3, 4));
        let v = r(3, -9);
        assert_eq!(v.numerator(), &BigInt::from(-1));
        assert_eq!(v.denominator(), &BigInt::from(3));
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(Rational::new(1, 0), Err(Error::DivisionByZero));
        assert_eq!(
            r(1, 2).checked_div(&Rational::zero()),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn floor_truncates_toward_negative_infinity() {
        assert_eq!(r(7, 2).floor(), BigInt::from(3));
        assert_eq!(r(-7, 2).floor(), BigInt::from(-4));
        assert_eq!(r(-1, 2).floor(), BigInt::from(-1));
        assert_eq!(r(6, 3).floor(), BigInt::from(2));

        assert_eq!(r(7, 2).ceil(), BigInt::from(4));
        assert_eq!(r(-7, 2).ceil(), BigInt::from(-3));
        assert_eq!(r(1, 2).ceil(), BigInt::from(1));
    }

    #[test]
    fn ceil_is_negated_floor_of_negation() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let n: i64 = rng.gen_range(-10_000..10_000);
            let mut d: i64 = rng.gen_range(-100..100);
            if d == 0 {
                d = 1;
            }
            let x = r(n, d);
            assert_eq!(x.ceil(), -(-&x).floor(), "x = {x}");
        }
    }

    #[test]
    fn ordering_by_cross_multiplication() {
        assert!(r(1, 3) < r(1, 2));
        assert!(r(-1, 2) < r(-1, 3));
        assert!(r(2, 4) == r(1, 2));
        assert_eq!(r(5, 7).max(r(3, 4)), r(3, 4));
        assert_eq!(r(-5, 7).min(r(3, 4)), r(-5, 7));
    }

    #[test]
    fn display_and_parse_round_trip() {
        for v in [r(3, 7), r(-3, 7), Rational::from_integer(42), r(-9, 1)] {
            let text = v.to_string();
            assert_eq!(text.parse::<Rational>().unwrap(), v);
        }
        assert_eq!(" -22/4 ".parse::<Rational>().unwrap(), r(-11, 2));
        assert!(matches!(
            "1/x".parse::<Rational>(),
            Err(Error::InvalidLiteral(_))
        ));
        assert_eq!("1/0".parse::<Rational>(), Err(Error::DivisionByZero));
    }
}
