//! Dense vectors over an exact scalar type

use std::fmt;
use std::ops::Index;

use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// A dense column vector. Equality and ordering are component-wise
/// (lexicographic), delegating to the element type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Vector<T> {
    values: Vec<T>,
}

impl<T> Vector<T> {
    pub fn from_vec(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        Self {
            values: (0..len).map(f).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T: Scalar> Vector<T> {
    pub fn zeros(len: usize) -> Self {
        Self::from_fn(len, |_| T::zero())
    }

    /// Standard basis vector with a one at `index`.
    pub fn unit(len: usize, index: usize) -> Self {
        assert!(index < len, "unit index {index} out of range for length {len}");
        Self::from_fn(len, |i| if i == index { T::one() } else { T::zero() })
    }

    fn check_len(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        Ok(())
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_len(other)?;
        Ok(Self::from_fn(self.len(), |i| {
            self.values[i].clone() + other.values[i].clone()
        }))
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_len(other)?;
        Ok(Self::from_fn(self.len(), |i| {
            self.values[i].clone() - other.values[i].clone()
        }))
    }

    /// Inner product of two equal-length vectors.
    pub fn dot(&self, other: &Self) -> Result<T> {
        self.check_len(other)?;
        let mut acc = T::zero();
        for (a, b) in self.values.iter().zip(&other.values) {
            acc = acc + a.clone() * b.clone();
        }
        Ok(acc)
    }

    pub fn scale(&self, factor: &T) -> Self {
        Self::from_fn(self.len(), |i| factor.clone() * self.values[i].clone())
    }

    pub fn neg(&self) -> Self {
        Self::from_fn(self.len(), |i| -self.values[i].clone())
    }

    /// Copy of `self` with `value` appended.
    pub fn with_entry(&self, value: T) -> Self {
        let mut values = self.values.clone();
        values.push(value);
        Self { values }
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    fn v(values: &[i64]) -> Vector<Rational> {
        values.iter().map(|&n| Rational::from(n)).collect()
    }

    #[test]
    fn elementwise_arithmetic() {
        let a = v(&[1, 2, 3]);
        let b = v(&[4, -5, 6]);

        assert_eq!(a.add(&b).unwrap(), v(&[5, -3, 9]));
        assert_eq!(a.sub(&b).unwrap(), v(&[-3, 7, -3]));
        assert_eq!(a.dot(&b).unwrap(), Rational::from(12));
        assert_eq!(a.scale(&Rational::from(-2)), v(&[-2, -4, -6]));
        assert_eq!(b.neg(), v(&[-4, 5, -6]));
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let a = v(&[1, 2]);
        let b = v(&[1, 2, 3]);
        assert_eq!(
            a.dot(&b),
            Err(crate::error::Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn unit_and_append() {
        let e1: Vector<Rational> = Vector::unit(3, 1);
        assert_eq!(e1, v(&[0, 1, 0]));
        assert_eq!(e1.with_entry(Rational::from(7)), v(&[0, 1, 0, 7]));
    }

    #[test]
    fn display_renders_bracketed_list() {
        assert_eq!(v(&[1, -2]).to_string(), "[1, -2]");
    }
}
