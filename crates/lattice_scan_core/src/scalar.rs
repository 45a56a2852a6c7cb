//! Scalar capability trait for the linear-algebra layer
//!
//! The matrix, vector and simplex code is generic over any exact ordered
//! field element. The bound set is deliberately small: `Zero` brings `Add`,
//! `One` brings `Mul`, and `Ord` gives the total order that pivot selection
//! and ratio tests rely on. Inexact types (floats) do not qualify because
//! they have no total order and no exact division.

use num_traits::{One, Zero};
use std::ops::{Div, Neg, Sub};

use crate::rational::Rational;

/// An exact, totally ordered field element.
pub trait Scalar:
    Clone
    + Ord
    + Zero
    + One
    + Neg<Output = Self>
    + Sub<Output = Self>
    + Div<Output = Self>
{
    /// Absolute value.
    fn abs(&self) -> Self;

    /// Sign of the value: -1, 0 or 1.
    fn sign(&self) -> i32 {
        let zero = Self::zero();
        match self.cmp(&zero) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }

    /// True if the value is strictly positive.
    fn is_positive(&self) -> bool {
        self.sign() > 0
    }

    /// True if the value is strictly negative.
    fn is_negative(&self) -> bool {
        self.sign() < 0
    }
}

impl Scalar for Rational {
    fn abs(&self) -> Self {
        Rational::abs(self)
    }

    fn sign(&self) -> i32 {
        Rational::sign(self)
    }
}
