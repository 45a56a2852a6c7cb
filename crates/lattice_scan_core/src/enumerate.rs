//! Enumeration of lattice points inside an axis-aligned box
//!
//! Given an invertible basis `B` and per-coordinate bounds, finds every
//! integer vector `z` with `lower[i] <= (B z)[i] <= upper[i]` for all `i`.
//! The box constraints are rewritten into a standard-form equality system
//! over slack variables, and a branch-and-bound recursion fixes one
//! coordinate of `z` at a time, using a pair of linear programs per level
//! to compute the exact integer range of that coordinate.

use num_bigint::BigInt;
use num_traits::{One, Zero};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::rational::Rational;
use crate::scalar::Scalar;
use crate::simplex::SimplexSolver;
use crate::vector::Vector;

/// Standard-form rewrite of the box constraint system.
///
/// For a `d`-dimensional basis the rewrite introduces one slack and one
/// surplus variable per coordinate, giving a slack vector `s` of length
/// `2d` with `A s = b`, `s >= 0`, `b >= 0`, and the recovery identity
/// `z[n] = offset[n] - transform.row(n) . s`.
#[derive(Debug, Clone)]
pub struct StandardForm {
    transform: Matrix<Rational>,
    offset: Vector<Rational>,
    a: Matrix<Rational>,
    b: Vector<Rational>,
}

impl StandardForm {
    /// Rewrite `lower <= B z <= upper` into standard form.
    ///
    /// The raw system has `2d` rows (one `<= upper[r]` and one
    /// `>= lower[r]` per coordinate) over `3d + 1` columns: the `z`
    /// coefficients, the slack block, and the right-hand side. Row
    /// reduction over the `z` block must find a pivot in every one of the
    /// first `d` columns; anything less means the basis is singular and
    /// the rewrite fails with [`Error::ReductionFailure`].
    pub fn build(
        basis: &Matrix<Rational>,
        lower: &Vector<Rational>,
        upper: &Vector<Rational>,
    ) -> Result<Self> {
        let d = basis.rows();
        if d == 0 || basis.cols() != d {
            return Err(Error::DimensionMismatch {
                expected: d.max(1),
                found: basis.cols(),
            });
        }
        for bound in [lower, upper] {
            if bound.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: bound.len(),
                });
            }
        }

        // rows 2r / 2r+1: basis row r with +slack for the upper bound and
        // -surplus for the lower bound
        let constraints = Matrix::from_fn(2 * d, 3 * d + 1, |row, col| {
            let r = row / 2;
            if col < d {
                basis.get(r, col).clone()
            } else if col == 3 * d {
                if row % 2 == 0 {
                    upper[r].clone()
                } else {
                    lower[r].clone()
                }
            } else if col == d + row {
                if row % 2 == 0 {
                    Rational::one()
                } else {
                    -Rational::one()
                }
            } else {
                Rational::zero()
            }
        });

        let (mut reduced, rank) = constraints.row_reduce(d);
        if rank != d {
            return Err(Error::ReductionFailure { rank, expected: d });
        }

        // rows d.. carry the equality system; normalize them to b >= 0
        for row in d..2 * d {
            if reduced.get(row, 3 * d).is_negative() {
                for col in d..=3 * d {
                    let v = -reduced.get(row, col).clone();
                    *reduced.get_mut(row, col) = v;
                }
            }
        }

        let transform = Matrix::from_fn(d, 2 * d, |r, c| reduced.get(r, d + c).clone());
        let offset = Vector::from_fn(d, |r| reduced.get(r, 3 * d).clone());
        let a = Matrix::from_fn(d, 2 * d, |r, c| reduced.get(d + r, d + c).clone());
        let b = Vector::from_fn(d, |r| reduced.get(d + r, 3 * d).clone());

        Ok(Self {
            transform,
            offset,
            a,
            b,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.transform.rows()
    }
}

/// Callback invoked once per recursion level with the integer range about
/// to be scanned at that depth.
pub type RangeObserver<'a> = dyn FnMut(usize, &BigInt, &BigInt) + 'a;

/// Branch-and-bound lattice point enumerator.
///
/// Configured with builder-style methods, then run with
/// [`Enumerator::enumerate`]. A fresh default enumerator scans to
/// completion with no observation hooks.
#[derive(Default)]
pub struct Enumerator<'a> {
    cancel: Option<Arc<AtomicBool>>,
    on_range: Option<Box<RangeObserver<'a>>>,
}

impl<'a> Enumerator<'a> {
    pub fn new() -> Self {
        Self {
            cancel: None,
            on_range: None,
        }
    }

    /// Install a cooperative cancellation flag. The flag is checked before
    /// every branch; once it is set the scan stops with
    /// [`Error::Cancelled`].
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Observe the integer range computed at each recursion depth.
    pub fn on_range(mut self, observer: impl FnMut(usize, &BigInt, &BigInt) + 'a) -> Self {
        self.on_range = Some(Box::new(observer));
        self
    }

    /// Every integer `z` with `lower <= basis . z <= upper` componentwise.
    ///
    /// An empty box (no integer point in some coordinate range) yields an
    /// empty result, not an error. The output order is deterministic:
    /// coordinates are fixed first-to-last, each scanned ascending.
    pub fn enumerate(
        &mut self,
        basis: &Matrix<Rational>,
        lower: &Vector<Rational>,
        upper: &Vector<Rational>,
    ) -> Result<Vec<Vector<BigInt>>> {
        let form = StandardForm::build(basis, lower, upper)?;
        let mut found = Vec::new();
        let mut chosen = Vec::with_capacity(form.dimensions());
        self.search(&form, &form.a, &form.b, &mut chosen, &mut found)?;
        Ok(found)
    }

    /// Every integer `z` such that `basis . z + shift` lies in the cube
    /// `[lower, upper]^d`. Convenience wrapper for scanning a shifted
    /// lattice against scalar bounds.
    pub fn enumerate_shifted(
        &mut self,
        basis: &Matrix<Rational>,
        lower: &Rational,
        upper: &Rational,
        shift: &Vector<Rational>,
    ) -> Result<Vec<Vector<BigInt>>> {
        let d = basis.rows();
        if shift.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: shift.len(),
            });
        }
        let lower = Vector::from_fn(d, |i| lower - &shift[i]);
        let upper = Vector::from_fn(d, |i| upper - &shift[i]);
        self.enumerate(basis, &lower, &upper)
    }

    fn search(
        &mut self,
        form: &StandardForm,
        a: &Matrix<Rational>,
        b: &Vector<Rational>,
        chosen: &mut Vec<BigInt>,
        found: &mut Vec<Vector<BigInt>>,
    ) -> Result<()> {
        let depth = chosen.len();
        if depth == form.dimensions() {
            found.push(chosen.iter().cloned().collect());
            return Ok(());
        }

        let t = form.transform.row_vector(depth);
        let solver = SimplexSolver::new(a, b)?;

        // z[depth] = offset[depth] - t . s, so its extremes come from
        // maximizing and minimizing t . s over the feasible region. An
        // infeasible region means the box is empty; prune.
        let Some(s_for_min) = feasible_optimum(&solver, &t.neg())? else {
            return Ok(());
        };
        let Some(s_for_max) = feasible_optimum(&solver, &t)? else {
            return Ok(());
        };

        let lowest = &form.offset[depth] - &t.dot(&s_for_min)?;
        let highest = &form.offset[depth] - &t.dot(&s_for_max)?;
        let min = lowest.ceil();
        let max = highest.floor();

        if let Some(observer) = self.on_range.as_mut() {
            observer(depth, &min, &max);
        }

        let mut x = min;
        while x <= max {
            if let Some(flag) = &self.cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(Error::Cancelled);
                }
            }

            // pin z[depth] = x by appending t . s = offset[depth] - x,
            // sign-flipped as a pair when the right-hand side is negative
            let rhs = &form.offset[depth] - &Rational::from(x.clone());
            let (row, rhs) = if rhs.is_negative() {
                (t.neg(), -rhs)
            } else {
                (t.clone(), rhs)
            };
            let pinned_a = a.with_row(row.as_slice());
            let pinned_b = b.with_entry(rhs);

            chosen.push(x.clone());
            self.search(form, &pinned_a, &pinned_b, chosen, found)?;
            chosen.pop();

            x += 1;
        }

        Ok(())
    }
}

/// Distinguish "box is empty" from real failures: an infeasible program
/// becomes `None`, everything else propagates.
fn feasible_optimum(
    solver: &SimplexSolver<'_, Rational>,
    objective: &Vector<Rational>,
) -> Result<Option<Vector<Rational>>> {
    match solver.minimize(objective) {
        Ok(x) => Ok(Some(x)),
        Err(Error::Infeasible) => Ok(None),
        Err(e) => Err(e),
    }
}

/// One-shot enumeration with default settings.
pub fn enumerate(
    basis: &Matrix<Rational>,
    lower: &Vector<Rational>,
    upper: &Vector<Rational>,
) -> Result<Vec<Vector<BigInt>>> {
    Enumerator::new().enumerate(basis, lower, upper)
}
