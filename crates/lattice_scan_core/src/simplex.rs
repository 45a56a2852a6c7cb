//! Bounded revised simplex over exact scalars
//!
//! Minimizes `c . x` subject to `A x = b`, `x >= 0`, with all arithmetic in
//! the scalar field. The solver is two-phase: Phase I starts from an
//! all-artificial basis (valid because callers supply `b >= 0`), drives the
//! artificial cost to zero, expunges redundant constraint rows, and hands a
//! structural basis to Phase II. The basis inverse is recomputed from
//! scratch at every pivot; basis matrices here are small enough that the
//! simplicity is worth more than an update formula.
//!
//! Pivot selection is Dantzig's rule (most negative reduced cost, earliest
//! position on ties). Exact arithmetic removes numerical cycling, but
//! degenerate ties can still cycle combinatorially, so the solver counts
//! iterations without strict objective decrease and switches to Bland's
//! rule once the count passes a threshold. Bland's rule terminates
//! finitely, so every solve ends in an optimum, `Infeasible`, or
//! `Unbounded`.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::vector::Vector;

/// Revised simplex solver for one equality system.
///
/// Borrows the constraint matrix and right-hand side so that repeated
/// solves with different objectives share the same system.
pub struct SimplexSolver<'a, T: Scalar> {
    a: &'a Matrix<T>,
    b: &'a Vector<T>,
}

impl<'a, T: Scalar> SimplexSolver<'a, T> {
    /// Wrap the system `A x = b`. Requires `b >= 0` componentwise; the
    /// constraint builders in this crate normalize rows to guarantee it.
    pub fn new(a: &'a Matrix<T>, b: &'a Vector<T>) -> Result<Self> {
        if a.rows() != b.len() {
            return Err(Error::DimensionMismatch {
                expected: a.rows(),
                found: b.len(),
            });
        }
        debug_assert!(
            b.iter().all(|v| !v.is_negative()),
            "right-hand side must be nonnegative"
        );
        Ok(Self { a, b })
    }

    /// Minimize `c . x` over the feasible region and return an optimal
    /// vertex `x` (length = number of columns of `A`).
    pub fn minimize(&self, c: &Vector<T>) -> Result<Vector<T>> {
        let m = self.a.rows();
        let n = self.a.cols();
        if c.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: c.len(),
            });
        }

        // Phase I system: [A | I], artificial columns n..n+m
        let mut ext = Matrix::from_fn(m, n + m, |r, col| {
            if col < n {
                self.a.get(r, col).clone()
            } else if col - n == r {
                T::one()
            } else {
                T::zero()
            }
        });
        let mut rhs = self.b.clone();

        let artificial_costs: Vector<T> =
            Vector::from_fn(n + m, |j| if j < n { T::zero() } else { T::one() });
        let mut basic: Vec<usize> = (n..n + m).collect();
        let mut nonbasic: Vec<usize> = (0..n).collect();

        let xb = run_phase(&ext, &rhs, &artificial_costs, &mut basic, &mut nonbasic, n)?;

        let mut artificial_total = T::zero();
        for (i, &j) in basic.iter().enumerate() {
            if j >= n {
                artificial_total = artificial_total + xb[i].clone();
            }
        }
        if !artificial_total.is_zero() {
            return Err(Error::Infeasible);
        }

        // Drive remaining artificials out of the basis. An artificial stuck
        // at zero with no structural pivot in its row marks a redundant
        // constraint, which is expunged together with its artificial.
        let mut i = 0;
        while i < basic.len() {
            if basic[i] < n {
                i += 1;
                continue;
            }
            let binv = ext.select_columns(&basic).inverse()?;
            let replacement = nonbasic.iter().position(|&j| {
                if j >= n {
                    return false;
                }
                let mut entry = T::zero();
                for k in 0..ext.rows() {
                    entry = entry + binv.get(i, k).clone() * ext.get(k, j).clone();
                }
                !entry.is_zero()
            });
            match replacement {
                Some(pos) => {
                    basic[i] = nonbasic.remove(pos);
                    i += 1;
                }
                None => {
                    ext = drop_row(&ext, i);
                    rhs = drop_entry(&rhs, i);
                    basic.remove(i);
                }
            }
        }

        // Phase II: real objective, artificial columns frozen out
        nonbasic.retain(|&j| j < n);
        let full_costs: Vector<T> = Vector::from_fn(n + m, |j| {
            if j < n {
                c[j].clone()
            } else {
                T::zero()
            }
        });
        let xb = run_phase(&ext, &rhs, &full_costs, &mut basic, &mut nonbasic, n)?;

        let mut x = vec![T::zero(); n];
        for (i, &j) in basic.iter().enumerate() {
            x[j] = xb[i].clone();
        }
        Ok(Vector::from_vec(x))
    }
}

/// One simplex phase: pivot until no eligible column improves the
/// objective. Columns at or beyond `entering_limit` never enter the basis.
/// Returns the basic solution aligned with the final `basic` ordering.
fn run_phase<T: Scalar>(
    ext: &Matrix<T>,
    rhs: &Vector<T>,
    costs: &Vector<T>,
    basic: &mut Vec<usize>,
    nonbasic: &mut Vec<usize>,
    entering_limit: usize,
) -> Result<Vector<T>> {
    let stall_threshold = ext.rows() + entering_limit;
    let mut stalled = 0usize;
    let mut bland = false;
    let mut last_objective: Option<T> = None;

    loop {
        let binv = ext.select_columns(basic).inverse()?;
        let xb = binv.mul_vector(rhs)?;
        let basic_costs: Vector<T> = basic.iter().map(|&j| costs[j].clone()).collect();
        let objective = basic_costs.dot(&xb)?;

        match &last_objective {
            Some(previous) if objective < *previous => stalled = 0,
            Some(_) => {
                stalled += 1;
                if stalled > stall_threshold {
                    bland = true;
                }
            }
            None => {}
        }
        last_objective = Some(objective);

        let lambda = binv.transpose().mul_vector(&basic_costs)?;

        // entering column: Dantzig by default, Bland once stalled
        let mut entering: Option<(usize, T)> = None;
        for (pos, &j) in nonbasic.iter().enumerate() {
            if j >= entering_limit {
                continue;
            }
            let reduced = costs[j].clone() - lambda.dot(&ext.column(j))?;
            if !reduced.is_negative() {
                continue;
            }
            let better = match &entering {
                None => true,
                Some((best_pos, best_reduced)) => {
                    if bland {
                        j < nonbasic[*best_pos]
                    } else {
                        reduced < *best_reduced
                    }
                }
            };
            if better {
                entering = Some((pos, reduced));
            }
        }
        let Some((entering_pos, _)) = entering else {
            return Ok(xb);
        };
        let q = nonbasic[entering_pos];

        let direction = binv.mul_vector(&ext.column(q))?;

        // ratio test over strictly positive direction components
        let mut leaving: Option<(usize, T)> = None;
        for i in 0..basic.len() {
            if !direction[i].is_positive() {
                continue;
            }
            let ratio = xb[i].clone() / direction[i].clone();
            let better = match &leaving {
                None => true,
                Some((best_i, best_ratio)) => {
                    if ratio < *best_ratio {
                        true
                    } else {
                        bland && ratio == *best_ratio && basic[i] < basic[*best_i]
                    }
                }
            };
            if better {
                leaving = Some((i, ratio));
            }
        }
        let Some((leaving_pos, _)) = leaving else {
            return Err(Error::Unbounded);
        };

        std::mem::swap(&mut basic[leaving_pos], &mut nonbasic[entering_pos]);
    }
}

fn drop_row<T: Scalar>(m: &Matrix<T>, row: usize) -> Matrix<T> {
    Matrix::from_fn(m.rows() - 1, m.cols(), |r, c| {
        let source = if r < row { r } else { r + 1 };
        m.get(source, c).clone()
    })
}

fn drop_entry<T: Scalar>(v: &Vector<T>, index: usize) -> Vector<T> {
    Vector::from_fn(v.len() - 1, |i| {
        let source = if i < index { i } else { i + 1 };
        v[source].clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    fn m(rows: &[&[i64]]) -> Matrix<Rational> {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&x| Rational::from(x)).collect())
                .collect(),
        )
    }

    fn v(values: &[i64]) -> Vector<Rational> {
        values.iter().map(|&x| Rational::from(x)).collect()
    }

    #[test]
    fn solves_a_textbook_program() {
        // max 10a + 12b + 12c with three resource rows, in slack form
        let a = m(&[
            &[1, 2, 2, 1, 0, 0],
            &[2, 1, 2, 0, 1, 0],
            &[2, 2, 1, 0, 0, 1],
        ]);
        let b = v(&[20, 20, 20]);
        let c = v(&[-10, -12, -12, 0, 0, 0]);

        let solver = SimplexSolver::new(&a, &b).unwrap();
        let x = solver.minimize(&c).unwrap();

        assert_eq!(x, v(&[4, 4, 4, 0, 0, 0]));
        assert_eq!(c.dot(&x).unwrap(), Rational::from(-136));
    }

    #[test]
    fn optimum_satisfies_constraints() {
        let a = m(&[&[1, 1, 1, 0], &[1, 3, 0, 1]]);
        let b = v(&[4, 6]);
        let c = v(&[-2, -3, 0, 0]);

        let solver = SimplexSolver::new(&a, &b).unwrap();
        let x = solver.minimize(&c).unwrap();

        assert_eq!(a.mul_vector(&x).unwrap(), b);
        assert!(x.iter().all(|value| !value.is_negative()));
        assert_eq!(c.dot(&x).unwrap(), Rational::from(-9));
    }

    #[test]
    fn detects_infeasibility() {
        // x1 + x2 = 1 and x1 + x2 = 2 cannot both hold
        let a = m(&[&[1, 1], &[1, 1]]);
        let b = v(&[1, 2]);
        let c = v(&[1, 1]);

        let solver = SimplexSolver::new(&a, &b).unwrap();
        assert_eq!(solver.minimize(&c), Err(Error::Infeasible));
    }

    #[test]
    fn detects_unboundedness() {
        // x1 - x2 = 1 with x >= 0 lets x1 grow without limit
        let a = m(&[&[1, -1]]);
        let b = v(&[1]);
        let c = v(&[-1, 0]);

        let solver = SimplexSolver::new(&a, &b).unwrap();
        assert_eq!(solver.minimize(&c), Err(Error::Unbounded));
    }

    #[test]
    fn expunges_redundant_rows() {
        // second row duplicates the first; Phase I must drop it
        let a = m(&[&[1, 1], &[1, 1]]);
        let b = v(&[1, 1]);
        let c = v(&[-1, 0]);

        let solver = SimplexSolver::new(&a, &b).unwrap();
        let x = solver.minimize(&c).unwrap();
        assert_eq!(x, v(&[1, 0]));
    }

    #[test]
    fn fractional_optimum_is_exact() {
        let a = m(&[&[2, 1, 1, 0], &[1, 3, 0, 1]]);
        let b = v(&[3, 5]);
        let c = v(&[-1, -1, 0, 0]);

        let solver = SimplexSolver::new(&a, &b).unwrap();
        let x = solver.minimize(&c).unwrap();

        let four_fifths = Rational::new(4, 5).unwrap();
        let seven_fifths = Rational::new(7, 5).unwrap();
        assert_eq!(x.as_slice()[0], four_fifths);
        assert_eq!(x.as_slice()[1], seven_fifths);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let a = m(&[&[1, 1]]);
        let b = v(&[1, 2]);
        assert!(SimplexSolver::new(&a, &b).is_err());

        let b = v(&[1]);
        let solver = SimplexSolver::new(&a, &b).unwrap();
        assert!(solver.minimize(&v(&[1, 2, 3])).is_err());
    }
}
