//! Precomputed evaluation of polynomials and their gradients.
//!
//! An [EvaluationPlan] stores the term structure of a polynomial and a [PowerTable]
//! stores all powers of the input variables that occur in a set of plans. Together
//! they evaluate a polynomial and its full gradient in a single pass over its terms,
//! without allocating.

use crate::domains::float::{NumericalFloatLike, SingleFloat};

use super::polynomial::MultivariatePolynomial;
use super::Exponent;

/// Table of the powers `x_v^k` for `0 <= k <= d_v`, where `d_v` is the highest power
/// of `x_v` that occurs in any of the plans the table is built for.
#[derive(Clone, Debug)]
pub struct PowerTable<T> {
    offsets: Vec<usize>,
    powers: Vec<T>,
}

impl<T: NumericalFloatLike> PowerTable<T> {
    /// Create a power table for variables with the given maximal degrees.
    pub fn new(max_degrees: &[u32]) -> PowerTable<T> {
        let mut offsets = Vec::with_capacity(max_degrees.len() + 1);
        let mut size = 0;
        offsets.push(0);
        for d in max_degrees {
            size += *d as usize + 1;
            offsets.push(size);
        }

        PowerTable {
            offsets,
            powers: vec![T::new_zero(); size],
        }
    }

    #[inline]
    pub fn nvars(&self) -> usize {
        self.offsets.len() - 1
    }

    /// The highest power of variable `var` stored in the table.
    #[inline]
    pub fn max_degree(&self, var: usize) -> u32 {
        (self.offsets[var + 1] - self.offsets[var] - 1) as u32
    }

    /// Compute all powers of `x`.
    ///
    /// This function does not allocate.
    pub fn fill(&mut self, x: &[T]) {
        debug_assert_eq!(x.len(), self.nvars());

        for (v, xv) in x.iter().enumerate() {
            let (start, end) = (self.offsets[v], self.offsets[v + 1]);
            let row = &mut self.powers[start..end];
            row[0] = xv.one();
            for k in 1..row.len() {
                row[k] = row[k - 1].clone() * xv;
            }
        }
    }

    /// Get `x_var^pow`.
    #[inline(always)]
    pub fn get(&self, var: usize, pow: u32) -> &T {
        &self.powers[self.offsets[var] + pow as usize]
    }
}

/// The term structure of a polynomial, ready for repeated numerical evaluation.
///
/// The coefficients are not part of the plan: they are read from the polynomial
/// at evaluation time, so that a plan can be reused for every polynomial with
/// the same monomials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationPlan {
    nvars: usize,
    nterms: usize,
    exponents: Vec<u32>,
}

impl EvaluationPlan {
    /// Create a plan from the monomials of `poly`.
    pub fn new<T: NumericalFloatLike + SingleFloat, E: Exponent>(
        poly: &MultivariatePolynomial<T, E>,
    ) -> EvaluationPlan {
        EvaluationPlan {
            nvars: poly.variables.len(),
            nterms: poly.nterms(),
            exponents: poly.exponents.iter().map(|e| e.to_u32()).collect(),
        }
    }

    #[inline]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    #[inline]
    pub fn nterms(&self) -> usize {
        self.nterms
    }

    /// Check whether `poly` has exactly the monomials of this plan.
    pub fn matches<T: NumericalFloatLike + SingleFloat, E: Exponent>(
        &self,
        poly: &MultivariatePolynomial<T, E>,
    ) -> bool {
        self.nvars == poly.nvars()
            && self.nterms == poly.nterms()
            && self
                .exponents
                .iter()
                .zip(&poly.exponents)
                .all(|(a, b)| *a == b.to_u32())
    }

    /// Raise `max_degrees` to the highest power of every variable in the plan.
    pub fn update_max_degrees(&self, max_degrees: &mut [u32]) {
        debug_assert_eq!(max_degrees.len(), self.nvars);

        for e in self.exponents.chunks(self.nvars.max(1)) {
            for (m, d) in max_degrees.iter_mut().zip(e) {
                if *d > *m {
                    *m = *d;
                }
            }
        }
    }

    #[inline(always)]
    fn term(&self, index: usize) -> &[u32] {
        &self.exponents[index * self.nvars..(index + 1) * self.nvars]
    }

    /// Evaluate the polynomial with the given coefficients, using the
    /// powers in `powers`.
    ///
    /// A polynomial without variables is a constant and is evaluated directly.
    pub fn evaluate<T: NumericalFloatLike>(&self, coefficients: &[T], powers: &PowerTable<T>) -> T {
        if self.nvars == 0 {
            return coefficients
                .iter()
                .fold(T::new_zero(), |acc, c| acc + c);
        }

        debug_assert_eq!(coefficients.len(), self.nterms());

        let mut res = T::new_zero();
        for (k, c) in coefficients.iter().enumerate() {
            let mut t = c.clone();
            for (v, e) in self.term(k).iter().enumerate() {
                if *e > 0 {
                    t *= powers.get(v, *e);
                }
            }
            res += t;
        }
        res
    }

    /// Evaluate the polynomial with the given coefficients and write its gradient
    /// into `gradient`. `prefix` is scratch space of length `nvars`.
    ///
    /// The partial derivatives are built from prefix and suffix products of the
    /// factors of each term, so no division is needed and zero inputs are handled exactly.
    pub fn evaluate_with_gradient<T: NumericalFloatLike>(
        &self,
        coefficients: &[T],
        powers: &PowerTable<T>,
        gradient: &mut [T],
        prefix: &mut [T],
    ) -> T {
        debug_assert_eq!(gradient.len(), self.nvars);
        debug_assert_eq!(prefix.len(), self.nvars);

        for g in gradient.iter_mut() {
            *g = T::new_zero();
        }

        if self.nvars == 0 {
            return self.evaluate(coefficients, powers);
        }

        let mut res = T::new_zero();
        for (k, c) in coefficients.iter().enumerate() {
            let term = self.term(k);

            let mut acc = c.one();
            for (v, e) in term.iter().enumerate() {
                prefix[v] = acc.clone();
                if *e > 0 {
                    acc *= powers.get(v, *e);
                }
            }
            res += c.clone() * &acc;

            let mut suffix = c.clone();
            for (v, e) in term.iter().enumerate().rev() {
                if *e == 0 {
                    continue;
                }

                let d = suffix.clone()
                    * &prefix[v]
                    * powers.get(v, *e - 1)
                    * &c.from_usize(*e as usize);
                gradient[v] += d;
                suffix *= powers.get(v, *e);
            }
        }

        res
    }
}

#[cfg(test)]
mod test {
    use crate::domains::float::Complex;
    use crate::poly::{indexed_variables, polynomial::MultivariatePolynomial};

    use super::{EvaluationPlan, PowerTable};

    #[test]
    fn plan_matches_direct_evaluation() {
        let c = |re: f64, im: f64| Complex::new(re, im);
        let p = MultivariatePolynomial::<_, u16>::from_terms(
            indexed_variables("x", 3),
            vec![
                (c(1., 2.), vec![3, 0, 1]),
                (c(-0.5, 0.), vec![0, 2, 2]),
                (c(4., -1.), vec![1, 1, 1]),
                (c(0.25, 0.25), vec![0, 0, 0]),
            ],
        );

        let plan = EvaluationPlan::new(&p);
        assert_eq!(plan.nterms(), 4);
        assert!(plan.matches(&p));
        assert!(!plan.matches(&p.derivative(0)));

        let mut max_degrees = vec![0; 3];
        plan.update_max_degrees(&mut max_degrees);
        assert_eq!(max_degrees, vec![3, 2, 2]);

        let mut powers = PowerTable::new(&max_degrees);
        assert_eq!(powers.max_degree(0), 3);

        let x = [c(0.3, -1.2), c(0., 0.), c(-2., 0.5)];
        powers.fill(&x);

        let value = plan.evaluate(&p.coefficients, &powers);
        assert!((value - p.evaluate(&x)).norm() < 1e-13);

        let mut gradient = [Complex::new_zero(); 3];
        let mut prefix = [Complex::new_zero(); 3];
        let value2 =
            plan.evaluate_with_gradient(&p.coefficients, &powers, &mut gradient, &mut prefix);
        assert!((value2 - value).norm() < 1e-13);

        for (v, g) in gradient.iter().enumerate() {
            let expected = p.derivative(v).evaluate(&x);
            assert!((*g - expected).norm() < 1e-12);
        }
    }
}
