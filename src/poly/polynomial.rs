use std::cmp::Ordering;
use std::fmt::Display;
use std::mem;
use std::ops::{Add, Neg, Sub};
use std::sync::Arc;

use crate::domains::float::{NumericalFloatLike, SingleFloat};

use super::{Exponent, LexOrder, MonomialOrder, Variable};

/// Multivariate polynomial with a sparse degree and variable dense representation.
#[derive(Clone)]
pub struct MultivariatePolynomial<T, E: Exponent = u16> {
    // Data format: the i-th monomial is stored as coefficients[i] and
    // exponents[i * nvars .. (i + 1) * nvars]. Terms are always expanded and sorted
    // lexicographically by their exponents.
    pub coefficients: Vec<T>,
    pub exponents: Vec<E>,
    pub variables: Arc<Vec<Variable>>,
}

impl<T: NumericalFloatLike + SingleFloat, E: Exponent> MultivariatePolynomial<T, E> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// variable map is inherited.
    #[inline]
    pub fn new(cap: Option<usize>, variables: Arc<Vec<Variable>>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            exponents: Vec::with_capacity(cap.unwrap_or(0) * variables.len()),
            variables,
        }
    }

    /// Constructs a polynomial from a list of `(coefficient, exponents)` terms.
    /// Terms may be given in any order and like terms are merged.
    pub fn from_terms<I: IntoIterator<Item = (T, Vec<E>)>>(
        variables: Arc<Vec<Variable>>,
        terms: I,
    ) -> Self {
        let mut res = Self::new(None, variables);
        for (c, e) in terms {
            res.append_monomial(c, &e);
        }
        res
    }

    /// Constructs a zero polynomial, inheriting the variable map from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            exponents: vec![],
            variables: self.variables.clone(),
        }
    }

    /// Constructs a zero polynomial with the given capacity,
    /// inheriting the variable map from `self`.
    #[inline]
    pub fn zero_with_capacity(&self, cap: usize) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap),
            exponents: Vec::with_capacity(cap * self.nvars()),
            variables: self.variables.clone(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.nterms() == 0
    }

    /// Returns the number of terms in the polynomial.
    #[inline]
    pub fn nterms(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the number of variables in the polynomial.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    /// Returns the slice for the exponents of the specified monomial.
    #[inline]
    pub fn exponents(&self, index: usize) -> &[E] {
        &self.exponents[index * self.nvars()..(index + 1) * self.nvars()]
    }

    #[inline(always)]
    pub fn last_exponents(&self) -> &[E] {
        &self.exponents[(self.nterms() - 1) * self.nvars()..self.nterms() * self.nvars()]
    }

    /// Get a copy of the variable list.
    pub fn get_vars(&self) -> Arc<Vec<Variable>> {
        self.variables.clone()
    }

    /// Get a reference to the variables list.
    pub fn get_vars_ref(&self) -> &[Variable] {
        self.variables.as_ref()
    }

    /// Appends a monomial to the polynomial.
    pub fn append_monomial(&mut self, coefficient: T, exponents: &[E]) {
        if coefficient.is_zero() {
            return;
        }
        if self.nvars() != exponents.len() {
            panic!(
                "nvars mismatched: got {}, expected {}",
                exponents.len(),
                self.nvars()
            );
        }

        // should we append to the back?
        if self.nterms() == 0 || LexOrder::cmp(self.last_exponents(), exponents).is_lt() {
            self.coefficients.push(coefficient);
            self.exponents.extend_from_slice(exponents);
            return;
        }

        if LexOrder::cmp(self.exponents(0), exponents).is_gt() {
            self.coefficients.insert(0, coefficient);
            self.exponents.splice(0..0, exponents.iter().cloned());
            return;
        }

        // Binary search to find the insert-point.
        let mut l = 0;
        let mut r = self.nterms();

        while l <= r {
            let m = (l + r) / 2;
            let c = LexOrder::cmp(exponents, self.exponents(m)); // note the reversal

            match c {
                Ordering::Equal => {
                    // Add the two coefficients.
                    self.coefficients[m] += coefficient;
                    if self.coefficients[m].is_zero() {
                        // The coefficient becomes zero. Remove this monomial.
                        self.coefficients.remove(m);
                        let i = m * self.nvars();
                        self.exponents.splice(i..i + self.nvars(), Vec::new());
                    }
                    return;
                }
                Ordering::Greater => {
                    l = m + 1;

                    if l == self.nterms() {
                        self.coefficients.push(coefficient);
                        self.exponents.extend_from_slice(exponents);
                        return;
                    }
                }
                Ordering::Less => {
                    if m == 0 {
                        self.coefficients.insert(0, coefficient);
                        self.exponents.splice(0..0, exponents.iter().cloned());
                        return;
                    }

                    r = m - 1;
                }
            }
        }

        self.coefficients.insert(l, coefficient);
        let i = l * self.nvars();
        self.exponents.splice(i..i, exponents.iter().cloned());
    }

    /// Take the derivative of the polynomial w.r.t the variable `var`.
    pub fn derivative(&self, var: usize) -> Self {
        debug_assert!(var < self.nvars());

        let mut res = self.zero_with_capacity(self.nterms());

        let mut exp = vec![E::zero(); self.nvars()];
        for x in self {
            if x.exponents[var] > E::zero() {
                exp.copy_from_slice(x.exponents);
                let pow = exp[var].to_u32() as usize;
                exp[var] = exp[var] - E::one();
                res.append_monomial(x.coefficient.clone() * x.coefficient.from_usize(pow), &exp);
            }
        }

        res
    }

    /// Multiply every coefficient with `other`.
    pub fn mul_coeff(mut self, other: &T) -> Self {
        for c in &mut self.coefficients {
            *c *= other;
        }

        for i in (0..self.nterms()).rev() {
            if self.coefficients[i].is_zero() {
                self.coefficients.remove(i);
                self.exponents
                    .drain(i * self.nvars()..(i + 1) * self.nvars());
            }
        }

        self
    }

    /// Map a coefficient using the function `f`.
    pub fn map_coeff<U: NumericalFloatLike + SingleFloat, F: Fn(&T) -> U>(
        &self,
        f: F,
    ) -> MultivariatePolynomial<U, E> {
        let mut coefficients = Vec::with_capacity(self.coefficients.len());
        let mut exponents = Vec::with_capacity(self.exponents.len());

        for m in self {
            let nc = f(m.coefficient);
            if !nc.is_zero() {
                coefficients.push(nc);
                exponents.extend_from_slice(m.exponents);
            }
        }

        MultivariatePolynomial {
            coefficients,
            exponents,
            variables: self.variables.clone(),
        }
    }

    /// Get the degree of the variable `x`.
    /// This operation is O(n).
    pub fn degree(&self, x: usize) -> E {
        if self.nvars() == 0 {
            return E::zero();
        }

        let mut max = E::zero();
        for e in self.exponents.iter().skip(x).step_by(self.nvars()) {
            if max < *e {
                max = *e;
            }
        }
        max
    }

    /// Get the total degree of the `index`th monomial.
    #[inline]
    pub fn monomial_degree(&self, index: usize) -> u32 {
        self.exponents(index).iter().map(|e| e.to_u32()).sum()
    }

    /// Get the total degree of the polynomial, the highest total degree of any of its monomials.
    /// The zero polynomial has degree 0.
    pub fn total_degree(&self) -> u32 {
        (0..self.nterms())
            .map(|i| self.monomial_degree(i))
            .max()
            .unwrap_or(0)
    }

    /// Returns true if all monomials have the same total degree.
    pub fn is_homogeneous(&self) -> bool {
        if self.is_zero() {
            return true;
        }

        let d = self.monomial_degree(0);
        (1..self.nterms()).all(|i| self.monomial_degree(i) == d)
    }

    /// Evaluate the polynomial at `x`.
    ///
    /// This function does not allocate.
    pub fn evaluate(&self, x: &[T]) -> T {
        debug_assert_eq!(x.len(), self.nvars());

        let mut res = T::new_zero();
        for m in self {
            let mut t = m.coefficient.clone();
            for (v, e) in x.iter().zip(m.exponents) {
                if !e.is_zero() {
                    t *= v.pow(e.to_u32() as u64);
                }
            }
            res += t;
        }
        res
    }

    /// Add `scale` times the gradient of the polynomial at `x` to `out`.
    ///
    /// This function does not allocate.
    pub fn accumulate_gradient(&self, x: &[T], scale: &T, out: &mut [T]) {
        debug_assert_eq!(x.len(), self.nvars());
        debug_assert_eq!(out.len(), self.nvars());

        for m in self {
            for (j, ej) in m.exponents.iter().enumerate() {
                if ej.is_zero() {
                    continue;
                }

                let p = ej.to_u32();
                let mut t = m.coefficient.clone() * m.coefficient.from_usize(p as usize);
                if p > 1 {
                    t *= x[j].pow(p as u64 - 1);
                }

                for (v, e) in m.exponents.iter().enumerate() {
                    if v != j && !e.is_zero() {
                        t *= x[v].pow(e.to_u32() as u64);
                    }
                }

                out[j] += scale.clone() * t;
            }
        }
    }
}

impl<T: NumericalFloatLike + SingleFloat, E: Exponent> std::fmt::Debug
    for MultivariatePolynomial<T, E>
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for monomial in self {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }

            write!(
                f,
                "{{ {:?}, {:?} }}",
                monomial.coefficient, monomial.exponents
            )?;
        }
        write!(f, " ]")
    }
}

impl<T: NumericalFloatLike + SingleFloat, E: Exponent> Display for MultivariatePolynomial<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        for (i, monomial) in self.into_iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }

            Display::fmt(monomial.coefficient, f)?;
            for (v, e) in self.variables.iter().zip(monomial.exponents) {
                if e.is_zero() {
                    continue;
                }

                if e.to_u32() == 1 {
                    write!(f, "*{}", v)?;
                } else {
                    write!(f, "*{}^{}", v, e)?;
                }
            }
        }

        Ok(())
    }
}

impl<T: NumericalFloatLike + SingleFloat, E: Exponent> PartialEq for MultivariatePolynomial<T, E> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.nvars() != other.nvars() {
            return self.is_zero() && other.is_zero();
        }
        if self.nterms() != other.nterms() {
            return false;
        }
        self.exponents.eq(&other.exponents) && self.coefficients.eq(&other.coefficients)
    }
}

impl<T: NumericalFloatLike + SingleFloat, E: Exponent> Add for MultivariatePolynomial<T, E> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self::Output {
        assert_eq!(
            self.nvars(),
            other.nvars(),
            "Cannot add polynomials with different variable maps"
        );

        if self.is_zero() {
            return other;
        }
        if other.is_zero() {
            return self;
        }

        // Merge the two polynomials, which are assumed to be already sorted.

        let mut new_coefficients = vec![T::new_zero(); self.nterms() + other.nterms()];
        let mut new_exponents: Vec<E> =
            vec![E::zero(); self.nvars() * (self.nterms() + other.nterms())];
        let mut new_nterms = 0;
        let mut i = 0;
        let mut j = 0;

        macro_rules! insert_monomial {
            ($source:expr, $index:expr) => {
                mem::swap(
                    &mut new_coefficients[new_nterms],
                    &mut $source.coefficients[$index],
                );

                new_exponents[new_nterms * $source.nvars()..(new_nterms + 1) * $source.nvars()]
                    .clone_from_slice($source.exponents($index));
                new_nterms += 1;
            };
        }

        while i < self.nterms() && j < other.nterms() {
            let c = LexOrder::cmp(self.exponents(i), other.exponents(j));
            match c {
                Ordering::Less => {
                    insert_monomial!(self, i);
                    i += 1;
                }
                Ordering::Greater => {
                    insert_monomial!(other, j);
                    j += 1;
                }
                Ordering::Equal => {
                    let o = other.coefficients[j].clone();
                    self.coefficients[i] += o;
                    if !self.coefficients[i].is_zero() {
                        insert_monomial!(self, i);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        while i < self.nterms() {
            insert_monomial!(self, i);
            i += 1;
        }

        while j < other.nterms() {
            insert_monomial!(other, j);
            j += 1;
        }

        new_coefficients.truncate(new_nterms);
        new_exponents.truncate(self.nvars() * new_nterms);

        Self {
            coefficients: new_coefficients,
            exponents: new_exponents,
            variables: self.variables,
        }
    }
}

impl<'a, 'b, T: NumericalFloatLike + SingleFloat, E: Exponent>
    Add<&'a MultivariatePolynomial<T, E>> for &'b MultivariatePolynomial<T, E>
{
    type Output = MultivariatePolynomial<T, E>;

    fn add(self, other: &'a MultivariatePolynomial<T, E>) -> Self::Output {
        self.clone() + other.clone()
    }
}

impl<T: NumericalFloatLike + SingleFloat, E: Exponent> Sub for MultivariatePolynomial<T, E> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add(other.neg())
    }
}

impl<'a, 'b, T: NumericalFloatLike + SingleFloat, E: Exponent>
    Sub<&'a MultivariatePolynomial<T, E>> for &'b MultivariatePolynomial<T, E>
{
    type Output = MultivariatePolynomial<T, E>;

    fn sub(self, other: &'a MultivariatePolynomial<T, E>) -> Self::Output {
        self.clone() - other.clone()
    }
}

impl<T: NumericalFloatLike + SingleFloat, E: Exponent> Neg for MultivariatePolynomial<T, E> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for c in &mut self.coefficients {
            *c = -c.clone();
        }
        self
    }
}

/// View object for a term in a multivariate polynomial.
#[derive(Copy, Clone, Debug)]
pub struct MonomialView<'a, T: 'a, E: 'a + Exponent> {
    pub coefficient: &'a T,
    pub exponents: &'a [E],
}

/// Iterator over terms in a multivariate polynomial.
pub struct MonomialViewIterator<'a, T, E: Exponent> {
    poly: &'a MultivariatePolynomial<T, E>,
    index: usize,
}

impl<'a, T, E: Exponent> Iterator for MonomialViewIterator<'a, T, E> {
    type Item = MonomialView<'a, T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.poly.coefficients.len() {
            None
        } else {
            let nvars = self.poly.variables.len();
            let view = MonomialView {
                coefficient: &self.poly.coefficients[self.index],
                exponents: &self.poly.exponents[self.index * nvars..(self.index + 1) * nvars],
            };
            self.index += 1;
            Some(view)
        }
    }
}

impl<'a, T, E: Exponent> IntoIterator for &'a MultivariatePolynomial<T, E> {
    type Item = MonomialView<'a, T, E>;
    type IntoIter = MonomialViewIterator<'a, T, E>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            poly: self,
            index: 0,
        }
    }
}
