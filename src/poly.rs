//! Sparse multivariate polynomials and their fast numerical evaluation.
//!
//! Polynomial systems are plain slices of [MultivariatePolynomial](polynomial::MultivariatePolynomial)s
//! that share a variable map.
pub mod evaluate;
pub mod polynomial;

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::iter::Sum;
use std::ops::{Add as OpAdd, AddAssign, Sub};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smartstring::{LazyCompact, SmartString};

pub const INLINED_EXPONENTS: usize = 6;

pub trait Exponent:
    Hash
    + Debug
    + Display
    + Ord
    + Sub<Output = Self>
    + OpAdd<Output = Self>
    + Sum<Self>
    + AddAssign
    + Clone
    + Copy
    + PartialEq
    + Eq
    + Send
    + Sync
{
    fn zero() -> Self;
    fn one() -> Self;
    /// Convert the exponent to `u32`. This is always possible, as `u32` is the largest supported exponent type.
    fn to_u32(&self) -> u32;
    /// Convert from `u32`. This function may panic if the exponent is too large.
    fn from_u32(n: u32) -> Self;
    /// Convert from `u32`, or return `None` if `n` does not fit.
    fn try_from_u32(n: u32) -> Option<Self>;
    fn is_zero(&self) -> bool;
}

impl Exponent for u32 {
    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }

    #[inline]
    fn to_u32(&self) -> u32 {
        *self
    }

    #[inline]
    fn from_u32(n: u32) -> Self {
        n
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0
    }

    #[inline]
    fn try_from_u32(n: u32) -> Option<Self> {
        Some(n)
    }
}

impl Exponent for u16 {
    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }

    #[inline]
    fn to_u32(&self) -> u32 {
        *self as u32
    }

    #[inline]
    fn from_u32(n: u32) -> Self {
        if n <= u16::MAX as u32 {
            n as u16
        } else {
            panic!("Exponent {} too large for u16", n);
        }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0
    }

    #[inline]
    fn try_from_u32(n: u32) -> Option<Self> {
        u16::try_from(n).ok()
    }
}

impl Exponent for u8 {
    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }

    #[inline]
    fn to_u32(&self) -> u32 {
        *self as u32
    }

    #[inline]
    fn from_u32(n: u32) -> Self {
        if n <= u8::MAX as u32 {
            n as u8
        } else {
            panic!("Exponent {} too large for u8", n);
        }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0
    }

    #[inline]
    fn try_from_u32(n: u32) -> Option<Self> {
        u8::try_from(n).ok()
    }
}

/// A monomial ordering, used to keep the terms of a polynomial sorted.
pub trait MonomialOrder {
    fn cmp<E: Exponent>(a: &[E], b: &[E]) -> Ordering;
}

/// Lexicographic ordering of monomials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LexOrder {}

impl MonomialOrder for LexOrder {
    #[inline]
    fn cmp<E: Exponent>(a: &[E], b: &[E]) -> Ordering {
        a.cmp(b)
    }
}

/// A variable of a polynomial. Temporary variables are introduced by
/// transformations such as homogenization.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    Symbol(SmartString<LazyCompact>),
    Temporary(usize),
}

impl Variable {
    pub fn symbol(name: &str) -> Variable {
        Variable::Symbol(name.into())
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variable::Symbol(s) => f.write_str(s),
            Variable::Temporary(t) => f.write_fmt(format_args!("_TMP_{}", *t)),
        }
    }
}

/// Create the variable map `x_1, ..., x_n`.
pub fn indexed_variables(prefix: &str, n: usize) -> Arc<Vec<Variable>> {
    Arc::new(
        (1..=n)
            .map(|i| Variable::Symbol(format!("{}_{}", prefix, i).into()))
            .collect(),
    )
}
