//! Provides combinatorial utilities for enumerating monomials and mixed-radix digit tuples.
//!
//! # Examples
//!
//! All monomials in two variables up to degree 2:
//!
//! ```rust
//! use homotopy::combinatorics::MonomialIterator;
//!
//! let mut m = MonomialIterator::new(2, 2);
//! let mut monomials = vec![];
//! while let Some(a) = m.next() {
//!     monomials.push(a.to_vec());
//! }
//!
//! let ans = vec![[0, 0], [1, 0], [0, 1], [2, 0], [1, 1], [0, 2]];
//!
//! assert_eq!(monomials, ans);
//! ```
//!
//! An odometer over the digits `0 <= k_0 < 2`, `0 <= k_1 < 3`:
//!
//! ```rust
//! use homotopy::combinatorics::MixedRadixCounter;
//!
//! let mut c = MixedRadixCounter::new(&[2, 3]);
//! let mut digits = vec![c.digits().to_vec()];
//! while c.increment() {
//!     digits.push(c.digits().to_vec());
//! }
//!
//! assert_eq!(digits.len(), 6);
//! assert_eq!(digits[1], [1, 0]);
//! assert_eq!(digits[2], [0, 1]);
//! ```
use smallvec::SmallVec;

use crate::poly::INLINED_EXPONENTS;

/// An iterator over the exponent vectors of all monomials of total degree `k` in `n` variables,
/// i.e. the ways to distribute `k` identical items over `n` bins.
///
/// The first exponent vector is `[k, 0, ..., 0]` and the last is `[0, ..., 0, k]`.
pub struct CompositionIterator {
    indices: SmallVec<[u32; INLINED_EXPONENTS]>,
    k: u32,
    init: bool,
    done: bool,
}

impl CompositionIterator {
    /// Creates a new `CompositionIterator` for distributing `k` over `n` bins.
    pub fn new(n: usize, k: u32) -> CompositionIterator {
        CompositionIterator {
            indices: (0..n).map(|_| 0).collect(),
            k,
            init: false,
            done: false,
        }
    }

    /// The current exponent vector. Only meaningful after a successful [`Self::advance`].
    #[inline]
    pub fn current(&self) -> &[u32] {
        &self.indices
    }

    /// Move to the next exponent vector, returning `false` when there are none left.
    pub fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }

        if self.indices.is_empty() {
            // the only monomial without variables is the constant
            self.done = true;
            let first = !self.init && self.k == 0;
            self.init = true;
            return first;
        }

        if !self.init {
            self.init = true;
            self.indices[0] = self.k;
            return true;
        }

        if self.k == 0 {
            self.done = true;
            return false;
        }

        // find the last non-zero index that is not at the end
        let mut i = self.indices.len() - 1;
        while self.indices[i] == 0 {
            i -= 1;
        }

        // cannot move to the right more
        // find the next index
        let mut last_val = 0;
        if i == self.indices.len() - 1 {
            last_val = self.indices[i];
            self.indices[i] = 0;

            if self.indices.len() == 1 {
                self.done = true;
                return false;
            }

            i = self.indices.len() - 2;
            while self.indices[i] == 0 {
                if i == 0 {
                    self.done = true;
                    return false;
                }

                i -= 1;
            }
        }

        self.indices[i] -= 1;
        self.indices[i + 1] = last_val + 1;

        true
    }

    /// Advances the iterator and returns the next exponent vector.
    pub fn next(&mut self) -> Option<&[u32]> {
        if self.advance() {
            Some(&self.indices)
        } else {
            None
        }
    }
}

/// An iterator over the exponent vectors of all monomials in `n` variables with
/// a total degree of at most `max_degree`, in order of increasing degree.
pub struct MonomialIterator {
    nvars: usize,
    degree: u32,
    max_degree: u32,
    inner: CompositionIterator,
}

impl MonomialIterator {
    pub fn new(nvars: usize, max_degree: u32) -> MonomialIterator {
        MonomialIterator {
            nvars,
            degree: 0,
            max_degree,
            inner: CompositionIterator::new(nvars, 0),
        }
    }

    /// Advances the iterator and returns the next exponent vector.
    pub fn next(&mut self) -> Option<&[u32]> {
        while !self.inner.advance() {
            if self.degree >= self.max_degree {
                return None;
            }
            self.degree += 1;
            self.inner = CompositionIterator::new(self.nvars, self.degree);
        }

        Some(self.inner.current())
    }
}

/// The number of monomials in `n` variables of total degree at most `d`, `binomial(n + d, d)`.
pub fn monomial_count(n: usize, d: u32) -> usize {
    let mut r: usize = 1;
    for i in 1..=d as usize {
        r = r * (n + i) / i;
    }
    r
}

/// A mixed-radix counter `(k_1, ..., k_n)` with `0 <= k_i < radices[i]`, advanced
/// like an odometer where the first digit moves fastest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixedRadixCounter {
    radices: SmallVec<[usize; INLINED_EXPONENTS]>,
    digits: SmallVec<[usize; INLINED_EXPONENTS]>,
}

impl MixedRadixCounter {
    /// Create a counter at zero. All radices must be positive.
    pub fn new(radices: &[usize]) -> MixedRadixCounter {
        debug_assert!(radices.iter().all(|r| *r > 0));
        MixedRadixCounter {
            radices: radices.into(),
            digits: radices.iter().map(|_| 0).collect(),
        }
    }

    #[inline]
    pub fn digits(&self) -> &[usize] {
        &self.digits
    }

    /// The number of digit tuples, or `None` if it does not fit in a `usize`.
    pub fn count(&self) -> Option<usize> {
        self.radices.iter().try_fold(1usize, |acc, r| acc.checked_mul(*r))
    }

    /// Increment the counter. Returns `false` when every digit overflowed,
    /// in which case the counter is back at zero.
    pub fn increment(&mut self) -> bool {
        for (d, r) in self.digits.iter_mut().zip(&self.radices) {
            *d += 1;
            if *d < *r {
                return true;
            }
            *d = 0;
        }

        false
    }

    /// Set the digits to the `index`th tuple in odometer order. The index is
    /// taken modulo the number of tuples.
    pub fn set_index(&mut self, mut index: usize) {
        for (d, r) in self.digits.iter_mut().zip(&self.radices) {
            *d = index % r;
            index /= r;
        }
    }
}
