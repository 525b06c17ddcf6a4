//! Total degree start systems and the enumeration of their solutions.
//!
//! For a square target system `F` with degrees `d_1, ..., d_n` the total degree start
//! system is `{z_i^{d_i} - b_i}`. Its `d_1 * ... * d_n` solutions (the Bézout number of `F`)
//! are known in closed form and are enumerated lazily by a [TotalDegreeSolutionIterator].
//!
//! ```
//! use homotopy::domains::float::Complex;
//! use homotopy::total_degree::TotalDegreeSolutionIterator;
//!
//! let iter = TotalDegreeSolutionIterator::new(vec![2, 3], vec![Complex::new(1., 0.); 2]).unwrap();
//! assert_eq!(iter.len(), 6);
//!
//! for z in &iter {
//!     assert!((z[0] * z[0] - Complex::new(1., 0.)).norm() < 1e-12);
//! }
//! ```
use std::iter::FusedIterator;

use rand::Rng;
use tracing::{debug, instrument};

use crate::combinatorics::MixedRadixCounter;
use crate::domains::float::{Complex, ConstructibleFloat, FixedFloat, NumericalFloatLike, Real};
use crate::error::{HomotopyError, Result};
use crate::homotopy::{system_shape, Homotopy, PolynomialSystem};
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::Exponent;

/// The solutions `(z_1, ..., z_n)` of the system `z_i^{d_i} = b_i`.
///
/// The solutions are not stored: they are generated from a mixed-radix counter
/// `(k_1, ..., k_n)` with `0 <= k_i < d_i`, where `z_i = r_i e^{2πi k_i / d_i}` and
/// `r_i = |b_i|^{1/d_i} e^{i arg(b_i) / d_i}` is a fixed `d_i`th root of `b_i`.
/// The solutions are enumerated in odometer order, i.e. `k_1` moves fastest.
///
/// Only `O(n)` numbers are kept, independent of the degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct TotalDegreeSolutionIterator<R: FixedFloat = f64> {
    degrees: Vec<u32>,
    b: Vec<Complex<R>>,
    // |r_i|, arg(r_i) and 2π / d_i
    moduli: Vec<R>,
    angles: Vec<R>,
    steps: Vec<R>,
}

impl<R: FixedFloat> TotalDegreeSolutionIterator<R> {
    /// Create the solution set of `z_i^{d_i} = b_i`. Every degree must be at least 1.
    pub fn new(degrees: Vec<u32>, b: Vec<Complex<R>>) -> Result<TotalDegreeSolutionIterator<R>> {
        HomotopyError::check_len("b", degrees.len(), b.len())?;

        if let Some(i) = degrees.iter().position(|d| *d == 0) {
            return Err(HomotopyError::invalid(
                "degrees",
                format!("the degree at position {} is 0", i),
            ));
        }

        let two_pi = R::new_from_f64(std::f64::consts::TAU);
        let n = degrees.len();
        let (mut moduli, mut angles, mut steps) =
            (Vec::with_capacity(n), Vec::with_capacity(n), Vec::with_capacity(n));

        for (d, b) in degrees.iter().zip(&b) {
            let inv_d = R::new_from_usize(*d as usize).inv();
            let (r, phi) = b.to_polar_coordinates();
            moduli.push(r.powf(&inv_d));
            angles.push(phi * inv_d);
            steps.push(two_pi * inv_d);
        }

        Ok(TotalDegreeSolutionIterator {
            degrees,
            b,
            moduli,
            angles,
            steps,
        })
    }

    #[inline]
    pub fn degrees(&self) -> &[u32] {
        &self.degrees
    }

    #[inline]
    pub fn b(&self) -> &[Complex<R>] {
        &self.b
    }

    /// The number of variables of every solution.
    #[inline]
    pub fn nvariables(&self) -> usize {
        self.degrees.len()
    }

    /// The number of solutions, or `None` if it does not fit in a `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.counter().count()
    }

    /// The number of solutions, `d_1 * ... * d_n`, saturated at `usize::MAX`.
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Returns `false`, since every degree is at least 1.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the `index`th solution in odometer order.
    pub fn solution(&self, index: usize) -> Option<Vec<Complex<R>>> {
        if index >= self.len() {
            return None;
        }

        let mut counter = self.counter();
        counter.set_index(index);
        Some(self.solution_at(counter.digits()))
    }

    /// Return an iterator over all solutions. Every call returns a new, independent cursor.
    pub fn iter(&self) -> TotalDegreeSolutions<'_, R> {
        TotalDegreeSolutions {
            solutions: self,
            counter: self.counter(),
            remaining: self.len(),
        }
    }

    fn counter(&self) -> MixedRadixCounter {
        let radices: Vec<usize> = self.degrees.iter().map(|d| *d as usize).collect();
        MixedRadixCounter::new(&radices)
    }

    fn solution_at(&self, digits: &[usize]) -> Vec<Complex<R>> {
        digits
            .iter()
            .enumerate()
            .map(|(i, k)| {
                let angle = self.angles[i] + self.steps[i] * R::new_from_usize(*k);
                Complex::from_polar_coordinates(self.moduli[i], angle)
            })
            .collect()
    }
}

impl<'a, R: FixedFloat> IntoIterator for &'a TotalDegreeSolutionIterator<R> {
    type Item = Vec<Complex<R>>;
    type IntoIter = TotalDegreeSolutions<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A cursor over the solutions of a [TotalDegreeSolutionIterator].
#[derive(Clone, Debug)]
pub struct TotalDegreeSolutions<'a, R: FixedFloat> {
    solutions: &'a TotalDegreeSolutionIterator<R>,
    counter: MixedRadixCounter,
    remaining: usize,
}

impl<'a, R: FixedFloat> Iterator for TotalDegreeSolutions<'a, R> {
    type Item = Vec<Complex<R>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let s = self.solutions.solution_at(self.counter.digits());
        self.remaining -= 1;
        self.counter.increment();
        Some(s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, R: FixedFloat> ExactSizeIterator for TotalDegreeSolutions<'a, R> {}

impl<'a, R: FixedFloat> FusedIterator for TotalDegreeSolutions<'a, R> {}

/// Construct the total degree start system `{z_i^{d_i} - b_i}` for the square system `target`,
/// where `d_i` is the total degree of the `i`th equation of `target`.
///
/// If `unit_roots` is true, all `b_i` are 1. Otherwise each `b_i` is drawn from `rng`
/// with real and imaginary part uniformly in `[0, 1)`.
#[instrument(level = "trace", skip(target, rng))]
pub fn total_degree_start_system<R: FixedFloat, G: Rng + ?Sized>(
    target: &[MultivariatePolynomial<Complex<R>>],
    unit_roots: bool,
    rng: &mut G,
) -> Result<(PolynomialSystem<R>, TotalDegreeSolutionIterator<R>)> {
    let shape = system_shape(target)?;
    if shape.nequations != shape.nvariables {
        return Err(HomotopyError::invalid(
            "target",
            format!("a total degree start system needs a square system, not {}", shape),
        ));
    }

    let degrees: Vec<u32> = target.iter().map(|p| p.total_degree()).collect();
    if let Some(i) = degrees.iter().position(|d| *d == 0) {
        return Err(HomotopyError::invalid(
            "target",
            format!("equation {} is constant", i),
        ));
    }

    if let Some(d) = degrees.iter().find(|d| **d > u16::MAX as u32) {
        return Err(HomotopyError::invalid(
            "target",
            format!("degree {} does not fit in the exponent type", d),
        ));
    }

    let b: Vec<Complex<R>> = degrees
        .iter()
        .map(|_| {
            if unit_roots {
                Complex::new_one()
            } else {
                Complex::new_sample_unit(rng)
            }
        })
        .collect();

    let start = match target.first() {
        Some(f) => degrees
            .iter()
            .zip(&b)
            .enumerate()
            .map(|(i, (d, b))| {
                let mut e = vec![u16::zero(); shape.nvariables];
                let mut p = f.zero_with_capacity(2);
                p.append_monomial(-*b, &e);
                e[i] = u16::from_u32(*d);
                p.append_monomial(Complex::new_one(), &e);
                p
            })
            .collect(),
        None => vec![],
    };

    let solutions = TotalDegreeSolutionIterator::new(degrees, b)?;
    debug!(
        "Total degree start system with degrees {:?} and {} solutions",
        solutions.degrees(),
        solutions.len()
    );

    Ok((start, solutions))
}

/// Construct a homotopy of type `H` from a total degree start system to `target`,
/// together with the solutions of the start system.
///
/// ```
/// use homotopy::homotopy::{Homotopy, StraightLineHomotopy};
/// use homotopy::random::{random_system, RandomSystemOptions};
/// use homotopy::total_degree::total_degree;
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256StarStar;
///
/// let mut rng = Xoshiro256StarStar::seed_from_u64(1);
/// let f = random_system::<f64, _>(2, 2, &RandomSystemOptions::default(), &mut rng).unwrap();
///
/// let (h, solutions): (StraightLineHomotopy, _) = total_degree(f, true, &mut rng).unwrap();
/// for x in &solutions {
///     let v = h.evaluate(&x, 1.).unwrap();
///     assert!(v.iter().all(|v| v.norm() < 1e-10));
/// }
/// ```
pub fn total_degree<H: Homotopy, G: Rng + ?Sized>(
    target: PolynomialSystem<H::Real>,
    unit_roots: bool,
    rng: &mut G,
) -> Result<(H, TotalDegreeSolutionIterator<H::Real>)> {
    let (start, solutions) = total_degree_start_system(&target, unit_roots, rng)?;
    let h = H::from_systems(start, target, rng)?;
    Ok((h, solutions))
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use crate::domains::float::{Complex, NumericalFloatLike};
    use crate::error::HomotopyError;
    use crate::homotopy::{GammaTrickHomotopy, Homotopy};
    use crate::poly::{indexed_variables, polynomial::MultivariatePolynomial};

    use super::{total_degree, total_degree_start_system, TotalDegreeSolutionIterator};

    type P = MultivariatePolynomial<Complex<f64>>;

    fn c(re: f64) -> Complex<f64> {
        Complex::new(re, 0.)
    }

    /// A system with degrees (2, 3).
    fn target() -> Vec<P> {
        let vars = indexed_variables("x", 2);
        vec![
            P::from_terms(
                vars.clone(),
                vec![(c(1.), vec![1, 1]), (c(-2.), vec![1, 0]), (c(0.5), vec![0, 0])],
            ),
            P::from_terms(
                vars,
                vec![(c(3.), vec![1, 2]), (c(1.), vec![0, 1]), (c(-1.), vec![0, 0])],
            ),
        ]
    }

    #[test]
    fn roots_of_unity() {
        let iter = TotalDegreeSolutionIterator::new(vec![2, 3], vec![c(1.), c(1.)]).unwrap();
        assert_eq!(iter.len(), 6);

        let solutions: Vec<_> = iter.iter().collect();
        assert_eq!(solutions.len(), 6);

        for (i, z) in solutions.iter().enumerate() {
            assert!((z[0].pow(2) - c(1.)).norm() < 1e-12);
            assert!((z[1].pow(3) - c(1.)).norm() < 1e-12);

            for w in &solutions[i + 1..] {
                let d = (z[0] - w[0]).norm() + (z[1] - w[1]).norm();
                assert!(d > 1e-6);
            }
        }

        // odometer order: the first coordinate moves fastest
        assert_eq!(solutions[0], vec![c(1.), c(1.)]);
        assert!((solutions[1][0] - c(-1.)).norm() < 1e-15);
        assert_eq!(solutions[1][1], c(1.));
        assert_eq!(solutions[2][0], c(1.));

        for (i, z) in solutions.iter().enumerate() {
            assert_eq!(iter.solution(i).as_ref(), Some(z));
        }
        assert_eq!(iter.solution(6), None);
    }

    #[test]
    fn general_offsets() {
        let b = vec![Complex::new(0.3, 0.8), Complex::new(-0.2, 0.1), c(2.)];
        let iter = TotalDegreeSolutionIterator::new(vec![3, 1, 4], b.clone()).unwrap();

        let mut count = 0;
        for z in &iter {
            assert!((z[0].pow(3) - b[0]).norm() < 1e-12);
            assert!((z[1] - b[1]).norm() < 1e-12);
            assert!((z[2].pow(4) - b[2]).norm() < 1e-12);
            count += 1;
        }
        assert_eq!(count, 12);

        let mut cursor = iter.iter();
        assert_eq!(cursor.len(), 12);
        cursor.next();
        assert_eq!(cursor.len(), 11);
        assert_eq!(iter.iter().len(), 12);
    }

    #[test]
    fn huge_degree() {
        let iter = TotalDegreeSolutionIterator::new(vec![u32::MAX], vec![c(1.)]).unwrap();
        assert_eq!(iter.len(), u32::MAX as usize);

        let first: Vec<_> = iter.iter().take(3).collect();
        assert_eq!(first[0], vec![c(1.)]);

        let step = std::f64::consts::TAU / u32::MAX as f64;
        let z = Complex::from_polar_coordinates(1., step);
        assert!((first[1][0] - z).norm() < 1e-15);
        assert_eq!(iter.solution(1), Some(first[1].clone()));

        // the last root is the conjugate of the second one
        let last = iter.solution(iter.len() - 1).unwrap();
        assert!((last[0] - Complex::new(z.re, -z.im)).norm() < 1e-12);
        assert_eq!(iter.solution(iter.len()), None);
    }

    #[test]
    fn no_variables() {
        let iter = TotalDegreeSolutionIterator::<f64>::new(vec![], vec![]).unwrap();
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.iter().collect::<Vec<_>>(), vec![Vec::<Complex<f64>>::new()]);
    }

    #[test]
    fn invalid_degrees() {
        assert!(matches!(
            TotalDegreeSolutionIterator::new(vec![2, 0], vec![c(1.), c(1.)]),
            Err(HomotopyError::InvalidParameter { .. })
        ));
        assert!(matches!(
            TotalDegreeSolutionIterator::new(vec![2], vec![c(1.), c(1.)]),
            Err(HomotopyError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn unit_root_start_system() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let (start, solutions) = total_degree_start_system(&target(), true, &mut rng).unwrap();

        let vars = target()[0].get_vars();
        let expected = vec![
            P::from_terms(vars.clone(), vec![(c(1.), vec![2, 0]), (c(-1.), vec![0, 0])]),
            P::from_terms(vars, vec![(c(1.), vec![0, 3]), (c(-1.), vec![0, 0])]),
        ];
        assert_eq!(start, expected);
        assert_eq!(solutions.degrees(), &[2, 3]);
        assert_eq!(solutions.len(), 6);
    }

    #[test]
    fn random_offsets() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let (start, solutions) = total_degree_start_system(&target(), false, &mut rng).unwrap();

        for b in solutions.b() {
            assert!((0. ..1.).contains(&b.re));
            assert!((0. ..1.).contains(&b.im));
        }

        for x in &solutions {
            for p in &start {
                assert!(p.evaluate(&x).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn non_square() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let mut f = target();
        f.pop();
        assert!(matches!(
            total_degree_start_system(&f, true, &mut rng),
            Err(HomotopyError::InvalidParameter { name: "target", .. })
        ));
    }

    #[test]
    fn homotopy_from_start_system() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(9);
        let (h, solutions): (GammaTrickHomotopy, _) =
            total_degree(target(), false, &mut rng).unwrap();

        assert_eq!(h.nvariables(), 2);
        for x in &solutions {
            let v = h.evaluate(&x, 1.).unwrap();
            assert!(v.iter().all(|v| v.norm() < 1e-12));
        }
    }
}
