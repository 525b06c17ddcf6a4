use rand::Rng;
use tracing::debug;

use crate::domains::float::{Complex, FixedFloat};
use crate::error::Result;
use crate::poly::polynomial::MultivariatePolynomial;

use super::{check_systems, sealed, Homotopy, PolynomialSystem};

/// The straight-line homotopy
///
/// ```text
/// H(x, t) = t * S(x) + (1 - t) * T(x)
/// ```
///
/// between a start system `S` and a target system `T`, such that `H(x, 1) = S(x)`
/// and `H(x, 0) = T(x)`.
#[derive(Clone, Debug)]
pub struct StraightLineHomotopy<R: FixedFloat = f64> {
    start: PolynomialSystem<R>,
    target: PolynomialSystem<R>,
    homogenized: bool,
}

impl<R: FixedFloat> StraightLineHomotopy<R> {
    /// Construct the homotopy `H(x, t) = tS(x) + (1-t)T(x)`.
    /// The start and target system must have the same number of equations and variables.
    pub fn new(
        start: PolynomialSystem<R>,
        target: PolynomialSystem<R>,
    ) -> Result<StraightLineHomotopy<R>> {
        let shape = check_systems(&start, &target)?;
        debug!("Straight-line homotopy with {}", shape);

        Ok(StraightLineHomotopy {
            start,
            target,
            homogenized: false,
        })
    }
}

impl<R: FixedFloat> sealed::Sealed for StraightLineHomotopy<R> {}

impl<R: FixedFloat> Homotopy for StraightLineHomotopy<R> {
    type Real = R;

    #[inline]
    fn start(&self) -> &[MultivariatePolynomial<Complex<R>>] {
        &self.start
    }

    #[inline]
    fn target(&self) -> &[MultivariatePolynomial<Complex<R>>] {
        &self.target
    }

    #[inline]
    fn is_homogenized(&self) -> bool {
        self.homogenized
    }

    #[inline]
    fn weights(&self, t: &Complex<R>) -> (Complex<R>, Complex<R>) {
        (*t, Complex::new_one() - t)
    }

    #[inline]
    fn dt_weights(&self) -> (Complex<R>, Complex<R>) {
        (Complex::new_one(), -Complex::<R>::new_one())
    }

    fn from_systems<G: Rng + ?Sized>(
        start: PolynomialSystem<R>,
        target: PolynomialSystem<R>,
        _rng: &mut G,
    ) -> Result<Self> {
        Self::new(start, target)
    }

    fn with_systems(
        &self,
        start: PolynomialSystem<R>,
        target: PolynomialSystem<R>,
        homogenized: bool,
    ) -> Self {
        StraightLineHomotopy {
            start,
            target,
            homogenized,
        }
    }
}
