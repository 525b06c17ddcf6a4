use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::debug;

use crate::domains::float::{Complex, ConstructibleFloat, FixedFloat, SingleFloat};
use crate::error::{HomotopyError, Result};
use crate::poly::polynomial::MultivariatePolynomial;

use super::{check_systems, sealed, Homotopy, PolynomialSystem};

/// Sample a point uniformly on the complex unit circle.
pub(crate) fn random_gamma<R: FixedFloat, G: Rng + ?Sized>(rng: &mut G) -> Complex<R> {
    let theta = R::new_sample_unit(rng) * R::new_from_f64(std::f64::consts::TAU);
    Complex::from_polar_coordinates(R::new_one(), theta)
}

/// The homotopy
///
/// ```text
/// H(x, t) = γ t S(x) + (1 - t) T(x)
/// ```
///
/// where `γ` is a complex number, usually chosen at random on the unit circle.
/// For a generic `γ` the solution paths of `H` avoid singularities for `t` in `(0, 1]`.
#[derive(Clone, Debug)]
pub struct GammaTrickHomotopy<R: FixedFloat = f64> {
    start: PolynomialSystem<R>,
    target: PolynomialSystem<R>,
    gamma: Complex<R>,
    homogenized: bool,
}

impl<R: FixedFloat> GammaTrickHomotopy<R> {
    /// Construct the homotopy `H(x, t) = γtS(x) + (1-t)T(x)`.
    ///
    /// `γ` must be finite and nonzero. It is used as given and is not normalized
    /// to the unit circle, so any complex scaling of the start system can be
    /// expressed. The other constructors always draw a `γ` with `|γ| = 1`.
    pub fn new(
        start: PolynomialSystem<R>,
        target: PolynomialSystem<R>,
        gamma: Complex<R>,
    ) -> Result<GammaTrickHomotopy<R>> {
        if gamma.is_zero() || !gamma.is_finite() {
            return Err(HomotopyError::invalid(
                "gamma",
                format!("{} is not a finite nonzero number", gamma),
            ));
        }

        let shape = check_systems(&start, &target)?;
        debug!("Gamma trick homotopy with {} and γ={}", shape, gamma);

        Ok(GammaTrickHomotopy {
            start,
            target,
            gamma,
            homogenized: false,
        })
    }

    /// Construct the homotopy with a `γ` drawn uniformly from the unit circle using `rng`.
    pub fn with_rng<G: Rng + ?Sized>(
        start: PolynomialSystem<R>,
        target: PolynomialSystem<R>,
        rng: &mut G,
    ) -> Result<GammaTrickHomotopy<R>> {
        let gamma = random_gamma(rng);
        Self::new(start, target, gamma)
    }

    /// Construct the homotopy with a reproducible random `γ` on the unit circle.
    pub fn with_seed(
        start: PolynomialSystem<R>,
        target: PolynomialSystem<R>,
        seed: u64,
    ) -> Result<GammaTrickHomotopy<R>> {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        Self::with_rng(start, target, &mut rng)
    }

    /// Construct the homotopy with a random `γ` on the unit circle,
    /// using a generator seeded from system entropy.
    pub fn new_random(
        start: PolynomialSystem<R>,
        target: PolynomialSystem<R>,
    ) -> Result<GammaTrickHomotopy<R>> {
        let mut rng = Xoshiro256StarStar::from_entropy();
        Self::with_rng(start, target, &mut rng)
    }

    #[inline]
    pub fn gamma(&self) -> &Complex<R> {
        &self.gamma
    }
}

impl<R: FixedFloat> sealed::Sealed for GammaTrickHomotopy<R> {}

impl<R: FixedFloat> Homotopy for GammaTrickHomotopy<R> {
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
        (self.gamma * t, Complex::new_one() - t)
    }

    #[inline]
    fn dt_weights(&self) -> (Complex<R>, Complex<R>) {
        (self.gamma, -Complex::<R>::new_one())
    }

    fn from_systems<G: Rng + ?Sized>(
        start: PolynomialSystem<R>,
        target: PolynomialSystem<R>,
        rng: &mut G,
    ) -> Result<Self> {
        Self::with_rng(start, target, rng)
    }

    fn with_systems(
        &self,
        start: PolynomialSystem<R>,
        target: PolynomialSystem<R>,
        homogenized: bool,
    ) -> Self {
        GammaTrickHomotopy {
            start,
            target,
            gamma: self.gamma,
            homogenized,
        }
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use crate::domains::float::Complex;
    use crate::error::HomotopyError;
    use crate::homotopy::{Homotopy, JacobianDiffResult, PolynomialHomotopyConfig};
    use crate::poly::{indexed_variables, polynomial::MultivariatePolynomial};

    use super::{random_gamma, GammaTrickHomotopy};

    type P = MultivariatePolynomial<Complex<f64>>;

    fn c(re: f64) -> Complex<f64> {
        Complex::new(re, 0.)
    }

    fn systems() -> (Vec<P>, Vec<P>) {
        let vars = indexed_variables("x", 2);
        let start = vec![
            P::from_terms(vars.clone(), vec![(c(1.), vec![2, 0]), (c(-1.), vec![0, 0])]),
            P::from_terms(vars.clone(), vec![(c(1.), vec![0, 3]), (c(-1.), vec![0, 0])]),
        ];
        let target = vec![
            P::from_terms(
                vars.clone(),
                vec![(c(2.), vec![2, 0]), (c(-1.), vec![1, 1]), (c(0.5), vec![0, 0])],
            ),
            P::from_terms(
                vars,
                vec![(Complex::new(0., 1.), vec![0, 3]), (c(1.), vec![1, 0])],
            ),
        ];
        (start, target)
    }

    #[test]
    fn unit_gamma() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        for _ in 0..50 {
            let g: Complex<f64> = random_gamma(&mut rng);
            assert!((g.norm() - 1.).abs() < 1e-15);
        }
    }

    #[test]
    fn reproducible_seed() {
        let (s, t) = systems();
        let a = GammaTrickHomotopy::with_seed(s.clone(), t.clone(), 42).unwrap();
        let b = GammaTrickHomotopy::with_seed(s, t, 42).unwrap();
        assert_eq!(a.gamma(), b.gamma());
    }

    #[test]
    fn invalid_gamma() {
        let (s, t) = systems();
        assert!(matches!(
            GammaTrickHomotopy::new(s.clone(), t.clone(), Complex::new_zero()),
            Err(HomotopyError::InvalidParameter { name: "gamma", .. })
        ));
        assert!(matches!(
            GammaTrickHomotopy::new(s, t, Complex::new(f64::NAN, 0.)),
            Err(HomotopyError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn entropy_gamma() {
        let (s, t) = systems();
        let a = GammaTrickHomotopy::new_random(s.clone(), t.clone()).unwrap();
        let b = GammaTrickHomotopy::new_random(s, t).unwrap();
        assert!((a.gamma().norm() - 1.).abs() < 1e-15);
        assert!((b.gamma().norm() - 1.).abs() < 1e-15);
    }

    #[test]
    fn explicit_gamma_is_kept() {
        let (s, t) = systems();
        let gamma = Complex::new(3., -4.);
        let h = GammaTrickHomotopy::new(s, t, gamma).unwrap();
        assert_eq!(*h.gamma(), gamma);
        assert_eq!(h.dt_weights().0, gamma);
    }

    #[test]
    fn gamma_weights() {
        let (s, t) = systems();
        let gamma = Complex::new(0.6, 0.8);
        let h = GammaTrickHomotopy::new(s.clone(), t, gamma).unwrap();

        let x = [Complex::new(1.5, -0.5), Complex::new(0.25, 2.)];
        let v = h.evaluate(&x, 1.).unwrap();
        for i in 0..2 {
            assert!((v[i] - gamma * s[i].evaluate(&x)).norm() < 1e-14);
        }

        let dt = h.dt(&x, 0.5).unwrap();
        let at0 = h.evaluate(&x, 0.).unwrap();
        for i in 0..2 {
            assert!((dt[i] - (v[i] - at0[i])).norm() < 1e-13);
        }
    }

    #[test]
    fn jacobian_with_config() {
        let (s, t) = systems();
        let h = GammaTrickHomotopy::with_seed(s, t, 7).unwrap();
        let mut cfg = PolynomialHomotopyConfig::new(&h);

        let x = [Complex::new(-0.3, 0.9), Complex::new(1.1, 0.2)];
        let tt = Complex::new(0.4, 0.1);

        let slow = h.jacobian(&x, tt).unwrap();
        let fast = h.jacobian_with(&x, tt, &mut cfg).unwrap();
        assert!(slow.max_distance(&fast, |z| z.norm()) < 1e-13);

        let mut r = JacobianDiffResult::new(&cfg);
        h.value_and_jacobian_into(&mut r, &x, tt, &mut cfg).unwrap();
        assert!(r.jacobian().max_distance(&slow, |z| z.norm()) < 1e-13);

        let v = h.evaluate(&x, tt).unwrap();
        for (a, b) in r.value().iter().zip(&v) {
            assert!((a - b).norm() < 1e-13);
        }
    }
}
