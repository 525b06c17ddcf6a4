//! Random polynomial systems, for testing and benchmarking.
//!
//! ```
//! use homotopy::homotopy::GammaTrickHomotopy;
//! use homotopy::random::{random_homotopy, RandomSystemOptions};
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256StarStar;
//!
//! let mut rng = Xoshiro256StarStar::seed_from_u64(123);
//! let options = RandomSystemOptions {
//!     min_degree: 2,
//!     max_degree: 3,
//!     density: Some(0.5),
//! };
//!
//! let (_h, solutions): (GammaTrickHomotopy, _) = random_homotopy(3, &options, &mut rng).unwrap();
//! assert!(solutions.len() >= 8 && solutions.len() <= 27);
//! ```
use std::sync::Arc;

use rand::Rng;
use rand_distr::{StandardNormal, Uniform};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::combinatorics::MonomialIterator;
use crate::domains::float::{Complex, ConstructibleFloat, FixedFloat};
use crate::error::{HomotopyError, Result};
use crate::homotopy::{Homotopy, PolynomialSystem};
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::{indexed_variables, Exponent, Variable};
use crate::total_degree::{total_degree, TotalDegreeSolutionIterator};

/// Options for the generation of random polynomial systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomSystemOptions {
    /// The smallest total degree of a polynomial.
    pub min_degree: u32,
    /// The largest total degree of a polynomial.
    pub max_degree: u32,
    /// The probability that a monomial is part of a polynomial.
    /// If `None`, it is drawn once per system from `Uniform(0.1, 0.9)`.
    pub density: Option<f64>,
}

impl Default for RandomSystemOptions {
    fn default() -> Self {
        RandomSystemOptions {
            min_degree: 1,
            max_degree: 5,
            density: None,
        }
    }
}

impl RandomSystemOptions {
    fn validate(&self) -> Result<()> {
        if self.min_degree > self.max_degree {
            return Err(HomotopyError::invalid(
                "min_degree",
                format!(
                    "the minimal degree {} exceeds the maximal degree {}",
                    self.min_degree, self.max_degree
                ),
            ));
        }

        if self.max_degree > u16::MAX as u32 {
            return Err(HomotopyError::invalid(
                "max_degree",
                format!("{} does not fit in the exponent type", self.max_degree),
            ));
        }

        check_density(self.density)
    }
}

fn check_density(density: Option<f64>) -> Result<()> {
    match density {
        Some(d) if !(0. ..=1.).contains(&d) => Err(HomotopyError::invalid(
            "density",
            format!("{} is not in [0, 1]", d),
        )),
        _ => Ok(()),
    }
}

/// Sample a complex number with real and imaginary part drawn from the standard normal distribution.
pub fn standard_normal<R: FixedFloat, G: Rng + ?Sized>(rng: &mut G) -> Complex<R> {
    let re: f64 = rng.sample(StandardNormal);
    let im: f64 = rng.sample(StandardNormal);
    Complex::new(R::new_from_f64(re), R::new_from_f64(im))
}

/// Create a random system of `nequations` polynomials in the variables `x_1, ..., x_nvars`,
/// with coefficients whose real and imaginary part are drawn from the standard normal distribution.
pub fn random_system<R: FixedFloat, G: Rng + ?Sized>(
    nequations: usize,
    nvars: usize,
    options: &RandomSystemOptions,
    rng: &mut G,
) -> Result<PolynomialSystem<R>> {
    random_system_with(nequations, nvars, options, rng, standard_normal::<R, G>)
}

/// Create a random system of `nequations` polynomials in the variables `x_1, ..., x_nvars`,
/// drawing the coefficients with `coefficient`.
///
/// The total degree of every polynomial is drawn uniformly from
/// `[options.min_degree, options.max_degree]`.
#[instrument(level = "trace", skip(rng, coefficient))]
pub fn random_system_with<R, G, F>(
    nequations: usize,
    nvars: usize,
    options: &RandomSystemOptions,
    rng: &mut G,
    coefficient: F,
) -> Result<PolynomialSystem<R>>
where
    R: FixedFloat,
    G: Rng + ?Sized,
    F: FnMut(&mut G) -> Complex<R>,
{
    options.validate()?;

    let density = match options.density {
        Some(d) => d,
        None => rng.sample(Uniform::new(0.1, 0.9)),
    };

    let degrees: Vec<u32> = (0..nequations)
        .map(|_| rng.gen_range(options.min_degree..=options.max_degree))
        .collect();

    Ok(generate(
        &degrees,
        indexed_variables("x", nvars),
        density,
        rng,
        coefficient,
    ))
}

/// Create a random system with one polynomial of the given total degree per entry
/// of `degrees`, in the given variables. Coefficients are drawn from the standard
/// normal distribution.
pub fn random_system_with_degrees<R: FixedFloat, G: Rng + ?Sized>(
    degrees: &[u32],
    variables: Arc<Vec<Variable>>,
    density: Option<f64>,
    rng: &mut G,
) -> Result<PolynomialSystem<R>> {
    check_density(density)?;

    if let Some(d) = degrees.iter().find(|d| **d > u16::MAX as u32) {
        return Err(HomotopyError::invalid(
            "degrees",
            format!("{} does not fit in the exponent type", d),
        ));
    }

    let density = match density {
        Some(d) => d,
        None => rng.sample(Uniform::new(0.1, 0.9)),
    };

    Ok(generate(
        degrees,
        variables,
        density,
        rng,
        standard_normal::<R, G>,
    ))
}

fn generate<R, G, F>(
    degrees: &[u32],
    variables: Arc<Vec<Variable>>,
    density: f64,
    rng: &mut G,
    mut coefficient: F,
) -> PolynomialSystem<R>
where
    R: FixedFloat,
    G: Rng + ?Sized,
    F: FnMut(&mut G) -> Complex<R>,
{
    debug!(
        "Random system with degrees {:?} in {} variables and density {}",
        degrees,
        variables.len(),
        density
    );

    let nvars = variables.len();
    let mut exp = vec![u16::zero(); nvars];

    let mut system = Vec::with_capacity(degrees.len());
    for &d in degrees {
        let mut p = MultivariatePolynomial::new(None, variables.clone());

        let mut monomials = MonomialIterator::new(nvars, d);
        while let Some(m) = monomials.next() {
            if rng.gen_bool(density) {
                for (e, m) in exp.iter_mut().zip(m) {
                    *e = u16::from_u32(*m);
                }
                p.append_monomial(coefficient(rng), &exp);
            }
        }

        // make sure the polynomial has the drawn degree
        if nvars > 0 && p.total_degree() < d {
            exp.fill(0);
            for _ in 0..d {
                exp[rng.gen_range(0..nvars)] += 1;
            }
            p.append_monomial(coefficient(rng), &exp);
        }

        system.push(p);
    }

    system
}

/// Create a homotopy of type `H` from a total degree start system to a random square
/// system with `size` equations, together with the solutions of the start system.
pub fn random_homotopy<H: Homotopy, G: Rng + ?Sized>(
    size: usize,
    options: &RandomSystemOptions,
    rng: &mut G,
) -> Result<(H, TotalDegreeSolutionIterator<H::Real>)> {
    let target = random_system(size, size, options, rng)?;
    total_degree(target, false, rng)
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use crate::combinatorics::monomial_count;
    use crate::domains::float::Complex;
    use crate::error::HomotopyError;
    use crate::homotopy::{Homotopy, StraightLineHomotopy};
    use crate::poly::indexed_variables;

    use super::{
        random_homotopy, random_system, random_system_with, random_system_with_degrees,
        RandomSystemOptions,
    };

    #[test]
    fn full_density() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let options = RandomSystemOptions {
            min_degree: 2,
            max_degree: 4,
            density: Some(1.),
        };

        let f = random_system::<f64, _>(4, 3, &options, &mut rng).unwrap();
        assert_eq!(f.len(), 4);
        for p in &f {
            assert_eq!(p.nvars(), 3);
            let d = p.total_degree();
            assert!((2..=4).contains(&d));
            assert_eq!(p.nterms(), monomial_count(3, d));
        }
    }

    #[test]
    fn density_statistics() {
        let vars = indexed_variables("x", 3);
        let degrees = vec![4; 50];
        let count = monomial_count(3, 4) * degrees.len();

        let mut fractions = vec![];
        for density in [0.2, 0.8] {
            let mut rng = Xoshiro256StarStar::seed_from_u64(17);
            let f = random_system_with_degrees::<f64, _>(
                &degrees,
                vars.clone(),
                Some(density),
                &mut rng,
            )
            .unwrap();

            for p in &f {
                assert_eq!(p.total_degree(), 4);
            }

            let nterms: usize = f.iter().map(|p| p.nterms()).sum();
            let fraction = nterms as f64 / count as f64;
            assert!((fraction - density).abs() < 0.05);
            fractions.push(fraction);
        }

        assert!(fractions[0] < fractions[1]);
    }

    #[test]
    fn custom_coefficients() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let options = RandomSystemOptions {
            density: Some(0.5),
            ..Default::default()
        };

        let f = random_system_with(3, 2, &options, &mut rng, |_| Complex::new(1., 0.)).unwrap();
        for p in &f {
            assert!((1..=5).contains(&p.total_degree()));
            assert!(p.coefficients.iter().all(|c| *c == Complex::new(1., 0.)));
        }
    }

    #[test]
    fn reproducible() {
        let options = RandomSystemOptions::default();
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        let f = random_system::<f64, _>(3, 3, &options, &mut rng).unwrap();
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        let g = random_system::<f64, _>(3, 3, &options, &mut rng).unwrap();
        assert_eq!(f, g);
    }

    #[test]
    fn invalid_options() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);

        let options = RandomSystemOptions {
            min_degree: 4,
            max_degree: 2,
            density: None,
        };
        assert!(matches!(
            random_system::<f64, _>(2, 2, &options, &mut rng),
            Err(HomotopyError::InvalidParameter {
                name: "min_degree",
                ..
            })
        ));

        let options = RandomSystemOptions {
            density: Some(1.5),
            ..Default::default()
        };
        assert!(matches!(
            random_system::<f64, _>(2, 2, &options, &mut rng),
            Err(HomotopyError::InvalidParameter {
                name: "density",
                ..
            })
        ));
    }

    #[test]
    fn homotopy() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(8);
        let options = RandomSystemOptions {
            min_degree: 1,
            max_degree: 3,
            density: None,
        };

        let (h, solutions): (StraightLineHomotopy, _) =
            random_homotopy(3, &options, &mut rng).unwrap();

        let bezout: u32 = h.target().iter().map(|p| p.total_degree()).product();
        assert_eq!(solutions.len(), bezout as usize);

        for x in solutions.iter().take(10) {
            let v = h.evaluate(&x, 1.).unwrap();
            assert!(v.iter().all(|v| v.norm() < 1e-12));
        }
    }
}
