//! Polynomial homotopies `H(x, t)` that deform a start system into a target system.
//!
//! Every homotopy implements the [Homotopy] trait, which provides evaluation of `H`,
//! its Jacobian with respect to `x` and its derivative with respect to `t`. Each
//! operation comes in three flavours:
//! - an allocating version, such as [Homotopy::evaluate],
//! - a version that writes into a caller-owned buffer, such as [Homotopy::evaluate_into],
//! - versions that use a [PolynomialHomotopyConfig] workspace, such as
//!   [Homotopy::evaluate_with] and [Homotopy::value_and_jacobian_into]. These share a
//!   single pass over the start and target systems and do not allocate.
//!
//! For example:
//!
//! ```
//! use homotopy::domains::float::Complex;
//! use homotopy::homotopy::{Homotopy, PolynomialHomotopyConfig, StraightLineHomotopy};
//! use homotopy::poly::{indexed_variables, polynomial::MultivariatePolynomial};
//!
//! let vars = indexed_variables("x", 1);
//! let c = |re: f64| Complex::new(re, 0.);
//!
//! // x^2 - 1 and x^2 - 4
//! let start = vec![MultivariatePolynomial::from_terms(
//!     vars.clone(),
//!     vec![(c(1.), vec![2]), (c(-1.), vec![0])],
//! )];
//! let target = vec![MultivariatePolynomial::from_terms(
//!     vars,
//!     vec![(c(1.), vec![2]), (c(-4.), vec![0])],
//! )];
//!
//! let h = StraightLineHomotopy::new(start, target).unwrap();
//! let mut cfg = PolynomialHomotopyConfig::new(&h);
//!
//! let x = [c(3.)];
//! let v = h.evaluate_with(&x, 0.5, &mut cfg).unwrap();
//! assert_eq!(v[0], c(6.5));
//! ```
mod config;
mod gamma_trick;
mod homogenize;
mod straight_line;

use rand::Rng;

pub use self::config::{DtDiffResult, JacobianDiffResult, PolynomialHomotopyConfig};
pub use self::gamma_trick::GammaTrickHomotopy;
pub use self::homogenize::{
    dehomogenize_polynomial, dehomogenize_system, homogenize_polynomial, homogenize_system,
    is_homogeneous_system,
};
pub use self::straight_line::StraightLineHomotopy;

use self::homogenize::{check_degrees, homogenize_checked_system};

use crate::domains::float::{
    Complex, ConstructibleFloat, FixedFloat, NumericalFloatLike, RealNumberLike, SingleFloat,
};
use crate::error::{HomotopyError, Result, SystemShape};
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::Exponent;
use crate::tensors::matrix::Matrix;

/// A polynomial system with complex coefficients over the real type `R`.
pub type PolynomialSystem<R> = Vec<MultivariatePolynomial<Complex<R>>>;

mod sealed {
    pub trait Sealed {}
}

/// Convert a system with coefficients of type `S`, for example real numbers, to
/// a system with complex coefficients. This is done once, when a homotopy is built.
pub fn promote_system<S, R, E>(
    system: &[MultivariatePolynomial<S, E>],
) -> Vec<MultivariatePolynomial<Complex<R>, E>>
where
    S: NumericalFloatLike + SingleFloat + Into<Complex<R>>,
    R: FixedFloat,
    E: Exponent,
{
    system
        .iter()
        .map(|p| p.map_coeff(|c| c.clone().into()))
        .collect()
}

/// Determine the shape of a system, checking that every polynomial uses the same number of variables.
pub(crate) fn system_shape<T: NumericalFloatLike + SingleFloat, E: Exponent>(
    system: &[MultivariatePolynomial<T, E>],
) -> Result<SystemShape> {
    let nvariables = system.first().map(|p| p.nvars()).unwrap_or(0);
    for p in system {
        HomotopyError::check_len("polynomial variable map", nvariables, p.nvars())?;
    }

    Ok(SystemShape {
        nequations: system.len(),
        nvariables,
    })
}

/// Check that the start and target system have the same shape and return it.
/// The total degree of every equation must fit in the exponent type, so that
/// the homotopy can always be homogenized.
pub(crate) fn check_systems<R: FixedFloat>(
    start: &[MultivariatePolynomial<Complex<R>>],
    target: &[MultivariatePolynomial<Complex<R>>],
) -> Result<SystemShape> {
    let start_shape = system_shape(start)?;
    let target_shape = system_shape(target)?;
    check_degrees(start, "start")?;
    check_degrees(target, "target")?;

    if start_shape != target_shape {
        return Err(HomotopyError::ShapeMismatch {
            start: start_shape,
            target: target_shape,
        });
    }

    Ok(start_shape)
}

/// The binomial coefficient `n choose k` as a float.
fn binomial(n: u32, k: u32) -> f64 {
    let k = k.min(n - k);
    let mut r = 1.;
    for i in 1..=k {
        r = r * (n - k + i) as f64 / i as f64;
    }
    r
}

/// A homotopy `H(x, t)` between a start system `S` and a target system `T`.
///
/// The implementations differ only in how `S` and `T` are blended, which is described
/// by [Homotopy::weights] and [Homotopy::dt_weights]. All evaluation routines are
/// shared.
///
/// The set of implementations is closed: [StraightLineHomotopy] and [GammaTrickHomotopy].
pub trait Homotopy: sealed::Sealed + Clone + Sized {
    /// The real type of the coefficients.
    type Real: FixedFloat;

    /// The start system `S`.
    fn start(&self) -> &[MultivariatePolynomial<Complex<Self::Real>>];

    /// The target system `T`.
    fn target(&self) -> &[MultivariatePolynomial<Complex<Self::Real>>];

    /// Check whether the homotopy was homogenized.
    fn is_homogenized(&self) -> bool;

    /// The weights `(a, b)` such that `H(x, t) = a * S(x) + b * T(x)`.
    fn weights(&self, t: &Complex<Self::Real>) -> (Complex<Self::Real>, Complex<Self::Real>);

    /// The weights `(a, b)` such that `dH/dt(x, t) = a * S(x) + b * T(x)`.
    fn dt_weights(&self) -> (Complex<Self::Real>, Complex<Self::Real>);

    /// Construct a homotopy of this kind between `start` and `target`, drawing any
    /// random parameters from `rng`.
    fn from_systems<G: Rng + ?Sized>(
        start: PolynomialSystem<Self::Real>,
        target: PolynomialSystem<Self::Real>,
        rng: &mut G,
    ) -> Result<Self>;

    /// Create a homotopy with the same parameters as `self` but with different systems.
    /// The systems must have the same shape.
    #[doc(hidden)]
    fn with_systems(
        &self,
        start: PolynomialSystem<Self::Real>,
        target: PolynomialSystem<Self::Real>,
        homogenized: bool,
    ) -> Self;

    /// The number of variables which `H` expects as input, i.e. to evaluate `H(x, t)`
    /// `x` has to be a vector of length `nvariables`.
    fn nvariables(&self) -> usize {
        self.target().first().map(|p| p.nvars()).unwrap_or(0)
    }

    /// The number of equations of `H`.
    fn nequations(&self) -> usize {
        self.target().len()
    }

    /// The shape of `H`.
    fn shape(&self) -> SystemShape {
        SystemShape {
            nequations: self.nequations(),
            nvariables: self.nvariables(),
        }
    }

    /// Evaluate the homotopy `H` at `x` to time `t`, i.e. `H(x, t)`.
    fn evaluate(
        &self,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
    ) -> Result<Vec<Complex<Self::Real>>> {
        let mut out = vec![Complex::new_zero(); self.nequations()];
        self.evaluate_into(&mut out, x, t)?;
        Ok(out)
    }

    /// Evaluate the homotopy `H` at `x` to time `t`, i.e. `H(x, t)`, and store the result in `out`.
    ///
    /// This function does not allocate.
    fn evaluate_into(
        &self,
        out: &mut [Complex<Self::Real>],
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
    ) -> Result<()> {
        HomotopyError::check_len("input", self.nvariables(), x.len())?;
        HomotopyError::check_len("output", self.nequations(), out.len())?;

        let (a, b) = self.weights(&t.into());
        for ((o, s), f) in out.iter_mut().zip(self.start()).zip(self.target()) {
            *o = a * s.evaluate(x) + b * f.evaluate(x);
        }

        Ok(())
    }

    /// Compute the Jacobian of `H` at `x` and `t`. The Jacobian is constructed w.r.t. `x`,
    /// i.e. it doesn't contain the partial derivatives w.r.t. `t`.
    fn jacobian(
        &self,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
    ) -> Result<Matrix<Complex<Self::Real>>> {
        let mut out = Matrix::new(self.nequations() as u32, self.nvariables() as u32);
        self.jacobian_into(&mut out, x, t)?;
        Ok(out)
    }

    /// Compute the Jacobian of `H` at `x` and `t` and store the result in `out`.
    ///
    /// This function does not allocate.
    fn jacobian_into(
        &self,
        out: &mut Matrix<Complex<Self::Real>>,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
    ) -> Result<()> {
        HomotopyError::check_len("input", self.nvariables(), x.len())?;
        HomotopyError::check_len("jacobian rows", self.nequations(), out.nrows())?;
        HomotopyError::check_len("jacobian columns", self.nvariables(), out.ncols())?;

        let (a, b) = self.weights(&t.into());
        out.fill(&Complex::new_zero());
        for (i, (s, f)) in self.start().iter().zip(self.target()).enumerate() {
            let row = out.row_mut(i);
            s.accumulate_gradient(x, &a, row);
            f.accumulate_gradient(x, &b, row);
        }

        Ok(())
    }

    /// Compute the derivative of `H` w.r.t. `t` at `x` and `t`.
    fn dt(
        &self,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
    ) -> Result<Vec<Complex<Self::Real>>> {
        let mut out = vec![Complex::new_zero(); self.nequations()];
        self.dt_into(&mut out, x, t)?;
        Ok(out)
    }

    /// Compute the derivative of `H` w.r.t. `t` at `x` and `t` and store the result in `out`.
    /// For polynomial homotopies that are linear in `t` the result does not depend on `t`.
    ///
    /// This function does not allocate.
    fn dt_into(
        &self,
        out: &mut [Complex<Self::Real>],
        x: &[Complex<Self::Real>],
        _t: impl Into<Complex<Self::Real>>,
    ) -> Result<()> {
        HomotopyError::check_len("input", self.nvariables(), x.len())?;
        HomotopyError::check_len("output", self.nequations(), out.len())?;

        let (a, b) = self.dt_weights();
        for ((o, s), f) in out.iter_mut().zip(self.start()).zip(self.target()) {
            *o = a * s.evaluate(x) + b * f.evaluate(x);
        }

        Ok(())
    }

    /// Evaluate the homotopy `H` at `x` to time `t` using the precomputed values in `cfg`.
    /// Note that this is significantly faster than [Homotopy::evaluate].
    fn evaluate_with(
        &self,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
        cfg: &mut PolynomialHomotopyConfig<Self::Real>,
    ) -> Result<Vec<Complex<Self::Real>>> {
        let mut out = vec![Complex::new_zero(); self.nequations()];
        self.evaluate_into_with(&mut out, x, t, cfg)?;
        Ok(out)
    }

    /// Evaluate the homotopy `H` at `x` to time `t` using the precomputed values in `cfg`
    /// and store the result in `out`.
    fn evaluate_into_with(
        &self,
        out: &mut [Complex<Self::Real>],
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
        cfg: &mut PolynomialHomotopyConfig<Self::Real>,
    ) -> Result<()> {
        cfg.check(self)?;
        HomotopyError::check_len("input", self.nvariables(), x.len())?;
        HomotopyError::check_len("output", self.nequations(), out.len())?;

        cfg.evaluate_systems(self, x);

        let (a, b) = self.weights(&t.into());
        for ((o, s), f) in out
            .iter_mut()
            .zip(cfg.start_values())
            .zip(cfg.target_values())
        {
            *o = a * s + b * f;
        }

        Ok(())
    }

    /// Compute the Jacobian of `H` at `x` and `t` using the precomputed values in `cfg`.
    fn jacobian_with(
        &self,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
        cfg: &mut PolynomialHomotopyConfig<Self::Real>,
    ) -> Result<Matrix<Complex<Self::Real>>> {
        let mut out = Matrix::new(self.nequations() as u32, self.nvariables() as u32);
        self.jacobian_into_with(&mut out, x, t, cfg)?;
        Ok(out)
    }

    /// Compute the Jacobian of `H` at `x` and `t` using the precomputed values in `cfg`
    /// and store the result in `out`.
    fn jacobian_into_with(
        &self,
        out: &mut Matrix<Complex<Self::Real>>,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
        cfg: &mut PolynomialHomotopyConfig<Self::Real>,
    ) -> Result<()> {
        cfg.check(self)?;
        HomotopyError::check_len("input", self.nvariables(), x.len())?;
        HomotopyError::check_len("jacobian rows", self.nequations(), out.nrows())?;
        HomotopyError::check_len("jacobian columns", self.nvariables(), out.ncols())?;

        cfg.evaluate_systems_with_jacobians(self, x);

        let (a, b) = self.weights(&t.into());
        blend(
            out.data_mut(),
            cfg.start_jacobian().data(),
            cfg.target_jacobian().data(),
            &a,
            &b,
        );

        Ok(())
    }

    /// Compute `H(x, t)` and the Jacobian of `H` at `x` and `t` at once using the
    /// precomputed values in `cfg` and store the result in `r`. This is faster than
    /// computing both values separately.
    fn value_and_jacobian_into(
        &self,
        r: &mut JacobianDiffResult<Self::Real>,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
        cfg: &mut PolynomialHomotopyConfig<Self::Real>,
    ) -> Result<()> {
        cfg.check(self)?;
        HomotopyError::check_len("input", self.nvariables(), x.len())?;
        r.check(self.shape())?;

        cfg.evaluate_systems_with_jacobians(self, x);

        let (a, b) = self.weights(&t.into());
        blend(&mut r.value, cfg.start_values(), cfg.target_values(), &a, &b);
        blend(
            r.jacobian.data_mut(),
            cfg.start_jacobian().data(),
            cfg.target_jacobian().data(),
            &a,
            &b,
        );

        Ok(())
    }

    /// Compute the derivative of `H` w.r.t. `t` at `x` and `t` using the precomputed values in `cfg`.
    fn dt_with(
        &self,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
        cfg: &mut PolynomialHomotopyConfig<Self::Real>,
    ) -> Result<Vec<Complex<Self::Real>>> {
        let mut out = vec![Complex::new_zero(); self.nequations()];
        self.dt_into_with(&mut out, x, t, cfg)?;
        Ok(out)
    }

    /// Compute the derivative of `H` w.r.t. `t` at `x` and `t` using the precomputed values in `cfg`
    /// and store the result in `out`.
    fn dt_into_with(
        &self,
        out: &mut [Complex<Self::Real>],
        x: &[Complex<Self::Real>],
        _t: impl Into<Complex<Self::Real>>,
        cfg: &mut PolynomialHomotopyConfig<Self::Real>,
    ) -> Result<()> {
        cfg.check(self)?;
        HomotopyError::check_len("input", self.nvariables(), x.len())?;
        HomotopyError::check_len("output", self.nequations(), out.len())?;

        cfg.evaluate_systems(self, x);

        let (a, b) = self.dt_weights();
        blend(out, cfg.start_values(), cfg.target_values(), &a, &b);

        Ok(())
    }

    /// Compute `H(x, t)` and the derivative of `H` w.r.t. `t` at once using the
    /// precomputed values in `cfg` and store the result in `r`. This is faster than
    /// computing both values separately.
    fn value_and_dt_into(
        &self,
        r: &mut DtDiffResult<Self::Real>,
        x: &[Complex<Self::Real>],
        t: impl Into<Complex<Self::Real>>,
        cfg: &mut PolynomialHomotopyConfig<Self::Real>,
    ) -> Result<()> {
        cfg.check(self)?;
        HomotopyError::check_len("input", self.nvariables(), x.len())?;
        r.check(self.shape())?;

        cfg.evaluate_systems(self, x);

        let (a, b) = self.weights(&t.into());
        blend(&mut r.value, cfg.start_values(), cfg.target_values(), &a, &b);
        let (a, b) = self.dt_weights();
        blend(&mut r.dt, cfg.start_values(), cfg.target_values(), &a, &b);

        Ok(())
    }

    /// Homogenize the homotopy. This adds an additional variable at position 0.
    /// If `H` is already homogenized, this is the identity.
    fn homogenize(&self) -> Self {
        if self.is_homogenized() {
            return self.clone();
        }

        self.with_systems(
            homogenize_checked_system(self.start()),
            homogenize_checked_system(self.target()),
            true,
        )
    }

    /// Dehomogenize the homotopy. This removes the first variable.
    /// If `H` is not homogenized, this is the identity.
    fn dehomogenize(&self) -> Self {
        if !self.is_homogenized() {
            return self.clone();
        }

        self.with_systems(
            dehomogenize_system(self.start()),
            dehomogenize_system(self.target()),
            false,
        )
    }

    /// Check whether the homotopy is homogeneous. This does not imply that `H` was homogenized.
    fn is_homogeneous(&self) -> bool {
        is_homogeneous_system(self.start()) && is_homogeneous_system(self.target())
    }

    /// The Weyl (or Bombieri) norm of the system `H(x, t)`.
    ///
    /// Each equation is measured as a homogeneous polynomial of its total degree, i.e.
    /// a term `c x^α` contributes `|c|^2 α! (d - |α|)! / d!`.
    fn weyl_norm(&self, t: impl Into<Complex<Self::Real>>) -> Self::Real {
        let (a, b) = self.weights(&t.into());

        let mut sum = 0.;
        for (s, f) in self.start().iter().zip(self.target()) {
            let h = s.clone().mul_coeff(&a) + f.clone().mul_coeff(&b);
            let d = s.total_degree().max(f.total_degree());

            for m in &h {
                let mut weight = 1.;
                let mut remaining = d;
                for e in m.exponents {
                    let e = e.to_u32();
                    weight *= binomial(remaining, e);
                    remaining -= e;
                }

                sum += m.coefficient.norm_squared().to_f64() / weight;
            }
        }

        <Self::Real as ConstructibleFloat>::new_from_f64(sum.sqrt())
    }
}

/// Compute `out = a * s + b * f` elementwise.
#[inline]
fn blend<R: FixedFloat>(
    out: &mut [Complex<R>],
    s: &[Complex<R>],
    f: &[Complex<R>],
    a: &Complex<R>,
    b: &Complex<R>,
) {
    for ((o, s), f) in out.iter_mut().zip(s).zip(f) {
        *o = *a * s + *b * f;
    }
}
