use tracing::debug;

use crate::domains::float::{Complex, FixedFloat};
use crate::error::{HomotopyError, Result, SystemShape};
use crate::poly::evaluate::{EvaluationPlan, PowerTable};
use crate::tensors::matrix::Matrix;

use super::Homotopy;

/// A workspace for the fast evaluation of a homotopy. It stores the term structure
/// of the start and target system, a table of powers of the input and the values
/// and Jacobians of both systems.
///
/// The coefficients are read from the homotopy at every call, so a config can be
/// reused for every homotopy with the same monomials, such as
/// a homotopy with a different `γ`. The structure is checked at every call: a
/// different shape results in a [HomotopyError::DimensionMismatch] and different
/// monomials in a [HomotopyError::InvalidParameter].
#[derive(Clone, Debug)]
pub struct PolynomialHomotopyConfig<R: FixedFloat> {
    nvars: usize,
    start_plans: Vec<EvaluationPlan>,
    target_plans: Vec<EvaluationPlan>,
    powers: PowerTable<Complex<R>>,
    prefix: Vec<Complex<R>>,
    start_values: Vec<Complex<R>>,
    target_values: Vec<Complex<R>>,
    start_jacobian: Matrix<Complex<R>>,
    target_jacobian: Matrix<Complex<R>>,
}

impl<R: FixedFloat> PolynomialHomotopyConfig<R> {
    /// Create a workspace for `h`.
    pub fn new<H: Homotopy<Real = R>>(h: &H) -> PolynomialHomotopyConfig<R> {
        let nvars = h.nvariables();
        let neqs = h.nequations();

        let start_plans: Vec<_> = h.start().iter().map(EvaluationPlan::new).collect();
        let target_plans: Vec<_> = h.target().iter().map(EvaluationPlan::new).collect();

        let mut max_degrees = vec![0; nvars];
        for p in start_plans.iter().chain(&target_plans) {
            p.update_max_degrees(&mut max_degrees);
        }

        debug!(
            "Homotopy config for {} equations in {} variables, maximal degrees {:?}",
            neqs, nvars, max_degrees
        );

        PolynomialHomotopyConfig {
            nvars,
            start_plans,
            target_plans,
            powers: PowerTable::new(&max_degrees),
            prefix: vec![Complex::new_zero(); nvars],
            start_values: vec![Complex::new_zero(); neqs],
            target_values: vec![Complex::new_zero(); neqs],
            start_jacobian: Matrix::new(neqs as u32, nvars as u32),
            target_jacobian: Matrix::new(neqs as u32, nvars as u32),
        }
    }

    /// The shape of the homotopy this config was built for.
    pub fn shape(&self) -> SystemShape {
        SystemShape {
            nequations: self.start_plans.len(),
            nvariables: self.nvars,
        }
    }

    /// Check that the config matches the term structure of `h`.
    pub(crate) fn check<H: Homotopy<Real = R>>(&self, h: &H) -> Result<()> {
        HomotopyError::check_len("config variables", self.nvars, h.nvariables())?;
        HomotopyError::check_len("config equations", self.start_plans.len(), h.nequations())?;

        for (i, (plan, p)) in self.start_plans.iter().zip(h.start()).enumerate() {
            if !plan.matches(p) {
                return Err(HomotopyError::invalid(
                    "cfg",
                    format!("the terms of start equation {} differ from the config", i),
                ));
            }
        }

        for (i, (plan, p)) in self.target_plans.iter().zip(h.target()).enumerate() {
            if !plan.matches(p) {
                return Err(HomotopyError::invalid(
                    "cfg",
                    format!("the terms of target equation {} differ from the config", i),
                ));
            }
        }

        Ok(())
    }

    /// Evaluate the start and target system at `x`.
    pub(crate) fn evaluate_systems<H: Homotopy<Real = R>>(&mut self, h: &H, x: &[Complex<R>]) {
        self.powers.fill(x);

        for ((v, plan), p) in self
            .start_values
            .iter_mut()
            .zip(&self.start_plans)
            .zip(h.start())
        {
            *v = plan.evaluate(&p.coefficients, &self.powers);
        }

        for ((v, plan), p) in self
            .target_values
            .iter_mut()
            .zip(&self.target_plans)
            .zip(h.target())
        {
            *v = plan.evaluate(&p.coefficients, &self.powers);
        }
    }

    /// Evaluate the start and target system and their Jacobians at `x`.
    pub(crate) fn evaluate_systems_with_jacobians<H: Homotopy<Real = R>>(
        &mut self,
        h: &H,
        x: &[Complex<R>],
    ) {
        self.powers.fill(x);

        for (i, (plan, p)) in self.start_plans.iter().zip(h.start()).enumerate() {
            self.start_values[i] = plan.evaluate_with_gradient(
                &p.coefficients,
                &self.powers,
                self.start_jacobian.row_mut(i),
                &mut self.prefix,
            );
        }

        for (i, (plan, p)) in self.target_plans.iter().zip(h.target()).enumerate() {
            self.target_values[i] = plan.evaluate_with_gradient(
                &p.coefficients,
                &self.powers,
                self.target_jacobian.row_mut(i),
                &mut self.prefix,
            );
        }
    }

    #[inline]
    pub(crate) fn start_values(&self) -> &[Complex<R>] {
        &self.start_values
    }

    #[inline]
    pub(crate) fn target_values(&self) -> &[Complex<R>] {
        &self.target_values
    }

    #[inline]
    pub(crate) fn start_jacobian(&self) -> &Matrix<Complex<R>> {
        &self.start_jacobian
    }

    #[inline]
    pub(crate) fn target_jacobian(&self) -> &Matrix<Complex<R>> {
        &self.target_jacobian
    }
}

/// The value `H(x, t)` together with the Jacobian of `H` w.r.t. `x`.
#[derive(Clone, Debug, PartialEq)]
pub struct JacobianDiffResult<R: FixedFloat> {
    pub(crate) value: Vec<Complex<R>>,
    pub(crate) jacobian: Matrix<Complex<R>>,
}

impl<R: FixedFloat> JacobianDiffResult<R> {
    /// Create a zeroed result with the shape of the homotopy of `cfg`.
    pub fn new(cfg: &PolynomialHomotopyConfig<R>) -> JacobianDiffResult<R> {
        let shape = cfg.shape();
        JacobianDiffResult {
            value: vec![Complex::new_zero(); shape.nequations],
            jacobian: Matrix::new(shape.nequations as u32, shape.nvariables as u32),
        }
    }

    /// The value `H(x, t)`.
    pub fn value(&self) -> &[Complex<R>] {
        &self.value
    }

    /// The Jacobian of `H` w.r.t. `x`.
    pub fn jacobian(&self) -> &Matrix<Complex<R>> {
        &self.jacobian
    }

    pub(crate) fn check(&self, shape: SystemShape) -> Result<()> {
        HomotopyError::check_len("value", shape.nequations, self.value.len())?;
        HomotopyError::check_len("jacobian rows", shape.nequations, self.jacobian.nrows())?;
        HomotopyError::check_len("jacobian columns", shape.nvariables, self.jacobian.ncols())
    }
}

/// The value `H(x, t)` together with the derivative of `H` w.r.t. `t`.
#[derive(Clone, Debug, PartialEq)]
pub struct DtDiffResult<R: FixedFloat> {
    pub(crate) value: Vec<Complex<R>>,
    pub(crate) dt: Vec<Complex<R>>,
}

impl<R: FixedFloat> DtDiffResult<R> {
    /// Create a zeroed result with the shape of the homotopy of `cfg`.
    pub fn new(cfg: &PolynomialHomotopyConfig<R>) -> DtDiffResult<R> {
        let n = cfg.shape().nequations;
        DtDiffResult {
            value: vec![Complex::new_zero(); n],
            dt: vec![Complex::new_zero(); n],
        }
    }

    /// The value `H(x, t)`.
    pub fn value(&self) -> &[Complex<R>] {
        &self.value
    }

    /// The derivative `∂H/∂t(x, t)`.
    pub fn dt(&self) -> &[Complex<R>] {
        &self.dt
    }

    pub(crate) fn check(&self, shape: SystemShape) -> Result<()> {
        HomotopyError::check_len("value", shape.nequations, self.value.len())?;
        HomotopyError::check_len("dt", shape.nequations, self.dt.len())
    }
}
