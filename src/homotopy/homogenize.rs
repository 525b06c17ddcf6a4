use std::sync::Arc;

use crate::domains::float::{NumericalFloatLike, SingleFloat};
use crate::error::{HomotopyError, Result};
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::{Exponent, Variable};

/// Prepend a fresh temporary variable to the variable map.
fn homogenizing_variables(vars: &[Variable]) -> Arc<Vec<Variable>> {
    let id = vars
        .iter()
        .filter_map(|v| match v {
            Variable::Temporary(i) => Some(*i + 1),
            Variable::Symbol(_) => None,
        })
        .max()
        .unwrap_or(0);

    let mut new_vars = Vec::with_capacity(vars.len() + 1);
    new_vars.push(Variable::Temporary(id));
    new_vars.extend_from_slice(vars);
    Arc::new(new_vars)
}

/// Check that the total degree of every polynomial of `system` fits in the exponent
/// type, so that the power of the homogenizing variable can be represented.
pub(crate) fn check_degrees<T: NumericalFloatLike + SingleFloat, E: Exponent>(
    system: &[MultivariatePolynomial<T, E>],
    name: &'static str,
) -> Result<()> {
    for (i, p) in system.iter().enumerate() {
        let d = p.total_degree();
        if E::try_from_u32(d).is_none() {
            return Err(HomotopyError::invalid(
                name,
                format!(
                    "the total degree {} of equation {} does not fit in the exponent type",
                    d, i
                ),
            ));
        }
    }

    Ok(())
}

/// Homogenize `p` by multiplying every monomial `x^α` with `z^(d - |α|)`, where
/// `d` is the total degree of `p` and `z` is a new variable at position 0.
///
/// Fails if `d` does not fit in the exponent type.
pub fn homogenize_polynomial<T: NumericalFloatLike + SingleFloat, E: Exponent>(
    p: &MultivariatePolynomial<T, E>,
) -> Result<MultivariatePolynomial<T, E>> {
    check_degrees(std::slice::from_ref(p), "p")?;
    Ok(homogenize_with_variables(
        p,
        homogenizing_variables(p.get_vars_ref()),
    ))
}

// The total degree of `p` must fit in `E`.
fn homogenize_with_variables<T: NumericalFloatLike + SingleFloat, E: Exponent>(
    p: &MultivariatePolynomial<T, E>,
    variables: Arc<Vec<Variable>>,
) -> MultivariatePolynomial<T, E> {
    let d = p.total_degree();

    let mut terms: Vec<(Vec<E>, &T)> = Vec::with_capacity(p.nterms());
    for (i, m) in p.into_iter().enumerate() {
        let mut e = Vec::with_capacity(m.exponents.len() + 1);
        e.push(E::from_u32(d - p.monomial_degree(i)));
        e.extend_from_slice(m.exponents);
        terms.push((e, m.coefficient));
    }

    // the exponent vectors are distinct, so sorting restores the term order
    terms.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut res = MultivariatePolynomial::new(Some(terms.len()), variables);
    for (e, c) in terms {
        res.coefficients.push(c.clone());
        res.exponents.extend_from_slice(&e);
    }
    res
}

/// Remove the variable at position 0 by setting it to 1.
/// A polynomial without variables is returned unchanged.
pub fn dehomogenize_polynomial<T: NumericalFloatLike + SingleFloat, E: Exponent>(
    p: &MultivariatePolynomial<T, E>,
) -> MultivariatePolynomial<T, E> {
    if p.nvars() == 0 {
        return p.clone();
    }

    let variables = Arc::new(p.get_vars_ref()[1..].to_vec());

    let mut terms: Vec<(&[E], &T)> = p
        .into_iter()
        .map(|m| (&m.exponents[1..], m.coefficient))
        .collect();
    terms.sort_by(|a, b| a.0.cmp(b.0));

    let mut res = MultivariatePolynomial::new(Some(terms.len()), variables);
    for (e, c) in terms {
        res.append_monomial(c.clone(), e);
    }
    res
}

/// Homogenize every polynomial of a system with the same new variable.
///
/// Fails if a total degree does not fit in the exponent type.
pub fn homogenize_system<T: NumericalFloatLike + SingleFloat, E: Exponent>(
    system: &[MultivariatePolynomial<T, E>],
) -> Result<Vec<MultivariatePolynomial<T, E>>> {
    check_degrees(system, "system")?;
    Ok(homogenize_checked_system(system))
}

/// Homogenize a system whose total degrees were validated with [check_degrees].
pub(crate) fn homogenize_checked_system<T: NumericalFloatLike + SingleFloat, E: Exponent>(
    system: &[MultivariatePolynomial<T, E>],
) -> Vec<MultivariatePolynomial<T, E>> {
    let Some(first) = system.first() else {
        return vec![];
    };

    let variables = homogenizing_variables(first.get_vars_ref());
    system
        .iter()
        .map(|p| {
            if p.get_vars_ref() == &variables[1..] {
                homogenize_with_variables(p, variables.clone())
            } else {
                homogenize_with_variables(p, homogenizing_variables(p.get_vars_ref()))
            }
        })
        .collect()
}

/// Dehomogenize every polynomial of a system.
pub fn dehomogenize_system<T: NumericalFloatLike + SingleFloat, E: Exponent>(
    system: &[MultivariatePolynomial<T, E>],
) -> Vec<MultivariatePolynomial<T, E>> {
    system.iter().map(dehomogenize_polynomial).collect()
}

/// Check whether every polynomial of the system is homogeneous.
pub fn is_homogeneous_system<T: NumericalFloatLike + SingleFloat, E: Exponent>(
    system: &[MultivariatePolynomial<T, E>],
) -> bool {
    system.iter().all(|p| p.is_homogeneous())
}
