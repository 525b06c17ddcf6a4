use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// The number of equations and variables of a polynomial system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemShape {
    pub nequations: usize,
    pub nvariables: usize,
}

impl Display for SystemShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} equations in {} variables",
            self.nequations, self.nvariables
        )
    }
}

/// Common result type used across this crate.
pub type Result<T, E = HomotopyError> = core::result::Result<T, E>;

/// Contract violations detected while building or evaluating a homotopy.
///
/// All errors are raised before any caller-owned buffer is written to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HomotopyError {
    #[error("start system has {start} but target system has {target}")]
    ShapeMismatch {
        start: SystemShape,
        target: SystemShape,
    },
    #[error("{what} has length {found} but expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl HomotopyError {
    /// Check that `found == expected`, reporting `what` otherwise.
    #[inline]
    pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(HomotopyError::DimensionMismatch {
                what,
                expected,
                found,
            })
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> HomotopyError {
        HomotopyError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
