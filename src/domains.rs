//! Defines the numerical domains in which homotopies are evaluated.
//!
//! The real component type of a homotopy is any [FixedFloat](float::FixedFloat), such as `f64` or `f32`.
//! Coefficients, evaluation points and results are [Complex](float::Complex) numbers over that type.
//! For example:
//! - A homotopy with real type `f64` evaluates in `Complex<f64>`.
//! - A homotopy with real type `f32` evaluates in `Complex<f32>`.
//!
//! Systems with real coefficients are promoted to complex coefficients once, when the
//! homotopy is constructed, see [promote_system](crate::homotopy::promote_system).
pub mod float;
