//! Polynomial homotopies for homotopy continuation.
//!
//! A homotopy `H(x, t)` deforms a start system `S`, whose solutions are known, into a
//! target system `T`, whose solutions are sought. This crate provides fast evaluation
//! of `H`, its Jacobian and its derivative with respect to `t`, homogenization,
//! total degree start systems with a lazy enumeration of their solutions, and random
//! systems for testing.
//!
//! For example:
//!
//! ```
//! use homotopy::homotopy::{
//!     GammaTrickHomotopy, Homotopy, JacobianDiffResult, PolynomialHomotopyConfig,
//! };
//! use homotopy::random::{random_system, RandomSystemOptions};
//! use homotopy::total_degree::total_degree;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256StarStar;
//!
//! let mut rng = Xoshiro256StarStar::seed_from_u64(42);
//! let f = random_system::<f64, _>(3, 3, &RandomSystemOptions::default(), &mut rng).unwrap();
//!
//! let (h, solutions): (GammaTrickHomotopy, _) = total_degree(f, false, &mut rng).unwrap();
//! let mut cfg = PolynomialHomotopyConfig::new(&h);
//! let mut r = JacobianDiffResult::new(&cfg);
//!
//! for x in solutions.iter().take(4) {
//!     h.value_and_jacobian_into(&mut r, &x, 1., &mut cfg).unwrap();
//!     assert!(r.value().iter().all(|v| v.norm() < 1e-10));
//! }
//! ```
pub mod combinatorics;
pub mod domains;
pub mod error;
pub mod homotopy;
pub mod poly;
pub mod random;
pub mod tensors;
pub mod total_degree;

pub use error::{HomotopyError, Result};
