//! Security checks for pairing-friendly elliptic curve parameters.
//!
//! Given the characteristic `p`, the curve order `q = h * r` and the defining
//! polynomial `f` of a curve `y^2 = f(x)` over an extension of `F_p`, this
//! crate estimates the cost of the attacks a curve designer has to rule out:
//!
//! - Pollard-Rho on the main subgroup of the curve and of its quadratic twist
//!   ([`estimate`]);
//! - MOV-style reductions, via the embedding degree ([`embedding`]);
//! - genus 2 and genus 3 cover attacks and the GHS attack, which only apply
//!   to curves over extension fields ([`extension`]).
//!
//! [`report::SecurityReport`] runs every check against [`params`] thresholds.
//!
//! Computer-algebra capabilities (factoring, root finding, point counting) are
//! accessed through [`backend::AlgebraBackend`]; [`backend::NativeBackend`] is
//! a self-contained implementation over the runtime finite fields of
//! [`fields`]. Curves over towers of extensions can be moved to a single
//! minimal polynomial with [`canonical::make_finite_field`].
//!
//! # Example
//!
//! ```
//! use ark_curve_security::{backend::NativeBackend, estimate::{curve_security, FactorHints}};
//! use num_bigint::BigUint;
//!
//! let backend = NativeBackend::default();
//! let (rho, degree) = curve_security(
//!     &backend,
//!     &BigUint::from(1_000_003u32),
//!     &BigUint::from(999_093u32),
//!     &FactorHints::default(),
//! )
//! .unwrap();
//! assert!(rho < 10.0);
//! assert_eq!(degree, BigUint::from(9795u32));
//! ```
#![warn(
    unused,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_docs
)]
#![deny(unsafe_code)]

/// Integer factorization and the algebra backend interface.
pub mod backend;

/// Flattening of towers of finite fields.
pub mod canonical;

/// Elliptic curves in Weierstrass form.
pub mod curve;

/// The embedding degree engine.
pub mod embedding;

/// Curve and twist security estimates.
pub mod estimate;

/// Extension-specific attack predicates.
pub mod extension;

/// Runtime finite fields.
pub mod fields;

/// Security thresholds.
pub mod params;

/// Polynomials over runtime finite fields.
pub mod poly;

/// Full evaluation of curve parameters.
pub mod report;

/// Utility types and functions.
pub mod utils;

#[cfg(test)]
mod tests;

pub use backend::{AlgebraBackend, Factorization, NativeBackend};
pub use report::{CurveParameters, SecurityReport};
pub use utils::error::SecurityError;
