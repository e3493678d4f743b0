//! Pollard-Rho and embedding-degree estimates for a curve and its twist.
//!
//! All functions take the order `p` of the field the curve is defined over and
//! the curve order `q`, and return raw metrics. Deciding whether the metrics
//! are good enough is left to the caller, see [`crate::report`].
use num_bigint::BigUint;

use crate::{
    backend::{AlgebraBackend, Factorization},
    embedding::embedding_degree,
    params::PI_4,
    utils::{error::SecurityError, log2, Result},
};

/// Precomputed values that spare a factorization.
///
/// Hints are trusted as given; they only ever make an evaluation faster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactorHints {
    /// The largest prime factor of the group order.
    pub main_factor: Option<BigUint>,
    /// The factorization of `main_factor - 1`.
    pub main_factor_minus_one_factors: Option<Factorization>,
}

/// The order `2(p + 1) - q` of the quadratic twist.
pub fn twist_order(p: &BigUint, q: &BigUint) -> Result<BigUint> {
    let bound = (p + 1u8) << 1u8;
    if *q >= bound {
        return Err(SecurityError::InvalidCurveOrder);
    }
    Ok(bound - q)
}

/// `log_4(π/4 · r)`: the expected Pollard-Rho cost in a group of order `r`.
fn rho_cost(r: &BigUint) -> f64 {
    (PI_4.log2() + log2(r)) / 2.0
}

fn main_factor<B: AlgebraBackend>(
    backend: &B,
    order: &BigUint,
    hint: Option<&BigUint>,
) -> Result<BigUint> {
    if let Some(r) = hint {
        return Ok(r.clone());
    }
    let factors = backend.factor(order);
    tracing::debug!(target: "curve_security", "group order factors as {}", factors);
    factors
        .largest_prime()
        .cloned()
        .ok_or(SecurityError::InvalidCurveOrder)
}

/// Returns the Pollard-Rho cost against the main subgroup of a curve of order
/// `q`, and the embedding degree of that subgroup.
#[tracing::instrument(target = "curve_security", skip_all, fields(q_bits = q.bits()))]
pub fn curve_security<B: AlgebraBackend>(
    backend: &B,
    p: &BigUint,
    q: &BigUint,
    hints: &FactorHints,
) -> Result<(f64, BigUint)> {
    let r = main_factor(backend, q, hints.main_factor.as_ref())?;
    let rho = rho_cost(&r);
    tracing::debug!(target: "curve_security", "main subgroup has {} bits, rho cost {:.2}", r.bits(), rho);
    let degree = embedding_degree(backend, p, &r, hints.main_factor_minus_one_factors.as_ref())?;
    Ok((rho, degree))
}

/// [`curve_security`] for the quadratic twist. The hints refer to the twist order.
pub fn twist_security<B: AlgebraBackend>(
    backend: &B,
    p: &BigUint,
    q: &BigUint,
    hints: &FactorHints,
) -> Result<(f64, BigUint)> {
    curve_security(backend, p, &twist_order(p, q)?, hints)
}

/// The Pollard-Rho half of [`twist_security`], skipping the embedding degree.
pub fn twist_security_ignore_embedding_degree<B: AlgebraBackend>(
    backend: &B,
    p: &BigUint,
    q: &BigUint,
    twist_main_factor: Option<&BigUint>,
) -> Result<f64> {
    let r = main_factor(backend, &twist_order(p, q)?, twist_main_factor)?;
    Ok(rho_cost(&r))
}
