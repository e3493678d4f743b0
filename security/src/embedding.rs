//! Embedding degree of a prime-order subgroup.
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{
    backend::{AlgebraBackend, Factorization},
    utils::{error::SecurityError, Result},
};

/// Returns the embedding degree of a subgroup of prime order `r` of a curve
/// over a field with `p` elements: the multiplicative order of `p` modulo `r`.
///
/// Starting from `d = r - 1`, every prime factor `f` of `r - 1` is divided out
/// of `d` for as long as `p^{d/f} = 1 mod r` still holds. The factorization of
/// `r - 1` is computed with `backend` unless it is supplied, which is the
/// expensive part for cryptographic sizes.
#[tracing::instrument(target = "curve_security", level = "debug", skip_all, fields(r_bits = r.bits()))]
pub fn embedding_degree<B: AlgebraBackend>(
    backend: &B,
    p: &BigUint,
    r: &BigUint,
    r_minus_one_factors: Option<&Factorization>,
) -> Result<BigUint> {
    if *r < BigUint::from(2u8) {
        return Err(SecurityError::InvalidSubgroupOrder);
    }
    if !p.gcd(r).is_one() {
        return Err(SecurityError::NotCoprime);
    }
    let u = p % r;
    let mut d = r - 1u8;
    let computed;
    let factors = match r_minus_one_factors {
        Some(f) => f,
        None => {
            computed = backend.factor(&d);
            &computed
        },
    };
    for f in factors.primes() {
        while (&d % f).is_zero() {
            let reduced = &d / f;
            if !u.modpow(&reduced, r).is_one() {
                break;
            }
            d = reduced;
        }
    }
    tracing::debug!(target: "curve_security", "embedding degree has {} bits", d.bits());
    Ok(d)
}
