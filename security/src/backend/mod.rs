//! The algebraic capabilities the security checks rely on.
//!
//! Everything that would be a method call on a computer-algebra object
//! (factoring an integer, finding the roots of a polynomial, counting the
//! points of a curve) goes through [`AlgebraBackend`], so that the checks
//! themselves only depend on this interface.
use ark_std::{
    rand::{rngs::StdRng, SeedableRng},
    vec::Vec,
};
use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::{
    curve::WeierstrassCurve,
    fields::FiniteField,
    poly::DensePolynomial,
    utils::{error::SecurityError, Result},
};

pub mod factor;

pub use factor::Factorization;

/// The operations the security checks need from an algebra library.
pub trait AlgebraBackend: Sync {
    /// The prime factorization of `n`. This may be arbitrarily slow.
    fn factor(&self, n: &BigUint) -> Factorization;

    /// Whether `n` is (probably) prime.
    fn is_probable_prime(&self, n: &BigUint) -> bool;

    /// The distinct roots of `polynomial` in its coefficient field.
    fn roots<F: FiniteField>(&self, polynomial: &DensePolynomial<F>) -> Vec<F::Elem>;

    /// The number of points of `curve`, including the point at infinity.
    fn count_points<F: FiniteField>(&self, curve: &WeierstrassCurve<F>) -> Result<BigUint>;

    /// The rank of the 2-torsion subgroup of `curve`: 0, 1 or 2.
    fn two_torsion_rank<F: FiniteField>(&self, curve: &WeierstrassCurve<F>) -> Result<usize>;
}

/// A self-contained backend built on `num-bigint`.
///
/// Root finding is randomized; every call reseeds from `seed`, so results
/// are reproducible. Point counting enumerates the field and refuses fields
/// with more than `point_count_limit` elements; for cryptographic sizes the
/// point count must be supplied by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NativeBackend {
    /// Seed for the randomized root finding.
    pub seed: u64,
    /// The largest field order for which points are counted by enumeration.
    pub point_count_limit: u64,
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self {
            seed: 0,
            point_count_limit: 1 << 20,
        }
    }
}

impl NativeBackend {
    fn odd_characteristic<F: FiniteField>(curve: &WeierstrassCurve<F>) -> Result<()> {
        if curve.characteristic().bit(0) {
            Ok(())
        } else {
            Err(SecurityError::UnsupportedCharacteristic)
        }
    }
}

impl AlgebraBackend for NativeBackend {
    #[tracing::instrument(target = "curve_security", level = "debug", skip(self, n), fields(bits = n.bits()))]
    fn factor(&self, n: &BigUint) -> Factorization {
        factor::factor(n)
    }

    fn is_probable_prime(&self, n: &BigUint) -> bool {
        factor::is_probable_prime(n)
    }

    fn roots<F: FiniteField>(&self, polynomial: &DensePolynomial<F>) -> Vec<F::Elem> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        polynomial.roots(&mut rng)
    }

    fn count_points<F: FiniteField>(&self, curve: &WeierstrassCurve<F>) -> Result<BigUint> {
        Self::odd_characteristic(curve)?;
        let field = curve.base_field();
        let order = field
            .order()
            .to_u64()
            .filter(|q| *q <= self.point_count_limit)
            .ok_or(SecurityError::FieldTooLarge)?;
        let half = (field.order() - 1u8) >> 1u8;
        let f = curve.polynomial();
        // 1 + sum_x (1 + chi(f(x)))
        let mut count = 1u64;
        for i in 0..order {
            let y2 = f.evaluate(&field.element_at(&BigUint::from(i)));
            if field.is_zero(&y2) {
                count += 1;
            } else if field.is_one(&field.pow(&y2, &half)) {
                count += 2;
            }
        }
        Ok(BigUint::from(count))
    }

    fn two_torsion_rank<F: FiniteField>(&self, curve: &WeierstrassCurve<F>) -> Result<usize> {
        Self::odd_characteristic(curve)?;
        // the 2-torsion points are (r, 0) for the roots r of f
        Ok(match self.roots(curve.polynomial()).len() {
            0 => 0,
            1 => 1,
            _ => 2,
        })
    }
}
