use ark_ff::{BigInteger, PrimeField, UniformRand};
use ark_std::{fmt, marker::PhantomData, rand::Rng, vec::Vec};
use num_bigint::BigUint;

use super::FiniteField;

/// Exposes a compile-time `ark_ff` prime field through [`FiniteField`].
pub struct ArkField<F: PrimeField>(PhantomData<F>);

impl<F: PrimeField> ArkField<F> {
    /// Creates the field context.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<F: PrimeField> Default for ArkField<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> Clone for ArkField<F> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<F: PrimeField> PartialEq for ArkField<F> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<F: PrimeField> Eq for ArkField<F> {}

impl<F: PrimeField> fmt::Debug for ArkField<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArkField(p = {})", self.characteristic())
    }
}

impl<F: PrimeField> FiniteField for ArkField<F> {
    type Elem = F;

    fn characteristic(&self) -> BigUint {
        BigUint::from_bytes_le(&F::MODULUS.to_bytes_le())
    }

    fn degree(&self) -> usize {
        1
    }

    fn has_power_basis(&self) -> bool {
        true
    }

    fn zero(&self) -> F {
        F::ZERO
    }

    fn one(&self) -> F {
        F::ONE
    }

    fn gen(&self) -> F {
        F::ONE
    }

    fn from_biguint(&self, n: &BigUint) -> F {
        F::from_le_bytes_mod_order(&n.to_bytes_le())
    }

    fn add(&self, a: &F, b: &F) -> F {
        *a + b
    }

    fn sub(&self, a: &F, b: &F) -> F {
        *a - b
    }

    fn neg(&self, a: &F) -> F {
        -*a
    }

    fn mul(&self, a: &F, b: &F) -> F {
        *a * b
    }

    fn inverse(&self, a: &F) -> Option<F> {
        ark_ff::Field::inverse(a)
    }

    fn square(&self, a: &F) -> F {
        ark_ff::Field::square(a)
    }

    fn pow(&self, a: &F, exp: &BigUint) -> F {
        ark_ff::Field::pow(a, exp.to_u64_digits())
    }

    fn coordinates(&self, a: &F) -> Vec<BigUint> {
        vec![BigUint::from_bytes_le(&a.into_bigint().to_bytes_le())]
    }

    fn from_coordinates(&self, coords: &[BigUint]) -> F {
        coords.first().map_or(F::ZERO, |c| self.from_biguint(c))
    }

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> F {
        F::rand(rng)
    }
}
