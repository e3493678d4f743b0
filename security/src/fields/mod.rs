//! Finite fields whose parameters are only known at runtime.
//!
//! Curve parameters under evaluation are user input, so the fields they live
//! in cannot be fixed at compile time the way `ark_ff` fields are. The
//! [`FiniteField`] trait is a field *context*: elements are plain values and
//! every operation goes through the context that knows the moduli.
use ark_std::{fmt::Debug, hash::Hash, rand::Rng, vec::Vec};
use num_bigint::BigUint;
use num_traits::{One, Zero};

mod ark;
mod hom;
mod tower;

pub use ark::ArkField;
pub use hom::FieldHom;
pub use tower::{ExtensionLevel, TowerField};

/// The interface for a finite field context.
pub trait FiniteField: Clone + Debug + PartialEq + Eq + Send + Sync {
    /// The type of the field elements.
    type Elem: Clone + Debug + PartialEq + Eq + Hash + Send + Sync;

    /// The characteristic `p` of the field.
    fn characteristic(&self) -> BigUint;

    /// The degree of the field over its prime subfield.
    fn degree(&self) -> usize;

    /// The number of elements, `p^degree`.
    fn order(&self) -> BigUint {
        ark_std::iter::repeat(self.characteristic())
            .take(self.degree())
            .fold(BigUint::one(), |acc, p| acc * p)
    }

    /// Whether `self` is a prime field.
    fn is_prime_field(&self) -> bool {
        self.degree() == 1
    }

    /// Whether the coordinates of an element are taken with respect to the
    /// powers of [`Self::gen`].
    fn has_power_basis(&self) -> bool;

    /// The additive identity.
    fn zero(&self) -> Self::Elem;

    /// The multiplicative identity.
    fn one(&self) -> Self::Elem;

    /// The generator of `self` over the field it was built on. For a prime
    /// field this is `1`.
    fn gen(&self) -> Self::Elem;

    /// The image of an integer in the prime subfield.
    fn from_biguint(&self, n: &BigUint) -> Self::Elem;

    /// The image of a signed integer in the prime subfield.
    fn from_i64(&self, n: i64) -> Self::Elem {
        let abs = self.from_biguint(&BigUint::from(n.unsigned_abs()));
        if n < 0 {
            self.neg(&abs)
        } else {
            abs
        }
    }

    /// Returns `a + b`.
    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Returns `a - b`.
    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Returns `-a`.
    fn neg(&self, a: &Self::Elem) -> Self::Elem;

    /// Returns `a * b`.
    fn mul(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Returns `a^{-1}`, or `None` if `a` is zero.
    fn inverse(&self, a: &Self::Elem) -> Option<Self::Elem>;

    /// Returns `a^2`.
    fn square(&self, a: &Self::Elem) -> Self::Elem {
        self.mul(a, a)
    }

    /// Returns `a^exp` by left-to-right square-and-multiply.
    fn pow(&self, a: &Self::Elem, exp: &BigUint) -> Self::Elem {
        let mut res = self.one();
        for i in (0..exp.bits()).rev() {
            res = self.square(&res);
            if exp.bit(i) {
                res = self.mul(&res, a);
            }
        }
        res
    }

    /// Checks if `a` is zero.
    fn is_zero(&self, a: &Self::Elem) -> bool {
        *a == self.zero()
    }

    /// Checks if `a` is one.
    fn is_one(&self, a: &Self::Elem) -> bool {
        *a == self.one()
    }

    /// The coordinates of `a` over the prime subfield, `degree()` of them.
    fn coordinates(&self, a: &Self::Elem) -> Vec<BigUint>;

    /// The element with the given coordinates over the prime subfield.
    fn from_coordinates(&self, coords: &[BigUint]) -> Self::Elem;

    /// The `index`-th element in a fixed enumeration of the field, for
    /// `index < order()`.
    fn element_at(&self, index: &BigUint) -> Self::Elem {
        let p = self.characteristic();
        let mut rest = index.clone();
        let coords = (0..self.degree())
            .map(|_| {
                let c = &rest % &p;
                rest /= &p;
                c
            })
            .collect::<Vec<_>>();
        self.from_coordinates(&coords)
    }

    /// Samples an element.
    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Elem {
        let p = self.characteristic();
        let coords = (0..self.degree())
            .map(|_| random_below(rng, &p))
            .collect::<Vec<_>>();
        self.from_coordinates(&coords)
    }
}

/// Samples an integer in `[0, bound)`. The bias is at most `2^-64`.
pub(crate) fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
    if bound.is_zero() {
        return BigUint::zero();
    }
    let mut bytes = vec![0u8; (bound.bits() as usize + 7) / 8 + 8];
    rng.fill_bytes(&mut bytes);
    BigUint::from_bytes_le(&bytes) % bound
}
