use ark_std::vec::Vec;
use num_traits::Zero;

use super::FiniteField;
use crate::utils::{error::SecurityError, Result};

/// A ring homomorphism between two finite fields of the same characteristic.
///
/// Field homomorphisms fix the prime subfield, so they are `F_p`-linear and
/// are stored as the images of the coordinate basis of the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldHom<S: FiniteField, T: FiniteField> {
    source: S,
    target: T,
    images: Vec<T::Elem>,
}

impl<F: FiniteField> FieldHom<F, F> {
    /// The identity map on `field`.
    pub fn identity(field: &F) -> Self {
        let images = (0..field.degree())
            .map(|i| {
                let mut coords = vec![num_bigint::BigUint::zero(); field.degree()];
                coords[i] = 1u8.into();
                field.from_coordinates(&coords)
            })
            .collect();
        Self {
            source: field.clone(),
            target: field.clone(),
            images,
        }
    }
}

impl<S: FiniteField, T: FiniteField> FieldHom<S, T> {
    /// Builds a map from the images of the coordinate basis of `source`.
    pub fn from_basis_images(source: &S, target: &T, images: Vec<T::Elem>) -> Result<Self> {
        if images.len() != source.degree() || source.characteristic() != target.characteristic() {
            return Err(SecurityError::FieldMismatch);
        }
        Ok(Self {
            source: source.clone(),
            target: target.clone(),
            images,
        })
    }

    /// Builds the map sending the generator of `source` to `image`.
    ///
    /// `source` must have a power basis, and `image` must be a root in
    /// `target` of the minimal polynomial of that generator; otherwise the
    /// result is linear but not multiplicative.
    pub fn from_generator(source: &S, target: &T, image: &T::Elem) -> Result<Self> {
        if !source.has_power_basis() {
            return Err(SecurityError::FieldMismatch);
        }
        let mut power = target.one();
        let images = (0..source.degree())
            .map(|_| {
                let current = power.clone();
                power = target.mul(&power, image);
                current
            })
            .collect();
        Self::from_basis_images(source, target, images)
    }

    /// The domain.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The codomain.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The images of the coordinate basis of the domain.
    pub fn images(&self) -> &[T::Elem] {
        &self.images
    }

    /// Applies the map to `x`.
    pub fn apply(&self, x: &S::Elem) -> T::Elem {
        self.source
            .coordinates(x)
            .iter()
            .zip(&self.images)
            .filter(|(c, _)| !c.is_zero())
            .fold(self.target.zero(), |acc, (c, image)| {
                let term = self.target.mul(&self.target.from_biguint(c), image);
                self.target.add(&acc, &term)
            })
    }
}
