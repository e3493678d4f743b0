use num_bigint::BigUint;

use crate::{
    fields::FiniteField,
    poly::DensePolynomial,
    utils::{error::SecurityError, Result},
};

/// The elliptic curve `y^2 = f(x)` with `f` a cubic over a finite field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeierstrassCurve<F: FiniteField> {
    polynomial: DensePolynomial<F>,
}

impl<F: FiniteField> WeierstrassCurve<F> {
    /// The curve defined by `y^2 = polynomial(x)`. The polynomial must be a
    /// cubic; smoothness is not checked.
    pub fn new(polynomial: DensePolynomial<F>) -> Result<Self> {
        if polynomial.degree() != 3 {
            return Err(SecurityError::InvalidCurve);
        }
        Ok(Self { polynomial })
    }

    /// The curve `y^2 = x^3 + a x + b`.
    pub fn short(field: &F, a: F::Elem, b: F::Elem) -> Self {
        let polynomial =
            DensePolynomial::from_coefficients_vec(field, vec![b, a, field.zero(), field.one()]);
        Self { polynomial }
    }

    /// The defining polynomial `f`.
    pub fn polynomial(&self) -> &DensePolynomial<F> {
        &self.polynomial
    }

    /// The field the curve is defined over.
    pub fn base_field(&self) -> &F {
        self.polynomial.field()
    }

    /// The characteristic of the base field.
    pub fn characteristic(&self) -> BigUint {
        self.base_field().characteristic()
    }
}
