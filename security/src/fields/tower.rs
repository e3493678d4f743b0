use ark_std::{fmt, sync::Arc, vec::Vec};
use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::FiniteField;
use crate::{
    poly::DensePolynomial,
    utils::{error::SecurityError, Result},
};

/// One step `K_i = K_{i-1}[y_i] / (m_i(y_i))` of a tower of extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionLevel {
    /// The coefficients of the monic modulus `m_i`, lowest degree first and
    /// without the leading one. Each coefficient is an element of `K_{i-1}`.
    modulus: Vec<Vec<BigUint>>,
    /// The degree of `K_i` over the prime field.
    absolute_degree: usize,
}

impl ExtensionLevel {
    /// The degree of this level over the previous one.
    pub fn relative_degree(&self) -> usize {
        self.modulus.len()
    }

    /// The degree of this level over the prime field.
    pub fn absolute_degree(&self) -> usize {
        self.absolute_degree
    }
}

#[derive(PartialEq, Eq)]
struct Tower {
    characteristic: BigUint,
    levels: Vec<ExtensionLevel>,
}

/// A finite field built as a chain of extensions over `F_p`.
///
/// The tower is stored as a flat list of levels, level `i` holding a modulus
/// over level `i - 1`; the prime field is level 0. An element of level `i` is
/// the vector of its coordinates over `F_p`, laid out as `relative_degree`
/// consecutive chunks, each chunk being a level `i - 1` coefficient.
///
/// A field with at most one level is *flat*: it is `F_p[z]/(m(z))` for a
/// single minimal polynomial `m` over the prime field.
#[derive(Clone)]
pub struct TowerField {
    inner: Arc<Tower>,
}

impl PartialEq for TowerField {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for TowerField {}

impl fmt::Debug for TowerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TowerField(p = {}", self.inner.characteristic)?;
        for level in self.levels() {
            write!(f, ", [{}]", level.relative_degree())?;
        }
        write!(f, ")")
    }
}

impl TowerField {
    /// The prime field `F_p`. The caller is responsible for `p` being prime.
    pub fn prime(p: BigUint) -> Self {
        Self {
            inner: Arc::new(Tower {
                characteristic: p,
                levels: Vec::new(),
            }),
        }
    }

    /// The number of extension levels above the prime field.
    pub fn num_levels(&self) -> usize {
        self.inner.levels.len()
    }

    /// The extension levels, bottom first.
    pub fn levels(&self) -> &[ExtensionLevel] {
        &self.inner.levels
    }

    /// Whether the base ring of `self` is the prime field.
    pub fn is_flat(&self) -> bool {
        self.num_levels() <= 1
    }

    /// The field `self` was built on. The prime field is its own base field.
    pub fn base_field(&self) -> Self {
        self.truncate(self.num_levels().saturating_sub(1))
    }

    /// The prime subfield.
    pub fn prime_field(&self) -> Self {
        self.truncate(0)
    }

    /// The sub-tower made of the first `num_levels` levels.
    pub fn truncate(&self, num_levels: usize) -> Self {
        if num_levels >= self.num_levels() {
            return self.clone();
        }
        Self {
            inner: Arc::new(Tower {
                characteristic: self.inner.characteristic.clone(),
                levels: self.inner.levels[..num_levels].to_vec(),
            }),
        }
    }

    /// The modulus of the top level, as a polynomial over [`Self::base_field`].
    /// For the prime field this is `x - 1`, matching `gen() == 1`.
    pub fn modulus(&self) -> DensePolynomial<TowerField> {
        let base = self.base_field();
        match self.inner.levels.last() {
            Some(level) => {
                let mut coeffs = level.modulus.clone();
                coeffs.push(base.one());
                DensePolynomial::from_coefficients_vec(&base, coeffs)
            },
            None => {
                DensePolynomial::from_coefficients_vec(&base, vec![base.from_i64(-1), base.one()])
            },
        }
    }

    /// Builds `self[y] / (modulus(y))`.
    ///
    /// The modulus must be a monic irreducible polynomial over `self` of
    /// positive degree.
    pub fn extend(&self, modulus: &DensePolynomial<TowerField>) -> Result<TowerField> {
        if modulus.field() != self {
            return Err(SecurityError::FieldMismatch);
        }
        if modulus.degree() == 0 || !modulus.is_monic() {
            return Err(SecurityError::InvalidModulus);
        }
        if !modulus.is_irreducible() {
            return Err(SecurityError::ReducibleModulus);
        }
        let coeffs = modulus.coeffs();
        let level = ExtensionLevel {
            modulus: coeffs[..coeffs.len() - 1].to_vec(),
            absolute_degree: self.degree() * modulus.degree(),
        };
        let mut levels = self.inner.levels.clone();
        levels.push(level);
        tracing::debug!(
            target: "curve_security",
            "extended tower to {} levels, absolute degree {}",
            levels.len(),
            self.degree() * modulus.degree()
        );
        Ok(Self {
            inner: Arc::new(Tower {
                characteristic: self.inner.characteristic.clone(),
                levels,
            }),
        })
    }

    /// Embeds an element of [`Self::base_field`] into `self`.
    pub fn embed_base(&self, a: &[BigUint]) -> Vec<BigUint> {
        let mut res = a.to_vec();
        res.resize(self.degree(), BigUint::zero());
        res
    }

    fn absolute_degree_at(&self, level: usize) -> usize {
        match level {
            0 => 1,
            l => self.levels()[l - 1].absolute_degree(),
        }
    }

    fn add_assign(&self, a: &mut [BigUint], b: &[BigUint]) {
        let p = &self.inner.characteristic;
        for (x, y) in a.iter_mut().zip(b) {
            *x += y;
            if *x >= *p {
                *x -= p;
            }
        }
    }

    fn sub_assign(&self, a: &mut [BigUint], b: &[BigUint]) {
        let p = &self.inner.characteristic;
        for (x, y) in a.iter_mut().zip(b) {
            if *x < *y {
                *x += p;
            }
            *x -= y;
        }
    }

    /// Schoolbook multiplication at `level`, followed by reduction by the
    /// level modulus.
    fn mul_at(&self, level: usize, a: &[BigUint], b: &[BigUint]) -> Vec<BigUint> {
        if level == 0 {
            return vec![(&a[0] * &b[0]) % &self.inner.characteristic];
        }
        let ext = &self.inner.levels[level - 1];
        let n = ext.relative_degree();
        let d = self.absolute_degree_at(level - 1);
        let mut prod = vec![vec![BigUint::zero(); d]; 2 * n - 1];
        for (i, ai) in a.chunks(d).enumerate() {
            if ai.iter().all(Zero::is_zero) {
                continue;
            }
            for (j, bj) in b.chunks(d).enumerate() {
                let t = self.mul_at(level - 1, ai, bj);
                self.add_assign(&mut prod[i + j], &t);
            }
        }
        // y^n = -(m_0 + m_1 y + ... + m_{n-1} y^{n-1})
        for k in (n..2 * n - 1).rev() {
            let top = ark_std::mem::replace(&mut prod[k], vec![BigUint::zero(); d]);
            if top.iter().all(Zero::is_zero) {
                continue;
            }
            for (t, m) in ext.modulus.iter().enumerate() {
                let c = self.mul_at(level - 1, &top, m);
                self.sub_assign(&mut prod[k - n + t], &c);
            }
        }
        prod.truncate(n);
        prod.into_iter().flatten().collect()
    }
}

impl FiniteField for TowerField {
    type Elem = Vec<BigUint>;

    fn characteristic(&self) -> BigUint {
        self.inner.characteristic.clone()
    }

    fn degree(&self) -> usize {
        self.absolute_degree_at(self.num_levels())
    }

    fn has_power_basis(&self) -> bool {
        self.is_flat()
    }

    fn zero(&self) -> Self::Elem {
        vec![BigUint::zero(); self.degree()]
    }

    fn one(&self) -> Self::Elem {
        self.from_biguint(&BigUint::one())
    }

    fn gen(&self) -> Self::Elem {
        let levels = self.num_levels();
        if levels == 0 {
            return self.one();
        }
        let mut res = self.zero();
        res[self.absolute_degree_at(levels - 1)] = BigUint::one();
        res
    }

    fn from_biguint(&self, n: &BigUint) -> Self::Elem {
        let mut res = self.zero();
        res[0] = n % &self.inner.characteristic;
        res
    }

    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
        let mut res = a.clone();
        self.add_assign(&mut res, b);
        res
    }

    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
        let mut res = a.clone();
        self.sub_assign(&mut res, b);
        res
    }

    fn neg(&self, a: &Self::Elem) -> Self::Elem {
        self.sub(&self.zero(), a)
    }

    fn mul(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
        self.mul_at(self.num_levels(), a, b)
    }

    fn inverse(&self, a: &Self::Elem) -> Option<Self::Elem> {
        if self.is_zero(a) {
            return None;
        }
        let exp = self.order() - 2u8;
        Some(self.pow(a, &exp))
    }

    fn is_zero(&self, a: &Self::Elem) -> bool {
        a.iter().all(Zero::is_zero)
    }

    fn coordinates(&self, a: &Self::Elem) -> Vec<BigUint> {
        a.clone()
    }

    fn from_coordinates(&self, coords: &[BigUint]) -> Self::Elem {
        let p = &self.inner.characteristic;
        let mut res = coords.iter().map(|c| c % p).collect::<Vec<_>>();
        res.resize(self.degree(), BigUint::zero());
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::test_rng;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    /// `F_7[u]/(u^2 + 1)`, then `[v]/(v^3 - u - 1)`.
    fn tower_7_2_3() -> TowerField {
        let fp = TowerField::prime(big(7));
        let f2 = fp
            .extend(&DensePolynomial::from_coefficients_vec(
                &fp,
                vec![fp.one(), fp.zero(), fp.one()],
            ))
            .unwrap();
        let u = f2.add(&f2.gen(), &f2.one());
        let m = DensePolynomial::from_coefficients_vec(
            &f2,
            vec![f2.neg(&u), f2.zero(), f2.zero(), f2.one()],
        );
        f2.extend(&m).unwrap()
    }

    #[test]
    fn prime_field_arithmetic() {
        let f = TowerField::prime(big(13));
        assert_eq!(f.degree(), 1);
        assert!(f.is_flat());
        let a = f.from_i64(-3);
        assert_eq!(a, vec![big(10)]);
        assert_eq!(f.mul(&a, &f.from_i64(4)), vec![big(1)]);
        assert_eq!(f.inverse(&a).unwrap(), vec![big(4)]);
        assert!(f.inverse(&f.zero()).is_none());
        assert_eq!(f.gen(), f.one());
    }

    #[test]
    fn quadratic_extension() {
        let fp = TowerField::prime(big(7));
        let f = fp
            .extend(&DensePolynomial::from_coefficients_vec(
                &fp,
                vec![fp.one(), fp.zero(), fp.one()],
            ))
            .unwrap();
        assert_eq!(f.order(), big(49));
        let i = f.gen();
        assert_eq!(f.square(&i), f.from_i64(-1));
        assert_eq!(f.pow(&i, &big(4)), f.one());
    }

    #[test]
    fn reducible_modulus_is_rejected() {
        let fp = TowerField::prime(big(5));
        // x^2 + 1 = (x - 2)(x + 2) over F_5
        let m = DensePolynomial::from_coefficients_vec(&fp, vec![fp.one(), fp.zero(), fp.one()]);
        assert_eq!(fp.extend(&m), Err(SecurityError::ReducibleModulus));
        let m = DensePolynomial::from_coefficients_vec(&fp, vec![fp.one(), fp.from_i64(2)]);
        assert_eq!(fp.extend(&m), Err(SecurityError::InvalidModulus));
    }

    #[test]
    fn tower_field_axioms() {
        let f = tower_7_2_3();
        assert_eq!(f.num_levels(), 2);
        assert_eq!(f.degree(), 6);
        assert_eq!(f.order(), big(117_649));
        assert!(!f.is_flat());
        let degrees: Vec<_> = f
            .levels()
            .iter()
            .map(|l| (l.relative_degree(), l.absolute_degree()))
            .collect();
        assert_eq!(degrees, vec![(2, 2), (3, 6)]);
        assert_eq!(format!("{:?}", f), "TowerField(p = 7, [2], [3])");

        let v = f.gen();
        let base = f.base_field();
        let u = f.embed_base(&base.add(&base.gen(), &base.one()));
        assert_eq!(f.pow(&v, &big(3)), u);
        // 1 + u has order 48 in F_49
        assert_eq!(f.pow(&v, &big(144)), f.one());
        assert_ne!(f.pow(&v, &big(48)), f.one());

        let rng = &mut test_rng();
        for _ in 0..20 {
            let a = f.random(rng);
            let b = f.random(rng);
            let c = f.random(rng);
            assert_eq!(f.mul(&a, &b), f.mul(&b, &a));
            assert_eq!(
                f.mul(&a, &f.add(&b, &c)),
                f.add(&f.mul(&a, &b), &f.mul(&a, &c))
            );
            assert_eq!(f.mul(&f.mul(&a, &b), &c), f.mul(&a, &f.mul(&b, &c)));
            if let Some(inv) = f.inverse(&a) {
                assert_eq!(f.mul(&a, &inv), f.one());
            }
            assert_eq!(f.pow(&a, &f.order()), a);
        }
    }

    #[test]
    fn modulus_round_trips_through_extend() {
        let f = tower_7_2_3();
        let m = f.modulus();
        assert_eq!(m.field(), &f.base_field());
        assert_eq!(m.degree(), 3);
        let rebuilt = f.base_field().extend(&m).unwrap();
        assert_eq!(rebuilt, f);
        assert_eq!(f.truncate(0), f.prime_field());
        assert_eq!(f.prime_field().modulus().degree(), 1);
    }
}
