//! Univariate polynomials over runtime finite fields.
use ark_std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
    rand::Rng,
    vec::Vec,
};
use num_bigint::BigUint;

use crate::{
    fields::FiniteField,
    utils::{error::SecurityError, Result},
};

pub mod irreducible;

pub use irreducible::{find_irreducible_poly, IrreducibleSearchOptions};

/// The polynomial ring `F[x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolynomialRing<F: FiniteField> {
    field: F,
}

impl<F: FiniteField> PolynomialRing<F> {
    /// The ring of polynomials over `field`.
    pub fn new(field: F) -> Self {
        Self { field }
    }

    /// The coefficient field.
    pub fn base_ring(&self) -> &F {
        &self.field
    }
}

/// Stores a polynomial in coefficient form, together with its coefficient
/// field.
#[derive(Clone, PartialEq, Eq)]
pub struct DensePolynomial<F: FiniteField> {
    field: F,
    /// The coefficient of `x^i` is stored at location `i` in `self.coeffs`.
    coeffs: Vec<F::Elem>,
}

impl<F: FiniteField> fmt::Debug for DensePolynomial<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, coeff) in self.coeffs.iter().enumerate().filter(|(_, c)| !self.field.is_zero(c)) {
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match i {
                0 => write!(f, "{:?}", coeff)?,
                1 => write!(f, "{:?} * x", coeff)?,
                _ => write!(f, "{:?} * x^{}", coeff, i)?,
            }
        }
        Ok(())
    }
}

impl<F: FiniteField> DensePolynomial<F> {
    /// Returns the zero polynomial.
    pub fn zero(field: &F) -> Self {
        Self {
            field: field.clone(),
            coeffs: Vec::new(),
        }
    }

    /// Returns the constant polynomial `c`.
    pub fn constant(field: &F, c: F::Elem) -> Self {
        Self::from_coefficients_vec(field, vec![c])
    }

    /// Returns `c * x^n`.
    pub fn monomial(field: &F, c: F::Elem, n: usize) -> Self {
        let mut coeffs = vec![field.zero(); n];
        coeffs.push(c);
        Self::from_coefficients_vec(field, coeffs)
    }

    /// Returns `x`.
    pub fn x(field: &F) -> Self {
        Self::monomial(field, field.one(), 1)
    }

    /// Constructs a new polynomial from a list of coefficients.
    pub fn from_coefficients_vec(field: &F, coeffs: Vec<F::Elem>) -> Self {
        let mut result = Self {
            field: field.clone(),
            coeffs,
        };
        result.truncate_leading_zeros();
        result
    }

    fn truncate_leading_zeros(&mut self) {
        while self.coeffs.last().map_or(false, |c| self.field.is_zero(c)) {
            self.coeffs.pop();
        }
    }

    /// The coefficient field.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// The coefficients, lowest degree first, without leading zeros.
    pub fn coeffs(&self) -> &[F::Elem] {
        &self.coeffs
    }

    /// Checks if the given polynomial is zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// The coefficient of the highest power of `x`.
    pub fn leading_coefficient(&self) -> Option<&F::Elem> {
        self.coeffs.last()
    }

    /// Checks if the leading coefficient is one.
    pub fn is_monic(&self) -> bool {
        self.leading_coefficient().map_or(false, |c| self.field.is_one(c))
    }

    /// The number of nonzero coefficients.
    pub fn num_nonzero_coefficients(&self) -> usize {
        self.coeffs.iter().filter(|c| !self.field.is_zero(c)).count()
    }

    /// Evaluates `self` at the given `point`.
    pub fn evaluate(&self, point: &F::Elem) -> F::Elem {
        self.coeffs.iter().rev().fold(self.field.zero(), |acc, c| {
            self.field.add(&self.field.mul(&acc, point), c)
        })
    }

    /// Multiplies every coefficient by `c`.
    pub fn scale(&self, c: &F::Elem) -> Self {
        let coeffs = self.coeffs.iter().map(|a| self.field.mul(a, c)).collect();
        Self::from_coefficients_vec(&self.field, coeffs)
    }

    /// Divides by the leading coefficient. Returns `None` for the zero polynomial.
    pub fn monic(&self) -> Option<Self> {
        let inv = self.field.inverse(self.leading_coefficient()?)?;
        Some(self.scale(&inv))
    }

    /// Applies `f` to every coefficient, producing a polynomial over `target`.
    pub fn map_coefficients<T: FiniteField>(
        &self,
        target: &T,
        f: impl Fn(&F::Elem) -> T::Elem,
    ) -> DensePolynomial<T> {
        DensePolynomial::from_coefficients_vec(target, self.coeffs.iter().map(f).collect())
    }

    /// Euclidean division: returns `(q, r)` with `self = q * divisor + r` and
    /// `deg r < deg divisor`.
    pub fn divide_with_q_and_r(&self, divisor: &Self) -> Result<(Self, Self)> {
        let lead = divisor.leading_coefficient().ok_or(SecurityError::DivisionByZero)?;
        let lead_inv = self.field.inverse(lead).ok_or(SecurityError::DivisionByZero)?;
        if self.coeffs.len() < divisor.coeffs.len() {
            return Ok((Self::zero(&self.field), self.clone()));
        }
        let d = divisor.degree();
        let mut rem = self.coeffs.clone();
        let mut quot = vec![self.field.zero(); rem.len() - d];
        for k in (0..quot.len()).rev() {
            let c = self.field.mul(&rem[k + d], &lead_inv);
            if self.field.is_zero(&c) {
                continue;
            }
            for (j, dc) in divisor.coeffs.iter().enumerate() {
                rem[k + j] = self.field.sub(&rem[k + j], &self.field.mul(&c, dc));
            }
            quot[k] = c;
        }
        rem.truncate(d);
        Ok((
            Self::from_coefficients_vec(&self.field, quot),
            Self::from_coefficients_vec(&self.field, rem),
        ))
    }

    /// Returns `self mod divisor`.
    pub fn rem(&self, divisor: &Self) -> Result<Self> {
        Ok(self.divide_with_q_and_r(divisor)?.1)
    }

    /// The monic greatest common divisor, or zero if both inputs are zero.
    pub fn gcd(a: &Self, b: &Self) -> Self {
        let (mut a, mut b) = (a.clone(), b.clone());
        while !b.is_zero() {
            // `b` is nonzero, so the division cannot fail.
            let r = match a.rem(&b) {
                Ok(r) => r,
                Err(_) => break,
            };
            a = b;
            b = r;
        }
        a.monic().unwrap_or(a)
    }

    /// Returns `self^exp mod modulus`.
    pub fn pow_mod(&self, exp: &BigUint, modulus: &Self) -> Result<Self> {
        let base = self.rem(modulus)?;
        let mut res = Self::constant(&self.field, self.field.one()).rem(modulus)?;
        for i in (0..exp.bits()).rev() {
            res = (&res * &res).rem(modulus)?;
            if exp.bit(i) {
                res = (&res * &base).rem(modulus)?;
            }
        }
        Ok(res)
    }

    /// Rabin's irreducibility test over the coefficient field.
    ///
    /// A polynomial `f` of degree `n` over `F_Q` is irreducible iff
    /// `x^{Q^n} = x mod f` and `gcd(x^{Q^{n/r}} - x, f) = 1` for every prime
    /// `r | n`.
    pub fn is_irreducible(&self) -> bool {
        let n = self.degree();
        if self.is_zero() || n == 0 {
            return false;
        }
        if n == 1 {
            return true;
        }
        let f = match self.monic() {
            Some(f) => f,
            None => return false,
        };
        let q = self.field.order();
        let x = Self::x(&self.field);
        let divisors = prime_divisors(n);
        let mut h = x.clone();
        for i in 1..=n {
            h = match h.pow_mod(&q, &f) {
                Ok(h) => h,
                Err(_) => return false,
            };
            if divisors.iter().any(|r| i * r == n) && Self::gcd(&(&h - &x), &f).degree() != 0 {
                return false;
            }
        }
        (&h - &x).is_zero()
    }

    /// The distinct roots of `self` in its coefficient field.
    ///
    /// Isolates the product of the linear factors as `gcd(f, x^Q - x)` and
    /// splits it with Cantor–Zassenhaus (odd `Q`) or with the trace map
    /// (`Q = 2^m`).
    pub fn roots<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<F::Elem> {
        let f = match self.monic() {
            Some(f) if f.degree() > 0 => f,
            _ => return Vec::new(),
        };
        let q = self.field.order();
        let x = Self::x(&self.field);
        let split = match x.pow_mod(&q, &f) {
            Ok(xq) => Self::gcd(&(&xq - &x), &f),
            Err(_) => return Vec::new(),
        };
        let mut roots = Vec::with_capacity(split.degree());
        let mut pending = vec![split];
        while let Some(g) = pending.pop() {
            match g.degree() {
                0 => {},
                1 => roots.push(self.field.neg(&g.coeffs[0])),
                _ => {
                    let (a, b) = g.equal_degree_split(rng, &q);
                    pending.push(a);
                    pending.push(b);
                },
            }
        }
        roots
    }

    /// Splits a monic product of at least two distinct linear factors into two
    /// nontrivial monic factors.
    fn equal_degree_split<R: Rng + ?Sized>(&self, rng: &mut R, q: &BigUint) -> (Self, Self) {
        let x = Self::x(&self.field);
        let odd = q.bit(0);
        let half = (q - 1u8) >> 1u8;
        let trace_len = q.bits().saturating_sub(1);
        loop {
            let a = self.field.random(rng);
            let candidate = if odd {
                let shifted = &x + &Self::constant(&self.field, a);
                shifted
                    .pow_mod(&half, self)
                    .map(|h| &h - &Self::constant(&self.field, self.field.one()))
            } else {
                // Tr(a x) = sum_{i < m} (a x)^{2^i}
                let mut term = Self::monomial(&self.field, a, 1);
                let mut trace = term.clone();
                let mut ok = Ok(());
                for _ in 1..trace_len {
                    match (&term * &term).rem(self) {
                        Ok(t) => term = t,
                        Err(e) => {
                            ok = Err(e);
                            break;
                        },
                    }
                    trace = &trace + &term;
                }
                ok.map(|_| trace)
            };
            let h = match candidate {
                Ok(h) => h,
                Err(_) => continue,
            };
            let d = Self::gcd(&h, self);
            if d.degree() > 0 && d.degree() < self.degree() {
                if let Ok((other, _)) = self.divide_with_q_and_r(&d) {
                    return (d, other);
                }
            }
        }
    }
}

/// The distinct prime divisors of `n`.
pub(crate) fn prime_divisors(mut n: usize) -> Vec<usize> {
    let mut primes = Vec::new();
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            primes.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        primes.push(n);
    }
    primes
}

impl<'a, F: FiniteField> Add<&'a DensePolynomial<F>> for &DensePolynomial<F> {
    type Output = DensePolynomial<F>;

    fn add(self, other: &'a DensePolynomial<F>) -> DensePolynomial<F> {
        let field = &self.field;
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| match (self.coeffs.get(i), other.coeffs.get(i)) {
                (Some(a), Some(b)) => field.add(a, b),
                (Some(a), None) => a.clone(),
                (None, Some(b)) => b.clone(),
                (None, None) => field.zero(),
            })
            .collect();
        DensePolynomial::from_coefficients_vec(field, coeffs)
    }
}

impl<F: FiniteField> Neg for &DensePolynomial<F> {
    type Output = DensePolynomial<F>;

    fn neg(self) -> DensePolynomial<F> {
        let coeffs = self.coeffs.iter().map(|c| self.field.neg(c)).collect();
        DensePolynomial::from_coefficients_vec(&self.field, coeffs)
    }
}

impl<'a, F: FiniteField> Sub<&'a DensePolynomial<F>> for &DensePolynomial<F> {
    type Output = DensePolynomial<F>;

    fn sub(self, other: &'a DensePolynomial<F>) -> DensePolynomial<F> {
        self + &(-other)
    }
}

impl<'a, F: FiniteField> Mul<&'a DensePolynomial<F>> for &DensePolynomial<F> {
    type Output = DensePolynomial<F>;

    /// Naive `n^2` multiplication.
    fn mul(self, other: &'a DensePolynomial<F>) -> DensePolynomial<F> {
        if self.is_zero() || other.is_zero() {
            return DensePolynomial::zero(&self.field);
        }
        let field = &self.field;
        let mut result = vec![field.zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if field.is_zero(a) {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = field.add(&result[i + j], &field.mul(a, b));
            }
        }
        DensePolynomial::from_coefficients_vec(field, result)
    }
}
