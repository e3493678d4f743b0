//! Flattening of towers of finite field extensions.
use ark_std::{
    rand::{rngs::StdRng, SeedableRng},
    vec::Vec,
};
use num_bigint::BigUint;

use crate::{
    backend::AlgebraBackend,
    fields::{FieldHom, FiniteField, TowerField},
    poly::{find_irreducible_poly, DensePolynomial, IrreducibleSearchOptions, PolynomialRing},
    utils::{error::SecurityError, Result},
};

/// A homomorphism between two presentations of finite fields.
pub type TowerHom = FieldHom<TowerField, TowerField>;

/// A monic irreducible polynomial of the given degree over the prime field,
/// preferring small sparse ones.
fn flat_modulus(prime: &TowerField, degree: usize) -> DensePolynomial<TowerField> {
    let ring = PolynomialRing::new(prime.clone());
    let options = IrreducibleSearchOptions::default();
    if let Some(m) = find_irreducible_poly(&ring, degree, &options).into_iter().next() {
        return m;
    }
    tracing::debug!(target: "curve_security", "no small modulus of degree {}, sampling", degree);
    let mut rng = StdRng::seed_from_u64(degree as u64);
    loop {
        let mut coeffs = (0..degree).map(|_| prime.random(&mut rng)).collect::<Vec<_>>();
        coeffs.push(prime.one());
        let m = DensePolynomial::from_coefficients_vec(prime, coeffs);
        if m.is_irreducible() {
            return m;
        }
    }
}

fn first_root<B: AlgebraBackend>(
    backend: &B,
    polynomial: &DensePolynomial<TowerField>,
) -> Result<Vec<BigUint>> {
    backend
        .roots(polynomial)
        .into_iter()
        .next()
        .ok_or(SecurityError::NoRootFound)
}

/// Lifts a polynomial over the prime field into `target`.
fn lift_prime_poly(
    polynomial: &DensePolynomial<TowerField>,
    target: &TowerField,
) -> DensePolynomial<TowerField> {
    polynomial.map_coefficients(target, |c| target.from_coordinates(c))
}

/// Returns a flat field `k1` isomorphic to `k`, together with embeddings
/// `phi: k -> k1` and `psi: k1 -> k`.
///
/// If `k` is already flat, it is returned with two identity maps. Otherwise
/// the tower is folded bottom-up: at each level the modulus is carried over
/// to the flat field built so far, a flat field of the combined degree is
/// created, and the level generator is sent to a root of the carried modulus.
///
/// `phi` and `psi` are built independently from each other and are in general
/// **not** inverse to each other.
#[tracing::instrument(target = "curve_security", skip_all, fields(levels = k.num_levels(), degree = k.degree()))]
pub fn make_finite_field<B: AlgebraBackend>(
    backend: &B,
    k: &TowerField,
) -> Result<(TowerField, TowerHom, TowerHom)> {
    if k.is_flat() {
        return Ok((k.clone(), FieldHom::identity(k), FieldHom::identity(k)));
    }
    let prime = k.prime_field();

    let mut flat = k.truncate(1);
    let mut phi = FieldHom::identity(&flat);
    for level in 2..=k.num_levels() {
        let current = k.truncate(level);
        let below = k.truncate(level - 1);
        let modulus = current.modulus();
        let lifted = modulus.map_coefficients(&flat, |c| phi.apply(c));

        let degree = flat.degree() * modulus.degree();
        let next = prime.extend(&flat_modulus(&prime, degree))?;

        let embedding_root = first_root(backend, &lift_prime_poly(&flat.modulus(), &next))?;
        let embed = FieldHom::from_generator(&flat, &next, &embedding_root)?;
        let alpha = first_root(backend, &lifted.map_coefficients(&next, |c| embed.apply(c)))?;

        // basis element e_b * y^j of `current` sits at index j * below.degree() + b
        let base_images = phi
            .images()
            .iter()
            .map(|image| embed.apply(image))
            .collect::<Vec<_>>();
        let mut images = Vec::with_capacity(current.degree());
        let mut alpha_power = next.one();
        for _ in 0..modulus.degree() {
            images.extend(base_images.iter().map(|b| next.mul(b, &alpha_power)));
            alpha_power = next.mul(&alpha_power, &alpha);
        }
        debug_assert_eq!(images.len(), below.degree() * modulus.degree());
        phi = FieldHom::from_basis_images(&current, &next, images)?;
        flat = next;
        tracing::debug!(target: "curve_security", "flattened {} levels into degree {}", level, flat.degree());
    }

    let psi_root = first_root(backend, &lift_prime_poly(&flat.modulus(), k))?;
    let psi = FieldHom::from_generator(&flat, k, &psi_root)?;
    Ok((flat, phi, psi))
}
