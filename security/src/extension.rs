//! Attacks that only apply to curves defined over extension fields.
//!
//! Each predicate returns `true` when the curve resists the attack, that is
//! when the attack does not apply or its estimated cost exceeds
//! [`EXTENSION_SECURITY`] bits.
use num_bigint::BigUint;
use num_traits::Zero;

use crate::{
    backend::AlgebraBackend,
    curve::WeierstrassCurve,
    fields::FiniteField,
    params::EXTENSION_SECURITY,
    poly::DensePolynomial,
    utils::{log2, IndexSet, Result},
    SecurityError,
};

fn exceeds_threshold(cost: f64) -> bool {
    cost > f64::from(EXTENSION_SECURITY)
}

/// Whether `curve` resists genus 2 cover attacks: its 2-torsion must not have
/// full rank.
pub fn genus_2_cover_security<B: AlgebraBackend, F: FiniteField>(
    backend: &B,
    curve: &WeierstrassCurve<F>,
) -> Result<bool> {
    Ok(backend.two_torsion_rank(curve)? != 2)
}

/// Whether `curve` resists genus 3 hyperelliptic cover attacks.
///
/// The attack needs a rational 4-torsion structure, detected by `4 | #E`. The
/// point count is computed with `backend` unless it is supplied. A supplied
/// count of zero is rejected with [`SecurityError::InvalidCurveOrder`], since
/// every curve has its point at infinity.
pub fn genus_3_hyperelliptic_cover_security<B: AlgebraBackend, F: FiniteField>(
    backend: &B,
    curve: &WeierstrassCurve<F>,
    point_count: Option<&BigUint>,
) -> Result<bool> {
    let n = match point_count {
        Some(n) if n.is_zero() => return Err(SecurityError::InvalidCurveOrder),
        Some(n) => n.clone(),
        None => backend.count_points(curve)?,
    };
    if (n % 4u8).is_zero() {
        let bits = curve.characteristic().bits() as f64;
        return Ok(exceeds_threshold(bits * 5.0 / 3.0));
    }
    Ok(true)
}

/// Whether `curve` resists genus 3 non-hyperelliptic cover attacks.
///
/// Uses the time-memory trade-off bound `1.23123 · log_2(q)^2 · q` with
/// `q = p^2` (Laine and Lauter, J. Math. Cryptol. 9(2), 2015).
pub fn genus_3_nonhyperelliptic_cover_security<F: FiniteField>(curve: &WeierstrassCurve<F>) -> bool {
    let log_q = 2.0 * log2(&curve.characteristic());
    exceeds_threshold(1.23123f64.log2() + 2.0 * log_q.log2() + log_q)
}

/// Whether the curve with defining polynomial `polynomial` resists the GHS
/// attack.
///
/// The attack applies when a root `x` of `polynomial` has `x^{p^2}` or
/// `x^{p^3}` among the roots as well. Without roots the curve is resistant.
#[tracing::instrument(target = "curve_security", level = "debug", skip_all)]
pub fn ghs_security<B: AlgebraBackend, F: FiniteField>(
    backend: &B,
    polynomial: &DensePolynomial<F>,
) -> bool {
    let field = polynomial.field();
    let p = field.characteristic();
    let roots: IndexSet<F::Elem> = backend.roots(polynomial).into_iter().collect();
    let p2 = &p * &p;
    let p3 = &p2 * &p;
    let vulnerable = roots.iter().any(|x| {
        roots.contains(&field.pow(x, &p2)) || roots.contains(&field.pow(x, &p3))
    });
    tracing::debug!(target: "curve_security", "{} roots, frobenius orbit collapses: {}", roots.len(), vulnerable);
    if vulnerable {
        exceeds_threshold(p.bits() as f64 * 8.0 / 3.0)
    } else {
        true
    }
}

/// Whether `curve` resists all four extension-specific attacks above.
/// `polynomial` is the defining polynomial of `curve`.
pub fn sextic_extension_specific_security<B: AlgebraBackend, F: FiniteField>(
    backend: &B,
    curve: &WeierstrassCurve<F>,
    polynomial: &DensePolynomial<F>,
    point_count: Option<&BigUint>,
) -> Result<bool> {
    let genus_2 = genus_2_cover_security(backend, curve)?;
    let genus_3_h = genus_3_hyperelliptic_cover_security(backend, curve, point_count)?;
    let genus_3_nh = genus_3_nonhyperelliptic_cover_security(curve);
    let ghs = ghs_security(backend, polynomial);
    Ok(genus_2 && genus_3_h && genus_3_nh && ghs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{backend::NativeBackend, fields::TowerField};

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    fn curve(p: &BigUint, coeffs: &[i64]) -> WeierstrassCurve<TowerField> {
        let f = TowerField::prime(p.clone());
        let poly = DensePolynomial::from_coefficients_vec(
            &f,
            coeffs.iter().map(|c| f.from_i64(*c)).collect(),
        );
        WeierstrassCurve::new(poly).unwrap()
    }

    /// `2^61 - 1`.
    fn mersenne_61() -> BigUint {
        (big(1) << 61u32) - 1u8
    }

    #[test]
    fn genus_2_depends_only_on_torsion_rank() {
        let backend = NativeBackend::default();
        // full 2-torsion: x^3 - x has three roots
        assert!(!genus_2_cover_security(&backend, &curve(&big(7), &[0, -1, 0, 1])).unwrap());
        assert!(genus_2_cover_security(&backend, &curve(&big(7), &[0, 1, 0, 1])).unwrap());
        // 9 points, odd, still resistant
        assert!(genus_2_cover_security(&backend, &curve(&big(5), &[1, 1, 0, 1])).unwrap());
    }

    #[test]
    fn genus_3_hyperelliptic_threshold() {
        let backend = NativeBackend::default();
        let small = curve(&big(7), &[0, -1, 0, 1]);
        // 8 points over F_7, and 3 * 5/3 bits is far below the threshold
        assert!(!genus_3_hyperelliptic_cover_security(&backend, &small, None).unwrap());
        assert!(genus_3_hyperelliptic_cover_security(&backend, &small, Some(&big(9))).unwrap());

        // 61 * 5/3 < 125 < 79 * 5/3
        let large = curve(&mersenne_61(), &[1, 1, 0, 1]);
        assert!(!genus_3_hyperelliptic_cover_security(&backend, &large, Some(&big(4))).unwrap());
        // only the bit length of the characteristic is read here
        let bits_79 = (big(1) << 78u32) + 1u8;
        let larger = curve(&bits_79, &[1, 1, 0, 1]);
        assert!(genus_3_hyperelliptic_cover_security(&backend, &larger, Some(&big(4))).unwrap());
    }

    #[test]
    fn zero_point_count_is_rejected() {
        let backend = NativeBackend::default();
        let e = curve(&mersenne_61(), &[1, 1, 0, 1]);
        assert_eq!(
            genus_3_hyperelliptic_cover_security(&backend, &e, Some(&big(0))),
            Err(SecurityError::InvalidCurveOrder)
        );
        assert_eq!(
            sextic_extension_specific_security(&backend, &e, e.polynomial(), Some(&big(0))),
            Err(SecurityError::InvalidCurveOrder)
        );
    }

    #[test]
    fn genus_3_nonhyperelliptic_threshold() {
        // log_2(q) = 122, 2 log_2(122) = 13.86: about 136 bits
        assert!(genus_3_nonhyperelliptic_cover_security(&curve(&mersenne_61(), &[1, 1, 0, 1])));
        // log_2(q) = 40, about 51 bits
        assert!(!genus_3_nonhyperelliptic_cover_security(&curve(&big(1_000_003), &[1, 1, 0, 1])));
    }

    #[test]
    fn ghs_without_roots_is_secure() {
        let backend = NativeBackend::default();
        let e = curve(&big(5), &[1, 1, 0, 1]);
        assert!(ghs_security(&backend, e.polynomial()));
    }

    #[test]
    fn ghs_with_rational_roots() {
        let backend = NativeBackend::default();
        // roots in the prime field are fixed by Frobenius
        let e = curve(&big(7), &[0, -1, 0, 1]);
        assert!(!ghs_security(&backend, e.polynomial()));
        // same orbit condition, but 61 * 8/3 > 125
        let e = curve(&mersenne_61(), &[0, -1, 0, 1]);
        assert!(ghs_security(&backend, e.polynomial()));
    }

    #[test]
    fn combined_predicate() {
        let backend = NativeBackend::default();
        let e = curve(&big(7), &[0, -1, 0, 1]);
        assert!(!sextic_extension_specific_security(&backend, &e, e.polynomial(), None).unwrap());

        let e = curve(&mersenne_61(), &[1, 1, 0, 1]);
        // odd point count, so only the genus 2 and GHS checks can fail
        let secure =
            sextic_extension_specific_security(&backend, &e, e.polynomial(), Some(&big(7))).unwrap();
        assert_eq!(
            secure,
            genus_2_cover_security(&backend, &e).unwrap() && ghs_security(&backend, e.polynomial())
        );
    }
}
