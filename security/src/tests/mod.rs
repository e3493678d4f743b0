use ark_std::test_rng;
use ark_test_curves::bls12_381::Fr;
use num_bigint::BigUint;

use crate::{
    backend::{AlgebraBackend, NativeBackend},
    canonical::make_finite_field,
    curve::WeierstrassCurve,
    estimate::FactorHints,
    extension::*,
    fields::{ArkField, FiniteField, TowerField},
    params::SecurityThresholds,
    poly::DensePolynomial,
    report::{CurveParameters, SecurityReport},
    SecurityError,
};

fn big(n: u64) -> BigUint {
    BigUint::from(n)
}

/// `F_7[u]/(u^2 + 1)`, then `[v]/(v^3 - u - 1)`.
fn tower_7_2_3() -> TowerField {
    let fp = TowerField::prime(big(7));
    let f2 = fp
        .extend(&DensePolynomial::from_coefficients_vec(&fp, vec![fp.one(), fp.zero(), fp.one()]))
        .unwrap();
    let u = f2.add(&f2.gen(), &f2.one());
    f2.extend(&DensePolynomial::from_coefficients_vec(
        &f2,
        vec![f2.neg(&u), f2.zero(), f2.zero(), f2.one()],
    ))
    .unwrap()
}

#[test]
fn flattening_preserves_extension_predicates() {
    let backend = NativeBackend::default();
    let k = tower_7_2_3();
    let (k1, phi, _) = make_finite_field(&backend, &k).unwrap();

    let rng = &mut test_rng();
    for _ in 0..3 {
        let e = WeierstrassCurve::short(&k, k.random(rng), k.random(rng));
        let f = e.polynomial().map_coefficients(&k1, |c| phi.apply(c));
        let e1 = WeierstrassCurve::new(f.clone()).unwrap();

        assert_eq!(backend.roots(e.polynomial()).len(), backend.roots(&f).len());
        assert_eq!(
            genus_2_cover_security(&backend, &e).unwrap(),
            genus_2_cover_security(&backend, &e1).unwrap()
        );
        assert_eq!(
            ghs_security(&backend, e.polynomial()),
            ghs_security(&backend, &f)
        );
    }
}

/// `prod (x - r)` over `roots`.
fn split_polynomial(k: &TowerField, roots: &[Vec<BigUint>]) -> DensePolynomial<TowerField> {
    roots.iter().fold(
        DensePolynomial::from_coefficients_vec(k, vec![k.one()]),
        |acc, r| &acc * &DensePolynomial::from_coefficients_vec(k, vec![k.neg(r), k.one()]),
    )
}

#[test]
fn ghs_over_a_flattened_sextic_field() {
    let backend = NativeBackend::default();
    let (k1, _, _) = make_finite_field(&backend, &tower_7_2_3()).unwrap();
    assert!(k1.is_flat());
    assert_eq!(k1.degree(), 6);
    let a = k1.gen();

    // a and its conjugates under x -> x^49
    let orbit = [a.clone(), k1.pow(&a, &big(49)), k1.pow(&a, &big(2401))];
    let f = split_polynomial(&k1, &orbit);
    assert_eq!(backend.roots(&f).len(), 3);
    assert!(!ghs_security(&backend, &f));

    // a + c = a^49 or a + c = a^343 would force 3c = 0 or 2c = 0, so c = 0
    let shifted = [a.clone(), k1.add(&a, &k1.one()), k1.add(&a, &k1.from_i64(2))];
    let f = split_polynomial(&k1, &shifted);
    assert_eq!(backend.roots(&f).len(), 3);
    assert!(ghs_security(&backend, &f));
}

#[test]
fn counted_points_match_supplied_points() {
    let backend = NativeBackend::default();
    let fp = TowerField::prime(big(7));
    let f49 = fp
        .extend(&DensePolynomial::from_coefficients_vec(&fp, vec![fp.one(), fp.zero(), fp.one()]))
        .unwrap();
    let e = WeierstrassCurve::short(&f49, f49.gen(), f49.one());
    let n = backend.count_points(&e).unwrap();
    // Hasse: |n - 50| <= 14
    assert!(n >= big(36) && n <= big(64));
    assert_eq!(
        genus_3_hyperelliptic_cover_security(&backend, &e, None).unwrap(),
        genus_3_hyperelliptic_cover_security(&backend, &e, Some(&n)).unwrap()
    );
}

#[test]
fn predicates_over_an_arkworks_field() {
    let backend = NativeBackend::default();
    let f = ArkField::<Fr>::new();
    // y^2 = x^3 - x has full 2-torsion
    let e = WeierstrassCurve::short(&f, -Fr::from(1u8), Fr::from(0u8));
    assert!(!genus_2_cover_security(&backend, &e).unwrap());
    // the roots are fixed by Frobenius, but 255 * 8/3 bits is enough
    assert!(ghs_security(&backend, e.polynomial()));
    assert!(genus_3_nonhyperelliptic_cover_security(&e));
    assert_eq!(backend.count_points(&e), Err(SecurityError::FieldTooLarge));
    assert!(genus_3_hyperelliptic_cover_security(&backend, &e, Some(&big(4))).unwrap());
    assert!(!sextic_extension_specific_security(&backend, &e, e.polynomial(), Some(&big(4))).unwrap());
}

#[test]
fn report_hints_are_shortcuts_only() {
    let backend = NativeBackend::default();
    let fp = TowerField::prime(big(1_000_003));
    let e = WeierstrassCurve::short(&fp, fp.one(), fp.from_i64(28));
    let plain = CurveParameters {
        curve: e,
        subgroup_order: big(333_031),
        cofactor: big(3),
        subgroup_order_minus_one_factors: None,
        twist_hints: FactorHints::default(),
    };
    let hinted = CurveParameters {
        subgroup_order_minus_one_factors: Some(backend.factor(&big(333_030))),
        twist_hints: FactorHints {
            main_factor: Some(big(200_183)),
            main_factor_minus_one_factors: Some(backend.factor(&big(200_182))),
        },
        ..plain.clone()
    };
    let thresholds = SecurityThresholds::default();
    assert_eq!(
        SecurityReport::evaluate(&backend, &plain, &thresholds).unwrap(),
        SecurityReport::evaluate(&backend, &hinted, &thresholds).unwrap()
    );
}

#[test]
fn report_propagates_invalid_orders() {
    let backend = NativeBackend::default();
    let fp = TowerField::prime(big(101));
    let params = CurveParameters {
        curve: WeierstrassCurve::short(&fp, fp.one(), fp.one()),
        // h * r exceeds 2(p + 1)
        subgroup_order: big(103),
        cofactor: big(2),
        subgroup_order_minus_one_factors: None,
        twist_hints: FactorHints::default(),
    };
    assert_eq!(
        SecurityReport::evaluate(&backend, &params, &SecurityThresholds::default()),
        Err(SecurityError::InvalidCurveOrder)
    );
}
