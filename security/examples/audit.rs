use ark_curve_security::{
    backend::{AlgebraBackend, NativeBackend},
    canonical::make_finite_field,
    curve::WeierstrassCurve,
    estimate::FactorHints,
    fields::{FiniteField, TowerField},
    params::SecurityThresholds,
    poly::{find_irreducible_poly, DensePolynomial, IrreducibleSearchOptions, PolynomialRing},
    report::{CurveParameters, SecurityReport},
    SecurityError,
};
use num_bigint::BigUint;
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, Registry};

/// Audits a toy curve `y^2 = x^3 + x + z` over `F_{5^6}`, where `F_{5^6}` is
/// first built as a tower `F_5 ⊂ F_25 ⊂ F_{5^6}` and then flattened.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = Registry::default()
        .with(fmt::layer())
        .with(LevelFilter::DEBUG);
    tracing::subscriber::set_global_default(subscriber)?;

    let backend = NativeBackend::default();

    let fp = TowerField::prime(BigUint::from(5u8));
    // 2 is not a square mod 5
    let f25 = fp.extend(&DensePolynomial::from_coefficients_vec(
        &fp,
        vec![fp.from_i64(-2), fp.zero(), fp.one()],
    ))?;
    let cubic = find_irreducible_poly(
        &PolynomialRing::new(f25.clone()),
        3,
        &IrreducibleSearchOptions {
            use_root: true,
            ..Default::default()
        },
    );
    let tower = f25.extend(cubic.first().ok_or(SecurityError::ReducibleModulus)?)?;

    let (field, _, _) = make_finite_field(&backend, &tower)?;
    println!("flat field modulus: {:?}", field.modulus());

    let curve = WeierstrassCurve::short(&field, field.one(), field.gen());
    let order = backend.count_points(&curve)?;
    let factors = backend.factor(&order);
    println!("#E = {} = {}", order, factors);
    let subgroup_order = factors
        .largest_prime()
        .cloned()
        .ok_or(SecurityError::InvalidCurveOrder)?;

    let params = CurveParameters {
        cofactor: &order / &subgroup_order,
        curve,
        subgroup_order,
        subgroup_order_minus_one_factors: None,
        twist_hints: FactorHints::default(),
    };
    let report = SecurityReport::evaluate(&backend, &params, &SecurityThresholds::default())?;
    println!("{}", report);
    Ok(())
}
