//! Evaluation of a full set of curve parameters, and its rendering.
use ark_std::fmt;
use colored::{ColoredString, Colorize};
use num_bigint::BigUint;

use crate::{
    backend::{AlgebraBackend, Factorization},
    curve::WeierstrassCurve,
    estimate::{curve_security, twist_security, FactorHints},
    extension::{
        genus_2_cover_security, genus_3_hyperelliptic_cover_security,
        genus_3_nonhyperelliptic_cover_security, ghs_security,
    },
    fields::FiniteField,
    params::SecurityThresholds,
    utils::{join, Result},
};

/// The parameters of a curve `E: y^2 = f(x)` with `#E = h * r`, `r` prime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParameters<F: FiniteField> {
    /// The curve, over its (extension) field of definition.
    pub curve: WeierstrassCurve<F>,
    /// The prime order `r` of the main subgroup.
    pub subgroup_order: BigUint,
    /// The cofactor `h`.
    pub cofactor: BigUint,
    /// The factorization of `r - 1`, if known.
    pub subgroup_order_minus_one_factors: Option<Factorization>,
    /// Precomputed factors of the twist order, if known.
    pub twist_hints: FactorHints,
}

impl<F: FiniteField> CurveParameters<F> {
    /// The order `h * r` of the curve.
    pub fn curve_order(&self) -> BigUint {
        &self.subgroup_order * &self.cofactor
    }
}

/// The outcome of every check, in the order in which it is displayed.
#[derive(Clone, Debug, PartialEq)]
pub struct SecurityReport {
    /// The degree over `F_p` of the field of definition of the curve.
    pub field_degree: usize,
    /// Whether the characteristic is (probably) prime.
    pub p_is_prime: bool,
    /// Whether the subgroup order is (probably) prime.
    pub q_is_prime: bool,
    /// The bit length of the subgroup order.
    pub q_bits: u64,
    /// Pollard-Rho on the curve.
    pub curve_rho_secure: bool,
    /// Estimated Pollard-Rho cost on the curve, in bits.
    pub curve_rho_bits: f64,
    /// MOV on the curve.
    pub curve_mov_secure: bool,
    /// The bit length of the curve embedding degree.
    pub curve_embedding_degree_bits: u64,
    /// Pollard-Rho on the twist.
    pub twist_rho_secure: bool,
    /// Estimated Pollard-Rho cost on the twist, in bits.
    pub twist_rho_bits: f64,
    /// MOV on the twist.
    pub twist_mov_secure: bool,
    /// The bit length of the twist embedding degree.
    pub twist_embedding_degree_bits: u64,
    /// Genus 2 cover attacks.
    pub genus_2_secure: bool,
    /// Genus 3 hyperelliptic cover attacks.
    pub genus_3_hyperelliptic_secure: bool,
    /// Genus 3 non-hyperelliptic cover attacks.
    pub genus_3_nonhyperelliptic_secure: bool,
    /// The GHS attack.
    pub ghs_secure: bool,
}

impl SecurityReport {
    /// Runs every check on `params`.
    ///
    /// The Pollard-Rho and MOV estimates are taken against the order of the
    /// field of definition of the curve, and the genus 3 hyperelliptic check
    /// uses `h * r` as point count, so no point is ever counted. With the
    /// `parallel` feature the independent checks run concurrently.
    pub fn evaluate<B: AlgebraBackend, F: FiniteField>(
        backend: &B,
        params: &CurveParameters<F>,
        thresholds: &SecurityThresholds,
    ) -> Result<Self> {
        let r = &params.subgroup_order;
        let span = tracing::info_span!(target: "curve_security", "evaluate", q_bits = r.bits());
        let _enter = span.enter();

        let curve = &params.curve;
        let p = curve.characteristic();
        let field_order = curve.base_field().order();
        let curve_order = params.curve_order();
        let curve_hints = FactorHints {
            main_factor: Some(r.clone()),
            main_factor_minus_one_factors: params.subgroup_order_minus_one_factors.clone(),
        };

        let ((primality, (curve_estimate, twist_estimate)), (genus_2, genus_3_h, ghs)) = join(
            || {
                join(
                    || (backend.is_probable_prime(&p), backend.is_probable_prime(r)),
                    || {
                        join(
                            || curve_security(backend, &field_order, &curve_order, &curve_hints),
                            || twist_security(backend, &field_order, &curve_order, &params.twist_hints),
                        )
                    },
                )
            },
            || {
                (
                    genus_2_cover_security(backend, curve),
                    genus_3_hyperelliptic_cover_security(backend, curve, Some(&curve_order)),
                    ghs_security(backend, curve.polynomial()),
                )
            },
        );
        let (curve_rho, curve_degree) = curve_estimate?;
        let (twist_rho, twist_degree) = twist_estimate?;

        let report = Self {
            field_degree: curve.base_field().degree(),
            p_is_prime: primality.0,
            q_is_prime: primality.1,
            q_bits: r.bits(),
            curve_rho_secure: curve_rho >= f64::from(thresholds.rho),
            curve_rho_bits: curve_rho,
            curve_mov_secure: curve_degree.bits() >= u64::from(thresholds.embedding_degree),
            curve_embedding_degree_bits: curve_degree.bits(),
            twist_rho_secure: twist_rho >= f64::from(thresholds.twist),
            twist_rho_bits: twist_rho,
            twist_mov_secure: twist_degree.bits() >= u64::from(thresholds.embedding_degree),
            twist_embedding_degree_bits: twist_degree.bits(),
            genus_2_secure: genus_2?,
            genus_3_hyperelliptic_secure: genus_3_h?,
            genus_3_nonhyperelliptic_secure: genus_3_nonhyperelliptic_cover_security(curve),
            ghs_secure: ghs,
        };
        tracing::info!(target: "curve_security", secure = report.is_secure(), "evaluation done");
        Ok(report)
    }

    /// Whether all four extension-specific checks pass.
    pub fn extension_secure(&self) -> bool {
        self.genus_2_secure
            && self.genus_3_hyperelliptic_secure
            && self.genus_3_nonhyperelliptic_secure
            && self.ghs_secure
    }

    /// Whether every check passes.
    pub fn is_secure(&self) -> bool {
        self.p_is_prime
            && self.q_is_prime
            && self.curve_rho_secure
            && self.curve_mov_secure
            && self.twist_rho_secure
            && self.twist_mov_secure
            && self.extension_secure()
    }
}

fn marker(ok: bool) -> ColoredString {
    if ok {
        "true".green()
    } else {
        "false".red()
    }
}

const RULE: &str =
    "-----------------------------------------------------------------------------------------";
const BLANK: &str =
    "|                                                                                       |";
const TITLE_RULE: &str = "|\t\t\t    -------------------------------\t\t\t\t|";

impl fmt::Display for SecurityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field_degree {
            1 => "F_p".to_string(),
            d => format!("F_p^{}", d),
        };
        writeln!(f, "{}", RULE)?;
        writeln!(f, "{}", BLANK)?;
        writeln!(f, "{}", TITLE_RULE)?;
        writeln!(f, "|\t\t\t    |   Curve Security Analysis   |\t\t\t\t|")?;
        writeln!(f, "{}", TITLE_RULE)?;
        writeln!(f, "{}", BLANK)?;
        writeln!(f, "|\t\t\t      E({}): y^2 = f(x)\t\t\t\t|", field)?;
        writeln!(
            f,
            "|\t\t\t   #E = q.h, q {}-bit subgroup order\t\t\t\t|",
            self.q_bits
        )?;
        writeln!(f, "{}", BLANK)?;
        writeln!(f, "|\tp is prime: {}\t\t\t\t\t\t\t\t|", marker(self.p_is_prime))?;
        writeln!(f, "|\tq is prime: {}\t\t\t\t\t\t\t\t|", marker(self.q_is_prime))?;
        writeln!(
            f,
            "|\tcurve is secure against the Pollard-Rho attack: {} ({:.2} bits)\t\t|",
            marker(self.curve_rho_secure),
            self.curve_rho_bits
        )?;
        writeln!(
            f,
            "|\tcurve is secure against MOV attack: {} (curve embedding degree > 2^{})\t|",
            marker(self.curve_mov_secure),
            self.curve_embedding_degree_bits
        )?;
        writeln!(
            f,
            "|\ttwist is secure against the Pollard-Rho attack: {} ({:.2} bits)\t\t|",
            marker(self.twist_rho_secure),
            self.twist_rho_bits
        )?;
        writeln!(
            f,
            "|\ttwist is secure against MOV attack: {} (twist embedding degree > 2^{})\t|",
            marker(self.twist_mov_secure),
            self.twist_embedding_degree_bits
        )?;
        writeln!(
            f,
            "|\tcurve is secure against genus 2 cover attack: {}\t\t\t\t|",
            marker(self.genus_2_secure)
        )?;
        writeln!(
            f,
            "|\tcurve is secure against genus 3 hyperelliptic cover attack: {}\t\t|",
            marker(self.genus_3_hyperelliptic_secure)
        )?;
        writeln!(
            f,
            "|\tcurve is secure against genus 3 non-hyperelliptic cover attack: {}\t\t|",
            marker(self.genus_3_nonhyperelliptic_secure)
        )?;
        writeln!(
            f,
            "|\tcurve is secure against GHS attack: {}\t\t\t\t\t|",
            marker(self.ghs_secure)
        )?;
        writeln!(f, "{}", BLANK)?;
        write!(f, "{}", RULE)
    }
}
