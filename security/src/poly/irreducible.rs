//! Search for irreducible polynomials with few, small coefficients.
use ark_std::{cfg_iter, vec::Vec};
use itertools::Itertools;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{DensePolynomial, PolynomialRing};
use crate::{fields::FiniteField, utils::IndexSet};

/// Knobs for [`find_irreducible_poly`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IrreducibleSearchOptions {
    /// Also allow the generator of the coefficient field to appear, scaled
    /// by small integers, in the coefficients. Needed when the coefficient
    /// field is itself an extension and no small-integer candidate works.
    pub use_root: bool,
    /// Coefficients are drawn from `[-max_coeff, max_coeff)`.
    pub max_coeff: u32,
    /// Return every irreducible candidate instead of the sparsest one.
    pub output_all: bool,
}

impl Default for IrreducibleSearchOptions {
    fn default() -> Self {
        Self {
            use_root: false,
            max_coeff: 2,
            output_all: false,
        }
    }
}

/// The coefficient tuples of length `degree`, sorted with repetition in both
/// ascending and descending order, in first-seen order.
fn coefficient_tuples(degree: usize, max_coeff: u32) -> IndexSet<Vec<i64>> {
    let m = i64::from(max_coeff);
    let ascending = (-m..m).combinations_with_replacement(degree);
    let descending = (-m..m).rev().combinations_with_replacement(degree);
    ascending.chain(descending).collect()
}

/// `x^degree + sum_i (coeffs[i] + root * special[i]) x^i`.
fn monic_candidate<F: FiniteField>(
    field: &F,
    degree: usize,
    coeffs: &[i64],
    special: Option<(&F::Elem, &[i64])>,
) -> DensePolynomial<F> {
    let mut all = coeffs.iter().map(|c| field.from_i64(*c)).collect::<Vec<_>>();
    if let Some((root, special)) = special {
        for (c, s) in all.iter_mut().zip(special) {
            *c = field.add(c, &field.mul(root, &field.from_i64(*s)));
        }
    }
    all.resize(degree, field.zero());
    all.push(field.one());
    DensePolynomial::from_coefficients_vec(field, all)
}

/// The candidate with the fewest nonzero coefficients; the first one on ties.
fn sparsest<F: FiniteField>(polys: Vec<DensePolynomial<F>>) -> Vec<DensePolynomial<F>> {
    polys
        .into_iter()
        .min_by_key(|p| p.num_nonzero_coefficients())
        .into_iter()
        .collect()
}

fn dedup<F: FiniteField>(polys: Vec<DensePolynomial<F>>) -> Vec<DensePolynomial<F>> {
    let mut seen = IndexSet::default();
    polys
        .into_iter()
        .filter(|p| seen.insert(p.coeffs().to_vec()))
        .collect()
}

/// Returns monic irreducible polynomials of the given `degree` over the base
/// ring of `ring`, with small and few coefficients.
///
/// By default a single polynomial is returned, the sparsest one found; the
/// result is still a vector so that it has the same shape as with
/// `output_all`. The result is empty when nothing in the searched patterns is
/// irreducible.
///
/// With `use_root` the search space is squared, so the search stops at the
/// first irreducible candidate that involves the generator (unless
/// `output_all` is set) and returns the sparsest of everything found so far.
#[tracing::instrument(target = "curve_security", skip(ring), fields(field_degree = ring.base_ring().degree()))]
pub fn find_irreducible_poly<F: FiniteField>(
    ring: &PolynomialRing<F>,
    degree: usize,
    options: &IrreducibleSearchOptions,
) -> Vec<DensePolynomial<F>> {
    let field = ring.base_ring();
    let tuples = coefficient_tuples(degree, options.max_coeff);
    let candidates = dedup(
        tuples
            .iter()
            .map(|c| monic_candidate(field, degree, c, None))
            .collect(),
    );
    tracing::trace!(target: "curve_security", "testing {} candidates", candidates.len());

    let mut found: Vec<DensePolynomial<F>> = cfg_iter!(candidates)
        .filter(|p| p.is_irreducible())
        .cloned()
        .collect();

    if options.use_root {
        let root = field.gen();
        for regular in &tuples {
            for special in &tuples {
                let candidate = monic_candidate(field, degree, regular, Some((&root, special)));
                if candidate.is_irreducible() {
                    found.push(candidate);
                    // The nested search is too heavy to run to completion.
                    if !options.output_all {
                        return sparsest(found);
                    }
                }
            }
        }
    }

    tracing::debug!(target: "curve_security", "found {} irreducible polynomials", found.len());
    if options.output_all {
        dedup(found)
    } else {
        sparsest(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::TowerField;
    use num_bigint::BigUint;

    fn ring(p: u64) -> PolynomialRing<TowerField> {
        PolynomialRing::new(TowerField::prime(BigUint::from(p)))
    }

    #[test]
    fn tuples_cover_both_orders() {
        let tuples = coefficient_tuples(2, 1);
        // ascending: (-1,-1), (-1,0), (0,0); descending adds (0,-1)
        assert_eq!(tuples.len(), 4);
        assert!(tuples.contains(&vec![0, -1]));
        assert!(tuples.contains(&vec![-1, 0]));
    }

    #[test]
    fn default_returns_one_sparsest_polynomial() {
        let r = ring(1_000_003);
        let res = find_irreducible_poly(&r, 3, &IrreducibleSearchOptions::default());
        assert_eq!(res.len(), 1);
        let p = &res[0];
        assert_eq!(p.degree(), 3);
        assert!(p.is_monic());
        assert!(p.is_irreducible());

        let all = find_irreducible_poly(
            &r,
            3,
            &IrreducibleSearchOptions {
                output_all: true,
                ..Default::default()
            },
        );
        let min = all.iter().map(|p| p.num_nonzero_coefficients()).min().unwrap();
        assert_eq!(p.num_nonzero_coefficients(), min);
    }

    #[test]
    fn output_all_is_complete() {
        let r = ring(5);
        let options = IrreducibleSearchOptions {
            output_all: true,
            ..Default::default()
        };
        let all = find_irreducible_poly(&r, 2, &options);
        assert!(!all.is_empty());
        for p in &all {
            assert_eq!(p.degree(), 2);
            assert!(p.is_irreducible());
        }
        // every irreducible candidate from the searched patterns is reported
        let field = r.base_ring();
        for t in coefficient_tuples(2, 2) {
            let candidate = monic_candidate(field, 2, &t, None);
            assert_eq!(candidate.is_irreducible(), all.contains(&candidate));
        }
    }

    #[test]
    fn empty_when_nothing_qualifies() {
        // an empty coefficient range yields no candidates at all
        let options = IrreducibleSearchOptions {
            max_coeff: 0,
            ..Default::default()
        };
        assert!(find_irreducible_poly(&ring(7), 2, &options).is_empty());
        // over F_2 the patterns give x^2, x^2 + 1, x^2 + x and x^2 + x + 1
        let options = IrreducibleSearchOptions {
            max_coeff: 1,
            ..Default::default()
        };
        let res = find_irreducible_poly(&ring(2), 2, &options);
        assert_eq!(res.len(), 1);
        assert!(res[0].is_irreducible());
    }

    #[test]
    fn use_root_over_an_extension() {
        // over F_4 = F_2[w]/(w^2 + w + 1) there is no irreducible x^2 + a x + b
        // with a, b in F_2 other than x^2 + x + 1, which splits in F_4
        let fp = TowerField::prime(BigUint::from(2u8));
        let m = DensePolynomial::from_coefficients_vec(&fp, vec![fp.one(), fp.one(), fp.one()]);
        let f4 = fp.extend(&m).unwrap();
        let r = PolynomialRing::new(f4.clone());
        assert!(find_irreducible_poly(&r, 2, &IrreducibleSearchOptions::default()).is_empty());

        let options = IrreducibleSearchOptions {
            use_root: true,
            ..Default::default()
        };
        let res = find_irreducible_poly(&r, 2, &options);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].degree(), 2);
        assert!(res[0].is_irreducible());
        assert!(res[0].coeffs().iter().any(|c| c[1] != BigUint::from(0u8)));
    }

    #[test]
    fn use_root_with_output_all() {
        let fp = TowerField::prime(BigUint::from(2u8));
        let m = DensePolynomial::from_coefficients_vec(&fp, vec![fp.one(), fp.one(), fp.one()]);
        let f4 = fp.extend(&m).unwrap();
        let r = PolynomialRing::new(f4.clone());
        let options = IrreducibleSearchOptions {
            use_root: true,
            output_all: true,
            ..Default::default()
        };
        let res = find_irreducible_poly(&r, 2, &options);
        assert!(!res.is_empty());
        for p in &res {
            assert_eq!(p.degree(), 2);
            assert!(f4.is_one(&p.coeffs()[2]));
            assert!(p.is_irreducible());
        }
        // x^2 + x + w is one of them
        let w = f4.gen();
        let expected =
            DensePolynomial::from_coefficients_vec(&f4, vec![w, f4.one(), f4.one()]);
        assert!(res.contains(&expected));
        let distinct: IndexSet<_> = res.iter().map(|p| p.coeffs().to_vec()).collect();
        assert_eq!(distinct.len(), res.len());
    }
}
