//! Integer factorization and probable-prime testing.
use ark_std::{collections::BTreeMap, fmt, vec::Vec};
use num_bigint::BigUint;
use num_integer::{Integer, Roots};
use num_traits::{One, Zero};

/// The prime factorization of an integer, as a map from primes to
/// multiplicities, iterated in ascending order of the primes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Factorization(BTreeMap<BigUint, u32>);

impl Factorization {
    /// The factorization of 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplies the factorization by `prime^multiplicity`.
    pub fn insert(&mut self, prime: BigUint, multiplicity: u32) {
        if multiplicity > 0 {
            *self.0.entry(prime).or_insert(0) += multiplicity;
        }
    }

    /// The `(prime, multiplicity)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&BigUint, u32)> {
        self.0.iter().map(|(p, m)| (p, *m))
    }

    /// The distinct primes in ascending order.
    pub fn primes(&self) -> impl Iterator<Item = &BigUint> {
        self.0.keys()
    }

    /// The largest prime factor, `None` for the factorization of 1.
    pub fn largest_prime(&self) -> Option<&BigUint> {
        self.0.keys().next_back()
    }

    /// The number of distinct primes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the factorization of 1.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The factored integer.
    pub fn value(&self) -> BigUint {
        self.iter()
            .fold(BigUint::one(), |acc, (p, m)| acc * p.pow(m))
    }
}

impl FromIterator<(BigUint, u32)> for Factorization {
    fn from_iter<I: IntoIterator<Item = (BigUint, u32)>>(iter: I) -> Self {
        let mut res = Self::new();
        for (p, m) in iter {
            res.insert(p, m);
        }
        res
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        for (i, (p, m)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " * ")?;
            }
            match m {
                1 => write!(f, "{}", p)?,
                _ => write!(f, "{}^{}", p, m)?,
            }
        }
        Ok(())
    }
}

const TRIAL_DIVISION_BOUND: u32 = 1 << 12;

/// Miller–Rabin bases; deterministic below `3.3 * 10^24`.
const WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Miller–Rabin with fixed bases.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u8);
    if *n < two {
        return false;
    }
    for w in WITNESSES {
        let w = BigUint::from(w);
        if *n == w {
            return true;
        }
        if (n % &w).is_zero() {
            return false;
        }
    }
    let n_minus_one = n - 1u8;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;
    'witness: for w in WITNESSES {
        let mut x = BigUint::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Finds a nontrivial factor of an odd composite `n` that is not a perfect
/// square, with Brent's variant of Pollard's rho.
fn pollard_brent(n: &BigUint) -> BigUint {
    const BATCH: u64 = 128;
    let mut c = BigUint::one();
    loop {
        let f = |x: &BigUint| (x * x + &c) % n;
        let mut y = BigUint::from(2u8);
        let mut x = y.clone();
        let mut ys = y.clone();
        let mut q = BigUint::one();
        let mut g = BigUint::one();
        let mut r = 1u64;
        while g.is_one() {
            x = y.clone();
            for _ in 0..r {
                y = f(&y);
            }
            let mut k = 0;
            while k < r && g.is_one() {
                ys = y.clone();
                for _ in 0..BATCH.min(r - k) {
                    y = f(&y);
                    let diff = if x > y { &x - &y } else { &y - &x };
                    q = (q * diff) % n;
                }
                g = q.gcd(n);
                k += BATCH;
            }
            r *= 2;
        }
        if g == *n {
            // the batch overshot; replay it one step at a time
            loop {
                ys = f(&ys);
                let diff = if x > ys { &x - &ys } else { &ys - &x };
                g = diff.gcd(n);
                if !g.is_one() {
                    break;
                }
            }
        }
        if g != *n {
            return g;
        }
        c += 1u8;
    }
}

/// Factors `n` completely. The factorization of 0 and 1 is empty.
///
/// Trial division removes small primes, then composite cofactors are split
/// with Pollard–Brent rho. The running time is unbounded in the size of the
/// second-largest prime factor.
pub fn factor(n: &BigUint) -> Factorization {
    let mut res = Factorization::new();
    if n.is_zero() {
        return res;
    }
    let mut rest = n.clone();
    let mut d = 2u32;
    while d < TRIAL_DIVISION_BOUND {
        let big_d = BigUint::from(d);
        if &big_d * &big_d > rest {
            break;
        }
        let mut m = 0;
        while (&rest % &big_d).is_zero() {
            rest /= &big_d;
            m += 1;
        }
        res.insert(big_d, m);
        d += if d == 2 { 1 } else { 2 };
    }

    let mut pending: Vec<(BigUint, u32)> = vec![(rest, 1)];
    while let Some((m, mult)) = pending.pop() {
        if m.is_one() {
            continue;
        }
        if is_probable_prime(&m) {
            res.insert(m, mult);
            continue;
        }
        let root = m.sqrt();
        if &root * &root == m {
            pending.push((root, 2 * mult));
            continue;
        }
        let g = pollard_brent(&m);
        let other = &m / &g;
        pending.push((g, mult));
        pending.push((other, mult));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn small_primes() {
        let primes = (0u64..60).filter(|n| is_probable_prime(&big(*n))).collect::<Vec<_>>();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59]
        );
        // Carmichael numbers
        assert!(!is_probable_prime(&big(561)));
        assert!(!is_probable_prime(&big(3_215_031_751)));
        assert!(is_probable_prime(&big(1_000_000_007)));
    }

    #[test]
    fn factor_small_numbers() {
        assert!(factor(&big(1)).is_empty());
        assert!(factor(&big(0)).is_empty());
        let f = factor(&big(360));
        assert_eq!(
            f.iter().map(|(p, m)| (p.clone(), m)).collect::<Vec<_>>(),
            vec![(big(2), 3), (big(3), 2), (big(5), 1)]
        );
        assert_eq!(f.to_string(), "2^3 * 3^2 * 5");
        assert_eq!(factor(&big(97)).largest_prime(), Some(&big(97)));
    }

    #[test]
    fn factor_needs_rho() {
        let p = big(1_000_000_007);
        let q = big(998_244_353);
        let n = &p * &q * 12u8;
        let f = factor(&n);
        assert_eq!(f.value(), n);
        assert_eq!(f.largest_prime(), Some(&p));
        assert!(f.primes().all(is_probable_prime));

        let square = &q * &q * &p;
        let f = factor(&square);
        assert_eq!(f.iter().find(|(r, _)| **r == q).map(|(_, m)| m), Some(2));
        assert_eq!(f.value(), square);
    }

    #[test]
    fn from_iterator_merges() {
        let f: Factorization = vec![(big(3), 1), (big(2), 1), (big(3), 2), (big(5), 0)]
            .into_iter()
            .collect();
        assert_eq!(f.len(), 2);
        assert_eq!(f.value(), big(54));
    }
}
