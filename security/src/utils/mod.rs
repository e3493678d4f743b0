use error::SecurityError;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// Different errors and error messages used in the library.
pub mod error;

/// A result type specialized to `SecurityError`.
pub type Result<T> = core::result::Result<T, SecurityError>;

/// An insertion-ordered set using a fast non-cryptographic hasher.
pub type IndexSet<T> = indexmap::IndexSet<T, foldhash::fast::RandomState>;

/// Base-2 logarithm of an arbitrary-precision integer, accurate to `f64` precision.
/// Returns negative infinity for zero.
pub fn log2(n: &BigUint) -> f64 {
    let bits = n.bits();
    let shift = bits.saturating_sub(64);
    let top = (n >> shift).to_u64().unwrap_or(u64::MAX);
    (top as f64).log2() + shift as f64
}

/// Runs both closures, in parallel when the `parallel` feature is enabled.
#[inline]
pub fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        rayon::join(a, b)
    }
    #[cfg(not(feature = "parallel"))]
    {
        (a(), b())
    }
}
