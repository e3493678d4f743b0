//! Bit-length thresholds against which curve parameters are judged.

/// Minimum Pollard-Rho cost (in bits) on the curve main subgroup.
pub const RHO_SECURITY: u32 = 125;

/// Minimum cost (in bits) of the cover and GHS attacks on sextic extensions.
pub const EXTENSION_SECURITY: u32 = 125;

/// Minimum Pollard-Rho cost (in bits) on the quadratic twist.
pub const TWIST_SECURITY: u32 = 100;

/// Minimum bit-length of the embedding degree.
pub const EMBEDDING_DEGREE_SECURITY: u32 = 200;

/// The `π/4` factor in the expected Pollard-Rho running time.
pub const PI_4: f64 = core::f64::consts::FRAC_PI_4;

/// Thresholds used to turn raw metrics into pass/fail verdicts.
///
/// The extension-specific predicates always compare against [`EXTENSION_SECURITY`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SecurityThresholds {
    /// See [`RHO_SECURITY`].
    pub rho: u32,
    /// See [`TWIST_SECURITY`].
    pub twist: u32,
    /// See [`EMBEDDING_DEGREE_SECURITY`].
    pub embedding_degree: u32,
}

impl Default for SecurityThresholds {
    fn default() -> Self {
        Self {
            rho: RHO_SECURITY,
            twist: TWIST_SECURITY,
            embedding_degree: EMBEDDING_DEGREE_SECURITY,
        }
    }
}
