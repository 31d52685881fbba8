//! Key generation parameters.

/// Modulus size, in bits, used when none is requested.
pub const DEFAULT_BITS: usize = 2048;

/// Public exponent used when none is requested (F4).
pub const DEFAULT_EXPONENT: u64 = 65537;

/// Requested modulus size and public exponent for [`crate::KeyPair::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyParams {
    /// Modulus size in bits, at least [`crate::MIN_BITS`]. 0 selects
    /// [`DEFAULT_BITS`].
    pub bits: usize,
    /// Public exponent, one of [`crate::FERMAT_EXPONENTS`]. 0 selects
    /// [`DEFAULT_EXPONENT`].
    pub exp: u64,
}

impl KeyParams {
    /// Parameters for a `bits`-sized modulus with public exponent `exp`.
    pub const fn new(bits: usize, exp: u64) -> Self {
        Self { bits, exp }
    }

    /// Replace the modulus size.
    pub const fn with_bits(self, bits: usize) -> Self {
        Self { bits, ..self }
    }

    /// Replace the public exponent.
    pub const fn with_exp(self, exp: u64) -> Self {
        Self { exp, ..self }
    }
}

impl Default for KeyParams {
    fn default() -> Self {
        Self::new(DEFAULT_BITS, DEFAULT_EXPONENT)
    }
}
