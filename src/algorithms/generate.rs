//! Generate prime components for the RSA Private Key

use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_traits::One;
use rand_core::CryptoRngCore;
use tracing::{debug, trace};

use crate::algorithms::prime::generate_prime_coprime_to;
use crate::errors::{Error, Result};
use crate::params::{DEFAULT_BITS, DEFAULT_EXPONENT};

/// Smallest modulus size, in bits, accepted by key generation.
pub const MIN_BITS: usize = 64;

/// Public exponents accepted by key generation: the Fermat primes F0 to F4.
pub const FERMAT_EXPONENTS: [u64; 5] = [3, 5, 17, 257, 65537];

/// Number of candidate pairs whose private exponent may fail to exist before
/// key generation gives up.
const MAX_INVERSE_FAILURES: usize = 8;

pub(crate) struct RsaPrivateKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub p: BigUint,
    pub q: BigUint,
}

/// Checks that `exp` lies in `[MIN_PUB_EXPONENT, MAX_PUB_EXPONENT]` and is one
/// of the [`FERMAT_EXPONENTS`].
///
/// Conventional RSA only needs an odd exponent coprime to the totient; key
/// generation here is deliberately limited to the Fermat primes.
pub fn check_public_exponent(exp: u64) -> Result<()> {
    if exp < crate::RsaPublicKey::MIN_PUB_EXPONENT || exp > crate::RsaPublicKey::MAX_PUB_EXPONENT {
        return Err(Error::InvalidExponent);
    }

    if !FERMAT_EXPONENTS.contains(&exp) {
        return Err(Error::InvalidExponent);
    }

    Ok(())
}

/// Generates a two-prime RSA key of exactly `bit_size` bits for the public
/// exponent `exp`.
///
/// `p` is drawn with `bit_size / 2` bits and `q` with the remaining bits, each
/// redrawn until `gcd(exp, prime - 1) = 1`. Pairs with `p = q` or whose
/// product misses the target size are discarded and the search restarts.
///
/// A `bit_size` of 0 means [`DEFAULT_BITS`] and an `exp` of 0 means
/// [`DEFAULT_EXPONENT`].
pub(crate) fn generate_prime_pair_key<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: u64,
) -> Result<RsaPrivateKeyComponents> {
    let bit_size = if bit_size == 0 { DEFAULT_BITS } else { bit_size };
    let exp = if exp == 0 { DEFAULT_EXPONENT } else { exp };

    if bit_size < MIN_BITS {
        return Err(Error::InvalidParameter);
    }
    check_public_exponent(exp)?;

    debug!(bits = bit_size, exp, "generating RSA key");

    let e = BigUint::from(exp);
    let p_bits = bit_size / 2;
    let q_bits = bit_size - p_bits;

    let mut attempts = 0usize;
    let mut inverse_failures = 0usize;

    loop {
        attempts += 1;

        let (p, p_rejected) = generate_prime_coprime_to(rng, p_bits, &e)?;
        let (q, q_rejected) = generate_prime_coprime_to(rng, q_bits, &e)?;
        trace!(attempt = attempts, p_rejected, q_rejected, "drew prime pair");

        if p == q {
            trace!(attempt = attempts, "discarding pair: p == q");
            continue;
        }

        let n = &p * &q;
        if n.bits() != bit_size {
            trace!(
                attempt = attempts,
                bits = n.bits(),
                "discarding pair: modulus size mismatch"
            );
            continue;
        }

        let totient = (&p - BigUint::one()) * (&q - BigUint::one());
        let d = match e.clone().mod_inverse(&totient).and_then(IntoBigUint::into_biguint) {
            Some(d) => d,
            None => {
                // Should never happen: both primes were drawn coprime to e.
                inverse_failures += 1;
                trace!(attempt = attempts, "discarding pair: no private exponent");
                if inverse_failures >= MAX_INVERSE_FAILURES {
                    return Err(Error::KeyGenerationExhausted);
                }
                continue;
            }
        };

        debug!(bits = bit_size, attempts, "generated RSA key");

        return Ok(RsaPrivateKeyComponents { n, e, d, p, q });
    }
}
