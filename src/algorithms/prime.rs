//! Generation of random primes.

use alloc::vec;
use num_bigint::{prime::probably_prime, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Number of extra Miller-Rabin rounds handed to [`probably_prime`]. Together
/// with the Lucas test this keeps the false positive rate below 2^-100.
const PRIME_TEST_ROUNDS: usize = 50;

/// A list of small, prime numbers that allows us to rapidly
/// exclude some fraction of composite candidates when searching for a random
/// prime. This list is truncated at the point where the product exceeds
/// a u64. It does not include two because we ensure that the candidates are
/// odd by construction.
const SMALL_PRIMES: [u8; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// The product of the values in `SMALL_PRIMES`.
const SMALL_PRIMES_PRODUCT: u64 = 16_294_579_238_595_022_365;

/// Draws a random prime of exactly `bit_size` bits with its two most
/// significant bits set, so that the product of two such primes is never one
/// bit short.
///
/// Fails with [`Error::EntropySource`] as soon as the random source does.
pub(crate) fn generate_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
) -> Result<BigUint> {
    if bit_size < 2 {
        return Err(Error::InvalidParameter);
    }

    let mut b = bit_size % 8;
    if b == 0 {
        b = 8;
    }

    let bytes_len = (bit_size + 7) / 8;
    let mut bytes = Zeroizing::new(vec![0u8; bytes_len]);
    let product = BigUint::from(SMALL_PRIMES_PRODUCT);

    loop {
        rng.try_fill_bytes(bytes.as_mut_slice())?;

        // Clear bits in the first byte to make sure the candidate has a size <= bits.
        bytes[0] &= ((1u32 << (b as u32)) - 1) as u8;

        // Set the top two bits.
        if b >= 2 {
            bytes[0] |= 3u8.wrapping_shl(b as u32 - 2);
        } else {
            bytes[0] |= 1;
            if bytes_len > 1 {
                bytes[1] |= 0x80;
            }
        }

        bytes[bytes_len - 1] |= 1u8;

        let mut p = BigUint::from_bytes_be(&bytes);
        let Some(rem) = (&p % &product).to_u64() else {
            continue;
        };

        let delta = (0..1u64 << 20).step_by(2).find(|delta| {
            let m = rem + delta;
            SMALL_PRIMES.iter().all(|prime| {
                let prime = u64::from(*prime);
                m % prime != 0 || (bit_size <= 6 && m == prime)
            })
        });

        match delta {
            Some(0) => {}
            Some(delta) => p += BigUint::from(delta),
            None => continue,
        }

        // Adding delta may carry into an extra bit.
        if p.bits() == bit_size && probably_prime(&p, PRIME_TEST_ROUNDS) {
            return Ok(p);
        }
    }
}

/// Draws random primes of `bit_size` bits until one satisfies
/// `gcd(exp, p - 1) = 1`. Returns the prime together with the number of
/// candidates discarded for sharing a factor with `exp`.
pub(crate) fn generate_prime_coprime_to<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
) -> Result<(BigUint, usize)> {
    let mut rejected = 0;
    loop {
        let prime = generate_prime(rng, bit_size)?;
        if exp.gcd(&(&prime - BigUint::one())).is_one() {
            return Ok((prime, rejected));
        }
        rejected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use rand_core::{CryptoRng, RngCore};

    #[test]
    fn test_prime_small() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for n in 2..10 {
            let p = generate_prime(&mut rng, n).unwrap();

            assert_eq!(p.bits(), n);
            assert!(probably_prime(&p, 32));
        }
    }

    #[test]
    fn test_prime_top_bits_set() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for bits in [32, 33, 64, 127, 256] {
            let p = generate_prime(&mut rng, bits).unwrap();
            assert_eq!(p.bits(), bits);
            assert_eq!(&p >> (bits - 2), BigUint::from(3u32));
        }
    }

    #[test]
    fn test_gen_prime_512() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let p = generate_prime(&mut rng, 512).unwrap();
        assert_eq!(p.bits(), 512);
    }

    #[test]
    fn test_prime_too_small() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        assert_eq!(generate_prime(&mut rng, 1), Err(Error::InvalidParameter));
    }

    #[test]
    fn test_coprime_to_exponent() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for exp in [3u32, 5, 17, 257, 65537] {
            let exp = BigUint::from(exp);
            for _ in 0..5 {
                let (p, _) = generate_prime_coprime_to(&mut rng, 64, &exp).unwrap();
                assert!(exp.gcd(&(&p - BigUint::one())).is_one());
            }
        }
    }

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, _: &mut [u8]) {
            unimplemented!()
        }

        fn try_fill_bytes(&mut self, _: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
            let code = core::num::NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap();
            Err(rand_core::Error::from(code))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn test_entropy_failure_propagates() {
        assert_eq!(
            generate_prime(&mut FailingRng, 64),
            Err(Error::EntropySource)
        );
    }
}
