//! Byte-level textbook RSA encryption and decryption.
//!
//! Messages and ciphertexts are read as unsigned big-endian integers and
//! results are returned in minimal big-endian form: leading zero bytes are
//! stripped and a value of zero is encoded as the single byte `0x00`.
//! Callers that need fixed-width output pad the result themselves.

use alloc::vec::Vec;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::algorithms::rsa::{rsa_decrypt, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::PublicKeyParts;

/// Encrypts `msg` as `m^e mod n`.
///
/// `msg` must be non-empty and, read as an integer, smaller than the
/// modulus. Messages of at most `pub_key.size() - 1` bytes always fit.
pub fn encrypt(msg: &[u8], pub_key: &RsaPublicKey) -> Result<Vec<u8>> {
    if msg.is_empty() {
        return Err(Error::EmptyMessage);
    }

    let m = Zeroizing::new(BigUint::from_bytes_be(msg));
    if *m >= *pub_key.n() {
        return Err(Error::MessageTooLarge);
    }

    let c = rsa_encrypt(pub_key, &m)?;
    Ok(c.to_bytes_be())
}

/// Decrypts `ciphertext` as `c^d mod n`, through the CRT values when the key
/// carries them.
///
/// `ciphertext` must be non-empty and, read as an integer, smaller than the
/// modulus.
pub fn decrypt(ciphertext: &[u8], priv_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    if ciphertext.is_empty() {
        return Err(Error::EmptyCiphertext);
    }

    let c = BigUint::from_bytes_be(ciphertext);
    if c >= *priv_key.n() {
        return Err(Error::CiphertextTooLarge);
    }

    let m = Zeroizing::new(rsa_decrypt(priv_key, &c)?);
    Ok(m.to_bytes_be())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use rand_core::RngCore;

    fn small_key() -> RsaPrivateKey {
        RsaPrivateKey::from_components(
            BigUint::from_u64(3233).unwrap(),
            BigUint::from_u64(17).unwrap(),
            BigUint::from_u64(2753).unwrap(),
            BigUint::from_u64(61).unwrap(),
            BigUint::from_u64(53).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_input() {
        let key = small_key();
        assert_eq!(encrypt(&[], key.as_ref()), Err(Error::EmptyMessage));
        assert_eq!(decrypt(&[], &key), Err(Error::EmptyCiphertext));
    }

    #[test]
    fn test_too_large() {
        let key = small_key();
        // 3233 = 0x0ca1
        assert_eq!(
            encrypt(&[0x0c, 0xa1], key.as_ref()),
            Err(Error::MessageTooLarge)
        );
        assert_eq!(
            encrypt(&[0xff, 0xff], key.as_ref()),
            Err(Error::MessageTooLarge)
        );
        assert_eq!(decrypt(&[0x0c, 0xa1], &key), Err(Error::CiphertextTooLarge));
        assert!(encrypt(&[0x0c, 0xa0], key.as_ref()).is_ok());
    }

    #[test]
    fn test_textbook_bytes() {
        let key = small_key();
        // 65^17 mod 3233 = 2790 = 0x0ae6
        let c = encrypt(&[65], key.as_ref()).unwrap();
        assert_eq!(c, vec![0x0a, 0xe6]);
        assert_eq!(decrypt(&c, &key).unwrap(), vec![65]);
    }

    #[test]
    fn test_zero_encoding() {
        let key = small_key();
        assert_eq!(encrypt(&[0], key.as_ref()).unwrap(), vec![0]);
        assert_eq!(encrypt(&[0, 0, 0], key.as_ref()).unwrap(), vec![0]);
        assert_eq!(decrypt(&[0], &key).unwrap(), vec![0]);
        assert_eq!(decrypt(&[0, 0], &key).unwrap(), vec![0]);
    }

    #[test]
    fn test_one_is_fixed_point() {
        let key = small_key();
        assert_eq!(encrypt(&[1], key.as_ref()).unwrap(), vec![1]);
        assert_eq!(decrypt(&[1], &key).unwrap(), vec![1]);
    }

    #[test]
    fn test_leading_zeros_are_stripped() {
        let key = small_key();
        let c = encrypt(&[0, 0, 65], key.as_ref()).unwrap();
        assert_eq!(decrypt(&c, &key).unwrap(), vec![65]);
    }

    #[test]
    fn test_roundtrip_full_width() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let key = RsaPrivateKey::new(&mut rng, 512).unwrap();
        let pub_key = key.to_public_key();
        let mut msg = vec![0u8; pub_key.size() - 1];

        for _ in 0..10 {
            rng.fill_bytes(&mut msg);
            msg[0] |= 0x80;
            let c = encrypt(&msg, &pub_key).unwrap();
            assert!(c.len() <= pub_key.size());
            assert_ne!(c, msg);
            assert_eq!(decrypt(&c, &key).unwrap(), msg);
        }
    }

    #[test]
    fn test_roundtrip_without_crt() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let key = RsaPrivateKey::new(&mut rng, 256).unwrap();
        let mut direct = key.clone();
        direct.clear_precomputed();

        let c = encrypt(b"hello world", key.as_ref()).unwrap();
        assert_eq!(decrypt(&c, &key).unwrap(), b"hello world");
        assert_eq!(decrypt(&c, &direct).unwrap(), b"hello world");
    }
}
