//! Generic RSA implementation

use num_bigint::{BigInt, BigUint, IntoBigUint, Sign};
use num_traits::{Signed, Zero};
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Raw RSA encryption of m with the public key. No padding is performed.
///
/// Fails with [`Error::MessageTooLarge`] unless `m < n`.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if m >= key.n() {
        return Err(Error::MessageTooLarge);
    }

    Ok(m.modpow(key.e(), key.n()))
}

/// Raw RSA decryption with no padding.
///
/// Uses the Chinese remainder theorem when the key carries precomputed
/// `dp`, `dq` and `qinv`, and `c^d mod n` otherwise. Both paths produce the
/// same plaintext. Neither path is constant time.
#[inline]
pub fn rsa_decrypt(priv_key: &impl PrivateKeyParts, c: &BigUint) -> Result<BigUint> {
    if c >= priv_key.n() {
        return Err(Error::CiphertextTooLarge);
    }

    if priv_key.n().is_zero() {
        return Err(Error::InvalidModulus);
    }

    match (priv_key.dp(), priv_key.dq(), priv_key.qinv()) {
        (Some(dp), Some(dq), Some(qinv)) => decrypt_crt(priv_key, dp, dq, qinv, c),
        _ => Ok(decrypt_direct(priv_key, c)),
    }
}

/// Raw RSA decryption which re-encrypts the result and fails with
/// [`Error::Internal`] if it does not reproduce `c`. Guards against faults in
/// the CRT computation.
#[inline]
pub fn rsa_decrypt_and_check(priv_key: &impl PrivateKeyParts, c: &BigUint) -> Result<BigUint> {
    let m = rsa_decrypt(priv_key, c)?;

    let check = rsa_encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

fn decrypt_direct(priv_key: &impl PrivateKeyParts, c: &BigUint) -> BigUint {
    c.modpow(priv_key.d(), priv_key.n())
}

/// m = mq + q * (qinv * (mp - mq) mod p)
fn decrypt_crt(
    priv_key: &impl PrivateKeyParts,
    dp: &BigUint,
    dq: &BigUint,
    qinv: &BigInt,
    c: &BigUint,
) -> Result<BigUint> {
    let [p, q] = priv_key.primes() else {
        return Err(Error::InvalidPrime);
    };

    let mut mp = BigInt::from_biguint(Sign::Plus, c.modpow(dp, p));
    let mut mq = BigInt::from_biguint(Sign::Plus, c.modpow(dq, q));
    let mut p = BigInt::from_biguint(Sign::Plus, p.clone());
    let mut q = BigInt::from_biguint(Sign::Plus, q.clone());

    let mut h = &mp - &mq;
    h *= qinv;
    h %= &p;
    // `%` keeps the sign of the dividend.
    if h.is_negative() {
        h += &p;
    }

    let mut m = &h * &q;
    m += &mq;

    // clear tmp values
    mp.zeroize();
    mq.zeroize();
    h.zeroize();
    p.zeroize();
    q.zeroize();

    m.into_biguint().ok_or(Error::Internal)
}
