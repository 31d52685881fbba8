#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Usage
//!
//! ```
//! use textbook_rsa::{decrypt, encrypt, KeyPair, KeyParams};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let params = KeyParams::default().with_bits(1024);
//! let key_pair = KeyPair::generate(&mut rng, &params).expect("failed to generate a key");
//!
//! // Encrypt
//! let data = b"hello world";
//! let enc_data = encrypt(&data[..], key_pair.public_key()).expect("failed to encrypt");
//! assert_ne!(&data[..], &enc_data[..]);
//!
//! // Decrypt
//! let dec_data = decrypt(&enc_data, key_pair.private_key()).expect("failed to decrypt");
//! assert_eq!(&data[..], &dec_data[..]);
//! ```
//!
//! # Key generation
//!
//! [`generate_key_pair`] draws two primes of `bits / 2` and `bits - bits / 2`
//! bits, redrawing each until `gcd(e, p - 1) = 1`. Pairs that are equal or
//! whose product is not exactly `bits` long are discarded. The public exponent
//! must be one of [`FERMAT_EXPONENTS`], which is stricter than RSA itself
//! requires.
//!
//! # Decryption
//!
//! Generated keys carry `dp`, `dq` and `qinv` and decrypt through the Chinese
//! remainder theorem. [`RsaPrivateKey::clear_precomputed`] switches a key to
//! plain `c^d mod n`; both paths return the same plaintext.
//!
//! # Security
//!
//! This is raw RSA: there is no padding, so encryption is deterministic and
//! malleable, and modular exponentiation is neither constant time nor
//! blinded. Do not use it where an adversary can observe timing or choose
//! ciphertexts.

#[cfg(doctest)]
pub struct ReadmeDoctests;

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod errors;
pub mod traits;

mod key;
mod params;
mod raw;

pub mod hazmat;

use rand_core::CryptoRngCore;

pub use crate::{
    algorithms::generate::{check_public_exponent, FERMAT_EXPONENTS, MIN_BITS},
    errors::{Error, Result},
    key::{check_public, KeyPair, RsaPrivateKey, RsaPublicKey},
    params::{KeyParams, DEFAULT_BITS, DEFAULT_EXPONENT},
    raw::{decrypt, encrypt},
    traits::{PrivateKeyParts, PublicKeyParts},
};

/// Generate a key pair with a `bits`-sized modulus and public exponent `exp`.
///
/// A `bits` of 0 selects [`DEFAULT_BITS`] and an `exp` of 0 selects
/// [`DEFAULT_EXPONENT`].
///
/// Fails with [`Error::InvalidParameter`] if `bits` is below [`MIN_BITS`] and
/// with [`Error::InvalidExponent`] if `exp` is not one of
/// [`FERMAT_EXPONENTS`]. Errors from `rng` surface as
/// [`Error::EntropySource`].
pub fn generate_key_pair<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
    exp: u64,
) -> Result<KeyPair> {
    KeyPair::generate(rng, &KeyParams::new(bits, exp))
}
