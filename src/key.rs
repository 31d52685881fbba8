use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use num_bigint::{BigInt, BigUint, IntoBigUint, ModInverse, Sign};
use num_traits::{One, ToPrimitive, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithms::generate::generate_prime_pair_key;
use crate::errors::{Error, Result};
use crate::params::{KeyParams, DEFAULT_EXPONENT};
use crate::raw;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: power to which a plaintext message is raised in
    /// order to encrypt it.
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    d: BigUint,
    /// Prime factors `[p, q]` of N.
    primes: [BigUint; 2],
    /// precomputed values to speed up private operations
    precomputed: Option<PrecomputedValues>,
}

/// Values for decryption through the Chinese remainder theorem.
#[derive(Clone)]
pub(crate) struct PrecomputedValues {
    /// D mod (P-1)
    pub(crate) dp: BigUint,
    /// D mod (Q-1)
    pub(crate) dq: BigUint,
    /// Q^-1 mod P
    pub(crate) qinv: BigInt,
}

impl Zeroize for PrecomputedValues {
    fn zeroize(&mut self) {
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for PrecomputedValues {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Eq for RsaPrivateKey {}

impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.d == other.d
            && self.primes == other.primes
    }
}

impl AsRef<RsaPublicKey> for RsaPrivateKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.pubkey_components
    }
}

impl Hash for RsaPrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Domain separator for RSA private keys
        state.write(b"RsaPrivateKey");
        Hash::hash(&self.pubkey_components, state);
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.pubkey_components.n)
            .field("e", &self.pubkey_components.e)
            .field("precomputed", &self.precomputed.is_some())
            .finish_non_exhaustive()
    }
}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.primes.zeroize();
        self.clear_precomputed();
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Minimum value of the public exponent `e`.
    pub const MIN_PUB_EXPONENT: u64 = 2;

    /// Maximum value of the public exponent `e`.
    pub const MAX_PUB_EXPONENT: u64 = (1 << 31) - 1;

    /// Create a new public key from its components.
    ///
    /// This function accepts public keys with a modulus of any size and any
    /// exponent in `[MIN_PUB_EXPONENT, MAX_PUB_EXPONENT]`.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let k = Self { n, e };
        check_public(&k)?;
        Ok(k)
    }

    /// Encrypt `msg` with this key. See [`crate::encrypt`].
    pub fn encrypt(&self, msg: &[u8]) -> Result<Vec<u8>> {
        raw::encrypt(msg, self)
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl RsaPrivateKey {
    /// Generate a new RSA key pair of the given bit size using the passed in
    /// `rng` and the default public exponent 65537.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<RsaPrivateKey> {
        Self::new_with_exp(rng, bit_size, DEFAULT_EXPONENT)
    }

    /// Generate a new RSA key pair of the given bit size and the public
    /// exponent using the passed in `rng`.
    ///
    /// The exponent must be one of [`crate::FERMAT_EXPONENTS`]. The returned
    /// key always carries its CRT values.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
        exp: u64,
    ) -> Result<RsaPrivateKey> {
        let components = generate_prime_pair_key(rng, bit_size, exp)?;

        let mut key = RsaPrivateKey {
            pubkey_components: RsaPublicKey {
                n: components.n,
                e: components.e,
            },
            d: components.d,
            primes: [components.p, components.q],
            precomputed: None,
        };

        check_public(&key)?;
        key.precompute().map_err(|_| Error::KeyGenerationExhausted)?;

        Ok(key)
    }

    /// Constructs an RSA key pair from individual components.
    ///
    /// The components are checked with [`RsaPrivateKey::validate`] and the
    /// CRT values are computed before the key is returned.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<RsaPrivateKey> {
        let mut k = RsaPrivateKey {
            pubkey_components: RsaPublicKey::new(n, e)?,
            d,
            primes: [p, q],
            precomputed: None,
        };

        k.validate()?;
        k.precompute()?;

        Ok(k)
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    ///
    /// Generally this is not needed since `RsaPrivateKey` implements the `PublicKeyParts` trait,
    /// but it can occasionally be useful to discard the private information entirely.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Performs the calculations needed for CRT decryption. Does nothing if
    /// they are already present.
    pub fn precompute(&mut self) -> Result<()> {
        if self.precomputed.is_some() {
            return Ok(());
        }

        let [p, q] = &self.primes;
        let dp = &self.d % (p - BigUint::one());
        let dq = &self.d % (q - BigUint::one());
        let qinv = q
            .clone()
            .mod_inverse(p)
            .and_then(IntoBigUint::into_biguint)
            .ok_or(Error::InvalidPrime)?;

        self.precomputed = Some(PrecomputedValues {
            dp,
            dq,
            qinv: BigInt::from_biguint(Sign::Plus, qinv),
        });

        Ok(())
    }

    /// Clears precomputed values by setting to None. Decryption then uses
    /// the private exponent directly.
    pub fn clear_precomputed(&mut self) {
        self.precomputed = None;
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        let [p, q] = &self.primes;
        if p <= &BigUint::one() || q <= &BigUint::one() || p == q {
            return Err(Error::InvalidPrime);
        }

        // Check that Πprimes == n.
        if &(p * q) != self.n() {
            return Err(Error::InvalidModulus);
        }

        // Check that de ≡ 1 mod p-1, for each prime.
        // This implies that e is coprime to each p-1 as e has a multiplicative
        // inverse. Therefore e is coprime to lcm(p-1,q-1) = λ(N).
        let de = &self.d * self.e();
        for prime in &self.primes {
            if !(&de % (prime - BigUint::one())).is_one() {
                return Err(Error::InvalidExponent);
            }
        }

        Ok(())
    }

    /// Decrypt `ciphertext` with this key. See [`crate::decrypt`].
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        raw::decrypt(ciphertext, self)
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn primes(&self) -> &[BigUint] {
        &self.primes
    }

    fn dp(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|p| &p.dp)
    }

    fn dq(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|p| &p.dq)
    }

    fn qinv(&self) -> Option<&BigInt> {
        self.precomputed.as_ref().map(|p| &p.qinv)
    }
}

/// A generated private key together with its public half.
///
/// The public key is the private key's own `n` and `e`, not a separate copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: RsaPrivateKey,
}

impl KeyPair {
    /// Generate a key pair as described by `params`.
    pub fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R, params: &KeyParams) -> Result<Self> {
        RsaPrivateKey::new_with_exp(rng, params.bits, params.exp).map(Self::from)
    }

    /// Returns the public half of the pair.
    pub fn public_key(&self) -> &RsaPublicKey {
        self.private_key.as_ref()
    }

    /// Returns the private half of the pair.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Consumes the pair, returning the private key.
    pub fn into_private_key(self) -> RsaPrivateKey {
        self.private_key
    }
}

impl From<RsaPrivateKey> for KeyPair {
    fn from(private_key: RsaPrivateKey) -> Self {
        Self { private_key }
    }
}

/// Check that the public key is well formed and has an exponent within acceptable bounds.
#[inline]
pub fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    if public_key.n().is_zero() {
        return Err(Error::InvalidModulus);
    }

    let e = public_key.e().to_u64().ok_or(Error::InvalidExponent)?;

    if !(RsaPublicKey::MIN_PUB_EXPONENT..=RsaPublicKey::MAX_PUB_EXPONENT).contains(&e) {
        return Err(Error::InvalidExponent);
    }

    Ok(())
}
