//! Error types.

/// Alias for [`core::result::Result`] with the `textbook-rsa` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Requested modulus size is below the supported minimum.
    InvalidParameter,

    /// Public exponent is out of range or not an accepted Fermat number.
    InvalidExponent,

    /// Plaintext is empty.
    EmptyMessage,

    /// Ciphertext is empty.
    EmptyCiphertext,

    /// Plaintext, read as an integer, is not smaller than the modulus.
    MessageTooLarge,

    /// Ciphertext, read as an integer, is not smaller than the modulus.
    CiphertextTooLarge,

    /// Key generation could not derive a consistent private key.
    KeyGenerationExhausted,

    /// The random source failed to produce bytes.
    EntropySource,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid prime value.
    InvalidPrime,

    /// Internal error.
    Internal,
}

impl core::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidParameter => write!(f, "too few bits to generate an RSA key"),
            Error::InvalidExponent => write!(f, "invalid public exponent"),
            Error::EmptyMessage => write!(f, "message is empty"),
            Error::EmptyCiphertext => write!(f, "ciphertext is empty"),
            Error::MessageTooLarge => write!(f, "message too large for modulus"),
            Error::CiphertextTooLarge => write!(f, "ciphertext too large for modulus"),
            Error::KeyGenerationExhausted => write!(f, "failed to derive private exponent"),
            Error::EntropySource => write!(f, "random source failure"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

impl From<rand_core::Error> for Error {
    fn from(_err: rand_core::Error) -> Error {
        Error::EntropySource
    }
}
