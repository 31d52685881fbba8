//! ⚠️ Integer-level RSA functions.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module holds functions that apply RSA's core encryption and decryption
//! primitives to integers. Nothing here pads, blinds, or runs in constant
//! time. They are the building blocks of [`crate::encrypt`] and
//! [`crate::decrypt`] and are exposed for callers that already hold
//! [`BigUint`](crate::BigUint) values.

pub use crate::algorithms::rsa::{rsa_decrypt, rsa_decrypt_and_check, rsa_encrypt};
