//! Keyed signatures over challenge material.

use crate::error::Error;
use data_encoding::BASE32;
use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};
use subtle::ConstantTimeEq;

/// Length of the process-lifetime signing key, in bytes.
pub const KEY_LEN: usize = 32;

/// Length of an encoded signature, in characters.
pub const SIGNATURE_LEN: usize = 20;

/// Signs byte strings with HMAC-SHA256 under a key that lives as long as the process.
///
/// A [`Signer`] is immutable once built. Signatures are deterministic for one key, and a key
/// is never persisted, so signatures issued before a restart don't verify after it.
pub struct Signer {
    key: hmac::Key,
}

impl Signer {
    /// Create a [`Signer`] with a fresh key read from the operating system's random source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropySourceFailure`] if `rng` can't produce random bytes. ring's
    /// random sources are sealed, so this path can only be reached by a failing OS source.
    pub fn generate(rng: &SystemRandom) -> Result<Self, Error> {
        let mut secret = [0u8; KEY_LEN];
        rng.fill(&mut secret)
            .map_err(|_| Error::EntropySourceFailure)?;
        Ok(Self::from_secret(&secret))
    }

    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret),
        }
    }

    /// Return the [`SIGNATURE_LEN`] character base-32 signature of `message`.
    pub fn sign(&self, message: &[u8]) -> String {
        let tag = hmac::sign(&self.key, message);
        let mut signature = BASE32.encode(tag.as_ref());
        signature.truncate(SIGNATURE_LEN);
        signature
    }

    /// Check `signature` against the signature of `message` without short-circuiting on the
    /// first differing byte.
    pub fn verify(&self, message: &[u8], signature: &str) -> bool {
        constant_time_eq(self.sign(message).as_bytes(), signature.as_bytes())
    }
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let signer = Signer::from_secret(b"process-key");
        let first = signer.sign(b"c2FsdHNhbHRz1700000000");
        let second = signer.sign(b"c2FsdHNhbHRz1700000000");
        assert_eq!(first, second);
        assert_eq!(first.len(), SIGNATURE_LEN);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
    }

    #[test]
    fn test_key_changes_signature() {
        let a = Signer::generate(&SystemRandom::new()).unwrap();
        let b = Signer::generate(&SystemRandom::new()).unwrap();
        assert_ne!(a.sign(b"message"), b.sign(b"message"));
    }

    #[test]
    fn test_message_changes_signature() {
        let signer = Signer::from_secret(b"process-key");
        assert_ne!(signer.sign(b"salt1700000000"), signer.sign(b"salt1700000001"));
    }

    #[test]
    fn test_verify() {
        let signer = Signer::from_secret(b"process-key");
        let signature = signer.sign(b"message");
        assert!(signer.verify(b"message", &signature));
        assert!(!signer.verify(b"massage", &signature));
        assert!(!signer.verify(b"message", &signature[..SIGNATURE_LEN - 1]));
        assert!(!signer.verify(b"message", ""));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
        // Same length, differing only in the first byte.
        assert!(!constant_time_eq(b"Xbcdefghij", b"abcdefghij"));
    }
}
