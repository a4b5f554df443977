use crate::auth::signer::Signer;
use crate::error::Error;
use base64::engine::general_purpose;
use base64::{alphabet, engine, Engine};
use lazy_static::lazy_static;
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;
use time::OffsetDateTime;

/// Number of random bytes in a challenge salt.
pub const SALT_LEN_BYTES: usize = 9;

lazy_static! {
    static ref SALT_ENGINE: engine::GeneralPurpose =
        engine::GeneralPurpose::new(&alphabet::URL_SAFE, general_purpose::PAD);
}

/// A signed challenge handed to a client before it may submit an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub salt: String,
    pub time: i64,
    pub sign: String,
}

/// The message signed for a challenge: the salt followed by the decimal issue time.
pub(crate) fn signing_message(salt: &str, time: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(salt.len() + time.len());
    message.extend_from_slice(salt.as_bytes());
    message.extend_from_slice(time.as_bytes());
    message
}

/// Issues challenges without recording them. A challenge is later verified purely from its
/// own fields and the shared [`Signer`].
pub struct ChallengeIssuer {
    signer: Arc<Signer>,
    rng: SystemRandom,
}

impl ChallengeIssuer {
    pub fn new(signer: Arc<Signer>) -> Self {
        Self {
            signer,
            rng: SystemRandom::new(),
        }
    }

    /// Issue a challenge stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropySourceFailure`] if no salt can be generated.
    pub fn issue(&self) -> Result<Challenge, Error> {
        self.issue_at(OffsetDateTime::now_utc())
    }

    pub fn issue_at(&self, now: OffsetDateTime) -> Result<Challenge, Error> {
        let mut buf = [0u8; SALT_LEN_BYTES];
        self.rng
            .fill(&mut buf)
            .map_err(|_| Error::EntropySourceFailure)?;

        let salt = SALT_ENGINE.encode(buf);
        let time = now.unix_timestamp();
        let sign = self
            .signer
            .sign(&signing_message(&salt, &time.to_string()));
        Ok(Challenge { salt, time, sign })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> ChallengeIssuer {
        ChallengeIssuer::new(Arc::new(Signer::from_secret(b"test-key")))
    }

    #[test]
    fn test_issue() {
        let issuer = issuer();
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let challenge = issuer.issue_at(now).unwrap();

        assert_eq!(challenge.time, 1_700_000_000);
        // 9 bytes encode to 12 characters without padding.
        assert_eq!(challenge.salt.len(), 12);
        assert!(challenge
            .salt
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(
            challenge.sign,
            issuer
                .signer
                .sign(format!("{}1700000000", challenge.salt).as_bytes())
        );
    }

    #[test]
    fn test_salts_are_fresh() {
        let issuer = issuer();
        let a = issuer.issue().unwrap();
        let b = issuer.issue().unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.sign, b.sign);
    }

    #[test]
    fn test_signing_message() {
        assert_eq!(signing_message("abc", "123"), b"abc123".to_vec());
    }
}
