use crate::auth::signer::constant_time_eq;
use ring::digest;
use serde::Deserialize;
use std::fmt;

/// The single username and password accepted by the update endpoint.
///
/// Only a SHA-256 digest of the password (the "seed") is retained after loading. Clients
/// never send the password itself, they send [`derive_password`] of it and the challenge salt.
#[derive(Deserialize, Clone)]
#[serde(from = "CredentialConfig")]
pub struct Credential {
    username: String,
    seed: String,
}

#[derive(Deserialize)]
struct CredentialConfig {
    username: String,
    password: String,
}

impl From<CredentialConfig> for Credential {
    fn from(conf: CredentialConfig) -> Self {
        Credential::new(conf.username, &conf.password)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("seed", &"<redacted>")
            .finish()
    }
}

impl Credential {
    pub fn new(username: impl Into<String>, password: &str) -> Self {
        let seed = if password.is_empty() {
            String::new()
        } else {
            sha256_hex(password.as_bytes())
        };
        Self {
            username: username.into(),
            seed,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn has_password(&self) -> bool {
        !self.seed.is_empty()
    }

    /// The password a client must present alongside `salt`.
    pub fn expected_password(&self, salt: &str) -> String {
        salted(&self.seed, salt)
    }

    /// Whether `user` and `pass` match this credential for a challenge with `salt`.
    pub fn matches(&self, user: &str, pass: &str, salt: &str) -> bool {
        // Evaluate both sides so timing doesn't reveal which one differed.
        let user_ok = constant_time_eq(user.as_bytes(), self.username.as_bytes());
        let pass_ok = constant_time_eq(pass.as_bytes(), self.expected_password(salt).as_bytes());
        user_ok & pass_ok && self.has_password()
    }
}

/// Derive the per-challenge password from a shared secret and a challenge salt:
/// `hex(sha256(hex(sha256(secret)) + "." + salt))`.
pub fn derive_password(secret: &str, salt: &str) -> String {
    salted(&sha256_hex(secret.as_bytes()), salt)
}

fn salted(seed: &str, salt: &str) -> String {
    sha256_hex(format!("{seed}.{salt}").as_bytes())
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(digest::digest(&digest::SHA256, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation() {
        // sha256("secret") = 2bb80d53...; the outer hash covers "<inner hex>.<salt>".
        let inner = sha256_hex(b"secret");
        assert_eq!(
            inner,
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
        let derived = derive_password("secret", "abc");
        assert_eq!(derived, sha256_hex(format!("{inner}.abc").as_bytes()));
        assert_eq!(derived.len(), 64);
    }

    #[test]
    fn test_salt_changes_password() {
        assert_ne!(
            derive_password("secret", "Zm9vYmFyYmF6"),
            derive_password("secret", "cXV4cXV1eGNv")
        );
    }

    #[test]
    fn test_matches() {
        let cred = Credential::new("router", "secret");
        let pass = derive_password("secret", "salt");
        assert_eq!(cred.expected_password("salt"), pass);
        assert!(cred.matches("router", &pass, "salt"));
        assert!(!cred.matches("Router", &pass, "salt"));
        assert!(!cred.matches("router", &pass, "other-salt"));
        assert!(!cred.matches("router", "secret", "salt"));
        assert!(!cred.matches("router", "", "salt"));
    }

    #[test]
    fn test_empty_password_never_matches() {
        let cred = Credential::new("router", "");
        assert!(!cred.has_password());
        let pass = cred.expected_password("salt");
        assert!(!cred.matches("router", &pass, "salt"));
    }
}
