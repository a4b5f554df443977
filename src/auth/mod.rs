//! Challenge-response authentication for update requests.
//!
//! 1. A client fetches a [`Challenge`]: a random salt, the issue time, and a [`Signer`]
//!    signature over both.
//! 2. Within the freshness window the client sends the challenge back with its username and
//!    a password derived from the shared secret and the salt (see [`derive_password`]).
//! 3. The [`Verifier`] recomputes the signature and the derived password. Nothing is stored
//!    between steps 1 and 3, so the server holds no per-client state.

mod challenge;
mod credential;
mod request;
pub mod signer;
mod verifier;

pub use challenge::{Challenge, ChallengeIssuer};
pub use credential::{derive_password, Credential};
pub use request::UpdateRequest;
pub use signer::Signer;
pub use verifier::{ValidatedRequest, Verifier};
