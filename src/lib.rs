//! saltdns
//!
//! A dynamic DNS update endpoint guarded by a stateless challenge-response scheme.
//!
//! Clients fetch a signed, short-lived challenge, answer it with a password derived from a
//! shared secret and the challenge salt, and have one DNS record at [Vultr] or [Cloudflare]
//! pointed at an address. See [`api`] for the wire protocol and [`auth`] for the scheme.
//!
//! [Vultr]: https://www.vultr.com/
//! [Cloudflare]: https://www.cloudflare.com/
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod updater;

pub use api::new as new_http;
pub use auth::Signer;
pub use config::{Config, SharedConfig};
