//! HTTP API for authenticated dynamic DNS updates.
//!
//! All responses are minimal HTML documents carrying their fields as meta tags, e.g.
//! `<meta name="retc" content="0">`, for dynamic DNS clients that scrape meta tags.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) with the field `ok=healthy` when the service is operational.
//!
//! ## Any other path (GET)
//!
//!   Without a query string, issues a challenge with the fields `salt`, `time` and `sign`.
//!
//!   With a query string, performs an update. Expected parameters:
//!
//!   | key    | value                                                            |
//!   |--------|------------------------------------------------------------------|
//!   | `salt` | `salt` of a challenge                                            |
//!   | `time` | `time` of the same challenge                                     |
//!   | `sign` | `sign` of the same challenge                                     |
//!   | `user` | configured username                                              |
//!   | `pass` | [`derive_password`][crate::auth::derive_password] of the secret and `salt` |
//!   | `domn` | domain being updated                                             |
//!   | `reqc` | `0` register `addr`, `1` go offline, `2` register the caller's IP |
//!   | `addr` | address to register, required when `reqc=0`                      |
//!
//!   A challenge is only accepted within the configured
//!   [freshness window][crate::config::Config::freshness_window] of its `time`.
//!
//!   On success returns HTTP 200 (OK) with `retc=0` (for `reqc=0`), `retc=2` (for `reqc=1`), or
//!   `retc=0` and the registered `addr` (for `reqc=2`).
//!
//! Failures return HTTP 400 (Bad Request) for invalid or unauthenticated requests, HTTP 500
//! (Internal Server Error) when the DNS provider update fails, and HTTP 405 (Method Not Allowed)
//! for methods other than `GET`. The body carries a single `error` field.

mod api_error;
mod model;
mod routes;
pub mod server;

pub use server::new;
