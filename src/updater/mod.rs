//! DNS record updates.
//!
//! Supports a generic interface for pointing one DNS record at an address. Two implementations
//! are provided, [`vultr::VultrUpdater`] and [`cloudflare::CloudflareUpdater`], each updating a
//! single record chosen by [configuration][crate::config::ProviderConfig].
//!
//! The [`Dispatcher`] maps a verified request's operation code onto an [`Updater`] call.

use crate::error::Error;
use std::net::IpAddr;
use std::sync::Arc;

pub mod cloudflare;
pub(crate) mod dispatch;
pub mod vultr;

pub use cloudflare::CloudflareUpdater;
pub use dispatch::{Dispatcher, Operation, UpdateResult};
pub use vultr::VultrUpdater;

/// `DynUpdater` is a type alias for an [`Updater`] shared by concurrent requests.
pub type DynUpdater = Arc<dyn Updater + Send + Sync>;

/// An async trait describing a DNS provider able to set the address of a record.
#[async_trait::async_trait]
pub trait Updater {
    /// Point the record at `addr`.
    ///
    /// Failures are returned as [`Error::ProviderFailure`] and are not retried.
    async fn update(&self, addr: IpAddr) -> Result<(), Error>;
}

pub(crate) fn provider_failure(provider: &str, err: impl std::fmt::Display) -> Error {
    Error::ProviderFailure(format!("{provider}: {err}"))
}
