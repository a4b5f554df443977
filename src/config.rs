use crate::auth::Credential;
use crate::error::Error;
use crate::updater::{CloudflareUpdater, DynUpdater, VultrUpdater};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    #[serde(flatten)]
    pub credential: Credential,
    /// How long after issuance a challenge is accepted.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_freshness_window")]
    pub freshness_window: Duration,
    /// How far ahead of the server clock a challenge's issue time may be.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_max_clock_skew")]
    pub max_clock_skew: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout: Duration,
    pub provider: ProviderConfig,
}

/// DNS provider whose record is updated by accepted requests.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Vultr {
        api_key: String,
        domain: String,
        record_id: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    Cloudflare {
        api_token: String,
        zone_id: String,
        record_id: String,
        #[serde(default)]
        base_url: Option<String>,
    },
}

fn default_freshness_window() -> Duration {
    Duration::from_secs(10)
}

fn default_max_clock_skew() -> Duration {
    Duration::from_secs(5)
}

fn default_provider_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.credential_is_set()?;
        Ok(conf)
    }

    /// Build the [`Updater`][crate::updater::Updater] for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpClient`] if the provider's HTTP client can't be constructed.
    pub fn updater(&self) -> Result<DynUpdater, Error> {
        let http = reqwest::Client::builder()
            .timeout(self.provider_timeout)
            .build()?;
        Ok(match &self.provider {
            ProviderConfig::Vultr {
                api_key,
                domain,
                record_id,
                base_url,
            } => Arc::new(VultrUpdater::new(
                http,
                base_url.as_deref(),
                api_key,
                domain,
                record_id,
            )),
            ProviderConfig::Cloudflare {
                api_token,
                zone_id,
                record_id,
                base_url,
            } => Arc::new(CloudflareUpdater::new(
                http,
                base_url.as_deref(),
                api_token,
                zone_id,
                record_id,
            )),
        })
    }

    fn credential_is_set(&self) -> Result<(), Error> {
        if self.credential.username().is_empty() {
            return Err(Error::InvalidConfig("username must not be empty".to_string()));
        }
        if !self.credential.has_password() {
            return Err(Error::InvalidConfig("password must not be empty".to_string()));
        }
        Ok(())
    }
}
