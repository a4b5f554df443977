//! An [`Updater`][super::Updater] for DNS records hosted by [Cloudflare].
//!
//! Uses `PATCH /client/v4/zones/{zone_id}/dns_records/{record_id}` with `{"content": addr}`.
//! Cloudflare wraps every response in an envelope whose `success` flag is authoritative, so a
//! 2xx response with `"success": false` is still a failure.
//!
//! [Cloudflare]: https://developers.cloudflare.com/api/operations/dns-records-for-a-zone-patch-dns-record
use crate::error::Error;
use crate::updater::{provider_failure, Updater};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com";

#[derive(Serialize)]
struct UpdateRecordBody {
    content: String,
}

#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

pub struct CloudflareUpdater {
    http: reqwest::Client,
    url: String,
    api_token: String,
}

impl CloudflareUpdater {
    pub fn new(
        http: reqwest::Client,
        base_url: Option<&str>,
        api_token: &str,
        zone_id: &str,
        record_id: &str,
    ) -> Self {
        let base_url = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        Self {
            http,
            url: format!("{base_url}/client/v4/zones/{zone_id}/dns_records/{record_id}"),
            api_token: api_token.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Updater for CloudflareUpdater {
    async fn update(&self, addr: IpAddr) -> Result<(), Error> {
        tracing::debug!("updating cloudflare record to {addr}");
        let response = self
            .http
            .patch(&self.url)
            .bearer_auth(&self.api_token)
            .json(&UpdateRecordBody {
                content: addr.to_string(),
            })
            .send()
            .await
            .map_err(|err| provider_failure("cloudflare", err))?;

        let status = response.status();
        let envelope: Envelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(provider_failure("cloudflare", format!("HTTP {status}")))
            }
            Err(err) => return Err(provider_failure("cloudflare", err)),
        };
        if envelope.success && status.is_success() {
            return Ok(());
        }

        let messages: Vec<String> = envelope
            .errors
            .iter()
            .map(|e| format!("{} ({})", e.message, e.code))
            .collect();
        if messages.is_empty() {
            Err(provider_failure("cloudflare", format!("HTTP {status}")))
        } else {
            Err(provider_failure("cloudflare", messages.join("; ")))
        }
    }
}
