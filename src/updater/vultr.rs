//! An [`Updater`][super::Updater] for DNS records hosted by [Vultr].
//!
//! Uses the v2 API: `PATCH /v2/domains/{domain}/records/{record_id}` with `{"data": addr}`.
//!
//! [Vultr]: https://www.vultr.com/api/#tag/dns/operation/update-dns-domain-record
use crate::error::Error;
use crate::updater::{provider_failure, Updater};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

const DEFAULT_BASE_URL: &str = "https://api.vultr.com";

#[derive(Serialize)]
struct UpdateRecordBody {
    data: String,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

pub struct VultrUpdater {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl VultrUpdater {
    pub fn new(
        http: reqwest::Client,
        base_url: Option<&str>,
        api_key: &str,
        domain: &str,
        record_id: &str,
    ) -> Self {
        let base_url = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        Self {
            http,
            url: format!("{base_url}/v2/domains/{domain}/records/{record_id}"),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Updater for VultrUpdater {
    async fn update(&self, addr: IpAddr) -> Result<(), Error> {
        tracing::debug!("updating vultr record to {addr}");
        let response = self
            .http
            .patch(&self.url)
            .bearer_auth(&self.api_key)
            .json(&UpdateRecordBody {
                data: addr.to_string(),
            })
            .send()
            .await
            .map_err(|err| provider_failure("vultr", err))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body: ErrorBody = response.json().await.unwrap_or_default();
        if body.error.is_empty() {
            Err(provider_failure("vultr", format!("HTTP {status}")))
        } else {
            Err(provider_failure(
                "vultr",
                format!("HTTP {status}: {}", body.error),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn updater(server: &MockServer) -> VultrUpdater {
        VultrUpdater::new(
            reqwest::Client::new(),
            Some(&server.uri()),
            "vultr-key",
            "example.com",
            "cb676a46",
        )
    }

    #[tokio::test]
    async fn test_update() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v2/domains/example.com/records/cb676a46"))
            .and(header("authorization", "Bearer vultr-key"))
            .and(body_json(json!({"data": "203.0.113.5"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        updater(&server)
            .update("203.0.113.5".parse().unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": "Invalid API token.", "status": 401})),
            )
            .mount(&server)
            .await;

        let err = updater(&server)
            .update("0.0.0.0".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProviderFailure(_)));
        assert_eq!(
            err.to_string(),
            "vultr: HTTP 401 Unauthorized: Invalid API token."
        );
    }

    #[tokio::test]
    async fn test_unreachable() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let updater = VultrUpdater::new(reqwest::Client::new(), Some(&uri), "k", "d", "r");
        let err = updater
            .update("203.0.113.5".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProviderFailure(_)));
    }
}
