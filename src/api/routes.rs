use crate::api::api_error::APIError;
use crate::api::model::MetaPage;
use crate::api::server::AppState;
use crate::auth::UpdateRequest;
use crate::error::Error;
use axum::body::Body;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{Method, Request, Uri};
use axum::routing::{any, get};
use axum::Router;
use std::collections::BTreeMap;
use std::net::{IpAddr, SocketAddr};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    // The query string of an update carries the derived password: only trace the path.
    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        tracing::info_span!("request", method = %req.method(), path = %req.uri().path())
    });
    Router::new()
        .route(
            "/healthcheck",
            get(health_check).fallback(method_not_allowed),
        )
        .route("/", any(endpoint))
        .fallback(endpoint)
        .layer(trace)
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> MetaPage {
    MetaPage::new(BTreeMap::from([("ok", "healthy".to_string())]))
}

#[allow(clippy::unused_async)]
async fn method_not_allowed() -> APIError {
    Error::MethodNotAllowed.into()
}

async fn endpoint(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
) -> Result<MetaPage, APIError> {
    if method != Method::GET {
        return Err(Error::MethodNotAllowed.into());
    }

    if uri.query().map_or(true, str::is_empty) {
        let challenge = state.issuer.issue()?;
        return Ok(challenge.into());
    }

    let Query(pairs): Query<Vec<(String, String)>> =
        Query::try_from_uri(&uri).map_err(Error::from)?;
    let req = UpdateRequest::from_pairs(pairs);
    let client_addr = observed_addr(client_addr);
    let validated = match state.verifier.verify(&req, client_addr) {
        Ok(validated) => validated,
        Err(err) => {
            tracing::debug!("rejected update from {client_addr}: {err}");
            return Err(err.into());
        }
    };

    let result = state.dispatcher.dispatch(&validated).await?;
    tracing::info!(
        "accepted update from {client_addr} for \"{}\": reqc={} addr={:?}",
        validated.domain,
        validated.req_code,
        validated.addr,
    );
    Ok(MetaPage::new(result.into_fields()))
}

/// The client's IP address with any IPv4-mapped IPv6 form unwrapped.
fn observed_addr(client_addr: SocketAddr) -> IpAddr {
    match client_addr.ip() {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(IpAddr::V6(v6), IpAddr::V4),
        v4 @ IpAddr::V4(_) => v4,
    }
}
