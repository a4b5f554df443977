use crate::api::routes;
use crate::auth::{ChallengeIssuer, Signer, Verifier};
use crate::config::SharedConfig;
use crate::updater::{Dispatcher, DynUpdater};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub issuer: Arc<ChallengeIssuer>,
    pub verifier: Arc<Verifier>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub(super) fn new(config: SharedConfig, signer: Arc<Signer>, updater: DynUpdater) -> Self {
        let verifier = Verifier::new(
            signer.clone(),
            config.credential.clone(),
            config.freshness_window,
            config.max_clock_skew,
        );
        Self {
            issuer: Arc::new(ChallengeIssuer::new(signer)),
            verifier: Arc::new(verifier),
            dispatcher: Arc::new(Dispatcher::new(updater)),
            config,
        }
    }
}

/// Serve the update endpoint on [`Config::api_bind_addr`][crate::config::Config::api_bind_addr].
/// `signer` must be the only [`Signer`] for the life of the process.
pub fn new(
    config: SharedConfig,
    signer: Arc<Signer>,
    updater: DynUpdater,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.api_bind_addr).serve(
        routes::new(AppState::new(config.clone(), signer, updater))
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
}
