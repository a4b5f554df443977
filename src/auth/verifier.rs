use crate::auth::challenge::signing_message;
use crate::auth::credential::Credential;
use crate::auth::request::{non_empty, UpdateRequest};
use crate::auth::signer::Signer;
use crate::error::Error;
use crate::updater::Operation;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;

/// An update request that passed every check of [`Verifier::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub user: String,
    pub domain: String,
    pub req_code: i64,
    /// The address to register. `None` unless the operation registers an address.
    pub addr: Option<IpAddr>,
}

/// Authenticates update requests against challenges issued by the same [`Signer`].
pub struct Verifier {
    signer: Arc<Signer>,
    credential: Credential,
    freshness_window: i64,
    max_clock_skew: i64,
}

impl Verifier {
    pub fn new(
        signer: Arc<Signer>,
        credential: Credential,
        freshness_window: Duration,
        max_clock_skew: Duration,
    ) -> Self {
        Self {
            signer,
            credential,
            freshness_window: seconds(freshness_window),
            max_clock_skew: seconds(max_clock_skew),
        }
    }

    /// Verify `req` against the current time. `peer` is the address the request arrived
    /// from, substituted for `addr` when the operation asks for it.
    ///
    /// # Errors
    ///
    /// Returns the first failed check, in order: [`Error::MissingField`] for `salt`, `time` or
    /// `sign`, [`Error::MalformedTime`], [`Error::Expired`], [`Error::SignatureMismatch`],
    /// [`Error::CredentialMismatch`], [`Error::MissingField`] for `domn`,
    /// [`Error::MalformedReqCode`] for an absent or non-integer `reqc`, then
    /// [`Error::MissingField`] or [`Error::MalformedAddr`] for `addr`.
    pub fn verify(&self, req: &UpdateRequest, peer: IpAddr) -> Result<ValidatedRequest, Error> {
        self.verify_at(req, peer, OffsetDateTime::now_utc())
    }

    pub fn verify_at(
        &self,
        req: &UpdateRequest,
        peer: IpAddr,
        now: OffsetDateTime,
    ) -> Result<ValidatedRequest, Error> {
        let salt = non_empty(req.salt.as_ref()).ok_or(Error::MissingField("salt"))?;
        let time = non_empty(req.time.as_ref()).ok_or(Error::MissingField("time"))?;
        let sign = non_empty(req.sign.as_ref()).ok_or(Error::MissingField("sign"))?;

        let issued_at: i64 = time.parse().map_err(|_| Error::MalformedTime)?;
        let now = now.unix_timestamp();
        if issued_at.saturating_add(self.freshness_window) < now
            || issued_at > now.saturating_add(self.max_clock_skew)
        {
            return Err(Error::Expired);
        }

        if !self.signer.verify(&signing_message(salt, time), sign) {
            return Err(Error::SignatureMismatch);
        }

        let user = req.user.as_deref().unwrap_or_default();
        let pass = req.pass.as_deref().unwrap_or_default();
        if !self.credential.matches(user, pass, salt) {
            return Err(Error::CredentialMismatch);
        }

        let domain = non_empty(req.domain.as_ref()).ok_or(Error::MissingField("domn"))?;
        let req_code: i64 = non_empty(req.req_code.as_ref())
            .ok_or(Error::MalformedReqCode)?
            .parse()
            .map_err(|_| Error::MalformedReqCode)?;

        let addr = match Operation::from_code(req_code) {
            Some(Operation::Register) => {
                let addr = non_empty(req.addr.as_ref()).ok_or(Error::MissingField("addr"))?;
                Some(addr.parse::<IpAddr>().map_err(|_| Error::MalformedAddr)?)
            }
            Some(Operation::RegisterObserved) => Some(peer),
            Some(Operation::Offline) | None => None,
        };

        Ok(ValidatedRequest {
            user: user.to_string(),
            domain: domain.to_string(),
            req_code,
            addr,
        })
    }
}

fn seconds(d: Duration) -> i64 {
    i64::try_from(d.as_secs()).unwrap_or(i64::MAX)
}
