use crate::auth::ValidatedRequest;
use crate::error::Error;
use crate::updater::DynUpdater;
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};

/// Address registered when a client goes offline.
pub const OFFLINE_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// The update semantics selected by a request's `reqc` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `0`: register the address passed with the request.
    Register,
    /// `1`: go offline.
    Offline,
    /// `2`: register the address the request arrived from, and echo it back.
    RegisterObserved,
}

impl Operation {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Operation::Register),
            1 => Some(Operation::Offline),
            2 => Some(Operation::RegisterObserved),
            _ => None,
        }
    }
}

/// The outcome of a successful dispatch, rendered to the client as meta tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    pub retc: &'static str,
    pub addr: Option<IpAddr>,
}

impl UpdateResult {
    pub fn into_fields(self) -> BTreeMap<&'static str, String> {
        let mut fields = BTreeMap::from([("retc", self.retc.to_string())]);
        if let Some(addr) = self.addr {
            fields.insert("addr", addr.to_string());
        }
        fields
    }
}

/// Executes verified requests against an [`Updater`][crate::updater::Updater]. Each successful
/// dispatch makes exactly one update call.
pub struct Dispatcher {
    updater: DynUpdater,
}

impl Dispatcher {
    pub fn new(updater: DynUpdater) -> Self {
        Self { updater }
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownOperation`] for an unrecognised `req_code` without calling the
    /// updater, and [`Error::MissingField`] if an address operation carries no address.
    /// Updater failures are returned unmodified.
    pub async fn dispatch(&self, req: &ValidatedRequest) -> Result<UpdateResult, Error> {
        let operation =
            Operation::from_code(req.req_code).ok_or(Error::UnknownOperation(req.req_code))?;
        match operation {
            Operation::Register => {
                let addr = req.addr.ok_or(Error::MissingField("addr"))?;
                self.updater.update(addr).await?;
                Ok(UpdateResult {
                    retc: "0",
                    addr: None,
                })
            }
            Operation::Offline => {
                self.updater.update(OFFLINE_ADDR).await?;
                Ok(UpdateResult {
                    retc: "2",
                    addr: None,
                })
            }
            Operation::RegisterObserved => {
                let addr = req.addr.ok_or(Error::MissingField("addr"))?;
                self.updater.update(addr).await?;
                Ok(UpdateResult {
                    retc: "0",
                    addr: Some(addr),
                })
            }
        }
    }
}
