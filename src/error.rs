//! Error types.

use axum::extract::rejection::QueryRejection;

/// Error enumerates the possible saltdns error states.
///
/// Display strings are short and machine readable: they are sent to clients verbatim in the
/// `error` meta tag of failed responses, so they never carry key material or credentials.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a required query parameter of an update request is absent or empty. The
    /// value is the wire name of the parameter, e.g. `sign`.
    #[error("required {0}")]
    MissingField(&'static str),

    /// Returned when the `time` parameter isn't an integer Unix timestamp.
    #[error("malformed time")]
    MalformedTime,

    /// Returned when a challenge is used outside of its
    /// [freshness window][crate::config::Config::freshness_window], or claims to be issued
    /// further in the future than [`Config::max_clock_skew`][crate::config::Config::max_clock_skew]
    /// allows.
    #[error("time out")]
    Expired,

    /// Returned when the `sign` parameter doesn't match the signature recomputed over the
    /// `salt` and `time` parameters.
    #[error("sign not match")]
    SignatureMismatch,

    /// Returned when the `user` or `pass` parameter doesn't match the configured
    /// [`Credential`][crate::auth::Credential].
    #[error("pass not match")]
    CredentialMismatch,

    /// Returned when the `reqc` parameter isn't an integer.
    #[error("malformed reqc")]
    MalformedReqCode,

    /// Returned when the `addr` parameter isn't an IPv4 or IPv6 address.
    #[error("malformed addr")]
    MalformedAddr,

    /// Returned when a verified request carries an operation code the
    /// [`Dispatcher`][crate::updater::Dispatcher] doesn't know.
    #[error("unknown reqc")]
    UnknownOperation(i64),

    /// Returned when the DNS provider rejects an update, or can't be reached. The message
    /// is surfaced to the client unmodified.
    #[error("{0}")]
    ProviderFailure(String),

    /// Returned when the operating system's secure random source fails.
    #[error("entropy source unavailable")]
    EntropySourceFailure,

    /// Returned for any HTTP method other than `GET`.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Returned when the request query string can't be decoded.
    #[error(transparent)]
    QueryExtractorRejection(#[from] QueryRejection),

    /// Returned when [loading a `Config`][crate::config::Config::try_from_file] finds a
    /// semantically invalid value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [trying to load a `Config`][crate::config::Config::try_from_file] fails
    /// due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when the HTTP client used for provider updates can't be constructed.
    #[error("HTTP client error")]
    HttpClient(#[from] reqwest::Error),
}

impl Error {
    /// Whether the error was caused by the client's request rather than by the server or the
    /// DNS provider.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_)
                | Error::MalformedTime
                | Error::Expired
                | Error::SignatureMismatch
                | Error::CredentialMismatch
                | Error::MalformedReqCode
                | Error::MalformedAddr
                | Error::UnknownOperation(_)
                | Error::QueryExtractorRejection(_)
        )
    }
}
