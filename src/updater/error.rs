//! Error types for the update check
//!
//! None of these escape `UpdateManager::tick`; they are logged there and the
//! previous state is kept. They surface only from construction.

use rust_i18n::t;

use crate::error::ConfigError;
use crate::http::HttpError;

/// Errors that can occur during the update check
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// A version string could not be understood
    #[error("{}", t!("updater.errors.version_parse", version = _0, error = _1))]
    VersionParseError(String, String),

    /// The update URL or its query could not be built
    #[error("{}", t!("updater.errors.invalid_url", url = _0, error = _1))]
    InvalidUrl(String, String),

    /// Transport failure while contacting the update server
    #[error("{}", t!("updater.errors.update_request", error = _0))]
    UpdateRequestError(String),

    /// The schedule settings cannot produce a check time
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// The request task went away without a result
    #[error("{}", t!("updater.errors.request_abandoned"))]
    RequestAbandoned,
}

impl From<HttpError> for UpdateError {
    fn from(err: HttpError) -> Self {
        UpdateError::UpdateRequestError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UpdateError>;
