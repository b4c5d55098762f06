use rust_i18n::t;
use thiserror::Error;

/// Problems with the configuration file or one of its values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read. Holds the path and the cause.
    #[error("{}", t!("config.read_failed", path = _0, error = _1))]
    Read(String, String),

    /// The file is not valid YAML for `AppConfig`.
    #[error("{}", t!("config.parse_failed", path = _0, error = _1))]
    Parse(String, String),

    /// A field parsed but holds an unusable value. Holds the field and the cause.
    #[error("{}", t!("config.invalid_value", field = _0, error = _1))]
    InvalidValue(String, String),
}

/// The single, unified error type for the entire application.
///
/// Wraps the module-specific errors that can surface while the application
/// is being set up. Errors raised inside the update loop or the follower are
/// logged where they happen and never reach this type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Db(#[from] crate::db::StoreError),

    /// Errors originating from the HTTP module.
    #[error(transparent)]
    Http(#[from] crate::http::HttpError),

    #[error(transparent)]
    Updater(#[from] crate::updater::UpdateError),

    #[error("{message}")]
    Logger { message: String },
}

/// A universal Result type for fallible setup functions.
pub type Result<T> = std::result::Result<T, AppError>;
