use rust_i18n::t;
use thiserror::Error;

/// Represents errors that can occur in the preference store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error variant for database-related errors.
    #[error("{0}")]
    DatabaseError(String),

    /// Stored bytes that are not valid UTF-8.
    #[error("{0}")]
    InvalidData(String),

    /// Error variant for I/O-related errors.
    #[error("{0}")]
    IoError(String),
}

/// Macro to implement the `From` trait for converting specific error types into `StoreError`.
///
/// # Arguments
///
/// - `$variant`: The variant of `StoreError` to use.
/// - `$error_type`: The type of the error to convert from.
/// - `$t_key`: The translation key used to format the message.
macro_rules! impl_from_error {
    ($variant:ident, $error_type:ty, $t_key:literal) => {
        impl From<$error_type> for StoreError {
            fn from(err: $error_type) -> Self {
                StoreError::$variant(t!($t_key, error = err.to_string()).to_string())
            }
        }
    };
}

impl_from_error!(DatabaseError, sled::Error, "db.database_error");
impl_from_error!(InvalidData, std::string::FromUtf8Error, "db.invalid_data");
impl_from_error!(IoError, std::io::Error, "db.io_error");
