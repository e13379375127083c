//! Error types for the data layer
//!
//! Every failure escaping a fetch is translated into the closed [`ApiError`]
//! taxonomy before it reaches a view-model; raw transport errors never leak
//! past the interactor boundary.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the cache store itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A slot was read back with a different type than it was written with.
    /// This is a caller bug (two queries sharing one key), so it surfaces
    /// instead of degrading into a miss.
    #[error("cached value is not a {expected}")]
    TypeMismatch {
        /// The type the caller asked for
        expected: &'static str,
    },
}

// == Api Error Enum ==
/// The failure kinds a view-model can observe from a data fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend did not answer in time
    #[error("request timed out")]
    RequestTimeout,

    /// The session is missing, expired, or not allowed to see this data
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The backend rejected the request itself
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The backend failed
    #[error("server error: {0}")]
    ServerError(String),

    /// Anything that fits none of the kinds above
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    // == Status Mapping ==
    /// Maps a backend HTTP status to an error kind.
    ///
    /// Interactor authors use this when the transport hands them a status
    /// code, so their fetch errors arrive pre-classified.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized(message),
            408 => Self::RequestTimeout,
            400..=499 => Self::BadRequest(message),
            500..=599 => Self::ServerError(message),
            _ => Self::Unknown(message),
        }
    }

    // == Translation ==
    /// Translates an arbitrary fetch failure into the taxonomy.
    ///
    /// An error that is already an [`ApiError`] passes through unchanged; a
    /// tokio timeout becomes [`RequestTimeout`](Self::RequestTimeout);
    /// everything else collapses into [`Unknown`](Self::Unknown) carrying
    /// the error's message chain.
    pub fn from_fetch(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api) => api,
            Err(err) if err.is::<tokio::time::error::Elapsed>() => Self::RequestTimeout,
            Err(err) => Self::Unknown(format!("{err:#}")),
        }
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        Self::Unknown(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for interactor calls.
pub type Result<T> = std::result::Result<T, ApiError>;
