use thiserror::Error;

use crate::http_client::HttpError;

/// Closed failure taxonomy of the transport client.
///
/// The repository passes these through unchanged; controllers turn them into
/// user-facing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("the server returned no data")]
    NoData,

    #[error("{}", invalid_response_message(.status))]
    InvalidResponse { status: Option<u16> },

    #[error("network error: {0}")]
    Network(HttpError),

    #[error("failed to decode response: {0}")]
    Decoding(String),
}

fn invalid_response_message(status: &Option<u16>) -> String {
    match *status {
        Some(status) => format!("invalid response (HTTP status {status})"),
        None => String::from("invalid response"),
    }
}

/// Payload-free classification of [`ApiError`], used for matching in callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    InvalidUrl,
    NoData,
    InvalidResponse,
    Network,
    Decoding,
}

impl ApiError {
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl(message.into())
    }

    pub const fn invalid_response(status: u16) -> Self {
        Self::InvalidResponse {
            status: Some(status),
        }
    }

    pub fn decoding(cause: impl std::fmt::Display) -> Self {
        Self::Decoding(cause.to_string())
    }

    pub const fn kind(&self) -> ApiErrorKind {
        match self {
            Self::InvalidUrl(_) => ApiErrorKind::InvalidUrl,
            Self::NoData => ApiErrorKind::NoData,
            Self::InvalidResponse { .. } => ApiErrorKind::InvalidResponse,
            Self::Network(_) => ApiErrorKind::Network,
            Self::Decoding(_) => ApiErrorKind::Decoding,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind() {
            ApiErrorKind::InvalidUrl => "api.invalid_url",
            ApiErrorKind::NoData => "api.no_data",
            ApiErrorKind::InvalidResponse => "api.invalid_response",
            ApiErrorKind::Network => "api.network",
            ApiErrorKind::Decoding => "api.decoding",
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        Self::Network(error)
    }
}

/// Errors raised while loading [`crate::ApiConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {name} is not set")]
    MissingVar { name: &'static str },

    #[error("environment variable {name} must not be empty")]
    EmptyVar { name: &'static str },

    #[error("base URL '{value}' is not a valid http(s) URL")]
    InvalidBaseUrl { value: String },
}
