//! Transport client for the quotes API.
//!
//! Composes `base_url + path + query`, attaches the two RapidAPI headers,
//! performs one GET through the [`HttpClient`] seam and maps the outcome onto
//! [`ApiError`]:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | URL cannot be composed | `InvalidUrl` (no I/O) |
//! | transport failure | `Network` |
//! | HTTP 200 | body decoded as `T`, else `Decoding` |
//! | HTTP 204 | `NoData` |
//! | any other status | `InvalidResponse` |

use std::sync::Arc;

use log::debug;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};

pub const HOST_HEADER: &str = "x-rapidapi-host";
pub const KEY_HEADER: &str = "x-rapidapi-key";

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http_client: Arc<dyn HttpClient>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::default()))
    }

    pub fn with_http_client(config: ApiConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Issues one GET for `path` with `query` and decodes the body as `T`.
    pub async fn request<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = build_url(self.config.base_url(), path, query)?;
        debug!("GET {url}");

        let request = HttpRequest::get(url.as_str())
            .with_header(HOST_HEADER, self.config.api_host())
            .with_header(KEY_HEADER, self.config.api_key());

        let response = self.http_client.execute(request).await.map_err(|error| {
            debug!("GET {} failed: {}", url.path(), error.message());
            ApiError::Network(error)
        })?;
        debug!("GET {} -> {}", url.path(), response.status);

        decode_response(&response)
    }
}

/// Applies the status policy to a received response and decodes the body.
///
/// Shared by the live client and the fixture repository so both report the
/// same errors for the same payload.
pub fn decode_response<T>(response: &HttpResponse) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    match response.status {
        200 => serde_json::from_str(&response.body).map_err(ApiError::decoding),
        204 => Err(ApiError::NoData),
        status => Err(ApiError::invalid_response(status)),
    }
}

/// Joins base URL, path and percent-encoded query pairs into a parsed URL.
pub fn build_url(base_url: &str, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
    if !path.starts_with('/') {
        return Err(ApiError::invalid_url(format!(
            "path '{path}' must start with '/'"
        )));
    }
    if let Some((index, ch)) = path.char_indices().find(|(_, ch)| !is_path_char(*ch)) {
        return Err(ApiError::invalid_url(format!(
            "path contains invalid character {ch:?} at index {index}"
        )));
    }
    if let Some(index) = malformed_escape(path) {
        return Err(ApiError::invalid_url(format!(
            "path has a malformed percent escape at index {index}"
        )));
    }

    let mut raw = format!("{base_url}{path}");
    if !query.is_empty() {
        let encoded = query
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        raw.push('?');
        raw.push_str(&encoded);
    }

    Url::parse(&raw).map_err(|error| ApiError::invalid_url(format!("{raw}: {error}")))
}

// RFC 3986 `pchar` plus '/' and already-escaped '%'.
fn is_path_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '-' | '.'
                | '_'
                | '~'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
                | ':'
                | '@'
                | '/'
                | '%'
        )
}

// Index of the first '%' not followed by two hex digits.
fn malformed_escape(path: &str) -> Option<usize> {
    let bytes = path.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, byte)| **byte == b'%')
        .map(|(index, _)| index)
        .find(|index| {
            !matches!(
                bytes.get(index + 1..index + 3),
                Some([high, low]) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
            )
        })
}
