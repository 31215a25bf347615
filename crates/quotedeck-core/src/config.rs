//! Upstream API configuration.
//!
//! Values come from the process environment only. The API key is never
//! logged and is redacted from `Debug` output.

use std::fmt::{Debug, Formatter};

use reqwest::Url;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "QUOTEDECK_BASE_URL";
pub const API_HOST_VAR: &str = "QUOTEDECK_API_HOST";
pub const API_KEY_VAR: &str = "QUOTEDECK_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://yh-finance.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "yh-finance.p.rapidapi.com";

/// Base URL and the two header credentials sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    api_host: String,
    api_key: String,
}

impl ApiConfig {
    /// Builds a config from explicit values. The base URL must be an absolute
    /// http(s) URL; a trailing slash is dropped so paths can be appended as-is.
    pub fn new(
        base_url: impl Into<String>,
        api_host: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidBaseUrl { value: base_url }),
        }

        Ok(Self {
            base_url,
            api_host: api_host.into(),
            api_key: api_key.into(),
        })
    }

    /// Reads the config from `QUOTEDECK_*` environment variables.
    ///
    /// The key is mandatory; base URL and host fall back to the yh-finance defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingVar { name: API_KEY_VAR })?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyVar { name: API_KEY_VAR });
        }

        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let api_host = lookup(API_HOST_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_owned());

        Self::new(base_url, api_host, api_key.trim())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl Debug for ApiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_host", &self.api_host)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = ApiConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "secret")]))
            .expect("config should load");

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.api_host(), DEFAULT_API_HOST);
        assert_eq!(config.api_key(), "secret");
    }

    #[test]
    fn missing_key_is_reported() {
        let err = ApiConfig::from_lookup(lookup_from(&[])).expect_err("must fail");
        assert_eq!(err, ConfigError::MissingVar { name: API_KEY_VAR });
    }

    #[test]
    fn blank_key_is_rejected() {
        let err =
            ApiConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")])).expect_err("must fail");
        assert_eq!(err, ConfigError::EmptyVar { name: API_KEY_VAR });
    }

    #[test]
    fn overrides_are_honoured_and_trailing_slash_dropped() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "k"),
            (BASE_URL_VAR, "http://127.0.0.1:8080/"),
            (API_HOST_VAR, "local.test"),
        ]))
        .expect("config should load");

        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.api_host(), "local.test");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = ApiConfig::new("ftp://quotes.example", "h", "k").expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = ApiConfig::new(DEFAULT_BASE_URL, DEFAULT_API_HOST, "super-secret")
            .expect("valid config");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
