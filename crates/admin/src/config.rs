//! Admin client configuration, read from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use catalogx_core::UserId;
use catalogx_products::{ExportOptions, PAGE_SIZE, Paginator, QuoteEscape};

use crate::session::Session;

pub const API_URL_ENV: &str = "CATALOGX_API_URL";
pub const AUTH_TOKEN_ENV: &str = "CATALOGX_AUTH_TOKEN";
pub const USER_ID_ENV: &str = "CATALOGX_USER_ID";
pub const PAGE_SIZE_ENV: &str = "CATALOGX_PAGE_SIZE";
pub const CURRENCY_SYMBOL_ENV: &str = "CATALOGX_CURRENCY_SYMBOL";
pub const DATE_FORMAT_ENV: &str = "CATALOGX_EXPORT_DATE_FORMAT";
pub const QUOTE_ESCAPE_ENV: &str = "CATALOGX_EXPORT_QUOTE_ESCAPE";
pub const EXPORT_DIR_ENV: &str = "CATALOGX_EXPORT_DIR";
pub const CATALOGUE_URL_ENV: &str = "CATALOGX_CATALOGUE_URL";
pub const FALLBACK_THUMBNAIL_ENV: &str = "CATALOGX_FALLBACK_THUMBNAIL";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub api_base_url: String,
    #[serde(skip_serializing)]
    pub auth_token: Option<String>,
    pub user_id: Option<UserId>,
    pub page_size: usize,
    pub export: ExportOptions,
    /// Where the command-line host writes exports.
    pub export_dir: PathBuf,
    /// Locator of the pre-built catalogue document.
    pub catalogue_document: String,
    /// Image shown for records without a thumbnail.
    pub fallback_thumbnail: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            user_id: None,
            page_size: PAGE_SIZE,
            export: ExportOptions::default(),
            export_dir: PathBuf::from("."),
            catalogue_document: "/catalogue.pdf".to_string(),
            fallback_thumbnail: "/logo.png".to_string(),
        }
    }
}

impl AdminConfig {
    /// Load from process environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` as the variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup(API_URL_ENV) {
            Some(url) => config.api_base_url = url,
            None => tracing::warn!(
                "{API_URL_ENV} not set; using default {}",
                config.api_base_url
            ),
        }

        config.auth_token = lookup(AUTH_TOKEN_ENV).filter(|t| !t.trim().is_empty());

        if let Some(raw) = lookup(USER_ID_ENV) {
            let user_id = raw
                .parse::<UserId>()
                .map_err(|e| ConfigError::invalid(USER_ID_ENV, e.to_string()))?;
            config.user_id = Some(user_id);
        }

        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            config.page_size = raw.trim().parse().map_err(|_| {
                ConfigError::invalid(PAGE_SIZE_ENV, format!("not a number: {raw:?}"))
            })?;
        }

        if let Some(symbol) = lookup(CURRENCY_SYMBOL_ENV) {
            config.export.currency_symbol = symbol;
        }
        if let Some(format) = lookup(DATE_FORMAT_ENV) {
            config.export.date_format = format;
        }
        if let Some(raw) = lookup(QUOTE_ESCAPE_ENV) {
            config.export.quote_escape = match raw.trim().to_lowercase().as_str() {
                "backslash" => QuoteEscape::Backslash,
                "doubled" => QuoteEscape::Doubled,
                _ => {
                    return Err(ConfigError::invalid(
                        QUOTE_ESCAPE_ENV,
                        "must be one of: backslash, doubled",
                    ));
                }
            };
        }
        if let Some(dir) = lookup(EXPORT_DIR_ENV) {
            config.export_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup(CATALOGUE_URL_ENV) {
            config.catalogue_document = url;
        }
        if let Some(path) = lookup(FALLBACK_THUMBNAIL_ENV) {
            config.fallback_thumbnail = path;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paginator()?;
        self.export
            .validate()
            .map_err(|e| ConfigError::invalid(DATE_FORMAT_ENV, e.to_string()))?;
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::invalid(API_URL_ENV, "must not be empty"));
        }
        Ok(())
    }

    pub fn paginator(&self) -> Result<Paginator, ConfigError> {
        Paginator::new(self.page_size)
            .map_err(|e| ConfigError::invalid(PAGE_SIZE_ENV, e.to_string()))
    }

    /// The configured session, if a token is present.
    ///
    /// Without an explicit user id a fresh one is minted for this process.
    pub fn session(&self) -> Option<Session> {
        self.auth_token
            .as_ref()
            .map(|token| Session::new(self.user_id.unwrap_or_default(), token.clone()))
    }
}
