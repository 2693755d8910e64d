//! Configuration constants and utilities for mailbox
//!
//! Holds the API endpoint settings shared by every subcommand, plus the
//! fixed sizes the terminal sessions are built around.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// Page size used by the remote list endpoint
pub const BATCH_SIZE: u64 = 20;

/// Number of rows visible in the browse table
pub const TABLE_HEIGHT: usize = 10;

/// Maximum length of the "from" field
pub const FROM_CHAR_LIMIT: usize = 32;

/// Maximum length of the "subject" field
pub const SUBJECT_CHAR_LIMIT: usize = 64;

/// Maximum length of the "message" field
pub const MESSAGE_CHAR_LIMIT: usize = 10000;

/// Environment variable consulted when `--api` is not given
pub const API_ENV_VAR: &str = "MAILBOX_API";

/// Environment variable consulted when `--usr` is not given
pub const USERNAME_ENV_VAR: &str = "MAILBOX_USR";

/// Environment variable consulted when `--pwd` is not given
pub const PASSWORD_ENV_VAR: &str = "MAILBOX_PWD";

/// Environment variable selecting the tracing filter
pub const LOG_LEVEL_ENV_VAR: &str = "MAILBOX_LOG_LEVEL";

/// Environment variable naming a file that receives log output
pub const LOG_FILE_ENV_VAR: &str = "MAILBOX_LOG_FILE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid argument for \"--api\" flag (required)")]
    MissingApi,

    #[error("invalid API endpoint: {0}")]
    InvalidUrl(String),

    #[error("invalid scheme: must be http or https")]
    InvalidScheme,
}

/// Connection settings for the remote Mailbox API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl ApiConfig {
    /// Build a config from a raw endpoint, validating and normalizing it
    pub fn new(
        api: &str,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_api_url(api)?,
            username,
            password,
        })
    }

    /// Build a config from command line values, falling back to the environment
    pub fn from_args(
        api: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api = api
            .map(str::to_string)
            .or_else(|| env_value(API_ENV_VAR))
            .ok_or(ConfigError::MissingApi)?;
        let username = username
            .map(str::to_string)
            .or_else(|| env_value(USERNAME_ENV_VAR));
        let password = password
            .map(str::to_string)
            .or_else(|| env_value(PASSWORD_ENV_VAR));

        Self::new(&api, username, password)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Basic auth credentials, only when both parts are present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pwd)) if !user.is_empty() && !pwd.is_empty() => Some((user, pwd)),
            _ => None,
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var_os(name)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.is_empty())
}

fn repeated_slashes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/{2,}").expect("valid regex"))
}

/// Validate an API endpoint and normalize its path.
///
/// Repeated slashes in the path collapse into one and a trailing slash is
/// dropped, so request paths can be appended with a plain `format!`.
pub fn normalize_api_url(api: &str) -> Result<String, ConfigError> {
    if api.trim().is_empty() {
        return Err(ConfigError::MissingApi);
    }

    let mut parsed = Url::parse(api).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidScheme);
    }

    let collapsed = repeated_slashes().replace_all(parsed.path(), "/");
    let trimmed = collapsed.trim_end_matches('/').to_string();
    parsed.set_path(&trimmed);

    // Url always renders an empty path as "/", strip it again
    let rendered = parsed.to_string();
    match (parsed.query(), parsed.fragment()) {
        (None, None) => Ok(rendered.trim_end_matches('/').to_string()),
        _ => Ok(rendered),
    }
}
