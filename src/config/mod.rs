//! Configuration management.
//!
//! Credentials and API settings come from a JSON file (default `.taconfig`)
//! with environment variables layered on top.
//!
//! # Resolution
//!
//! 1. An explicit `-c <path>` must exist; a missing file is an error.
//! 2. With the default name, `./.taconfig` is tried, then `~/.taconfig`.
//!    If neither exists, defaults are used.
//! 3. `TWITTER_*` and `TUA_API_BASE` environment variables override any
//!    value loaded from the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Config file name looked up when `-c` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".taconfig";

/// Production API root.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_CONSUMER_KEY: &str = "TWITTER_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "TWITTER_CONSUMER_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
pub const ENV_ACCESS_TOKEN_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";
pub const ENV_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";
pub const ENV_API_BASE: &str = "TUA_API_BASE";

/// tua configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    /// Accepted for compatibility with user-context config files; the
    /// timeline is read with application-only auth.
    pub access_token: Option<String>,
    #[serde(rename = "access_token_secret")]
    pub access_secret: Option<String>,
    pub bearer_token: Option<String>,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// How the client should authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Ready-to-use application bearer token.
    Bearer(String),
    /// Consumer key and secret to exchange for a bearer token.
    Consumer { key: String, secret: String },
}

impl Config {
    /// Overlay values from a variable lookup (normally the process
    /// environment). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let fields = [
            (ENV_CONSUMER_KEY, &mut self.consumer_key),
            (ENV_CONSUMER_SECRET, &mut self.consumer_secret),
            (ENV_ACCESS_TOKEN, &mut self.access_token),
            (ENV_ACCESS_TOKEN_SECRET, &mut self.access_secret),
            (ENV_BEARER_TOKEN, &mut self.bearer_token),
            (ENV_API_BASE, &mut self.api_base),
        ];
        for (name, field) in fields {
            if let Some(value) = get(name) {
                debug!(var = name, "Config value overridden from environment");
                *field = Some(value);
            }
        }
    }

    /// Pick the credentials to authenticate with. A bearer token wins over
    /// consumer credentials.
    ///
    /// # Errors
    ///
    /// Returns `Config` if neither a bearer token nor a complete consumer
    /// key/secret pair is available.
    pub fn credentials(&self) -> Result<Credentials> {
        if let Some(token) = non_empty(self.bearer_token.as_deref()) {
            return Ok(Credentials::Bearer(token.to_string()));
        }

        match (
            non_empty(self.consumer_key.as_deref()),
            non_empty(self.consumer_secret.as_deref()),
        ) {
            (Some(key), Some(secret)) => Ok(Credentials::Consumer {
                key: key.to_string(),
                secret: secret.to_string(),
            }),
            _ => Err(Error::Config(format!(
                "Missing credentials: set {ENV_BEARER_TOKEN}, or both {ENV_CONSUMER_KEY} and {ENV_CONSUMER_SECRET}"
            ))),
        }
    }

    /// API root, without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        non_empty(self.api_base.as_deref())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    /// Per-request HTTP timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Home-directory fallback for the default config file.
#[must_use]
pub fn home_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(DEFAULT_CONFIG_FILE))
}

/// Resolve which config file to read, if any.
///
/// # Errors
///
/// Returns `Config` if an explicitly named file does not exist.
pub fn resolve_config_path(requested: &Path) -> Result<Option<PathBuf>> {
    if requested != Path::new(DEFAULT_CONFIG_FILE) {
        if !requested.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                requested.display()
            )));
        }
        return Ok(Some(requested.to_path_buf()));
    }

    Ok(std::iter::once(requested.to_path_buf())
        .chain(home_config_path())
        .find(|p| p.is_file()))
}

/// Read and parse a config file.
///
/// # Errors
///
/// Returns `Config` if the file cannot be read or is not valid JSON.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
    })
}

/// Load configuration: file (if any), then environment overrides.
///
/// # Errors
///
/// Returns `Config` if an explicit file is missing or any file is invalid.
pub fn load_config(requested: &Path) -> Result<Config> {
    let mut config = match resolve_config_path(requested)? {
        Some(path) => {
            debug!(path = %path.display(), "Loading config file");
            read_config_file(&path)?
        }
        None => {
            debug!("No config file found, using environment only");
            Config::default()
        }
    };

    config.apply_overrides(|name| std::env::var(name).ok());
    Ok(config)
}
