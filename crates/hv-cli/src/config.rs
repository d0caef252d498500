//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use hv_api::{Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

const TOKEN_VAR: &str = "HARVEST_API_TOKEN";
const ACCOUNT_VAR: &str = "HARVEST_ACCOUNT_ID";

/// Configuration errors found after loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing {field}: set {env} or `{field}` in the config file")]
    MissingCredential {
        field: &'static str,
        env: &'static str,
    },
}

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Harvest personal access token.
    #[serde(default, deserialize_with = "string_or_number")]
    pub api_token: Option<String>,
    /// Harvest account the token belongs to.
    #[serde(default, deserialize_with = "string_or_number")]
    pub account_id: Option<String>,
    /// API root.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("account_id", &self.account_id)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            account_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // HARVEST_API_TOKEN / HARVEST_ACCOUNT_ID, then HCLI_* overrides
        figment = figment.merge(harvest_env()).merge(Env::prefixed("HCLI_"));

        figment.extract()
    }

    /// Returns the credentials, or which one is missing.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let token = self
            .api_token
            .clone()
            .ok_or(ConfigError::MissingCredential {
                field: "api_token",
                env: TOKEN_VAR,
            })?;
        let account_id = self
            .account_id
            .clone()
            .ok_or(ConfigError::MissingCredential {
                field: "account_id",
                env: ACCOUNT_VAR,
            })?;
        Ok(Credentials { token, account_id })
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The environment variables the Harvest docs tell users to set.
fn harvest_env() -> Env {
    Env::raw().only(&[TOKEN_VAR, ACCOUNT_VAR]).map(|key| {
        if key.as_str().eq_ignore_ascii_case(TOKEN_VAR) {
            "api_token".into()
        } else {
            "account_id".into()
        }
    })
}

/// Account IDs are numeric; accept them unquoted in TOML and the environment.
fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::String(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// Returns the platform-specific config directory for hcli.
///
/// On Linux: `~/.config/hcli`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hcli"))
}
