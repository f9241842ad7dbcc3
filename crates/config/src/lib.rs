//! # nftm-config
//!
//! Layered configuration for the nftm tools.
//!
//! Values are merged, last one wins, from:
//!
//! 1. the built-in defaults,
//! 2. the global `~/.nftm/nftm.toml`,
//! 3. the local `nftm.toml` (or the file named by `NFTM_CONFIG`),
//! 4. `NFTM_*` environment variables, e.g. `NFTM_API_URL`.
//!
//! Command line flags are merged on top by the CLI.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use nftm_common::{
    DEFAULT_API_URL, DEFAULT_PAGE_SIZE, DEFAULT_WALLET_RPC_URL, REQUEST_TIMEOUT,
    WALLET_POLL_INTERVAL,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

mod error;
pub use error::{ConfigError, ExtractConfigError};

pub use figment;

/// nftm configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the marketplace REST service.
    pub api_url: String,
    /// Timeout of a single service request, in seconds.
    pub timeout: u64,
    /// Endpoint of the wallet capability.
    pub rpc_url: String,
    /// Interval at which the wallet capability is polled for changes, in milliseconds.
    pub poll_interval: u64,
    /// Deployment environment; selects the default log level.
    pub environment: Environment,
    /// Where the active account is persisted. Defaults to `~/.nftm/session.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
    /// Page size used by list commands.
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: REQUEST_TIMEOUT.as_secs(),
            rpc_url: DEFAULT_WALLET_RPC_URL.to_string(),
            poll_interval: WALLET_POLL_INTERVAL.as_millis() as u64,
            environment: Environment::default(),
            session_file: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// The default config file name.
    pub const FILE_NAME: &'static str = "nftm.toml";

    /// The name of the directory nftm reserves for itself under the user's home directory: `~`
    pub const NFTM_DIR_NAME: &'static str = ".nftm";

    /// The file name of the persisted session inside [`Self::NFTM_DIR_NAME`].
    pub const SESSION_FILE_NAME: &'static str = "session.json";

    /// Environment variable prefix.
    pub const ENV_PREFIX: &'static str = "NFTM_";

    /// Returns the config of the current directory.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Returns the config rooted at `root`.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// Attempts to extract a `Config` from `provider`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use figment::providers::{Format, Toml};
    /// use nftm_config::Config;
    ///
    /// // Use nftm's default `Figment`, but allow values from `other.toml`
    /// // to supersede its values.
    /// let figment = Config::figment().merge(Toml::file("other.toml"));
    ///
    /// let config = Config::try_from(figment);
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        Figment::from(provider).extract::<Self>().map_err(ExtractConfigError::new)
    }

    /// Returns the default figment of the current directory.
    pub fn figment() -> Figment {
        Self::figment_with_root(std::env::current_dir().unwrap_or_default())
    }

    /// Returns the default figment with the local config file looked up in `root`.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let mut figment = Figment::from(Self::default());

        if let Some(global_toml) = Self::nftm_dir_toml().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_toml));
        }

        let local_toml = std::env::var_os(format!("{}CONFIG", Self::ENV_PREFIX))
            .map(PathBuf::from)
            .unwrap_or_else(|| root.as_ref().join(Self::FILE_NAME));
        figment
            .merge(Toml::file(local_toml))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG"]))
    }

    /// Returns the path to the `~/.nftm` dir, if the home dir can be determined.
    pub fn nftm_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(Self::NFTM_DIR_NAME))
    }

    /// Returns the path to the global `~/.nftm/nftm.toml` file.
    pub fn nftm_dir_toml() -> Option<PathBuf> {
        Self::nftm_dir().map(|p| p.join(Self::FILE_NAME))
    }

    /// Returns the file the active account is persisted to.
    pub fn session_file(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            Self::nftm_dir()
                .unwrap_or_else(|| PathBuf::from(Self::NFTM_DIR_NAME))
                .join(Self::SESSION_FILE_NAME)
        })
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// The wallet polling interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval)
    }

    /// The log level used when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        self.environment.default_log_level()
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("nftm config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

/// Deployment environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Verbose logging of every service call.
    Development,
    /// Informational logging only.
    #[default]
    Production,
}

impl Environment {
    /// `debug` in development, `info` otherwise.
    pub const fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production => "info",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn default_figment_is_default_config() {
        figment::Jail::expect_with(|jail| {
            let config = Config::load_with_root(jail.directory()).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.timeout(), REQUEST_TIMEOUT);
            assert_eq!(config.default_log_level(), "info");
            Ok(())
        });
    }

    #[test]
    fn local_toml_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                Config::FILE_NAME,
                r#"
                api_url = "https://market.example/api/v1"
                timeout = 3
                environment = "development"
                session_file = "state/session.json"
            "#,
            )?;
            let config = Config::load_with_root(jail.directory()).unwrap();
            assert_eq!(config.api_url, "https://market.example/api/v1");
            assert_eq!(config.timeout(), Duration::from_secs(3));
            assert_eq!(config.environment, Environment::Development);
            assert_eq!(config.default_log_level(), "debug");
            assert_eq!(config.session_file(), PathBuf::from("state/session.json"));
            assert_eq!(config.rpc_url, DEFAULT_WALLET_RPC_URL);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                Config::FILE_NAME,
                "api_url = \"http://from-file/api\"\npage_size = 50",
            )?;
            jail.set_env("NFTM_API_URL", "http://from-env/api");
            jail.set_env("NFTM_POLL_INTERVAL", "250");

            let config = Config::load_with_root(jail.directory()).unwrap();
            assert_eq!(config.api_url, "http://from-env/api");
            assert_eq!(config.page_size, 50);
            assert_eq!(config.poll_interval(), Duration::from_millis(250));
            Ok(())
        });
    }

    #[test]
    fn config_env_var_selects_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("other.toml", "rpc_url = \"http://wallet:9545\"")?;
            jail.set_env("NFTM_CONFIG", "other.toml");

            let config = Config::load_with_root(jail.directory()).unwrap();
            assert_eq!(config.rpc_url, "http://wallet:9545");
            Ok(())
        });
    }

    #[test]
    fn invalid_value_names_setting() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(Config::FILE_NAME, "timeout = \"soon\"")?;
            let err = Config::load_with_root(jail.directory()).unwrap_err();
            let msg = err.to_string();
            assert!(msg.starts_with(error::FAILED_TO_EXTRACT_CONFIG_MSG), "{msg}");
            assert!(msg.contains("nftm.toml: "), "{msg}");
            assert!(msg.contains("for setting `timeout`"), "{msg}");
            assert!(matches!(err.errors()[..], [ConfigError::File { path: Some(_), .. }]), "{msg}");
            Ok(())
        });
    }

    #[test]
    fn invalid_env_var_is_named() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("NFTM_TIMEOUT", "soon");
            let err = Config::load_with_root(jail.directory()).unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("environment variable `NFTM_TIMEOUT`"), "{msg}");
            assert_eq!(err.errors().len(), 1, "{msg}");
            Ok(())
        });
    }

    #[test]
    fn parses_environment() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("Production".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }
}
