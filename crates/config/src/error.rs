//! Config extraction errors.

use crate::Config;
use figment::{Metadata, Source};
use std::{collections::HashSet, error::Error, fmt, path::PathBuf};

/// The message shown when the config could not be extracted from the figment.
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract nftm config:";

/// Represents a failed attempt to extract `Config` from a `Figment`.
///
/// Every underlying problem is reported once, attributed to where the bad value came from.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }

    /// The individual problems, deduplicated.
    pub fn errors(&self) -> Vec<ConfigError> {
        let mut seen = HashSet::new();
        self.error
            .clone()
            .into_iter()
            .map(ConfigError::from)
            .filter(|err| seen.insert(err.to_string()))
            .collect()
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in self.errors() {
            writeln!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

/// A single bad setting, named the way the user supplied it.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A value from a config file, `None` if figment did not record the file.
    File { path: Option<PathBuf>, error: figment::Error },
    /// A value from an `NFTM_*` environment variable.
    Env { var: String, error: figment::Error },
    /// A value from a command line flag.
    Flag { flag: String, error: figment::Error },
    /// Anything not attributable to one of the above, e.g. the built-in defaults.
    Other(figment::Error),
}

impl ConfigError {
    pub fn inner(&self) -> &figment::Error {
        match self {
            Self::File { error, .. } | Self::Env { error, .. } | Self::Flag { error, .. } => error,
            Self::Other(error) => error,
        }
    }

    /// The setting the error is about, e.g. `api_url`.
    pub fn setting(&self) -> Option<String> {
        let path = &self.inner().path;
        (!path.is_empty()).then(|| path.join("."))
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        let Some(metadata) = error.metadata.as_ref() else { return Self::Other(error) };
        let setting = (!error.path.is_empty()).then(|| error.path.join("_"));

        if is_file(metadata) {
            let path = match &metadata.source {
                Some(Source::File(path)) => Some(path.clone()),
                _ => None,
            };
            return Self::File { path, error };
        }
        match setting {
            Some(setting) if is_env(metadata) => {
                let var = format!("{}{}", Config::ENV_PREFIX, setting.to_uppercase());
                Self::Env { var, error }
            }
            Some(setting) if is_flag(metadata) => {
                let flag = format!("--{}", setting.replace('_', "-"));
                Self::Flag { flag, error }
            }
            _ => Self::Other(error),
        }
    }
}

fn is_file(metadata: &Metadata) -> bool {
    matches!(metadata.source, Some(Source::File(_))) || metadata.name.contains("TOML")
}

fn is_env(metadata: &Metadata) -> bool {
    metadata.name.contains("environment variable")
}

/// The CLI providers are named after their clap structs, e.g. `GatewayOpts`.
fn is_flag(metadata: &Metadata) -> bool {
    metadata.name.ends_with("Opts")
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `kind` only; figment's own display repeats the provider name
        let kind = &self.inner().kind;
        match self {
            Self::File { path: Some(path), .. } => write!(f, "{}: {kind}", path.display())?,
            Self::File { path: None, .. } => write!(f, "{}: {kind}", Config::FILE_NAME)?,
            Self::Env { var, .. } => return write!(f, "environment variable `{var}`: {kind}"),
            Self::Flag { flag, .. } => return write!(f, "flag `{flag}`: {kind}"),
            Self::Other(_) => write!(f, "{kind}")?,
        }
        if let Some(setting) = self.setting() {
            write!(f, " for setting `{setting}`")?;
        }
        Ok(())
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(self.inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::error::Kind;

    fn error_from(name: &str, path: &str) -> figment::Error {
        let mut error = figment::Error::from(Kind::Message("bad value".to_string()));
        error.metadata = Some(Metadata::named(name.to_string()));
        error.path = vec![path.to_string()];
        error
    }

    #[test]
    fn names_cli_flag() {
        let err = ConfigError::from(error_from("GatewayOpts", "api_url"));
        assert!(matches!(&err, ConfigError::Flag { flag, .. } if flag == "--api-url"), "{err:?}");
        assert_eq!(err.to_string(), "flag `--api-url`: bad value");
    }

    #[test]
    fn names_env_var() {
        let err = ConfigError::from(error_from("`NFTM_` environment variable(s)", "poll_interval"));
        assert_eq!(err.to_string(), "environment variable `NFTM_POLL_INTERVAL`: bad value");
    }

    #[test]
    fn unattributed_errors_keep_setting() {
        let err = ConfigError::from(error_from("nftm config", "page_size"));
        assert!(matches!(err, ConfigError::Other(_)));
        assert_eq!(err.to_string(), "bad value for setting `page_size`");
        assert_eq!(err.setting().as_deref(), Some("page_size"));

        let mut bare = figment::Error::from(Kind::Message("bad value".to_string()));
        bare.metadata = None;
        assert_eq!(ConfigError::from(bare).to_string(), "bad value");
    }
}
