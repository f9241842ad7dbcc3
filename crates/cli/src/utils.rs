use eyre::{Result, WrapErr};
use nftm_common::AccountSource;
use nftm_config::{Config, figment::Provider};
use nftm_gateway::GatewayClient;
use nftm_wallets::{
    FileSessionStore, HttpWalletProvider, SessionStore, WalletProvider, WalletSession,
};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies to the nftm crates and
/// everything else logs warnings only.
pub fn subscriber(default_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init()
}

/// Builds the filter used by [`subscriber`].
pub fn env_filter(default_level: &str) -> EnvFilter {
    filter(std::env::var("RUST_LOG").ok().as_deref(), default_level)
}

fn filter(directives: Option<&str>, default_level: &str) -> EnvFilter {
    directives.and_then(|directives| EnvFilter::try_new(directives).ok()).unwrap_or_else(|| {
        let crates = ["nftm", "nftm_cli", "nftm_common", "nftm_config", "gateway", "wallets"];
        let directives = crates.map(|target| format!("{target}={default_level}")).join(",");
        EnvFilter::new(format!("warn,{directives}"))
    })
}

/// Loads a `.env` file from the current directory or one of its parents.
///
/// Variables already set in the environment are kept.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => trace!(?path, "loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(%err, "failed to load .env file"),
    }
}

/// Loads the [`Config`] with a command's options merged on top.
pub trait LoadConfig {
    /// Returns the config layers with these options as the last one.
    fn figment(&self) -> nftm_config::figment::Figment;

    fn load_config(&self) -> Result<Config> {
        Config::try_from(self.figment()).wrap_err("failed to load configuration")
    }
}

impl<T: Provider + Clone> LoadConfig for T {
    fn figment(&self) -> nftm_config::figment::Figment {
        Config::figment().merge(self.clone())
    }
}

/// Creates the marketplace API client, reading the acting account from `accounts`.
pub fn get_gateway(
    config: &Config,
    accounts: impl AccountSource + 'static,
) -> Result<GatewayClient> {
    GatewayClient::builder(&config.api_url)
        .timeout(config.timeout())
        .accounts(accounts)
        .build()
        .wrap_err("failed to create the marketplace API client")
}

/// Creates the session holder for the configured wallet and resumes the persisted session.
pub fn get_wallet_session(config: &Config) -> Result<WalletSession> {
    let provider =
        HttpWalletProvider::from_url_str(&config.rpc_url, config.timeout(), config.poll_interval())
            .wrap_err_with(|| format!("invalid wallet RPC URL `{}`", config.rpc_url))?;
    let store = FileSessionStore::new(config.session_file());
    let session = WalletSession::with_store(
        Some(Arc::new(provider) as Arc<dyn WalletProvider>),
        Some(Arc::new(store) as Arc<dyn SessionStore>),
    );
    if let Err(err) = session.resume() {
        warn!(%err, "ignoring unreadable session file");
    }
    Ok(session)
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_wins_over_default_level() {
        let default = filter(None, "debug").to_string();
        assert!(default.contains("gateway=debug"), "{default}");
        assert!(default.contains("wallets=debug"), "{default}");

        let custom = filter(Some("gateway=trace"), "info").to_string();
        assert!(custom.contains("gateway=trace"), "{custom}");
        assert!(!custom.contains("wallets"), "{custom}");
    }
}
