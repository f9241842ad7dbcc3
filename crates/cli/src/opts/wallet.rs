use clap::Parser;
use nftm_config::figment::{
    self, Metadata, Profile, Provider,
    value::{Dict, Map},
};
use serde::Serialize;
use std::path::PathBuf;

/// The wallet capability and the persisted session.
#[derive(Clone, Debug, Default, Serialize, Parser)]
#[command(next_help_heading = "Wallet options")]
pub struct WalletOpts {
    /// JSON-RPC endpoint of the wallet, e.g. a local node or a wallet bridge.
    #[arg(long, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// How often the wallet is polled for account and chain changes, in milliseconds.
    #[arg(long, value_name = "MILLIS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval: Option<u64>,

    /// File the active session is persisted to.
    #[arg(long, value_name = "PATH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl WalletOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(rpc_url) = &self.rpc_url {
            dict.insert("rpc_url".into(), rpc_url.clone().into());
        }
        if let Some(poll_interval) = self.poll_interval {
            dict.insert("poll_interval".into(), poll_interval.into());
        }
        if let Some(session_file) = &self.session_file {
            dict.insert("session_file".into(), session_file.display().to_string().into());
        }
        dict
    }
}

impl Provider for WalletOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("WalletOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Profile::Default, self.dict())]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_flags_are_merged() {
        let opts = WalletOpts::parse_from(["nftm", "--session-file", "/tmp/session.json"]);
        let dict = opts.dict();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict["session_file"].as_str(), Some("/tmp/session.json"));
    }
}
