use super::{GatewayOpts, WalletOpts};
use clap::Parser;
use nftm_config::{
    Environment,
    figment::{
        self, Metadata, Profile, Provider,
        value::{Dict, Map},
    },
};

/// Options shared by every command.
#[derive(Clone, Debug, Default, Parser)]
pub struct GlobalOpts {
    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Deployment environment; `development` logs every API call.
    #[arg(long, global = true, value_name = "ENV", env = "NFTM_ENVIRONMENT")]
    pub environment: Option<Environment>,

    #[command(flatten)]
    pub gateway: GatewayOpts,

    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl Provider for GlobalOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("GlobalOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = self.gateway.dict();
        dict.extend(self.wallet.dict());
        if let Some(environment) = self.environment {
            dict.insert("environment".into(), environment.to_string().into());
        }
        Ok(Map::from([(Profile::Default, dict)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::LoadConfig;

    #[test]
    fn merges_all_groups() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let opts = GlobalOpts::parse_from([
                "nftm",
                "--environment",
                "dev",
                "--api-url",
                "http://api:8080/api/v1",
                "--rpc-url",
                "http://wallet:8545",
            ]);
            let config = opts.load_config().unwrap();
            assert_eq!(config.environment, Environment::Development);
            assert_eq!(config.api_url, "http://api:8080/api/v1");
            assert_eq!(config.rpc_url, "http://wallet:8545");
            assert_eq!(config.default_log_level(), "debug");
            Ok(())
        });
    }
}
