use clap::Parser;
use nftm_config::figment::{
    self, Metadata, Profile, Provider,
    value::{Dict, Map},
};
use serde::Serialize;

/// Connection to the marketplace API.
#[derive(Clone, Debug, Default, Serialize, Parser)]
#[command(next_help_heading = "Marketplace API options")]
pub struct GatewayOpts {
    /// Base URL of the marketplace API.
    #[arg(long, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Timeout of a single request, in seconds.
    #[arg(long, value_name = "SECONDS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl GatewayOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(api_url) = &self.api_url {
            dict.insert("api_url".into(), api_url.clone().into());
        }
        if let Some(timeout) = self.timeout {
            dict.insert("timeout".into(), timeout.into());
        }
        dict
    }
}

// Make these args a `Figment` so that they can be merged into the `Config`
impl Provider for GatewayOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("GatewayOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Profile::Default, self.dict())]))
    }
}
