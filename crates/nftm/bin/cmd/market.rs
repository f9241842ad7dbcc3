use super::Context;
use clap::Subcommand;
use eyre::{Result, bail};

/// CLI arguments for `nftm market`.
#[derive(Clone, Debug, Subcommand)]
pub enum MarketSubcommands {
    /// Show market-wide statistics.
    Stats,
}

impl MarketSubcommands {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Stats => {
                let stats = ctx.gateway.market_stats().await?;
                ctx.print(&stats, |stats| match &stats.data {
                    Some(data) => data.to_string(),
                    None => stats
                        .message
                        .clone()
                        .unwrap_or_else(|| "no statistics available".to_string()),
                })
            }
        }
    }
}

/// `nftm health`: fails unless the service reports itself healthy.
pub async fn health(ctx: &Context) -> Result<()> {
    let health = ctx.gateway.health().await?;
    ctx.print(&health, |health| match &health.message {
        Some(message) => format!("{}: {message}", health.status),
        None => health.status.clone(),
    })?;
    if !health.is_ok() {
        bail!("service at {} is unhealthy: {}", ctx.gateway.base_url(), health.status);
    }
    Ok(())
}
