use anyhow::Result;
use clap::Args;

use crate::config;

#[derive(Debug, Clone, Args)]
pub struct ConfigureCommand {
    #[arg(long, help = "Print the effective settings instead of prompting")]
    pub show: bool,
}

impl ConfigureCommand {
    pub async fn execute(self, profile: &str) -> Result<()> {
        if self.show {
            let config = config::load(profile).await?;
            print!("{}", config.describe());
            return Ok(());
        }
        config::configure_interactive(profile).await
    }
}
