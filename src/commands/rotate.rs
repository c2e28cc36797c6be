use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::{
    aws::{Credentials, StsTokenIssuer},
    config::{self, Config},
    prompt::CodeSource,
    rotator,
};

#[derive(Debug, Clone, Default, Args)]
pub struct RotateCommand {
    #[arg(
        short = 'c',
        long,
        help = "One-time code from the MFA device (falls back to $AWS_MFA_CODE, then a prompt)"
    )]
    pub code: Option<String>,

    #[arg(long, help = "ARN of the MFA device")]
    pub serial_number: Option<String>,

    #[arg(long, help = "Credentials file receiving the session profile")]
    pub credentials_file: Option<PathBuf>,

    #[arg(long, help = "Shell script receiving the export lines")]
    pub exports_file: Option<PathBuf>,

    #[arg(long, help = "Name of the session profile section")]
    pub session_profile: Option<String>,

    #[arg(long, help = "Region for STS and the session profile")]
    pub region: Option<String>,

    #[arg(long, help = "Requested session duration in seconds (900-43200)")]
    pub duration_seconds: Option<i32>,

    #[arg(long, help = "Print the issued secret key and session token")]
    pub show_secrets: bool,
}

impl RotateCommand {
    pub async fn execute(self, profile: &str) -> Result<()> {
        info!("Starting MFA session rotation with base profile: {}", profile);

        let config = config::load(profile)
            .await
            .with_context(|| format!("Failed to load configuration for profile '{profile}'"))?;
        let config = self.apply_overrides(config);

        let code = CodeSource::resolve(self.code).acquire()?;

        let issuer = StsTokenIssuer::new(profile, config.region.clone());
        rotator::rotate(&config, &code, &issuer, |credentials| {
            println!("Token expiration: {}", credentials.expiration_rfc3339());
            if self.show_secrets {
                print_bundle(&config, credentials);
            }
        })
        .await?;

        println!("New session tokens have been set successfully.");

        Ok(())
    }

    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(serial) = &self.serial_number {
            config.mfa_serial = serial.clone();
        }
        if let Some(path) = &self.credentials_file {
            config.credentials_file = path.clone();
        }
        if let Some(path) = &self.exports_file {
            config.exports_file = path.clone();
        }
        if let Some(name) = &self.session_profile {
            config.session_profile = name.clone();
        }
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(duration) = self.duration_seconds {
            config.duration_seconds = duration;
        }
        config
    }
}

fn print_bundle(config: &Config, creds: &Credentials) {
    println!("output: {}", config.output);
    println!("region: {}", config.region);
    println!("aws_access_key_id: {}", creds.access_key_id);
    println!("aws_secret_access_key: {}", creds.secret_access_key);
    println!("aws_session_token: {}", creds.session_token);
}
