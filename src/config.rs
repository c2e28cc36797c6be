use crate::constants::{
    self, DEFAULT_SESSION_DURATION_SECONDS, DEFAULT_SESSION_OUTPUT, DEFAULT_SESSION_PROFILE,
    DEFAULT_SESSION_REGION, MAX_SESSION_DURATION_SECONDS, MFA_DEVICE_ARN_PREFIX,
    MIN_SESSION_DURATION_SECONDS,
};
use crate::ini_file;
use anyhow::{Context, Result};
use dialoguer::{Input, theme::ColorfulTheme};
use ini::{Ini, Properties};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Rotation settings, resolved once at start-up and handed to the rotator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// ARN of the MFA device registered for the base user
    pub mfa_serial: String,
    pub credentials_file: PathBuf,
    pub exports_file: PathBuf,
    /// Section of the credentials file that receives the session keys
    pub session_profile: String,
    pub region: String,
    pub output: String,
    pub duration_seconds: i32,
}

impl Config {
    /// Built-in settings, used when the config file has nothing for a profile
    pub fn defaults() -> Result<Self> {
        Self::from_ini_section(None)
    }

    fn from_ini_section(section: Option<&Properties>) -> Result<Self> {
        let get = |key| lookup(section, key);

        let credentials_file = match get("mfa_credentials_file") {
            Some(path) => PathBuf::from(path),
            None => constants::get_aws_credentials_path()
                .context("Failed to determine AWS credentials path")?,
        };

        let exports_file = match get("mfa_exports_file") {
            Some(path) => PathBuf::from(path),
            None => constants::default_exports_path()
                .context("Failed to determine exports file path")?,
        };

        Ok(Self {
            mfa_serial: get("mfa_serial").unwrap_or("").to_string(),
            credentials_file,
            exports_file,
            session_profile: get("mfa_session_profile")
                .unwrap_or(DEFAULT_SESSION_PROFILE)
                .to_string(),
            region: get("mfa_session_region")
                .unwrap_or(DEFAULT_SESSION_REGION)
                .to_string(),
            output: get("mfa_session_output")
                .unwrap_or(DEFAULT_SESSION_OUTPUT)
                .to_string(),
            duration_seconds: get("mfa_session_duration_seconds")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SESSION_DURATION_SECONDS),
        })
    }

    /// Human-readable listing of the effective settings
    pub fn describe(&self) -> String {
        let serial: &str = if self.mfa_serial.is_empty() {
            "(not set)"
        } else {
            &self.mfa_serial
        };

        format!(
            "MFA device:       {serial}\n\
             Credentials file: {}\n\
             Exports file:     {}\n\
             Session profile:  {}\n\
             Region:           {}\n\
             Output:           {}\n\
             Duration:         {} seconds\n",
            self.credentials_file.display(),
            self.exports_file.display(),
            self.session_profile,
            self.region,
            self.output,
            self.duration_seconds,
        )
    }

    fn save_to_ini(&self, ini: &mut Ini, profile: &str) {
        ini.with_section(Some(section_name(profile)))
            .set("mfa_serial", &self.mfa_serial)
            .set(
                "mfa_credentials_file",
                self.credentials_file.to_string_lossy(),
            )
            .set("mfa_exports_file", self.exports_file.to_string_lossy())
            .set("mfa_session_profile", &self.session_profile)
            .set("mfa_session_region", &self.region)
            .set("mfa_session_output", &self.output)
            .set(
                "mfa_session_duration_seconds",
                self.duration_seconds.to_string(),
            );
    }
}

fn lookup<'a>(section: Option<&'a Properties>, key: &str) -> Option<&'a str> {
    section.and_then(|s| s.get(key))
}

/// `default` keeps its bare name in ~/.aws/config, every other profile is
/// written as `[profile NAME]`.
fn section_name(profile: &str) -> String {
    if profile == "default" {
        profile.to_string()
    } else {
        format!("profile {profile}")
    }
}

/// Load settings for `profile`, falling back to defaults for anything unset
pub async fn load(profile: &str) -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        debug!("No AWS config at {}, using defaults", path.display());
        return Config::defaults();
    }

    let ini = ini_file::load(&path).context("Failed to load config file")?;

    let section = ini.section(Some(section_name(profile)));
    if section.is_none() {
        debug!("Profile '{}' not found in config, using defaults", profile);
    }

    Config::from_ini_section(section)
}

pub async fn save(profile: &str, config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut ini = if path.exists() {
        ini_file::load(&path).context("Failed to load config file")?
    } else {
        Ini::new()
    };

    config.save_to_ini(&mut ini, profile);

    ini_file::store(&ini, &path).context("Failed to write config")?;

    Ok(())
}

pub async fn configure_interactive(profile: &str) -> Result<()> {
    println!("Configuring MFA rotation for profile: {profile}");
    println!("Press Enter to keep current values, or type new values.");
    println!();

    let current = load(profile).await?;
    let theme = ColorfulTheme::default();

    let mfa_serial = Input::<String>::with_theme(&theme)
        .with_prompt("MFA Device ARN")
        .default(current.mfa_serial.clone())
        .allow_empty(!current.mfa_serial.is_empty())
        .validate_with(|input: &String| {
            if is_valid_device_arn(input) {
                Ok(())
            } else {
                Err("MFA Device ARN must start with arn:aws:iam:")
            }
        })
        .interact_text()
        .context("Failed to read MFA Device ARN")?;

    let credentials_file = Input::<String>::with_theme(&theme)
        .with_prompt("Credentials File")
        .default(current.credentials_file.to_string_lossy().to_string())
        .interact_text()
        .context("Failed to read credentials file path")?;

    let exports_file = Input::<String>::with_theme(&theme)
        .with_prompt("Exports File")
        .default(current.exports_file.to_string_lossy().to_string())
        .interact_text()
        .context("Failed to read exports file path")?;

    let session_profile = Input::<String>::with_theme(&theme)
        .with_prompt("Session Profile Name")
        .default(current.session_profile)
        .interact_text()
        .context("Failed to read session profile name")?;

    let region = Input::<String>::with_theme(&theme)
        .with_prompt("Region")
        .default(current.region)
        .interact_text()
        .context("Failed to read region")?;

    let duration_seconds = Input::<i32>::with_theme(&theme)
        .with_prompt("Session Duration Seconds (900-43200)")
        .default(current.duration_seconds)
        .validate_with(|input: &i32| {
            if is_valid_duration(*input) {
                Ok(())
            } else {
                Err("Please enter a value between 900 and 43200")
            }
        })
        .interact_text()
        .context("Failed to read session duration")?;

    let config = Config {
        mfa_serial,
        credentials_file: PathBuf::from(credentials_file),
        exports_file: PathBuf::from(exports_file),
        session_profile,
        region,
        output: current.output,
        duration_seconds,
    };

    save(profile, &config).await?;

    println!("\nConfiguration saved successfully.");
    Ok(())
}

fn get_config_path() -> Result<PathBuf> {
    constants::get_aws_config_path().context("Failed to determine AWS config path")
}

pub fn is_valid_device_arn(s: &str) -> bool {
    s.starts_with(MFA_DEVICE_ARN_PREFIX)
}

pub fn is_valid_duration(seconds: i32) -> bool {
    (MIN_SESSION_DURATION_SECONDS..=MAX_SESSION_DURATION_SECONDS).contains(&seconds)
}
