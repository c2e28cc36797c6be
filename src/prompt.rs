use std::env;

use anyhow::{Context, Result};
use dialoguer::{Input, theme::ColorfulTheme};
use tracing::debug;

/// Environment variable consulted when `--code` is not given
pub const MFA_CODE_ENV: &str = "AWS_MFA_CODE";

/// Where the one-time code is taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSource {
    /// Passed with `--code`
    Argument(String),
    /// Read from `AWS_MFA_CODE`
    Environment(String),
    /// Read from the terminal
    Interactive,
}

impl CodeSource {
    /// Pick the source: the flag wins, then the environment, then a prompt
    pub fn resolve(code: Option<String>) -> Self {
        match code {
            Some(code) => Self::Argument(code),
            None => env::var(MFA_CODE_ENV).map_or(Self::Interactive, Self::Environment),
        }
    }

    /// Produce the code string. Only a trailing line terminator is removed;
    /// length is not checked here, the rotator rejects malformed codes with a
    /// dedicated error.
    pub fn acquire(self) -> Result<String> {
        let code = match self {
            Self::Argument(code) => {
                debug!("Using MFA code from the command line");
                code
            }
            Self::Environment(code) => {
                debug!("Using MFA code from {}", MFA_CODE_ENV);
                code
            }
            Self::Interactive => Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("Enter your MFA token")
                .allow_empty(true)
                .interact_text()
                .context("Failed to read MFA token")?,
        };

        Ok(code.trim_end_matches(['\r', '\n']).to_string())
    }
}
