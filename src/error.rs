use std::path::PathBuf;

use thiserror::Error;

/// Failure kinds of a rotation run.
///
/// The first four variants are local validation failures and are always
/// raised before the STS call is attempted.
#[derive(Debug, Error)]
pub enum RotateError {
    #[error("Credentials file is missing!")]
    MissingCredentialsFile(PathBuf),

    #[error("MFA Device ARN should have a correct value.")]
    InvalidDeviceArn(String),

    #[error("MFA Code should contain 6 characters.")]
    InvalidCodeLength(usize),

    #[error("Session duration should be between 900 and 43200 seconds, got {0}.")]
    InvalidDuration(i32),

    #[error("Failed to get session token from AWS STS")]
    TokenIssuance(#[source] anyhow::Error),

    #[error("Failed to write exports file {}", path.display())]
    WriteExports {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write credentials file {}", path.display())]
    WriteCredentials {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl RotateError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingCredentialsFile(_) => 2,
            Self::InvalidDeviceArn(_) => 3,
            Self::InvalidCodeLength(_) => 4,
            Self::InvalidDuration(_) => 5,
            Self::TokenIssuance(_) => 6,
            Self::WriteExports { .. } => 7,
            Self::WriteCredentials { .. } => 8,
        }
    }

    /// Whether the run was rejected before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentialsFile(_)
                | Self::InvalidDeviceArn(_)
                | Self::InvalidCodeLength(_)
                | Self::InvalidDuration(_)
        )
    }
}
