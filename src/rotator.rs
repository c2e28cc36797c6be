use tracing::{debug, info};

use crate::{
    aws::{
        Credentials, SessionRequest, SessionTokenIssuer,
        credentials::{self, SessionProfile},
    },
    config::{self, Config},
    constants::MFA_CODE_LENGTH,
    error::RotateError,
    exports,
};

/// Check the inputs in the order the operator is expected to fix them.
///
/// Nothing is read from or written to the network or the output files here
/// besides the existence check on the credentials file.
pub fn validate(config: &Config, code: &str) -> Result<(), RotateError> {
    if !config.credentials_file.is_file() {
        return Err(RotateError::MissingCredentialsFile(
            config.credentials_file.clone(),
        ));
    }
    if !config::is_valid_device_arn(&config.mfa_serial) {
        return Err(RotateError::InvalidDeviceArn(config.mfa_serial.clone()));
    }
    let len = code.chars().count();
    if len != MFA_CODE_LENGTH {
        return Err(RotateError::InvalidCodeLength(len));
    }
    if !config::is_valid_duration(config.duration_seconds) {
        return Err(RotateError::InvalidDuration(config.duration_seconds));
    }
    Ok(())
}

/// Exchange an MFA code for session credentials and persist them.
///
/// `on_issued` runs as soon as STS answers, before either file is touched,
/// so the operator sees the new credentials even when a write fails. The
/// exports script is written first, then the session profile of the
/// credentials file. A failure in between leaves the exports script updated
/// and the credentials file untouched.
pub async fn rotate<I, F>(
    config: &Config,
    code: &str,
    issuer: &I,
    on_issued: F,
) -> Result<Credentials, RotateError>
where
    I: SessionTokenIssuer,
    F: FnOnce(&Credentials),
{
    validate(config, code)?;
    debug!("Inputs validated for MFA device {}", config.mfa_serial);

    let request = SessionRequest {
        serial_number: config.mfa_serial.clone(),
        token_code: code.to_string(),
        duration_seconds: config.duration_seconds,
    };

    let creds = issuer
        .issue_session_token(&request)
        .await
        .map_err(RotateError::TokenIssuance)?;
    info!("Session token expires at {}", creds.expiration_rfc3339());
    on_issued(&creds);

    exports::write_exports(&config.exports_file, &creds)
        .await
        .map_err(|source| RotateError::WriteExports {
            path: config.exports_file.clone(),
            source,
        })?;

    let profile = SessionProfile {
        name: &config.session_profile,
        region: &config.region,
        output: &config.output,
    };
    credentials::save_session_credentials(&config.credentials_file, profile, &creds).map_err(
        |source| RotateError::WriteCredentials {
            path: config.credentials_file.clone(),
            source,
        },
    )?;

    Ok(creds)
}
