use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sts::Client as StsClient;
use tracing::{debug, info};

use super::{Credentials, SessionRequest, SessionTokenIssuer};

/// Issues session tokens through AWS STS using a base profile's long-lived keys
#[derive(Debug, Clone)]
pub struct StsTokenIssuer {
    profile: String,
    region: String,
}

impl StsTokenIssuer {
    pub fn new(profile: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: region.into(),
        }
    }
}

impl SessionTokenIssuer for StsTokenIssuer {
    async fn issue_session_token(&self, request: &SessionRequest) -> Result<Credentials> {
        info!("Calling AWS STS GetSessionToken");
        debug!("Profile: {}", self.profile);
        debug!("Region: {}", self.region);
        debug!("MFA device: {}", request.serial_number);
        debug!("Duration: {} seconds", request.duration_seconds);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(&self.profile)
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        let client = StsClient::new(&config);

        let response = client
            .get_session_token()
            .duration_seconds(request.duration_seconds)
            .serial_number(&request.serial_number)
            .token_code(&request.token_code)
            .send()
            .await
            .context("GetSessionToken request failed")?;

        let sts_creds = response
            .credentials()
            .context("AWS STS returned no credentials")?;

        let credentials = Credentials {
            access_key_id: sts_creds.access_key_id().to_string(),
            secret_access_key: sts_creds.secret_access_key().to_string(),
            session_token: sts_creds.session_token().to_string(),
            expiration: *sts_creds.expiration(),
        };

        info!("Successfully obtained AWS session credentials");
        Ok(credentials)
    }
}
