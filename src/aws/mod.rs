use std::{fmt, future::Future};

use aws_smithy_types::{DateTime, date_time::Format};

pub mod credentials;
pub mod sts;

/// AWS temporary credentials structure
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
}

impl Credentials {
    /// Expiration as an RFC 3339 timestamp
    pub fn expiration_rfc3339(&self) -> String {
        self.expiration
            .fmt(Format::DateTime)
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Parameters of a single GetSessionToken call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub serial_number: String,
    pub token_code: String,
    pub duration_seconds: i32,
}

/// Source of MFA-verified session credentials.
///
/// [`sts::StsTokenIssuer`] talks to AWS; tests substitute an in-memory issuer.
pub trait SessionTokenIssuer {
    fn issue_session_token(
        &self,
        request: &SessionRequest,
    ) -> impl Future<Output = anyhow::Result<Credentials>> + Send;
}

pub use sts::StsTokenIssuer;
