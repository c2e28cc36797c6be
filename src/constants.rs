use std::{env, path::PathBuf};

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS configuration file name
pub const AWS_CONFIG_FILE_NAME: &str = "config";

/// AWS shared credentials file name
pub const AWS_CREDENTIALS_FILE_NAME: &str = "credentials";

/// Shell export script written next to the credentials file
pub const AWS_EXPORTS_FILE_NAME: &str = "aws_exports.sh";

/// Prefix every IAM MFA device ARN starts with
pub const MFA_DEVICE_ARN_PREFIX: &str = "arn:aws:iam:";

/// Length of a TOTP code from a virtual or hardware MFA device
pub const MFA_CODE_LENGTH: usize = 6;

/// Minimum GetSessionToken duration in seconds (15 minutes)
pub const MIN_SESSION_DURATION_SECONDS: i32 = 900;

/// Maximum GetSessionToken duration in seconds (12 hours)
pub const MAX_SESSION_DURATION_SECONDS: i32 = 43200;

/// Default requested session duration: the maximum STS allows
pub const DEFAULT_SESSION_DURATION_SECONDS: i32 = MAX_SESSION_DURATION_SECONDS;

/// Default region written to the session profile and used for STS
pub const DEFAULT_SESSION_REGION: &str = "eu-west-1";

/// Default CLI output format written to the session profile
pub const DEFAULT_SESSION_OUTPUT: &str = "json";

/// Credentials file section receiving the rotated session
pub const DEFAULT_SESSION_PROFILE: &str = "mfa";

/// Profile holding the long-lived base credentials
pub const DEFAULT_BASE_PROFILE: &str = "default";

/// Get the AWS config file path
/// Respects AWS_CONFIG_FILE environment variable if set
pub fn get_aws_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("AWS_CONFIG_FILE") {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(AWS_CONFIG_FILE_NAME))
}

/// Get the AWS credentials file path
/// Respects AWS_SHARED_CREDENTIALS_FILE environment variable if set
pub fn get_aws_credentials_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("AWS_SHARED_CREDENTIALS_FILE") {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| {
        home.join(AWS_CONFIG_DIR_NAME)
            .join(AWS_CREDENTIALS_FILE_NAME)
    })
}

/// Default location of the shell export script: ~/.aws/aws_exports.sh
pub fn default_exports_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(AWS_EXPORTS_FILE_NAME))
}
