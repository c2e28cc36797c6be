use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::Credentials;
use crate::ini_file;

/// Profile-level settings written alongside the rotated keys
#[derive(Debug, Clone, Copy)]
pub struct SessionProfile<'a> {
    pub name: &'a str,
    pub region: &'a str,
    pub output: &'a str,
}

/// Replace the session profile section of an existing credentials file.
///
/// The section is dropped and rebuilt so keys left over from an older run do
/// not survive. Every other section is written back as loaded, and the file
/// is restricted to its owner since it holds secrets.
pub fn save_session_credentials(
    path: &Path,
    profile: SessionProfile<'_>,
    creds: &Credentials,
) -> Result<()> {
    let mut ini = ini_file::load(path).context("Failed to read credentials file")?;

    while ini.delete(Some(profile.name)).is_some() {}

    ini.with_section(Some(profile.name))
        .set("output", profile.output)
        .set("region", profile.region)
        .set("aws_access_key_id", &creds.access_key_id)
        .set("aws_secret_access_key", &creds.secret_access_key)
        .set("aws_session_token", &creds.session_token)
        .set("aws_security_token", &creds.session_token);

    ini_file::store(&ini, path).context("Failed to write credentials file")?;

    #[cfg(unix)]
    {
        use std::{fs, os::unix::fs::PermissionsExt};
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_mode(0o600);
        fs::set_permissions(path, permissions)
            .with_context(|| format!("Failed to restrict {}", path.display()))?;
    }

    info!("Credentials saved to profile: {}", profile.name);
    Ok(())
}
