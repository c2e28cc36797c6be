use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::info;

use crate::aws::Credentials;

/// Render the four `export` lines for the standard credential variables.
///
/// The session token is exported twice: `AWS_SECURITY_TOKEN` is still read by
/// older SDKs and tools.
pub fn render(creds: &Credentials) -> String {
    format!(
        "export AWS_ACCESS_KEY_ID=\"{}\"\n\
         export AWS_SECRET_ACCESS_KEY=\"{}\"\n\
         export AWS_SECURITY_TOKEN=\"{}\"\n\
         export AWS_SESSION_TOKEN=\"{}\"\n",
        creds.access_key_id, creds.secret_access_key, creds.session_token, creds.session_token
    )
}

/// Overwrite the exports script and make it executable by its owner only
pub async fn write_exports(path: &Path, creds: &Credentials) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, render(creds))
        .await
        .with_context(|| format!("Failed to write exports file: {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = fs::metadata(path).await?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(0o700);
        fs::set_permissions(path, permissions)
            .await
            .with_context(|| format!("Failed to mark {} executable", path.display()))?;
    }

    info!("Exports written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_smithy_types::{DateTime, date_time::Format};
    use tempfile::tempdir;

    fn creds() -> Credentials {
        Credentials {
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "secret123".to_string(),
            session_token: "tok123".to_string(),
            expiration: DateTime::from_str("2024-01-01T00:00:00Z", Format::DateTime).unwrap(),
        }
    }

    #[test]
    fn test_render_four_lines() {
        let rendered = render(&creds());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "export AWS_ACCESS_KEY_ID=\"AKIAEXAMPLE\"",
                "export AWS_SECRET_ACCESS_KEY=\"secret123\"",
                "export AWS_SECURITY_TOKEN=\"tok123\"",
                "export AWS_SESSION_TOKEN=\"tok123\"",
            ]
        );
    }

    #[tokio::test]
    async fn test_write_exports_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aws_exports.sh");
        std::fs::write(&path, "export STALE=1\nexport MORE=2\nx\ny\nz\n").unwrap();

        write_exports(&path, &creds()).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&creds()));
        assert!(!written.contains("STALE"));
    }

    #[tokio::test]
    async fn test_write_exports_creates_parent_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("aws_exports.sh");

        write_exports(&path, &creds()).await.unwrap();

        assert!(path.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_exports_is_owner_only_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("aws_exports.sh");
        std::fs::write(&path, "").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_exports(&path, &creds()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_ne!(mode & 0o100, 0);
        assert_eq!(mode & 0o077, 0);
    }
}
