use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::{
    commands::{CompletionsCommand, ConfigureCommand, RotateCommand},
    constants::DEFAULT_BASE_PROFILE,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "mfa-rotate", version, about = "Refresh MFA-verified AWS session credentials", long_about = None, arg_required_else_help = false)]
pub struct Cli {
    #[arg(
        short = 'p',
        long,
        global = true,
        default_value = DEFAULT_BASE_PROFILE,
        help = "AWS profile holding the long-lived base credentials"
    )]
    pub profile: String,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Exchange an MFA code for session credentials and save them")]
    Rotate(RotateCommand),
    #[command(about = "Configure the MFA device and output files")]
    Configure(ConfigureCommand),
    #[command(about = "Generate shell completion scripts for mfa-rotate")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let profile = self.profile;
        let command = self
            .command
            .unwrap_or_else(|| Commands::Rotate(RotateCommand::default()));

        match command {
            Commands::Rotate(cmd) => cmd.execute(&profile).await,
            Commands::Configure(cmd) => cmd.execute(&profile).await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, error::ErrorKind};
    use std::path::PathBuf;

    fn rotate_args(cli: Cli) -> RotateCommand {
        match cli.command {
            Some(Commands::Rotate(cmd)) => cmd,
            _ => panic!("Expected Rotate command"),
        }
    }

    #[test]
    fn test_default_command_is_rotate() {
        let cli = Cli {
            profile: "default".to_string(),
            verbose: 0,
            command: None,
        };

        match cli
            .command
            .unwrap_or_else(|| Commands::Rotate(RotateCommand::default()))
        {
            Commands::Rotate(cmd) => {
                assert_eq!(cmd.code, None);
                assert!(!cmd.show_secrets);
            }
            _ => panic!("Expected Rotate command as default"),
        }
    }

    #[test]
    fn test_rotate_flags_require_subcommand() {
        let result = Cli::try_parse_from(["mfa-rotate", "--show-secrets"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_default_value() {
        let cli = Cli::try_parse_from(["mfa-rotate", "rotate"]).unwrap();
        assert_eq!(cli.profile, "default");
    }

    #[test]
    fn test_profile_custom_value() {
        let cli = Cli::try_parse_from(["mfa-rotate", "--profile", "work", "rotate"]).unwrap();
        assert_eq!(cli.profile, "work");
    }

    #[test]
    fn test_profile_short_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["mfa-rotate", "rotate", "-p", "dev"]).unwrap();
        assert_eq!(cli.profile, "dev");
    }

    #[test]
    fn test_rotate_with_code() {
        let cli = Cli::try_parse_from(["mfa-rotate", "rotate", "--code", "123456"]).unwrap();
        assert_eq!(rotate_args(cli).code, Some("123456".to_string()));
    }

    #[test]
    fn test_rotate_without_code() {
        let cli = Cli::try_parse_from(["mfa-rotate", "rotate"]).unwrap();
        assert_eq!(rotate_args(cli).code, None);
    }

    #[test]
    fn test_rotate_overrides_parsing() {
        let cli = Cli::try_parse_from([
            "mfa-rotate",
            "rotate",
            "-c",
            "123456",
            "--serial-number",
            "arn:aws:iam::111122223333:mfa/user",
            "--credentials-file",
            "/tmp/credentials",
            "--exports-file",
            "/tmp/exports.sh",
            "--session-profile",
            "session",
            "--region",
            "us-east-1",
            "--duration-seconds",
            "3600",
            "--show-secrets",
        ])
        .unwrap();

        let cmd = rotate_args(cli);
        assert_eq!(cmd.code.as_deref(), Some("123456"));
        assert_eq!(
            cmd.serial_number.as_deref(),
            Some("arn:aws:iam::111122223333:mfa/user")
        );
        assert_eq!(cmd.credentials_file, Some(PathBuf::from("/tmp/credentials")));
        assert_eq!(cmd.exports_file, Some(PathBuf::from("/tmp/exports.sh")));
        assert_eq!(cmd.session_profile.as_deref(), Some("session"));
        assert_eq!(cmd.region.as_deref(), Some("us-east-1"));
        assert_eq!(cmd.duration_seconds, Some(3600));
        assert!(cmd.show_secrets);
    }

    #[test]
    fn test_duration_must_be_numeric() {
        let result = Cli::try_parse_from(["mfa-rotate", "rotate", "--duration-seconds", "12h"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_configure_command_parsing() {
        let cli = Cli::try_parse_from(["mfa-rotate", "configure"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Configure(_))));
    }

    #[test]
    fn test_configure_show_parsing() {
        let cli = Cli::try_parse_from(["mfa-rotate", "-p", "work", "configure", "--show"]).unwrap();
        assert_eq!(cli.profile, "work");
        match cli.command {
            Some(Commands::Configure(cmd)) => assert!(cmd.show),
            _ => panic!("Expected Configure command"),
        }
    }

    #[test]
    fn test_completions_command_parsing() {
        let cli = Cli::try_parse_from(["mfa-rotate", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Completions(_))));
    }

    #[test]
    fn test_no_command_defaults_to_rotate() {
        let cli = Cli::try_parse_from(["mfa-rotate"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_command_structure_validation() {
        let cmd = Cli::command();
        cmd.debug_assert();
    }

    #[test]
    fn test_invalid_command_fails() {
        let result = Cli::try_parse_from(["mfa-rotate", "invalid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_flag_works() {
        let result = Cli::try_parse_from(["mfa-rotate", "--help"]);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn test_version_flag_works() {
        let result = Cli::try_parse_from(["mfa-rotate", "--version"]);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), ErrorKind::DisplayVersion);
        }
    }

    #[test]
    fn test_verbose_flag_multiple() {
        let cli = Cli::try_parse_from(["mfa-rotate", "-vvv", "rotate"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_verbose_long_flag() {
        let cli = Cli::try_parse_from(["mfa-rotate", "--verbose", "--verbose"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_verbose_default_zero() {
        let cli = Cli::try_parse_from(["mfa-rotate", "rotate"]).unwrap();
        assert_eq!(cli.verbose, 0);
    }
}
