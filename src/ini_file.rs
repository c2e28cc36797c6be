//! Verbatim load/store of AWS INI files.
//!
//! The AWS CLI does not interpret quotes or backslash escapes, so neither do
//! we: values such as `credential_process="C:\tools\aws.exe" --profile x`
//! must be written back exactly as they were read.

use std::path::Path;

use anyhow::{Context, Result};
use ini::{EscapePolicy, Ini, ParseOption, WriteOption};

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

fn write_option() -> WriteOption {
    WriteOption {
        escape_policy: EscapePolicy::Nothing,
        ..Default::default()
    }
}

pub fn load(path: &Path) -> Result<Ini> {
    Ini::load_from_file_opt(path, parse_option())
        .with_context(|| format!("Failed to read {}", path.display()))
}

pub fn store(ini: &Ini, path: &Path) -> Result<()> {
    ini.write_to_file_opt(path, write_option())
        .with_context(|| format!("Failed to write {}", path.display()))
}
