pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod exports;
pub mod ini_file;
pub mod prompt;
pub mod rotator;

pub use error::RotateError;
