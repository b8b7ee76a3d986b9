//! Failures of the `ocquarium` binary and the exit code each one maps to.
//!
//! - 0:  rendered or printed successfully
//! - 2:  rejected by clap before any rig code runs
//! - 10: the scene cannot be simulated (empty or oversized canvas,
//!   non-positive creature size, zero frame interval)
//! - 11: the scene file could not be read or the PNG could not be written
//! - 12: `--background`, `--params` or the scene file did not parse
//! - 13: the JSON report could not be produced

use ocquarium_core::RigError;
use std::fmt;

/// A failed `render` or `config` run.
#[derive(Debug)]
pub enum CliError {
    /// The scene was rejected by the rig or the raster surface.
    Scene(RigError),
    /// Reading the scene file or writing the snapshot failed.
    File(String),
    /// A flag value or scene file did not parse.
    Input(String),
    /// Encoding the `--json` report failed.
    Report(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Scene(_) => 10,
            CliError::File(_) => 11,
            CliError::Input(_) => 12,
            CliError::Report(_) => 13,
        }
    }

    /// The `--json` form written to stderr.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.to_string(),
            "exit_code": self.exit_code(),
        })
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Scene(e) => write!(f, "cannot render scene: {e}"),
            CliError::File(msg) => write!(f, "file error: {msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Report(msg) => write!(f, "cannot encode report: {msg}"),
        }
    }
}

impl From<RigError> for CliError {
    fn from(e: RigError) -> Self {
        match e {
            RigError::Io(msg) => CliError::File(msg),
            RigError::InvalidColor(msg) => CliError::Input(format!("invalid --background: {msg}")),
            other => CliError::Scene(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Report(e.to_string())
    }
}
