//! Error types for the command-line front end.

use std::path::PathBuf;
use tp_fluids::FluidError;

/// Everything a command can fail with; printed once on stderr.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Fluid(#[from] FluidError),

    #[error("Failed to read mixture file: {path}")]
    MixtureFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid mixture file {path}: {source}")]
    MixtureFileParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status: 2 when the input was rejected, 1 when a
    /// calculation or I/O step failed.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Fluid(e) if e.is_input_error() => 2,
            CliError::InvalidInput(_) | CliError::MixtureFileParse { .. } => 2,
            _ => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
