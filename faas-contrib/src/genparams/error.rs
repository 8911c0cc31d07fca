//! Error taxonomy for the parameter packer
//!
//! Every variant is fatal: the packer is a one-shot pre-deployment step and
//! never retries.

use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GenParamsError {
    /// Neither `<identity>.pub` nor the caller's own key exists
    #[snafu(display(
        "No public keys found for {identity} (tried {} and {}), exiting",
        generated.display(),
        own.display()
    ))]
    MissingKey {
        identity: String,
        generated: PathBuf,
        own: PathBuf,
    },

    /// A required input file (cloud-init document or selected key) could not be read
    #[snafu(display("Failed to read {}", path.display()))]
    MissingFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A count override is not a non-negative integer
    #[snafu(display("{name} must be a non-negative integer, got {value:?}"))]
    ConfigParse {
        name: String,
        value: String,
        source: std::num::ParseIntError,
    },

    #[snafu(display("Failed to serialize parameters"))]
    Serialize { source: serde_json::Error },

    #[snafu(display("Failed to write parameters to {}", path.display()))]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to write parameters to stdout"))]
    WriteStdout { source: std::io::Error },
}

pub type Result<T, E = GenParamsError> = std::result::Result<T, E>;
