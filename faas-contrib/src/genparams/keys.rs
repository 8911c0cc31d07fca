//! Public key resolution
//!
//! A freshly generated `<identity>.pub` in the working directory always wins.
//! The caller's own key is only a fallback, and using it is announced on the
//! error stream so nobody ships their personal key by accident.

use super::error::{MissingFileSnafu, MissingKeySnafu, Result};
use snafu::ResultExt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Which key file the admin public key was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// `<identity>.pub` next to the cloud-init documents
    Generated(PathBuf),
    /// The caller's own key, normally `~/.ssh/id_rsa.pub`
    Own(PathBuf),
}

impl KeySource {
    /// Pick the first existing candidate, generated key first
    pub fn resolve(identity: &str, generated: &Path, own: &Path) -> Result<Self> {
        if generated.is_file() {
            debug!("using generated key {}", generated.display());
            return Ok(KeySource::Generated(generated.to_path_buf()));
        }

        if own.is_file() {
            warn!(
                "using {} instead of freshly generated keys",
                own.display()
            );
            return Ok(KeySource::Own(own.to_path_buf()));
        }

        MissingKeySnafu {
            identity,
            generated,
            own,
        }
        .fail()
    }

    pub fn path(&self) -> &Path {
        match self {
            KeySource::Generated(path) | KeySource::Own(path) => path,
        }
    }

    /// Full contents of the selected key file, unmodified
    pub fn read(&self) -> Result<String> {
        let path = self.path();
        fs::read_to_string(path).context(MissingFileSnafu { path })
    }
}

/// Resolve and read the admin public key in one step
pub fn resolve_public_key(identity: &str, generated: &Path, own: &Path) -> Result<String> {
    KeySource::resolve(identity, generated, own)?.read()
}
