//! Packer settings resolved from the command line and environment

use super::error::{ConfigParseSnafu, Result};
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Identity used when no username is given on the command line
pub const DEFAULT_IDENTITY: &str = "azureuser";

pub const MASTER_CLOUD_CONFIG: &str = "cloud-config-master.yml";
pub const AGENT_CLOUD_CONFIG: &str = "cloud-config-agent.yml";

/// The caller's own key, used when no per-identity key was generated
pub const DEFAULT_FALLBACK_KEY: &str = "~/.ssh/id_rsa.pub";

/// File name used by `--write`
pub const DEFAULT_OUTPUT_FILE: &str = "azuredeploy.parameters.json";

pub const DEFAULT_MASTER_COUNT: u64 = 1;
pub const DEFAULT_AGENT_COUNT: u64 = 2;

/// Where the packed parameters go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Fully resolved packer configuration
#[derive(Debug, Clone)]
pub struct PackerConfig {
    pub identity: String,
    pub master_count: u64,
    pub agent_count: u64,
    /// Directory holding `<identity>.pub` and the cloud-init documents
    pub work_dir: PathBuf,
    pub fallback_key: PathBuf,
    pub master_config: PathBuf,
    pub agent_config: PathBuf,
    pub output: OutputTarget,
}

impl PackerConfig {
    /// Defaults for `identity` rooted at `work_dir`, with the fallback key under `home`
    pub fn new(identity: &str, work_dir: impl Into<PathBuf>, home: Option<&Path>) -> Self {
        Self {
            identity: identity.trim().to_string(),
            master_count: DEFAULT_MASTER_COUNT,
            agent_count: DEFAULT_AGENT_COUNT,
            work_dir: work_dir.into(),
            fallback_key: expand_home(DEFAULT_FALLBACK_KEY, home),
            master_config: PathBuf::from(MASTER_CLOUD_CONFIG),
            agent_config: PathBuf::from(AGENT_CLOUD_CONFIG),
            output: OutputTarget::Stdout,
        }
    }

    /// Path of the per-identity generated key
    pub fn generated_key(&self) -> PathBuf {
        self.work_dir.join(format!("{}.pub", self.identity))
    }

    pub fn master_config_path(&self) -> PathBuf {
        self.work_dir.join(&self.master_config)
    }

    pub fn agent_config_path(&self) -> PathBuf {
        self.work_dir.join(&self.agent_config)
    }
}

/// Parse a count override, falling back to `default` when unset
pub fn parse_count(name: &str, raw: Option<&str>, default: u64) -> Result<u64> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .context(ConfigParseSnafu { name, value }),
    }
}

/// Expand a leading `~` against `home`; paths without one pass through
///
/// Without a home directory the `~` is left in place, which never matches an
/// existing file.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    if home.is_none() && path.starts_with('~') {
        warn!("no home directory found (is HOME set?), cannot expand {path}");
    }

    let expanded = shellexpand::tilde_with_context(path, || {
        home.map(|h| h.to_string_lossy().into_owned())
    });
    PathBuf::from(expanded.as_ref())
}
