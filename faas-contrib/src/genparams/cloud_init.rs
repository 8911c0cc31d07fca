//! Cloud-init documents are shipped to the template as opaque base64 blobs.
//!
//! Contents are never templated or rewritten. A quick sanity pass warns about
//! documents cloud-init would probably ignore, but encoding goes ahead anyway.

use super::error::{MissingFileSnafu, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use snafu::ResultExt;
use std::fs;
use std::path::Path;
use tracing::warn;

/// First line cloud-init requires before it treats user data as cloud-config
pub const CLOUD_CONFIG_HEADER: &str = "#cloud-config";

/// Read `path` and return its bytes base64-encoded
pub fn encode_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).context(MissingFileSnafu { path })?;

    for problem in lint_document(&bytes) {
        warn!("{}: {}", path.display(), problem);
    }

    Ok(STANDARD.encode(&bytes))
}

/// Problems that would make cloud-init skip the document
pub fn lint_document(bytes: &[u8]) -> Vec<String> {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return vec!["document is not valid UTF-8".to_string()];
    };

    let mut problems = Vec::new();

    if !text.trim_start_matches('\u{feff}').starts_with(CLOUD_CONFIG_HEADER) {
        problems.push(format!("missing {CLOUD_CONFIG_HEADER} header"));
    }

    if let Err(e) = serde_yaml::from_str::<serde_yaml::Value>(text) {
        problems.push(format!("not valid YAML ({e})"));
    }

    problems
}
