//! Deployment parameter packer
//!
//! Turns an admin identity, its SSH public key and the master/agent cloud-init
//! documents into the parameter file consumed by the cluster deployment
//! template:
//! - Public key resolution (generated key first, own key as fallback)
//! - Node counts from the environment
//! - Base64 packing of cloud-init documents
//! - Compact JSON output to stdout or a file

pub mod cloud_init;
pub mod config;
pub mod error;
pub mod keys;
pub mod params;

pub use cloud_init::encode_document;
pub use config::{OutputTarget, PackerConfig, parse_count};
pub use error::{GenParamsError, Result};
pub use keys::{KeySource, resolve_public_key};
pub use params::{ParamValue, ParameterSet, RoleParams};

use error::WriteOutputSnafu;
use snafu::ResultExt;
use std::fs;
use tracing::info;

/// Build the parameter set described by `config`
///
/// The key is resolved before any cloud-init document is touched, so a
/// missing key is reported even when the documents are missing too.
pub fn pack(config: &PackerConfig) -> Result<ParameterSet> {
    let public_key = resolve_public_key(
        &config.identity,
        &config.generated_key(),
        &config.fallback_key,
    )?;

    let master = RoleParams {
        count: config.master_count,
        custom_data: encode_document(&config.master_config_path())?,
    };
    let agent = RoleParams {
        count: config.agent_count,
        custom_data: encode_document(&config.agent_config_path())?,
    };

    Ok(ParameterSet::new(
        config.identity.clone(),
        public_key,
        master,
        agent,
    ))
}

/// Write the packed parameters to the configured target
pub fn emit(params: &ParameterSet, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => params.write_to(std::io::stdout().lock()),
        OutputTarget::File(path) => {
            let json = params.to_json()?;
            fs::write(path, json).context(WriteOutputSnafu { path })?;
            info!("wrote parameters to {}", path.display());
            Ok(())
        }
    }
}
