//! `genparams` command: pack deployment template parameters
//!
//! Reads `<identity>.pub` (or the caller's own key), the master and agent
//! cloud-init documents and the node counts, then prints the parameter JSON
//! or writes it to `azuredeploy.parameters.json`.

use crate::genparams::config::{
    AGENT_CLOUD_CONFIG, DEFAULT_AGENT_COUNT, DEFAULT_FALLBACK_KEY, DEFAULT_IDENTITY,
    DEFAULT_MASTER_COUNT, DEFAULT_OUTPUT_FILE, MASTER_CLOUD_CONFIG, expand_home,
};
use crate::genparams::{OutputTarget, PackerConfig, emit, pack, parse_count};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "genparams",
    version,
    about = "Pack SSH keys and cloud-init documents into deployment template parameters"
)]
pub struct GenParamsArgs {
    /// Admin username; `<IDENTITY>.pub` in the working directory is the preferred key
    #[clap(default_value = DEFAULT_IDENTITY)]
    pub identity: String,

    /// Number of master nodes (default: 1)
    #[clap(long, env = "MASTER_COUNT")]
    pub master_count: Option<String>,

    /// Number of agent nodes (default: 2)
    #[clap(long, env = "AGENT_COUNT")]
    pub agent_count: Option<String>,

    /// Cloud-init document for master nodes
    #[clap(long, default_value = MASTER_CLOUD_CONFIG)]
    pub master_config: PathBuf,

    /// Cloud-init document for agent nodes
    #[clap(long, default_value = AGENT_CLOUD_CONFIG)]
    pub agent_config: PathBuf,

    /// Key used when no generated key exists (`~` expands to $HOME)
    #[clap(long, default_value = DEFAULT_FALLBACK_KEY)]
    pub fallback_key: String,

    /// Write to azuredeploy.parameters.json instead of stdout
    #[clap(long, conflicts_with = "output")]
    pub write: bool,

    /// Write to the given file instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

impl GenParamsArgs {
    /// Resolve arguments and environment into a packer configuration
    pub fn to_config(&self) -> Result<PackerConfig> {
        let home = dirs::home_dir();
        let mut config = PackerConfig::new(&self.identity, ".", home.as_deref());

        config.master_count = parse_count(
            "MASTER_COUNT",
            self.master_count.as_deref(),
            DEFAULT_MASTER_COUNT,
        )?;
        config.agent_count = parse_count(
            "AGENT_COUNT",
            self.agent_count.as_deref(),
            DEFAULT_AGENT_COUNT,
        )?;
        config.master_config.clone_from(&self.master_config);
        config.agent_config.clone_from(&self.agent_config);
        config.fallback_key = expand_home(&self.fallback_key, home.as_deref());
        config.output = match (&self.output, self.write) {
            (Some(path), _) => OutputTarget::File(path.clone()),
            (None, true) => OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT_FILE)),
            (None, false) => OutputTarget::Stdout,
        };

        debug!(?config, "resolved packer configuration");
        Ok(config)
    }
}

/// Handle the `genparams` command
pub fn handle_genparams(args: &GenParamsArgs) -> Result<()> {
    let config = args.to_config()?;

    let params = pack(&config)
        .with_context(|| format!("Failed to pack parameters for {}", config.identity))?;

    emit(&params, &config.output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arguments as clap would produce them with no flags and no count variables set
    fn args(identity: &str) -> GenParamsArgs {
        GenParamsArgs {
            identity: identity.to_string(),
            master_count: None,
            agent_count: None,
            master_config: PathBuf::from(MASTER_CLOUD_CONFIG),
            agent_config: PathBuf::from(AGENT_CLOUD_CONFIG),
            fallback_key: DEFAULT_FALLBACK_KEY.to_string(),
            write: false,
            output: None,
        }
    }

    #[test]
    fn test_identity_defaults_to_fixed_constant() {
        let args = GenParamsArgs::try_parse_from(["genparams"]).unwrap();
        assert_eq!(args.identity, DEFAULT_IDENTITY);
    }

    #[test]
    fn test_unset_counts_use_defaults() {
        let config = args("alice").to_config().unwrap();
        assert_eq!(config.master_count, DEFAULT_MASTER_COUNT);
        assert_eq!(config.agent_count, DEFAULT_AGENT_COUNT);
    }

    #[test]
    fn test_output_selection() {
        let config = args("alice").to_config().unwrap();
        assert_eq!(config.output, OutputTarget::Stdout);

        let mut write = args("alice");
        write.write = true;
        assert_eq!(
            write.to_config().unwrap().output,
            OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT_FILE))
        );

        let mut output = args("alice");
        output.output = Some(PathBuf::from("params.json"));
        assert_eq!(
            output.to_config().unwrap().output,
            OutputTarget::File(PathBuf::from("params.json"))
        );
    }

    #[test]
    fn test_write_conflicts_with_output() {
        let result = GenParamsArgs::try_parse_from(["genparams", "--write", "-o", "x.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_count_overrides() {
        let mut args = args("alice");
        args.master_count = Some("3".to_string());
        args.agent_count = Some("7".to_string());

        let config = args.to_config().unwrap();
        assert_eq!(config.master_count, 3);
        assert_eq!(config.agent_count, 7);
    }

    #[test]
    fn test_bad_count_is_config_error() {
        let mut args = args("alice");
        args.master_count = Some("many".to_string());

        let err = args.to_config().unwrap_err();
        assert!(err.to_string().contains("MASTER_COUNT"));
    }
}
