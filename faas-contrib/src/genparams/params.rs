//! Deployment template parameter set

use super::error::{Result, SerializeSnafu, WriteStdoutSnafu};
use serde::Serialize;
use snafu::ResultExt;
use std::io::Write;

pub const MASTER_SIZE: &str = "Standard_F1";
pub const AGENT_SIZE: &str = "Standard_F1";
pub const STORAGE_ACCOUNT_TYPE: &str = "Standard_LRS";

/// A single template parameter, serialized as `{"value": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamValue<T> {
    pub value: T,
}

impl<T> From<T> for ParamValue<T> {
    fn from(value: T) -> Self {
        Self { value }
    }
}

/// The nine parameters the deployment template expects, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    pub admin_username: ParamValue<String>,
    pub admin_public_key: ParamValue<String>,
    pub master_count: ParamValue<u64>,
    pub master_custom_data: ParamValue<String>,
    pub agent_count: ParamValue<u64>,
    pub agent_custom_data: ParamValue<String>,
    pub master_size: ParamValue<&'static str>,
    pub agent_size: ParamValue<&'static str>,
    pub sa_type: ParamValue<&'static str>,
}

/// Per-role inputs: how many nodes and their base64 cloud-init document
#[derive(Debug, Clone)]
pub struct RoleParams {
    pub count: u64,
    pub custom_data: String,
}

impl ParameterSet {
    pub fn new(username: String, public_key: String, master: RoleParams, agent: RoleParams) -> Self {
        Self {
            admin_username: username.into(),
            admin_public_key: public_key.into(),
            master_count: master.count.into(),
            master_custom_data: master.custom_data.into(),
            agent_count: agent.count.into(),
            agent_custom_data: agent.custom_data.into(),
            master_size: MASTER_SIZE.into(),
            agent_size: AGENT_SIZE.into(),
            sa_type: STORAGE_ACCOUNT_TYPE.into(),
        }
    }

    /// Compact single-line JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context(SerializeSnafu)
    }

    /// Write the JSON to `out` without a trailing newline
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        let json = self.to_json()?;
        out.write_all(json.as_bytes()).context(WriteStdoutSnafu)?;
        out.flush().context(WriteStdoutSnafu)
    }
}
