//! CGI request adapter
//!
//! The function watchdog hands each request to the function process as
//! `Http_*` environment variables. A CGI program expects the standard CGI
//! meta-variables instead, with the route relative to the function rather
//! than the gateway. This module builds that environment.

use std::collections::BTreeMap;
use std::ffi::OsString;
use tracing::warn;

/// Prefix of the variables the watchdog sets per request
pub const HTTP_PREFIX: &str = "Http_";

pub const DEFAULT_SERVER_NAME: &str = "localhost";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_METHOD: &str = "GET";
pub const SERVER_PROTOCOL: &str = "HTTP/1.1";
pub const GATEWAY_INTERFACE: &str = "CGI/1.1";

/// Request details as passed by the watchdog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub method: Option<String>,
    pub path: Option<String>,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<String>,
}

impl Invocation {
    /// Read the invocation from the current process environment
    pub fn from_env() -> Self {
        Self::from_vars(http_vars(std::env::vars_os()))
    }

    /// Pick the `Http_*` variables out of an arbitrary set of pairs
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut invocation = Self::default();
        let mut header_length = None;

        for (key, value) in vars {
            match key.as_ref() {
                "Http_Method" => invocation.method = Some(value.into()),
                "Http_Path" => invocation.path = Some(value.into()),
                "Http_Query" => invocation.query = Some(value.into()),
                "Http_Content_Type" => invocation.content_type = Some(value.into()),
                "Http_ContentLength" => invocation.content_length = Some(value.into()),
                // Raw header form, only used when the watchdog didn't set Http_ContentLength
                "Http_Content_Length" => header_length = Some(value.into()),
                _ => {}
            }
        }

        if invocation.content_length.is_none() {
            invocation.content_length = header_length;
        }

        invocation
    }
}

/// `Http_*` pairs from a raw environment
///
/// Other variables may hold arbitrary bytes and are ignored. An `Http_*`
/// value that is not valid UTF-8 is skipped with a warning.
pub fn http_vars<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            if !key.starts_with(HTTP_PREFIX) {
                return None;
            }
            match value.into_string() {
                Ok(value) => Some((key, value)),
                Err(_) => {
                    warn!("skipping {key}: value is not valid UTF-8");
                    None
                }
            }
        })
        .collect()
}

/// Server identity advertised to the CGI program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: String,
    pub port: u16,
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

/// Route inside the function for a gateway path
///
/// `/function/<name>/rest/of/path` becomes `/rest/of/path`; anything with
/// three or fewer segments maps to `/`.
pub fn route_path(whole_path: &str) -> String {
    let segments: Vec<&str> = whole_path.split('/').collect();
    if segments.len() > 3 {
        format!("/{}", segments[3..].join("/"))
    } else {
        "/".to_string()
    }
}

/// CGI meta-variables for `invocation`
pub fn cgi_environment(
    invocation: &Invocation,
    server: &ServerIdentity,
) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();

    env.insert("SERVER_NAME".to_string(), server.name.clone());
    env.insert("SERVER_PORT".to_string(), server.port.to_string());
    env.insert(
        "REQUEST_METHOD".to_string(),
        invocation
            .method
            .clone()
            .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
    );
    env.insert("SCRIPT_NAME".to_string(), String::new());
    env.insert(
        "PATH_INFO".to_string(),
        route_path(invocation.path.as_deref().unwrap_or_default()),
    );
    env.insert(
        "QUERY_STRING".to_string(),
        invocation.query.clone().unwrap_or_default(),
    );
    env.insert("SERVER_PROTOCOL".to_string(), SERVER_PROTOCOL.to_string());
    env.insert("GATEWAY_INTERFACE".to_string(), GATEWAY_INTERFACE.to_string());

    if let Some(content_type) = &invocation.content_type {
        env.insert("CONTENT_TYPE".to_string(), content_type.clone());
    }
    if let Some(content_length) = &invocation.content_length {
        env.insert("CONTENT_LENGTH".to_string(), content_length.clone());
    }

    env
}
