//! Logger setup shared by the binaries
//!
//! Library code logs through `tracing`; with no tracing subscriber installed
//! the events are forwarded to `log` and rendered on stderr by `env_logger`.
//! Stdout is reserved for tool output.

use env_logger::Env;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Install the stderr logger; later calls are no-ops
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp(None)
        .try_init();
}
