//! `cgi-proxy` command: run a CGI program for one function invocation
//!
//! The watchdog starts `cgi-proxy -- <program> [args..]` as the function
//! process. The program inherits stdin/stdout/stderr and sees the CGI
//! environment built from the `Http_*` variables on top of the inherited one.

use crate::cgi::{
    DEFAULT_SERVER_NAME, DEFAULT_SERVER_PORT, Invocation, ServerIdentity, cgi_environment,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, warn};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "cgi-proxy",
    version,
    about = "Run a CGI program with an environment built from the function invocation"
)]
pub struct CgiProxyArgs {
    /// Print the CGI environment as KEY=VALUE lines instead of running a program
    #[clap(long)]
    pub print: bool,

    /// SERVER_NAME advertised to the program
    #[clap(long, default_value = DEFAULT_SERVER_NAME)]
    pub server_name: String,

    /// SERVER_PORT advertised to the program
    #[clap(long, default_value_t = DEFAULT_SERVER_PORT)]
    pub server_port: u16,

    /// CGI program and its arguments (after `--`)
    #[clap(last = true, required_unless_present = "print")]
    pub command: Vec<String>,
}

impl CgiProxyArgs {
    fn server(&self) -> ServerIdentity {
        ServerIdentity {
            name: self.server_name.clone(),
            port: self.server_port,
        }
    }
}

/// Handle the `cgi-proxy` command, returning the exit code to use
pub fn handle_cgi_proxy(args: &CgiProxyArgs) -> Result<i32> {
    let env = cgi_environment(&Invocation::from_env(), &args.server());

    if args.print {
        print_environment(&env, std::io::stdout().lock())?;
        return Ok(0);
    }

    run_program(&args.command, &env)
}

/// Write `env` as sorted `KEY=VALUE` lines
pub fn print_environment<W: Write>(env: &BTreeMap<String, String>, mut out: W) -> Result<()> {
    for (key, value) in env {
        writeln!(out, "{key}={value}").context("Failed to write CGI environment")?;
    }
    out.flush().context("Failed to write CGI environment")
}

/// Run the CGI program under `env` and return its exit code
fn run_program(command: &[String], env: &BTreeMap<String, String>) -> Result<i32> {
    let (program, program_args) = command
        .split_first()
        .context("No CGI program given after --")?;

    debug!(
        "running {} {} as {} {}",
        program,
        program_args.join(" "),
        env["REQUEST_METHOD"],
        env["PATH_INFO"]
    );

    let mut expression = duct::cmd(program, program_args);
    for (key, value) in env {
        expression = expression.env(key, value);
    }

    let output = expression
        .unchecked()
        .run()
        .with_context(|| format!("Failed to execute: {program}"))?;

    // Killed by a signal: no exit code to pass on
    let code = output.status.code().unwrap_or(1);
    if code != 0 {
        warn!("{program} exited with status {code}");
    }
    Ok(code)
}
