//! `cgi-proxy`: run a CGI program as a function process
//!
//! Exits with the same code as the CGI program.

use clap::Parser;
use faas_contrib::commands::{CgiProxyArgs, handle_cgi_proxy};
use faas_contrib::logging;
use std::process::exit;

fn main() {
    logging::init();

    let args = CgiProxyArgs::parse();

    match handle_cgi_proxy(&args) {
        Ok(code) => exit(code),
        Err(e) => {
            tracing::error!("{e:#}");
            exit(1);
        }
    }
}
