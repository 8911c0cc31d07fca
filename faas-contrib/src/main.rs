//! `genparams`: deployment template parameter packer
//!
//! Takes the admin username as first argument and outputs parameter JSON on
//! stdout (or to a file with `--write` / `--output`).

use clap::Parser;
use faas_contrib::commands::{GenParamsArgs, handle_genparams};
use faas_contrib::logging;
use std::process::exit;

fn main() {
    logging::init();

    let args = GenParamsArgs::parse();

    if let Err(e) = handle_genparams(&args) {
        tracing::error!("{e:#}");
        exit(1);
    }
}
