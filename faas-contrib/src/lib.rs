//! # faas-contrib
//!
//! Contrib helpers for running a cluster of the function platform:
//!
//! - [`genparams`] packs SSH keys and cloud-init documents into a deployment
//!   template parameter file
//! - [`cgi`] adapts a function invocation's `Http_*` environment into a CGI
//!   environment so a small web app can answer function calls
//!
//! The [`commands`] module holds the argument parsing and handlers behind the
//! `genparams` and `cgi-proxy` binaries.

pub mod cgi;
pub mod commands;
pub mod genparams;
pub mod logging;
