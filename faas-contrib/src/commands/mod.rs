pub mod cgi_proxy;
pub mod genparams;

pub use cgi_proxy::{CgiProxyArgs, handle_cgi_proxy};
pub use genparams::{GenParamsArgs, handle_genparams};
