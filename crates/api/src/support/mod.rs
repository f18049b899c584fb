#![forbid(unsafe_code)]

mod args;
mod jsonrpc;
mod respond;
mod secrets;
mod session;
mod time;

pub(crate) use args::*;
pub(crate) use jsonrpc::*;
pub(crate) use respond::*;
pub(crate) use secrets::*;
pub(crate) use session::*;
pub(crate) use time::*;
