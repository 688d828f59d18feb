//! devserve - a small development file server
//!
//! Serves the working directory over HTTP, one connection at a time, and
//! marks every response with `Access-Control-Allow-Origin: *` so pages on
//! other local ports can fetch from it.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod net;
pub mod server;
