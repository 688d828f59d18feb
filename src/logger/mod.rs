//! Logger module
//!
//! Provides logging utilities for the dev server:
//! - Startup banner with the local and network URLs
//! - Access logging with multiple formats
//! - Error and warning logging
//! - Optional file-based targets

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Announce where the server can be reached
///
/// Always printed to stdout, even when access logging goes to a file.
pub fn log_server_start(port: u16, network_ip: &str) {
    println!("Server running at:");
    println!("- Local: http://localhost:{port}");
    println!("- Network: http://{network_ip}:{port}");
}

pub fn log_connection_error(peer_addr: &SocketAddr, err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection from {peer_addr}: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
