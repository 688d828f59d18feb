//! Network helpers

pub mod discovery;

pub use discovery::{discover_local_ip, discover_local_ip_via, FALLBACK_IP, ROUTE_TARGET};
