//! Local network address discovery
//!
//! Finds the IPv4 address other machines on the LAN can most likely reach
//! this host on. Display only: the listener never binds to it.

use crate::logger;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4};

/// Routing-table lookup target; nothing is ever sent to it
pub const ROUTE_TARGET: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 80);

/// Returned whenever discovery fails
pub const FALLBACK_IP: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// Best-guess LAN address of this host, `127.0.0.1` if there is no route
pub fn discover_local_ip() -> String {
    discover_local_ip_via(SocketAddr::V4(ROUTE_TARGET))
}

/// Same as [`discover_local_ip`], looking up the route towards `target`
pub fn discover_local_ip_via(target: SocketAddr) -> String {
    match route_source_ip(target) {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            logger::log_warning(&format!(
                "Could not determine network address via {target}: {e}, using {FALLBACK_IP}"
            ));
            FALLBACK_IP.to_string()
        }
    }
}

/// Connect a UDP socket towards `target` and read back the source address
/// the kernel picked for that route.
///
/// Connecting a datagram socket only resolves the route, no packet leaves the
/// host. The socket is owned by this frame and closed on every return path.
fn route_source_ip(target: SocketAddr) -> io::Result<Ipv4Addr> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.connect(&SockAddr::from(target))?;

    let local = socket.local_addr()?.as_socket().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "local address is not an IP socket")
    })?;

    match local.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() => Ok(ip),
        other => Err(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("unusable local address {other}"),
        )),
    }
}
