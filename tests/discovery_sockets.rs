// Kept in its own test binary so no other test opens descriptors meanwhile

#[cfg(target_os = "linux")]
#[test]
fn discovery_does_not_leak_sockets() {
    fn open_fds() -> usize {
        std::fs::read_dir("/proc/self/fd").unwrap().count()
    }

    // First call may initialise stdio and other process-wide state
    let _ = devserve::net::discover_local_ip();
    let before = open_fds();

    for _ in 0..32 {
        let ip = devserve::net::discover_local_ip();
        assert!(ip.parse::<std::net::Ipv4Addr>().is_ok());
        // Failing discovery path must release the socket as well
        let ip = devserve::net::discover_local_ip_via("[::1]:80".parse().unwrap());
        assert_eq!(ip, "127.0.0.1");
    }

    assert_eq!(open_fds(), before);
}
