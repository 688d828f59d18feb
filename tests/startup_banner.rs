// Own test binary: the log writer is process-global and set once

use devserve::logger;

#[test]
fn banner_stays_out_of_access_log() {
    let dir = tempfile::tempdir().unwrap();
    let access = dir.path().join("access.log");
    let error = dir.path().join("error.log");
    logger::writer::init(access.to_str(), error.to_str()).unwrap();

    logger::log_server_start(9000, "10.0.0.2");
    logger::log_error("after startup");

    let access_log = std::fs::read_to_string(&access).unwrap();
    let error_log = std::fs::read_to_string(&error).unwrap();
    assert!(!access_log.contains("Server running at"));
    assert!(!access_log.contains("http://10.0.0.2:9000"));
    assert!(!error_log.contains("Server running at"));
    assert!(error_log.contains("[ERROR] after startup"));
}
