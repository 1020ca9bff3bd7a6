//! The global logger can only be installed once per process, so this lives in
//! its own test binary.

use gh_pr_config::logger;

#[test]
fn init_in_writes_records_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = logger::init_in(dir.path(), "info").unwrap();
    assert!(path.exists());

    log::error!("storage degraded");
    log::logger().flush();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("storage degraded"));

    // A second logger cannot be installed
    assert!(logger::init_in(dir.path(), "info").is_err());
}
