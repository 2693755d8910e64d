//! Log output is redirected to a file so it never lands on the terminal UI

use mailbox::config::{LOG_FILE_ENV_VAR, LOG_LEVEL_ENV_VAR};
use mailbox::logging::init_tracing;

#[test]
fn log_file_should_receive_events() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("mbx.log");
    std::env::set_var(LOG_FILE_ENV_VAR, &log_path);
    std::env::set_var(LOG_LEVEL_ENV_VAR, "info");

    init_tracing(false).unwrap();
    // A second call is a no-op
    init_tracing(true).unwrap();
    tracing::info!("sweep finished with 25 rows");
    tracing::debug!("filtered out");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("sweep finished with 25 rows"));
    assert!(!contents.contains("filtered out"));
}
