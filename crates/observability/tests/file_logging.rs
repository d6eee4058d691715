//! Runs in its own test binary: installing the subscriber is process-global.

use liftlog_core::{LogConfig, LogFormat};
use liftlog_observability::{init_tracing_in, InitError};

#[test]
fn test_file_layer_writes_daily_log() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig {
        filter: "info".to_string(),
        format: LogFormat::Compact,
        file: true,
    };

    let guard = init_tracing_in(&config, Some(dir.path())).unwrap();
    tracing::error!(sets = 3, "file sink ready");

    // A second install is refused while the first subscriber is live.
    let err = init_tracing_in(&config, Some(dir.path())).err().unwrap();
    assert!(matches!(err, InitError::Install(_)));

    drop(guard);

    let logs: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("liftlog.log"))
        })
        .collect();
    assert_eq!(logs.len(), 1, "expected one rolling log file, got {logs:?}");

    let content = std::fs::read_to_string(&logs[0]).unwrap();
    assert!(content.contains("file sink ready"));
    assert!(content.contains("sets=3"));
}
