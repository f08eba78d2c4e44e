use async_trait::async_trait;
use status_board::core::installer::install_dependencies_in;
use status_board::domain::model::{BoardOptions, InstallOptions, LogLevel, StatusEvent};
use status_board::domain::ports::{DependencyInstaller, EventEmitter, LogSink};
use status_board::{
    BoardError, BroadcastEmitter, ConsoleLogger, JobDirectoryScanner, LoggingConfig, Result,
    StatusBoard,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FakeInstaller {
    calls: Mutex<Vec<Vec<PathBuf>>>,
    error: Option<&'static str>,
}

impl FakeInstaller {
    fn succeeding() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            error: None,
        }
    }

    fn failing(message: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            error: Some(message),
        }
    }
}

#[async_trait]
impl DependencyInstaller for FakeInstaller {
    async fn install(&self, directories: &[PathBuf]) -> Result<()> {
        self.calls.lock().unwrap().push(directories.to_vec());
        match self.error {
            Some(message) => Err(BoardError::InstallFailedError {
                directory: directories[0].display().to_string(),
                status: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn quiet_logger(
    out: &SharedBuffer,
    err: &SharedBuffer,
    emitter: Option<Arc<dyn EventEmitter>>,
) -> ConsoleLogger {
    let config = LoggingConfig {
        timestamps: false,
        ..LoggingConfig::default()
    };
    ConsoleLogger::with_writers(
        &config,
        None,
        emitter,
        Box::new(out.clone()),
        Box::new(err.clone()),
    )
}

#[tokio::test]
async fn test_install_error_is_returned_unchanged() {
    let dir = TempDir::new().unwrap();
    let installer = FakeInstaller::failing("ERROR");
    let out = SharedBuffer::default();
    let logger = quiet_logger(&out, &SharedBuffer::default(), None);

    let err = install_dependencies_in(
        dir.path(),
        InstallOptions { install: true },
        &installer,
        &logger,
    )
    .await
    .unwrap_err();

    match err {
        BoardError::InstallFailedError { status, .. } => assert_eq!(status, "ERROR"),
        other => panic!("unexpected error: {:?}", other),
    }

    let calls = installer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], vec![dir.path().join("packages")]);
    assert!(out.lines().is_empty());
}

#[tokio::test]
async fn test_install_success_prints_message() {
    let dir = TempDir::new().unwrap();
    let installer = FakeInstaller::succeeding();
    let out = SharedBuffer::default();
    let logger = quiet_logger(&out, &SharedBuffer::default(), None);

    install_dependencies_in(
        dir.path(),
        InstallOptions { install: true },
        &installer,
        &logger,
    )
    .await
    .unwrap();

    assert_eq!(installer.calls.lock().unwrap().len(), 1);
    assert_eq!(out.lines(), vec!["done!"]);
}

#[tokio::test]
async fn test_board_without_install_announces_server() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("packages/default/jobs/clock")).unwrap();

    let emitter = Arc::new(BroadcastEmitter::default());
    let mut rx = emitter.subscribe();
    let installer = Arc::new(FakeInstaller::succeeding());
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    let quiet = LoggingConfig {
        timestamps: false,
        ..LoggingConfig::default()
    };

    let board = StatusBoard::new(
        dir.path().to_path_buf(),
        installer.clone(),
        Arc::new(JobDirectoryScanner::new(
            dir.path().to_path_buf(),
            quiet,
            Some(emitter.clone()),
        )),
        Arc::new(quiet_logger(&out, &err, Some(emitter.clone()))),
        emitter.clone(),
    );

    board
        .start(Some(BoardOptions {
            port: 1234,
            install: false,
        }))
        .await
        .unwrap();

    assert!(installer.calls.lock().unwrap().is_empty());
    assert!(out.lines().is_empty());

    match rx.recv().await.unwrap() {
        StatusEvent::Server { level, msg } => {
            assert_eq!(level, LogLevel::Log);
            assert!(msg.starts_with("[dashboard: default] [job: clock] "));
        }
        other => panic!("expected job log event, got {:?}", other),
    }

    match rx.recv().await.unwrap() {
        StatusEvent::ServerInfo { port, .. } => assert_eq!(port, 1234),
        other => panic!("expected serverinfo, got {:?}", other),
    }
}

#[tokio::test]
async fn test_board_reports_install_failure_on_stderr() {
    let dir = TempDir::new().unwrap();
    let emitter = Arc::new(BroadcastEmitter::default());
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();

    let board = StatusBoard::new(
        dir.path().to_path_buf(),
        Arc::new(FakeInstaller::failing("exit status: 1")),
        Arc::new(JobDirectoryScanner::new(
            dir.path().to_path_buf(),
            LoggingConfig::default(),
            None,
        )),
        Arc::new(quiet_logger(&out, &err, None)),
        emitter,
    );

    let result = board
        .start(Some(BoardOptions {
            port: 0,
            install: true,
        }))
        .await;

    assert!(matches!(result, Err(BoardError::InstallFailedError { .. })));
    assert!(out.lines().is_empty());

    // Reported once, by the board itself.
    let errors = err.lines();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Could not install dependencies"));
}

#[tokio::test]
async fn test_late_subscriber_receives_server_info() {
    let dir = TempDir::new().unwrap();
    let emitter = Arc::new(BroadcastEmitter::default());
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();

    let board = StatusBoard::new(
        dir.path().to_path_buf(),
        Arc::new(FakeInstaller::succeeding()),
        Arc::new(JobDirectoryScanner::new(
            dir.path().to_path_buf(),
            LoggingConfig::default(),
            None,
        )),
        Arc::new(quiet_logger(&out, &err, Some(emitter.clone()))),
        emitter.clone(),
    );

    board
        .start(Some(BoardOptions {
            port: 5555,
            install: true,
        }))
        .await
        .unwrap();

    // Nobody was listening during start; this subscriber connects afterwards.
    let mut connection = board.connect(emitter.subscribe());

    let greeting = connection.next_event().await.unwrap();
    assert_eq!(greeting.channel(), "serverinfo");
    let json: serde_json::Value = serde_json::from_str(&greeting.to_json().unwrap()).unwrap();
    assert_eq!(json["event"], "serverinfo");
    assert_eq!(json["port"], 5555);

    let logger = quiet_logger(&out, &err, Some(emitter.clone()));
    logger.log("widget refreshed");

    match connection.next_event().await.unwrap() {
        StatusEvent::Server { level, msg } => {
            assert_eq!(level, LogLevel::Log);
            assert_eq!(msg, "widget refreshed");
        }
        other => panic!("expected live server event, got {:?}", other),
    }
}

#[test]
fn test_logger_sink_is_object_safe() {
    let out = SharedBuffer::default();
    let sink: Box<dyn LogSink> = Box::new(quiet_logger(&out, &SharedBuffer::default(), None));
    sink.log("hello");
    assert_eq!(out.lines(), vec!["hello"]);
}
