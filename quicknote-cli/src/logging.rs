//! Logging setup for the CLI
//!
//! Interactive commands log to stderr. The stdio MCP server cannot, since
//! stdout carries the protocol and clients often discard stderr, so it logs
//! to a file through [`FileWriterGuard`].

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the stdio log file path
pub const LOG_FILE_ENV: &str = "QUICKNOTE_LOG_FILE";

/// Default stdio log file name inside the data directory
pub const DEFAULT_LOG_FILE_NAME: &str = "mcp.log";

/// A thread-safe file writer that flushes and syncs after every write.
///
/// Used for the stdio server log, where entries must be on disk when the
/// client kills the process.
///
/// # Example
///
/// ```no_run
/// use std::io::Write;
/// use std::sync::{Arc, Mutex};
/// use std::fs::File;
/// use quicknote_cli::logging::FileWriterGuard;
///
/// let file = File::create("log.txt").unwrap();
/// let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
/// guard.write_all(b"Log message\n").unwrap();
/// ```
#[derive(Clone)]
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Wrap a shared file
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

/// Pick the log level from the global flags.
///
/// `--quiet` wins over `--debug`, which wins over `--verbose`.
pub fn level_from_flags(quiet: bool, debug: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Log to stderr
pub fn init_stderr_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter(level))
        .try_init();
}

/// Where the stdio server logs: `QUICKNOTE_LOG_FILE`, else `<data_dir>/mcp.log`
pub fn stdio_log_path(data_dir: &Path) -> PathBuf {
    std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join(DEFAULT_LOG_FILE_NAME))
}

/// Log to `path`, falling back to stderr if it cannot be opened
pub fn init_file_logging(level: Level, path: &Path) {
    match open_log_file(path) {
        Ok(file) => {
            let guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
            let _ = tracing_subscriber::fmt()
                .with_writer(move || guard.clone())
                .with_env_filter(env_filter(level))
                .with_ansi(false)
                .try_init();
        }
        Err(e) => {
            init_stderr_logging(level);
            tracing::warn!("Failed to open log file {:?}, using stderr: {}", path, e);
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
