//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to a size-capped log file in
//! the app's log directory and keeps the most recent lines in memory.
//! `log` records from dependencies are bridged into the same sink.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Rotate once the active file would grow past this
pub const MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;
/// Rotated files kept next to the active one
pub const MAX_ROTATED_FILES: usize = 3;
/// Lines kept in the in-memory buffer
pub const RECENT_CAPACITY: usize = 500;

#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    NotInitialized,
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log file error: {}", e),
            LoggerError::NotInitialized => write!(f, "Logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

// ========================================================================
// Rolling file
// ========================================================================

/// `<app>.log`, rotated to `<app>.log.1` … `<app>.log.N` when full
pub struct RollingFile {
    dir: PathBuf,
    base: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let base = format!("{}.log", app_name);
        let file = OpenOptions::new().create(true).append(true).open(dir.join(&base))?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            base,
            max_bytes,
            max_files,
            file,
            written,
        })
    }

    /// Path of the active file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.base)
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", self.base, index))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = self.rotated_path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_files).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }
        if self.max_files > 0 {
            fs::rename(self.path(), self.rotated_path(1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path())?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

// ========================================================================
// Circular buffer
// ========================================================================

pub struct RecentLines {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RecentLines {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push_bytes(&mut self, buf: &[u8]) {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines().map(str::trim_end).filter(|line| !line.is_empty()) {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line.to_string());
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

// ========================================================================
// Subscriber plumbing
// ========================================================================

#[derive(Clone)]
struct SharedWriter {
    file: Arc<Mutex<RollingFile>>,
    recent: Arc<Mutex<RecentLines>>,
}

struct LineWriter {
    shared: SharedWriter,
}

impl Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut recent) = self.shared.recent.lock() {
            recent.push_bytes(buf);
        }
        let mut file = self
            .shared
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.shared.file.lock() {
            Ok(mut file) => file.flush(),
            Err(_) => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter { shared: self.clone() }
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

static LOGGER: OnceLock<SharedWriter> = OnceLock::new();
/// Set when our subscriber is the global one, so its output already reaches the buffer
static OWNS_SUBSCRIBER: AtomicBool = AtomicBool::new(false);

/// Initialise logging into `log_dir`. Calling it again is a no-op.
///
/// The level filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let file = RollingFile::open(log_dir.as_ref(), app_name, MAX_FILE_BYTES, MAX_ROTATED_FILES)?;
    let shared = SharedWriter {
        file: Arc::new(Mutex::new(file)),
        recent: Arc::new(Mutex::new(RecentLines::new(RECENT_CAPACITY))),
    };
    if LOGGER.set(shared.clone()).is_err() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Another global subscriber (e.g. a test harness) wins; lines then reach the buffer through info/error
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_writer(shared)
        .try_init()
        .is_ok();
    OWNS_SUBSCRIBER.store(installed, Ordering::Release);

    tracing::info!("Logger initialized for {}", app_name);
    Ok(())
}

fn record(level: &str, message: &str) -> Result<(), LoggerError> {
    let shared = LOGGER.get().ok_or(LoggerError::NotInitialized)?;
    if OWNS_SUBSCRIBER.load(Ordering::Acquire) {
        return Ok(());
    }
    if let Ok(mut recent) = shared.recent.lock() {
        recent.push_bytes(format!("{} {} {}", chrono::Local::now().format("%H:%M:%S%.3f"), level, message).as_bytes());
    }
    Ok(())
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    tracing::info!("{}", message);
    record("INFO", message)
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    tracing::error!("{}", message);
    record("ERROR", message)
}

/// Most recent buffered lines, oldest first
pub fn recent_lines() -> Vec<String> {
    LOGGER
        .get()
        .and_then(|shared| shared.recent.lock().ok().map(|recent| recent.snapshot()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_bounded_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "App", 16, 2).unwrap();

        for i in 0..5 {
            file.write_all(format!("line number {}\n", i).as_bytes()).unwrap();
        }
        file.flush().unwrap();

        let active = fs::read_to_string(file.path()).unwrap();
        assert_eq!(active, "line number 4\n");
        assert_eq!(fs::read_to_string(dir.path().join("App.log.1")).unwrap(), "line number 3\n");
        assert_eq!(fs::read_to_string(dir.path().join("App.log.2")).unwrap(), "line number 2\n");
        assert!(!dir.path().join("App.log.3").exists());
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut file = RollingFile::open(dir.path(), "App", 1024, 1).unwrap();
            file.write_all(b"first\n").unwrap();
        }
        let mut file = RollingFile::open(dir.path(), "App", 1024, 1).unwrap();
        file.write_all(b"second\n").unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_recent_lines_is_circular() {
        let mut recent = RecentLines::new(2);
        recent.push_bytes(b"a\nb\n");
        recent.push_bytes(b"c\n\n");
        assert_eq!(recent.snapshot(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_init_twice_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        init_logger(dir.path(), "Test").unwrap();
        init_logger(dir.path(), "Test").unwrap();

        info("hello from test").unwrap();
        error("failure from test").unwrap();

        let lines = recent_lines();
        let count = |needle: &str| lines.iter().filter(|line| line.contains(needle)).count();
        assert_eq!(count("hello from test"), 1);
        assert_eq!(count("failure from test"), 1);
    }
}
