//! Logging setup and home directory resolution for Volodex.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "volodex=info,volodex_core=info";
const KEPT_GENERATIONS: usize = 3;
const MAX_LOG_FILE_SIZE: u64 = 2 * 1024 * 1024;

pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// The terminal is owned by the TUI; keep stderr quiet.
    pub tui_mode: bool,
}

/// Install a file layer (size-rotated) and a stderr layer.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let log_dir = ensure_logs_dir()?;
    let file_writer = SharedLogFile::open(&log_dir, config.app_name)
        .with_context(|| format!("Failed to open log file in {}", log_dir.display()))?;

    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let stderr_filter = console_filter(config.verbose, config.tui_mode);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(stderr_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Stderr filter. Under the TUI nothing reaches the console unless
/// `--verbose` asks for it; the alternate screen would be overwritten.
fn console_filter(verbose: bool, tui_mode: bool) -> EnvFilter {
    match (verbose, tui_mode) {
        (true, _) => EnvFilter::new("debug"),
        (false, true) => EnvFilter::new("off"),
        (false, false) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    }
}

/// Volodex home directory.
///
/// Priority:
/// 1) VOLODEX_HOME
/// 2) ~/.volodex
/// 3) ./.volodex
pub fn volodex_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("VOLODEX_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .map(|home| home.join(".volodex"))
        .unwrap_or_else(|| PathBuf::from(".").join(".volodex"))
}

/// ~/.volodex/logs
pub fn logs_dir() -> PathBuf {
    volodex_home().join("logs")
}

pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

/// Append-only log file that moves itself aside once it grows past `max_size`.
///
/// `app.log` is live, `app.log.1` is the previous generation, and so on up
/// to `generations` files in total.
struct SizeRotatedFile {
    live: PathBuf,
    generations: usize,
    max_size: u64,
    file: File,
    written: u64,
}

impl SizeRotatedFile {
    fn open(dir: &Path, app_name: &str, generations: usize, max_size: u64) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let live = dir.join(format!("{}.log", file_stem(app_name)));
        let (file, written) = open_append(&live)?;
        let mut rotated = Self {
            live,
            generations: generations.max(1),
            max_size,
            file,
            written,
        };
        if rotated.written > rotated.max_size {
            rotated.rotate()?;
        }
        Ok(rotated)
    }

    fn generation(&self, n: usize) -> PathBuf {
        let mut name = self.live.clone().into_os_string();
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = self.generations - 1;
        if oldest > 0 {
            let _ = fs::remove_file(self.generation(oldest));
            for n in (1..oldest).rev() {
                let from = self.generation(n);
                if from.exists() {
                    fs::rename(&from, self.generation(n + 1))?;
                }
            }
            fs::rename(&self.live, self.generation(1))?;
        } else {
            fs::remove_file(&self.live)?;
        }

        let (file, written) = open_append(&self.live)?;
        self.file = file;
        self.written = written;
        Ok(())
    }
}

impl Write for SizeRotatedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_size {
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

fn open_append(path: &Path) -> io::Result<(File, u64)> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let len = file.metadata()?.len();
    Ok((file, len))
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

/// `MakeWriter` handle shared by every event of the file layer.
#[derive(Clone)]
struct SharedLogFile {
    inner: Arc<Mutex<SizeRotatedFile>>,
}

impl SharedLogFile {
    fn open(dir: &Path, app_name: &str) -> io::Result<Self> {
        let file = SizeRotatedFile::open(dir, app_name, KEPT_GENERATIONS, MAX_LOG_FILE_SIZE)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(file)),
        })
    }

    fn with_file<T>(&self, f: impl FnOnce(&mut SizeRotatedFile) -> io::Result<T>) -> io::Result<T> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        f(&mut guard)
    }
}

impl Write for SharedLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogFile {
    type Writer = SharedLogFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
