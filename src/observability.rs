use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::LevelFilter, fmt, layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize logging
///
/// This sets up:
/// - Console logging at the configured level (RUST_LOG wins when set)
/// - Structured JSON console output when `logging.format = "json"`
/// - A debug-level log file, rotated whenever a write would take it past
///   `max_bytes`
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_observability(logging: &LoggingConfig) -> Result<WorkerGuard> {
    let path = Path::new(&logging.file);
    if path.file_name().is_none() {
        anyhow::bail!("logging.file has no file name: {}", logging.file);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_writer = RotatingFile::open(path, logging.max_bytes, logging.backup_count)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_writer);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let console: Box<dyn Layer<Registry> + Send + Sync> = match logging.format {
        LogFormat::Json => fmt::layer().json().with_filter(env_filter).boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(LevelFilter::DEBUG),
        )
        .try_init()?;

    tracing::info!(
        file = %path.display(),
        level = %logging.level,
        max_bytes = logging.max_bytes,
        backup_count = logging.backup_count,
        "Logging initialized"
    );

    Ok(guard)
}

/// Append-only log file that rolls over by size while the process runs.
///
/// Before a write that would take the file past `max_bytes`, `path` becomes
/// `path.1`, `path.1` becomes `path.2` and so on, keeping at most
/// `backup_count` backups. With no backups the file is truncated instead.
/// A single write larger than `max_bytes` still lands in one file.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    file: File,
    written: u64,
}

impl RotatingFile {
    pub fn open(path: impl AsRef<Path>, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            file,
            written,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backup_count == 0 {
            self.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = backup_path(&self.path, self.backup_count);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..self.backup_count).rev() {
            let from = backup_path(&self.path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, index + 1))?;
            }
        }

        fs::rename(&self.path, backup_path(&self.path, 1))?;
        self.file = append(&self.path)?;
        self.written = 0;

        Ok(())
    }
}

impl Write for RotatingFile {
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

fn append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}
