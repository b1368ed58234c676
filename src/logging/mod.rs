
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Local, NaiveDate};

pub const LOG_FILE_PREFIX: &str = "daybook-";

/// Every invocation on the same day appends to one file.
pub fn daily_log_name(day: NaiveDate) -> String {
    format!("{LOG_FILE_PREFIX}{}.log", day.format("%Y%m%d"))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        })
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub enum LogTarget {
    ConsoleOnly,
    #[default]
    ConsoleAndFile,
    FileOnly,
}

impl LogTarget {
    fn console(self) -> bool {
        matches!(self, LogTarget::ConsoleOnly | LogTarget::ConsoleAndFile)
    }

    fn file(self) -> bool {
        matches!(self, LogTarget::ConsoleAndFile | LogTarget::FileOnly)
    }
}

/// The day's log file, opened on the first file line.
enum DailyFile {
    Unopened,
    Open { file: File, path: PathBuf },
    Unavailable,
}

impl DailyFile {
    fn open(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(daily_log_name(Local::now().date_naive()));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(DailyFile::Open { file, path })
    }
}

/// Console lines carry the bare message: info on stdout, warnings and errors
/// on stderr. File lines are timestamped and level-tagged.
pub struct Logger {
    log_dir: PathBuf,
    daily: Mutex<DailyFile>,
    file_enabled: AtomicBool,
}

impl Logger {
    pub fn with_log_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            log_dir: dir.as_ref().to_path_buf(),
            daily: Mutex::new(DailyFile::Unopened),
            file_enabled: AtomicBool::new(true),
        }
    }

    pub fn info(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Info, message.as_ref(), target);
    }

    pub fn warn(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Warn, message.as_ref(), target);
    }

    pub fn error(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Error, message.as_ref(), target);
    }

    pub fn set_file_logging_enabled(&self, enabled: bool) {
        self.file_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn file_logging_enabled(&self) -> bool {
        self.file_enabled.load(Ordering::SeqCst)
    }

    /// Path of the day's file once something has been written to it.
    pub fn log_path(&self) -> Option<PathBuf> {
        match &*self.daily.lock().ok()? {
            DailyFile::Open { path, .. } => Some(path.clone()),
            DailyFile::Unopened | DailyFile::Unavailable => None,
        }
    }

    fn log(&self, level: LogLevel, message: &str, target: LogTarget) {
        if target.console() {
            match level {
                LogLevel::Info => println!("{message}"),
                LogLevel::Warn | LogLevel::Error => eprintln!("{message}"),
            }
        }
        if target.file() && self.file_logging_enabled() {
            let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            self.append(&format!("[{stamp}] {level:<5} {message}"));
        }
    }

    fn append(&self, line: &str) {
        let Ok(mut daily) = self.daily.lock() else {
            return;
        };
        if matches!(*daily, DailyFile::Unopened) {
            *daily = DailyFile::open(&self.log_dir).unwrap_or_else(|err| {
                eprintln!(
                    "WARN: File logging unavailable in '{}'; continuing without a log file. ({err})",
                    self.log_dir.display()
                );
                DailyFile::Unavailable
            });
        }
        if let DailyFile::Open { file, .. } = &mut *daily {
            let _ = writeln!(file, "{line}");
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("log_dir", &self.log_dir)
            .field("log_path", &self.log_path())
            .finish()
    }
}
