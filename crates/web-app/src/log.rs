use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<dyn Repository>>> = Mutex::new(None);

pub trait Service {
    fn get_log_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn add_log_entry(&self, entry: Entry) -> Result<(), Error>;
}

pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Keeps the most recent entries in memory, newest first.
#[derive(Debug)]
pub struct MemoryLog {
    entries: Mutex<VecDeque<Entry>>,
    capacity: usize,
}

impl MemoryLog {
    pub const DEFAULT_CAPACITY: usize = 100;

    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }
}

impl Default for MemoryLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl Repository for MemoryLog {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|err| Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: Entry) -> Result<(), Error> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|err| Error::Unknown(err.to_string()))?;
        entries.push_front(entry);
        entries.truncate(self.capacity);
        Ok(())
    }
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(storage: Arc<dyn Repository>) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Trace))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(log) = LOG.lock() else {
            return;
        };
        if let Some(repository) = log.as_ref() {
            let _ = repository.write_entry(entry(record));
        }
    }

    fn flush(&self) {}
}

fn entry(record: &Record) -> Entry {
    Entry {
        time: Local::now().format("%b %d %H:%M:%S").to_string(),
        level: record.level(),
        message: record.args().to_string(),
    }
}
