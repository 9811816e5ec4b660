use std::{
    cell::Cell,
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub const MAX_ENTRIES: usize = 100;

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

/// Persistent log, newest entry first.
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

static LOGGER: Logger = Logger;

thread_local! {
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

/// Log to stderr and to the given repository.
///
/// Only records up to `level` are written to the repository.
pub fn init(storage: Arc<Mutex<dyn Repository>>, level: LevelFilter) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        eprintln!("[{}] {message}", record.level());

        // Records emitted while writing an entry only go to stderr.
        if WRITING.replace(true) {
            return;
        }

        let repository = LOG.lock().ok().and_then(|log| log.clone());
        if let Some(repository) = repository
            && let Ok(repository) = repository.lock()
        {
            let _ = repository.write_entry(Entry {
                time: Local::now().format("%b %d %H:%M:%S").to_string(),
                level: record.level(),
                message,
            });
        }

        WRITING.set(false);
    }

    fn flush(&self) {}
}
