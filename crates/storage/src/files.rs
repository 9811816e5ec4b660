use std::{
    collections::VecDeque,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use circuit_domain as domain;
use log::{debug, info, warn};
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

use crate::json;

/// JSON files below a root directory.
#[derive(Debug, Clone)]
pub struct JsonFiles {
    root: PathBuf,
}

impl JsonFiles {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, store: Store) -> PathBuf {
        self.root.join(store.as_ref())
    }

    pub fn read<V: DeserializeOwned>(&self, store: Store) -> Result<V, FileError> {
        read(&self.path(store))
    }

    pub fn write<V: Serialize>(&self, store: Store, value: &V) -> Result<(), FileError> {
        let path = self.store(store, value)?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    /// Write without logging, as needed by the log itself.
    fn store<V: Serialize>(&self, store: Store, value: &V) -> Result<PathBuf, FileError> {
        let path = self.path(store);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        Ok(path)
    }

    /// Equipment files in name order, excluding the active rest file.
    fn equipment_files(&self) -> Result<Vec<PathBuf>, FileError> {
        let active_rest = self.path(Store::ActiveRest);
        let mut paths = fs::read_dir(self.path(Store::Equipment))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|e| e == "json") && *p != active_rest)
            .collect::<Vec<_>>();
        paths.sort();
        Ok(paths)
    }

    fn read_lifts(&self) -> Result<Vec<domain::Exercise>, FileError> {
        let mut exercises = vec![];
        let mut skipped = 0;
        for path in self.equipment_files()? {
            let file: json::EquipmentFile = read(&path)?;
            for lift in file.lifts.into_values().flatten() {
                if lift.skip {
                    debug!("skipping {}", lift.name);
                    skipped += 1;
                    continue;
                }
                let name = lift.name.clone();
                exercises.push(
                    domain::Exercise::try_from(lift)
                        .with_context(|| format!("invalid exercise \"{name}\" in {}", path.display()))?,
                );
            }
        }
        if skipped > 0 {
            info!("skipped {skipped} exercises marked with skip");
        }
        Ok(exercises)
    }

    fn read_active_rest(&self) -> Result<Vec<domain::Exercise>, FileError> {
        let file: json::RestFile = match self.read(Store::ActiveRest) {
            Err(FileError::NotFound) => {
                warn!("no active rest exercises found");
                return Ok(vec![]);
            }
            result => result?,
        };
        let mut exercises = vec![];
        for activity in file.rest {
            if activity.skip {
                debug!("skipping {}", activity.name);
                continue;
            }
            let name = activity.name.clone();
            exercises.push(
                domain::Exercise::try_from(activity)
                    .with_context(|| format!("invalid active rest exercise \"{name}\""))?,
            );
        }
        Ok(exercises)
    }
}

fn read<V: DeserializeOwned>(path: &Path) -> Result<V, FileError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => FileError::NotFound,
        _ => FileError::Io(err),
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    #[strum(serialize = "equipment")]
    Equipment,
    #[strum(serialize = "equipment/active_rest.json")]
    ActiveRest,
    #[strum(serialize = "config/plan.json")]
    Config,
    #[strum(serialize = "workout_history.json")]
    History,
    #[strum(serialize = "workout_store/LAST_WORKOUT_PLAN.json")]
    LastPlan,
    #[strum(serialize = "log.json")]
    Log,
}

#[derive(thiserror::Error, Debug)]
pub enum FileError {
    #[error("file not found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<FileError> for domain::ReadError {
    fn from(value: FileError) -> Self {
        match value {
            FileError::NotFound => domain::StorageError::NotFound.into(),
            err => domain::StorageError::Other(Box::new(err)).into(),
        }
    }
}

impl From<FileError> for domain::WriteError {
    fn from(value: FileError) -> Self {
        match value {
            FileError::NotFound => domain::StorageError::NotFound.into(),
            err => domain::StorageError::Other(Box::new(err)).into(),
        }
    }
}

impl domain::CatalogRepository for JsonFiles {
    fn read_catalog(&self) -> Result<domain::Catalog, domain::ReadError> {
        let mut exercises = self.read_lifts()?;
        exercises.extend(self.read_active_rest()?);
        let catalog = domain::Catalog::new(exercises)
            .map_err(|err| FileError::Other(anyhow::Error::new(err)))?;
        debug!("read {} exercises", catalog.len());
        Ok(catalog)
    }
}

impl domain::ConfigRepository for JsonFiles {
    fn read_config(&self) -> Result<domain::Config, domain::ReadError> {
        let config = match self.read::<json::PlanConfig>(Store::Config) {
            Err(FileError::NotFound) => {
                warn!("{} not found, using defaults", Store::Config.as_ref());
                json::PlanConfig::default()
            }
            result => result?,
        };
        Ok(domain::Config::try_from(config)
            .map_err(|err| FileError::Other(anyhow::Error::new(err)))?)
    }
}

impl domain::HistoryRepository for JsonFiles {
    fn read_history(&self) -> Result<domain::HistoryTracker, domain::ReadError> {
        let history = self.read::<json::History>(Store::History)?;
        Ok(domain::HistoryTracker::try_from(history)
            .map_err(|err| FileError::Other(anyhow::Error::new(err)))?)
    }

    fn write_history(&self, history: &domain::HistoryTracker) -> Result<(), domain::WriteError> {
        Ok(self.write(Store::History, &json::History::from(history))?)
    }
}

impl domain::PlanRepository for JsonFiles {
    fn read_last_plan(&self) -> Result<domain::WorkoutPlan, domain::ReadError> {
        let plan = self.read::<json::Plan>(Store::LastPlan)?;
        Ok(domain::WorkoutPlan::try_from(plan)
            .map_err(|err| FileError::Other(anyhow::Error::new(err)))?)
    }

    fn write_last_plan(&self, plan: &domain::WorkoutPlan) -> Result<(), domain::WriteError> {
        Ok(self.write(Store::LastPlan, &json::Plan::from(plan))?)
    }
}

impl crate::log::Repository for JsonFiles {
    fn read_entries(&self) -> Result<VecDeque<crate::log::Entry>, crate::log::Error> {
        match self.read(Store::Log) {
            Err(FileError::NotFound) => Ok(VecDeque::new()),
            result => result,
        }
        .map_err(|err| crate::log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: crate::log::Entry) -> Result<(), crate::log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(crate::log::MAX_ENTRIES);
        self.store(Store::Log, &entries)
            .map(|_| ())
            .map_err(|err| crate::log::Error::Unknown(err.to_string()))
    }
}
