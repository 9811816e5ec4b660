use log::{debug, error};

use crate::{
    Catalog, CatalogRepository, Constraints, ExerciseID, Generator, HistoryRepository,
    HistorySummary, HistoryTracker, Inventory, PlanRepository, ReadError, ServiceError,
    StorageError, WorkoutPlan, WriteError,
};

pub trait ConfigRepository {
    fn read_config(&self) -> Result<Config, ReadError>;
}

/// Default composition request and the equipment at hand.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub constraints: Constraints,
    pub inventory: Inventory,
}

pub trait WorkoutService {
    fn generate(&self, seed: Option<u64>) -> Result<WorkoutPlan, ServiceError>;
    fn include(&self, ids: &[ExerciseID], seed: Option<u64>)
    -> Result<WorkoutPlan, ServiceError>;
    fn accept(&self, plan: &WorkoutPlan) -> Result<(), ServiceError>;
    fn edit_last(
        &self,
        ids: &[ExerciseID],
        seed: Option<u64>,
    ) -> Result<WorkoutPlan, ServiceError>;
    fn get_last_plan(&self) -> Result<WorkoutPlan, ReadError>;
    fn get_history_summary(&self) -> Result<HistorySummary, ReadError>;
}

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(StorageError::NotFound) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R> Service<R>
where
    R: ConfigRepository + CatalogRepository + HistoryRepository + PlanRepository,
{
    fn context(&self) -> Result<(Config, Catalog, HistoryTracker), ReadError> {
        let config = log_on_error!(self.repository.read_config(), ReadError, "read", "config")?;
        let catalog = log_on_error!(
            self.repository.read_catalog(),
            ReadError,
            "read",
            "catalog"
        )?;
        let history = self.read_history()?;
        Ok((config, catalog, history))
    }

    /// A missing history is an empty history.
    fn read_history(&self) -> Result<HistoryTracker, ReadError> {
        match self.repository.read_history() {
            Err(ReadError::Storage(StorageError::NotFound)) => {
                debug!("no history found");
                Ok(HistoryTracker::default())
            }
            result => log_on_error!(result, ReadError, "read", "history"),
        }
    }
}

impl<R> WorkoutService for Service<R>
where
    R: ConfigRepository + CatalogRepository + HistoryRepository + PlanRepository,
{
    fn generate(&self, seed: Option<u64>) -> Result<WorkoutPlan, ServiceError> {
        let (config, catalog, history) = self.context()?;
        let plan = Generator::new(&catalog, &config.inventory, &history)
            .generate(&config.constraints, seed)
            .inspect_err(|err| error!("failed to generate plan: {err}"))?;
        Ok(plan)
    }

    fn include(
        &self,
        ids: &[ExerciseID],
        seed: Option<u64>,
    ) -> Result<WorkoutPlan, ServiceError> {
        let (config, catalog, history) = self.context()?;
        let plan = Generator::new(&catalog, &config.inventory, &history)
            .include(&config.constraints, ids, seed)
            .inspect_err(|err| error!("failed to generate plan: {err}"))?;
        Ok(plan)
    }

    fn accept(&self, plan: &WorkoutPlan) -> Result<(), ServiceError> {
        if plan.constraints.use_history {
            let mut history = self.read_history()?;
            history.record_usage(plan);
            log_on_error!(
                self.repository.write_history(&history),
                WriteError,
                "write",
                "history"
            )?;
        }
        log_on_error!(
            self.repository.write_last_plan(plan),
            WriteError,
            "write",
            "plan"
        )?;
        Ok(())
    }

    fn edit_last(
        &self,
        ids: &[ExerciseID],
        seed: Option<u64>,
    ) -> Result<WorkoutPlan, ServiceError> {
        let plan = self.get_last_plan()?;
        let (config, catalog, history) = self.context()?;
        let edited = Generator::new(&catalog, &config.inventory, &history)
            .edit(&plan, ids, seed)
            .inspect_err(|err| error!("failed to edit plan: {err}"))?;
        log_on_error!(
            self.repository.write_last_plan(&edited),
            WriteError,
            "write",
            "plan"
        )?;
        Ok(edited)
    }

    fn get_last_plan(&self) -> Result<WorkoutPlan, ReadError> {
        log_on_error!(self.repository.read_last_plan(), ReadError, "read", "plan")
    }

    fn get_history_summary(&self) -> Result<HistorySummary, ReadError> {
        Ok(self.read_history()?.summary())
    }
}
