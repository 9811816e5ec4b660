use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use circuit_domain as domain;
use serde::{Deserialize, Serialize};

/// Format of dates in the history file.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct EquipmentFile {
    pub lifts: BTreeMap<String, Vec<Lift>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Lift {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default = "default_area")]
    pub area: String,
    /// Comma-separated list of muscles.
    #[serde(default)]
    pub muscles: String,
    #[serde(default)]
    pub equipment: BTreeMap<String, Count>,
    #[serde(default)]
    pub unilateral: bool,
    #[serde(default)]
    pub skip: bool,
}

impl TryFrom<Lift> for domain::Exercise {
    type Error = ExerciseError;

    fn try_from(value: Lift) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            link: value.link,
            area: value.area.parse()?,
            muscles: muscles(&value.muscles),
            equipment: value
                .equipment
                .into_iter()
                .map(|(id, count)| {
                    domain::EquipmentID::new(&id).map(|id| (id, count.count.unwrap_or(1)))
                })
                .collect::<Result<domain::Demand, _>>()?,
            laterality: value.unilateral.into(),
            category: domain::Category::Strength,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RestFile {
    pub rest: Vec<RestActivity>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RestActivity {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default = "default_area")]
    pub area: String,
    #[serde(default)]
    pub muscles: String,
    #[serde(default)]
    pub skip: bool,
}

impl TryFrom<RestActivity> for domain::Exercise {
    type Error = ExerciseError;

    fn try_from(value: RestActivity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            link: value.link,
            area: value.area.parse()?,
            muscles: muscles(&value.muscles),
            equipment: domain::Demand::default(),
            laterality: domain::Laterality::Bilateral,
            category: domain::Category::Mobility,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidArea(#[from] domain::AreaError),
    #[error(transparent)]
    InvalidEquipment(#[from] domain::EquipmentIDError),
}

fn default_area() -> String {
    domain::Area::Core.as_str().to_string()
}

fn muscles(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Count {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Contents of `plan.json`. Missing fields take the default values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PlanConfig {
    pub title: String,
    pub stations: u32,
    pub steps_per_station: u32,
    pub rounds: u32,
    pub timing: Timing,
    pub balance_order: Vec<String>,
    pub active_rest: ActiveRestSetting,
    pub active_rest_count: u32,
    pub execution: String,
    pub equipment: BTreeMap<String, Count>,
    pub must_use: Vec<String>,
    pub must_include: Vec<u32>,
    pub use_workout_history: bool,
    pub max_attempts: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self::from(&domain::Config::default())
    }
}

impl From<&domain::Constraints> for PlanConfig {
    fn from(value: &domain::Constraints) -> Self {
        Self {
            title: value.title.clone(),
            stations: value.stations,
            steps_per_station: value.steps_per_station,
            rounds: value.rounds,
            timing: value.timing.into(),
            balance_order: value
                .balance_order
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
            active_rest: value.active_rest.into(),
            active_rest_count: value.active_rest_count,
            execution: value.execution.as_str().to_string(),
            equipment: BTreeMap::new(),
            must_use: value
                .must_use_equipment
                .iter()
                .map(ToString::to_string)
                .collect(),
            must_include: value.must_include.iter().map(|id| **id).collect(),
            use_workout_history: value.use_history,
            max_attempts: value.max_attempts,
        }
    }
}

impl From<&domain::Config> for PlanConfig {
    fn from(value: &domain::Config) -> Self {
        Self {
            equipment: value
                .inventory
                .iter()
                .map(|(id, count)| {
                    (
                        id.to_string(),
                        Count {
                            count: Some(*count),
                        },
                    )
                })
                .collect(),
            ..Self::from(&value.constraints)
        }
    }
}

impl TryFrom<PlanConfig> for domain::Config {
    type Error = ConfigError;

    fn try_from(value: PlanConfig) -> Result<Self, Self::Error> {
        let must_include = value
            .must_include
            .iter()
            .copied()
            .map(domain::ExerciseID::from)
            .collect::<Vec<_>>();
        Ok(Self {
            constraints: domain::Constraints {
                title: value.title,
                stations: value.stations,
                steps_per_station: value.steps_per_station,
                rounds: value.rounds,
                timing: value.timing.try_into()?,
                balance_order: value
                    .balance_order
                    .iter()
                    .map(|a| a.parse::<domain::Area>())
                    .collect::<Result<Vec<_>, _>>()?,
                must_use_equipment: value
                    .must_use
                    .iter()
                    .map(|e| domain::EquipmentID::new(e))
                    .collect::<Result<BTreeSet<_>, _>>()?,
                must_include: vec![],
                active_rest: value.active_rest.try_into()?,
                active_rest_count: value.active_rest_count,
                max_attempts: value.max_attempts,
                execution: value.execution.parse()?,
                use_history: value.use_workout_history,
            }
            .including(&must_include),
            inventory: value
                .equipment
                .into_iter()
                .map(|(id, count)| {
                    domain::EquipmentID::new(&id).map(|id| (id, count.count.unwrap_or_default()))
                })
                .collect::<Result<domain::Inventory, _>>()?,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid timing \"{0}\" (expected work/rest in seconds)")]
    InvalidTiming(String),
    #[error(transparent)]
    InvalidArea(#[from] domain::AreaError),
    #[error(transparent)]
    InvalidActiveRest(#[from] domain::ActiveRestModeError),
    #[error(transparent)]
    InvalidExecution(#[from] domain::ExecutionError),
    #[error(transparent)]
    InvalidEquipment(#[from] domain::EquipmentIDError),
}

/// Work and rest intervals, either as object or as `"work/rest"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Timing {
    Intervals { work: u32, rest: u32 },
    Text(String),
}

impl From<domain::Timing> for Timing {
    fn from(value: domain::Timing) -> Self {
        Self::Intervals {
            work: value.work,
            rest: value.rest,
        }
    }
}

impl TryFrom<Timing> for domain::Timing {
    type Error = ConfigError;

    fn try_from(value: Timing) -> Result<Self, Self::Error> {
        match value {
            Timing::Intervals { work, rest } => Ok(Self { work, rest }),
            Timing::Text(text) => text
                .split_once('/')
                .and_then(|(work, rest)| {
                    Some(Self {
                        work: work.trim().parse().ok()?,
                        rest: rest.trim().parse().ok()?,
                    })
                })
                .ok_or(ConfigError::InvalidTiming(text)),
        }
    }
}

/// Active rest as boolean or as mode name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ActiveRestSetting {
    Enabled(bool),
    Mode(String),
}

impl From<domain::ActiveRestMode> for ActiveRestSetting {
    fn from(value: domain::ActiveRestMode) -> Self {
        Self::Mode(value.as_str().to_string())
    }
}

impl TryFrom<ActiveRestSetting> for domain::ActiveRestMode {
    type Error = domain::ActiveRestModeError;

    fn try_from(value: ActiveRestSetting) -> Result<Self, Self::Error> {
        match value {
            ActiveRestSetting::Enabled(true) => Ok(Self::Active),
            ActiveRestSetting::Enabled(false) => Ok(Self::Rest),
            ActiveRestSetting::Mode(mode) => mode.parse(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    #[serde(default)]
    pub workout_sessions: Vec<Session>,
    #[serde(default)]
    pub exercise_usage_count: BTreeMap<String, u32>,
    #[serde(default)]
    pub last_session_date: Option<String>,
    #[serde(default)]
    pub total_workouts_generated: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub date: String,
    #[serde(default)]
    pub title: String,
    pub used_exercise_ids: Vec<u32>,
    #[serde(default)]
    pub exercise_count: usize,
}

impl From<&domain::HistoryTracker> for History {
    fn from(value: &domain::HistoryTracker) -> Self {
        Self {
            workout_sessions: value
                .sessions()
                .map(|s| Session {
                    date: s.date.format(DATE_FORMAT).to_string(),
                    title: s.title.clone(),
                    used_exercise_ids: s.exercises.iter().map(|id| **id).collect(),
                    exercise_count: s.exercises.len(),
                })
                .collect(),
            exercise_usage_count: value
                .usage()
                .iter()
                .map(|(id, count)| (id.to_string(), *count))
                .collect(),
            last_session_date: value
                .last_session_date()
                .map(|date| date.format(DATE_FORMAT).to_string()),
            total_workouts_generated: value.total_workouts(),
        }
    }
}

impl TryFrom<History> for domain::HistoryTracker {
    type Error = HistoryError;

    fn try_from(value: History) -> Result<Self, Self::Error> {
        let sessions = value
            .workout_sessions
            .into_iter()
            .map(|s| -> Result<domain::Session, HistoryError> {
                Ok(domain::Session {
                    date: NaiveDateTime::parse_from_str(&s.date, DATE_FORMAT)?,
                    title: s.title,
                    exercises: s.used_exercise_ids.into_iter().map(Into::into).collect(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let usage = value
            .exercise_usage_count
            .into_iter()
            .map(|(id, count)| -> Result<(domain::ExerciseID, u32), HistoryError> {
                Ok((id.trim().parse::<u32>()?.into(), count))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(domain::HistoryTracker::new(
            sessions,
            usage,
            value.total_workouts_generated,
        ))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum HistoryError {
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),
    #[error("Invalid exercise ID: {0}")]
    InvalidID(#[from] std::num::ParseIntError),
}

/// The last accepted or edited plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub seed: u64,
    pub attempts: u32,
    pub created: NaiveDateTime,
    pub constraints: PlanConfig,
    pub stations: Vec<Station>,
    pub active_rest: RestSchedule,
    #[serde(default)]
    pub edits: Vec<Edit>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Display label, ignored when reading.
    #[serde(default)]
    pub letter: String,
    pub area: String,
    pub exercises: Vec<u32>,
    #[serde(default)]
    pub equipment: BTreeMap<String, u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RestSchedule {
    pub mode: String,
    pub exercises: Vec<u32>,
    pub schedule: Vec<Option<u32>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub seed: u64,
    pub replacements: Vec<(u32, u32)>,
}

impl From<&domain::WorkoutPlan> for Plan {
    fn from(value: &domain::WorkoutPlan) -> Self {
        Self {
            seed: value.seed,
            attempts: value.attempts,
            created: value.created,
            constraints: PlanConfig::from(&value.constraints),
            stations: value
                .stations
                .iter()
                .enumerate()
                .map(|(i, s)| Station {
                    letter: domain::Station::letter(i),
                    area: s.area.as_str().to_string(),
                    exercises: s.exercises.iter().map(|id| **id).collect(),
                    equipment: s
                        .footprint
                        .iter()
                        .map(|(id, count)| (id.to_string(), *count))
                        .collect(),
                })
                .collect(),
            active_rest: RestSchedule {
                mode: value.active_rest.mode.as_str().to_string(),
                exercises: value.active_rest.exercises.iter().map(|id| **id).collect(),
                schedule: value
                    .active_rest
                    .schedule
                    .iter()
                    .map(|id| id.map(|id| *id))
                    .collect(),
            },
            edits: value
                .edits
                .iter()
                .map(|e| Edit {
                    seed: e.seed,
                    replacements: e
                        .replacements
                        .iter()
                        .map(|(old, new)| (**old, **new))
                        .collect(),
                })
                .collect(),
        }
    }
}

impl TryFrom<Plan> for domain::WorkoutPlan {
    type Error = PlanError;

    fn try_from(value: Plan) -> Result<Self, Self::Error> {
        Ok(Self {
            stations: value
                .stations
                .into_iter()
                .map(|s| -> Result<domain::Station, PlanError> {
                    Ok(domain::Station {
                        area: s.area.parse()?,
                        exercises: s.exercises.into_iter().map(Into::into).collect(),
                        footprint: s
                            .equipment
                            .into_iter()
                            .map(|(id, count)| domain::EquipmentID::new(&id).map(|id| (id, count)))
                            .collect::<Result<domain::Demand, _>>()?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            active_rest: domain::ActiveRest {
                mode: value.active_rest.mode.parse()?,
                exercises: value
                    .active_rest
                    .exercises
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                schedule: value
                    .active_rest
                    .schedule
                    .into_iter()
                    .map(|id| id.map(Into::into))
                    .collect(),
            },
            constraints: domain::Config::try_from(value.constraints)?.constraints,
            seed: value.seed,
            attempts: value.attempts,
            created: value.created,
            edits: value
                .edits
                .into_iter()
                .map(|e| domain::EditRecord {
                    seed: e.seed,
                    replacements: e
                        .replacements
                        .into_iter()
                        .map(|(old, new)| (old.into(), new.into()))
                        .collect(),
                })
                .collect(),
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PlanError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    #[error(transparent)]
    InvalidArea(#[from] domain::AreaError),
    #[error(transparent)]
    InvalidActiveRest(#[from] domain::ActiveRestModeError),
    #[error(transparent)]
    InvalidEquipment(#[from] domain::EquipmentIDError),
}
