use std::fmt;

use crate::{Area, EquipmentID, ExerciseID};

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    #[error("balance order must not be empty")]
    EmptyBalanceOrder,
    #[error("{required} required exercises do not fit into {slots} slots")]
    TooManyRequired { required: usize, slots: usize },
    #[error("exercise {0} is an active rest exercise and cannot fill a station")]
    NotAStationExercise(ExerciseID),
    #[error("required exercises exceed the available {0}")]
    RequiredExceedInventory(EquipmentID),
    #[error("equipment {0} must be used but none is available")]
    UnavailableEquipment(EquipmentID),
    #[error("equipment {0} must be used but no feasible exercise uses it")]
    NoExerciseUses(EquipmentID),
    #[error("{slots} slots need more than the {available} feasible exercises")]
    NotEnoughExercises { slots: usize, available: usize },
}

/// The resource most often responsible for aborted attempts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bottleneck {
    Equipment(EquipmentID),
    /// No unused exercise is left for a station of this area.
    Area(Area),
    /// All remaining exercises are already used by the plan or excluded.
    Exercises,
}

impl fmt::Display for Bottleneck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bottleneck::Equipment(id) => write!(f, "equipment {id}"),
            Bottleneck::Area(area) => write!(f, "{area} exercises"),
            Bottleneck::Exercises => write!(f, "unique exercises"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("no feasible plan found in {attempts} attempts (most constraining: {bottleneck})")]
pub struct InfeasibleError {
    pub attempts: u32,
    pub bottleneck: Bottleneck,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Infeasible(#[from] InfeasibleError),
    #[error("unknown exercise {0}")]
    UnknownExercise(ExerciseID),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no exercises to replace")]
    NothingToReplace,
    #[error(transparent)]
    Infeasible(#[from] InfeasibleError),
    #[error("unknown exercise {0}")]
    UnknownExercise(ExerciseID),
}

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Edit(#[from] EditError),
}
