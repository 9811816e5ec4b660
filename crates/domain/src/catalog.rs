use std::collections::BTreeMap;

use log::debug;

use crate::{Exercise, ExerciseID, Inventory, ReadError};

pub trait CatalogRepository {
    fn read_catalog(&self) -> Result<Catalog, ReadError>;
}

/// Registry of all known exercises, ordered by ID.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    exercises: BTreeMap<ExerciseID, Exercise>,
}

impl Catalog {
    pub fn new(exercises: impl IntoIterator<Item = Exercise>) -> Result<Self, CatalogError> {
        let mut result = BTreeMap::new();
        for exercise in exercises {
            if let Some(existing) = result.insert(exercise.id, exercise) {
                return Err(CatalogError::DuplicateID(existing.id));
            }
        }
        Ok(Self { exercises: result })
    }

    #[must_use]
    pub fn get(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ExerciseID) -> bool {
        self.exercises.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.values()
    }

    pub fn stations(&self) -> impl Iterator<Item = &Exercise> {
        self.iter().filter(|e| !e.is_active_rest())
    }

    pub fn active_rest(&self) -> impl Iterator<Item = &Exercise> {
        self.iter().filter(|e| e.is_active_rest())
    }

    /// Station exercises whose equipment demand could be met by the inventory on its own.
    #[must_use]
    pub fn feasible(&self, inventory: &Inventory) -> Vec<&Exercise> {
        let (feasible, infeasible): (Vec<_>, Vec<_>) = self
            .stations()
            .partition(|e| e.equipment.exceeding(inventory).is_none());
        if !infeasible.is_empty() {
            debug!("{} exercises exceed the available equipment", infeasible.len());
        }
        feasible
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate exercise ID {0}")]
    DuplicateID(ExerciseID),
}
