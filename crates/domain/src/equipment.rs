use std::{
    collections::BTreeMap,
    ops::{Add, AddAssign},
    str::FromStr,
};

use derive_more::{AsRef, Deref, Display};

#[derive(AsRef, Debug, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EquipmentID(String);

impl EquipmentID {
    pub fn new(id: &str) -> Result<Self, EquipmentIDError> {
        let trimmed_id = id.trim();

        if trimmed_id.is_empty() {
            return Err(EquipmentIDError::Empty);
        }

        Ok(Self(trimmed_id.to_string()))
    }
}

impl From<&str> for EquipmentID {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EquipmentIDError {
    #[error("Equipment ID must not be empty")]
    Empty,
}

/// Equipment needed at the same time, keyed by equipment ID.
///
/// Zero counts are never stored, so an empty demand means no equipment at all.
#[derive(Deref, Debug, Default, Clone, PartialEq, Eq)]
pub struct Demand(BTreeMap<EquipmentID, u32>);

impl Demand {
    #[must_use]
    pub fn get(&self, id: &EquipmentID) -> u32 {
        self.0.get(id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: EquipmentID, count: u32) {
        if count == 0 {
            self.0.remove(&id);
        } else {
            self.0.insert(id, count);
        }
    }

    /// Elementwise maximum of both demands.
    #[must_use]
    pub fn max(&self, other: &Demand) -> Demand {
        let mut result = self.clone();
        for (id, count) in &other.0 {
            if *count > result.get(id) {
                result.set(id.clone(), *count);
            }
        }
        result
    }

    /// The first equipment ID whose demand exceeds the inventory.
    #[must_use]
    pub fn exceeding(&self, inventory: &Inventory) -> Option<&EquipmentID> {
        self.0
            .iter()
            .find(|(id, count)| **count > inventory.count(id))
            .map(|(id, _)| id)
    }
}

impl FromIterator<(EquipmentID, u32)> for Demand {
    fn from_iter<T: IntoIterator<Item = (EquipmentID, u32)>>(iter: T) -> Self {
        let mut demand = Demand::default();
        for (id, count) in iter {
            let count = demand.get(&id) + count;
            demand.set(id, count);
        }
        demand
    }
}

impl Add<&Demand> for Demand {
    type Output = Demand;

    fn add(mut self, rhs: &Demand) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<&Demand> for Demand {
    fn add_assign(&mut self, rhs: &Demand) {
        for (id, count) in &rhs.0 {
            let count = self.get(id) + count;
            self.set(id.clone(), count);
        }
    }
}

/// Equipment available concurrently, keyed by equipment ID.
#[derive(Deref, Debug, Default, Clone, PartialEq, Eq)]
pub struct Inventory(BTreeMap<EquipmentID, u32>);

impl Inventory {
    #[must_use]
    pub fn count(&self, id: &EquipmentID) -> u32 {
        self.0.get(id).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn utilization(&self, footprint: &Demand) -> Vec<Utilization> {
        let mut ids = self.0.keys().collect::<Vec<_>>();
        ids.extend(footprint.keys().filter(|id| !self.0.contains_key(*id)));
        ids.into_iter()
            .map(|id| Utilization {
                equipment: id.clone(),
                used: footprint.get(id),
                available: self.count(id),
            })
            .collect()
    }
}

impl FromIterator<(EquipmentID, u32)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (EquipmentID, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utilization {
    pub equipment: EquipmentID,
    pub used: u32,
    pub available: u32,
}

impl Utilization {
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.available.saturating_sub(self.used)
    }

    #[must_use]
    pub fn is_exceeded(&self) -> bool {
        self.used > self.available
    }
}

/// How the exercises of a station share its equipment.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Execution {
    /// All steps are performed at the same time, so the demand adds up.
    #[default]
    Simultaneous,
    /// One person performs the steps in turn, so the largest demand counts.
    Sequential,
}

impl Execution {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Execution::Simultaneous => "simultaneous",
            Execution::Sequential => "sequential",
        }
    }

    #[must_use]
    pub fn combine(self, footprint: &Demand, demand: &Demand) -> Demand {
        match self {
            Execution::Simultaneous => footprint.clone() + demand,
            Execution::Sequential => footprint.max(demand),
        }
    }

    #[must_use]
    pub fn combine_count(self, footprint: u32, demand: u32) -> u32 {
        match self {
            Execution::Simultaneous => footprint + demand,
            Execution::Sequential => footprint.max(demand),
        }
    }
}

impl FromStr for Execution {
    type Err = ExecutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simultaneous" => Ok(Execution::Simultaneous),
            "sequential" => Ok(Execution::Sequential),
            _ => Err(ExecutionError::Invalid(s.trim().to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Invalid execution \"{0}\" (expected simultaneous or sequential)")]
    Invalid(String),
}
