use std::{collections::BTreeSet, str::FromStr};

use rand::Rng;

use crate::{
    Area, Catalog, ConfigurationError, Demand, EquipmentID, Execution, ExerciseID, GenerateError,
    Inventory,
};

/// The composition request for a single generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    pub title: String,
    pub stations: u32,
    pub steps_per_station: u32,
    pub rounds: u32,
    pub timing: Timing,
    pub balance_order: Vec<Area>,
    pub must_use_equipment: BTreeSet<EquipmentID>,
    pub must_include: Vec<ExerciseID>,
    pub active_rest: ActiveRestMode,
    pub active_rest_count: u32,
    pub max_attempts: u32,
    pub execution: Execution,
    pub use_history: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            title: "Circuit Workout".to_string(),
            stations: 6,
            steps_per_station: 2,
            rounds: 3,
            timing: Timing::default(),
            balance_order: vec![Area::Upper, Area::Lower, Area::Core],
            must_use_equipment: BTreeSet::new(),
            must_include: vec![],
            active_rest: ActiveRestMode::Auto,
            active_rest_count: 4,
            max_attempts: 15,
            execution: Execution::Simultaneous,
            use_history: true,
        }
    }
}

impl Constraints {
    #[must_use]
    pub fn slots(&self) -> usize {
        self.stations as usize * self.steps_per_station as usize
    }

    /// Target area of each station, cycling through the balance order.
    #[must_use]
    pub fn targets(&self) -> Vec<Area> {
        self.balance_order
            .iter()
            .copied()
            .cycle()
            .take(self.stations as usize)
            .collect()
    }

    /// Add exercises that must appear in the plan, keeping the order and skipping duplicates.
    #[must_use]
    pub fn including(mut self, ids: &[ExerciseID]) -> Self {
        for id in ids {
            if !self.must_include.contains(id) {
                self.must_include.push(*id);
            }
        }
        self
    }

    /// Reject requests that no random attempt could ever satisfy.
    pub fn validate(&self, catalog: &Catalog, inventory: &Inventory) -> Result<(), GenerateError> {
        for (name, value) in [
            ("stations", self.stations),
            ("steps per station", self.steps_per_station),
            ("rounds", self.rounds),
            ("max attempts", self.max_attempts),
        ] {
            if value == 0 {
                return Err(ConfigurationError::NotPositive(name).into());
            }
        }

        if self.balance_order.is_empty() {
            return Err(ConfigurationError::EmptyBalanceOrder.into());
        }

        let required = self.must_include.iter().copied().collect::<BTreeSet<_>>();
        if required.len() > self.slots() {
            return Err(ConfigurationError::TooManyRequired {
                required: required.len(),
                slots: self.slots(),
            }
            .into());
        }

        let mut required_demand = Demand::default();
        for id in &required {
            let exercise = catalog
                .get(*id)
                .ok_or(GenerateError::UnknownExercise(*id))?;
            if exercise.is_active_rest() {
                return Err(ConfigurationError::NotAStationExercise(*id).into());
            }
            if let Some(equipment) = exercise.equipment.exceeding(inventory) {
                return Err(ConfigurationError::RequiredExceedInventory(equipment.clone()).into());
            }
            required_demand += &exercise.equipment;
        }
        if self.execution == Execution::Simultaneous {
            if let Some(equipment) = required_demand.exceeding(inventory) {
                return Err(ConfigurationError::RequiredExceedInventory(equipment.clone()).into());
            }
        }

        let feasible = catalog.feasible(inventory);

        for equipment in &self.must_use_equipment {
            if inventory.count(equipment) == 0 {
                return Err(ConfigurationError::UnavailableEquipment(equipment.clone()).into());
            }
            if !feasible.iter().any(|e| e.uses(equipment)) {
                return Err(ConfigurationError::NoExerciseUses(equipment.clone()).into());
            }
        }

        if feasible.len() < self.slots() {
            return Err(ConfigurationError::NotEnoughExercises {
                slots: self.slots(),
                available: feasible.len(),
            }
            .into());
        }

        Ok(())
    }
}

/// Work and rest intervals in seconds, passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub work: u32,
    pub rest: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self { work: 45, rest: 15 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveRestMode {
    /// Every rest period is filled with an active rest exercise.
    Active,
    /// Plain rest only.
    Rest,
    /// Each rest period is either active or plain.
    Mix,
    /// Active or plain rest for the whole session, decided per generation.
    #[default]
    Auto,
}

impl ActiveRestMode {
    pub fn resolve(self, rng: &mut impl Rng) -> ActiveRestMode {
        match self {
            ActiveRestMode::Auto => {
                if rng.random_bool(0.5) {
                    ActiveRestMode::Active
                } else {
                    ActiveRestMode::Rest
                }
            }
            mode => mode,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActiveRestMode::Active => "active",
            ActiveRestMode::Rest => "rest",
            ActiveRestMode::Mix => "mix",
            ActiveRestMode::Auto => "auto",
        }
    }
}

impl FromStr for ActiveRestMode {
    type Err = ActiveRestModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "true" => Ok(ActiveRestMode::Active),
            "rest" | "false" => Ok(ActiveRestMode::Rest),
            "mix" => Ok(ActiveRestMode::Mix),
            "auto" => Ok(ActiveRestMode::Auto),
            _ => Err(ActiveRestModeError::Invalid(s.trim().to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ActiveRestModeError {
    #[error("Invalid active rest mode \"{0}\" (expected active, rest, mix or auto)")]
    Invalid(String),
}
