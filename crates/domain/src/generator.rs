use std::collections::{BTreeMap, BTreeSet};

use chrono::Local;
use log::{debug, info, warn};
use rand::{
    Rng, SeedableRng,
    distr::{Distribution, weighted::WeightedIndex},
};
use rand_chacha::ChaCha8Rng;

use crate::{
    ActiveRest, ActiveRestMode, Area, Bottleneck, Catalog, Constraints, Demand, EquipmentID,
    Execution, Exercise, ExerciseID, GenerateError, HistoryTracker, InfeasibleError, Inventory,
    Station, WorkoutPlan,
};

/// Randomized composition of workout plans.
///
/// Every call draws from its own random number generator. Its seed is stored in the
/// resulting plan, so that the same inputs and seed reproduce the same plan.
pub struct Generator<'a> {
    pub(crate) catalog: &'a Catalog,
    pub(crate) inventory: &'a Inventory,
    history: &'a HistoryTracker,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, inventory: &'a Inventory, history: &'a HistoryTracker) -> Self {
        Self {
            catalog,
            inventory,
            history,
        }
    }

    pub fn generate(
        &self,
        constraints: &Constraints,
        seed: Option<u64>,
    ) -> Result<WorkoutPlan, GenerateError> {
        constraints.validate(self.catalog, self.inventory)?;

        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pool = self.catalog.feasible(self.inventory);
        let mut bottlenecks = BTreeMap::new();

        for attempt in 1..=constraints.max_attempts {
            match self.attempt(constraints, &pool, &mut rng) {
                Ok(layout) => {
                    let active_rest = self.active_rest(constraints, &mut rng);
                    info!(
                        "generated {} stations in {attempt} attempts (seed {seed})",
                        constraints.stations
                    );
                    return Ok(WorkoutPlan {
                        stations: layout.into_stations(),
                        active_rest,
                        constraints: constraints.clone(),
                        seed,
                        attempts: attempt,
                        created: Local::now().naive_local(),
                        edits: vec![],
                    });
                }
                Err(bottleneck) => {
                    debug!("attempt {attempt} aborted: {bottleneck}");
                    *bottlenecks.entry(bottleneck).or_default() += 1;
                }
            }
        }

        Err(InfeasibleError {
            attempts: constraints.max_attempts,
            bottleneck: most_frequent(bottlenecks),
        }
        .into())
    }

    /// Generate a plan that additionally contains the given exercises.
    pub fn include(
        &self,
        constraints: &Constraints,
        ids: &[ExerciseID],
        seed: Option<u64>,
    ) -> Result<WorkoutPlan, GenerateError> {
        self.generate(&constraints.clone().including(ids), seed)
    }

    fn attempt(
        &self,
        constraints: &Constraints,
        pool: &[&'a Exercise],
        rng: &mut impl Rng,
    ) -> Result<Layout<'a>, Bottleneck> {
        let mut layout = Layout::new(self.inventory, constraints);

        for id in &constraints.must_include {
            if let Some(exercise) = self.catalog.get(*id)
                && layout.is_open(*id)
            {
                layout.place_required(exercise)?;
            }
        }

        self.fill(
            &mut layout,
            pool,
            &constraints.must_use_equipment,
            constraints.use_history,
            rng,
        )?;

        Ok(layout)
    }

    /// Fill all free slots in ascending station and step order.
    pub(crate) fn fill(
        &self,
        layout: &mut Layout<'a>,
        pool: &[&'a Exercise],
        required: &BTreeSet<EquipmentID>,
        use_history: bool,
        rng: &mut impl Rng,
    ) -> Result<(), Bottleneck> {
        for equipment in layout.uncovered(required) {
            if !pool.iter().any(|e| {
                e.uses(equipment)
                    && layout.is_open(e.id)
                    && layout.open_stations().any(|s| layout.fits(s, e).is_ok())
            }) {
                return Err(Bottleneck::Equipment(equipment.clone()));
            }
        }

        for station in 0..layout.len() {
            while let Some(position) = layout.free_position(station) {
                let candidates = candidates(layout, station, pool, required)?;
                let exercise = self
                    .draw(&candidates, use_history, rng)
                    .ok_or(Bottleneck::Exercises)?;
                layout.place(station, position, exercise);
            }
        }

        match layout.uncovered(required).first() {
            Some(equipment) => Err(Bottleneck::Equipment((*equipment).clone())),
            None => Ok(()),
        }
    }

    fn draw(
        &self,
        candidates: &[&'a Exercise],
        use_history: bool,
        rng: &mut impl Rng,
    ) -> Option<&'a Exercise> {
        let weights = candidates.iter().map(|e| {
            if use_history {
                self.history.bias_weight(e.id)
            } else {
                1.0
            }
        });
        let index = WeightedIndex::new(weights).ok()?;
        candidates.get(index.sample(rng)).copied()
    }

    fn active_rest(&self, constraints: &Constraints, rng: &mut impl Rng) -> ActiveRest {
        let mode = constraints.active_rest.resolve(rng);
        let periods = constraints.steps_per_station as usize;

        if mode == ActiveRestMode::Rest || constraints.active_rest_count == 0 {
            return ActiveRest {
                mode,
                exercises: vec![],
                schedule: vec![None; periods],
            };
        }

        let count = constraints.active_rest_count as usize;
        let mut pool = self.catalog.active_rest().collect::<Vec<_>>();
        let mut exercises = vec![];

        while exercises.len() < count {
            let Some(exercise) = self.draw(&pool, constraints.use_history, rng) else {
                break;
            };
            pool.retain(|e| e.id != exercise.id);
            exercises.push(exercise.id);
        }

        if exercises.len() < count {
            warn!(
                "only {} of {count} active rest exercises available",
                exercises.len()
            );
        }

        let schedule = if exercises.is_empty() {
            vec![None; periods]
        } else {
            (0..periods)
                .map(|i| {
                    let exercise = exercises[i % exercises.len()];
                    if mode == ActiveRestMode::Mix && !rng.random_bool(0.5) {
                        None
                    } else {
                        Some(exercise)
                    }
                })
                .collect()
        };

        ActiveRest {
            mode,
            exercises,
            schedule,
        }
    }
}

/// Candidates for a slot, from the most to the least preferred tier.
///
/// Exercises providing uncovered required equipment come first. A provider outside the
/// target area is only forced when no more free slots than uncovered equipment remain.
/// Exercises outside the target area are considered if the area is exhausted.
fn candidates<'a>(
    layout: &Layout<'a>,
    station: usize,
    pool: &[&'a Exercise],
    required: &BTreeSet<EquipmentID>,
) -> Result<Vec<&'a Exercise>, Bottleneck> {
    let target = layout.targets[station];
    let mut blocked = BTreeMap::<EquipmentID, u32>::new();
    let mut fitting = vec![];

    for exercise in pool.iter().copied().filter(|e| layout.is_open(e.id)) {
        match layout.fits(station, exercise) {
            Ok(()) => fitting.push(exercise),
            Err(equipment) => *blocked.entry(equipment).or_default() += 1,
        }
    }

    let uncovered = layout.uncovered(required);
    if !uncovered.is_empty() {
        let providers = fitting
            .iter()
            .copied()
            .filter(|e| uncovered.iter().any(|u| e.uses(u)))
            .collect::<Vec<_>>();
        let in_area = in_area(&providers, target);
        if !in_area.is_empty() {
            return Ok(in_area);
        }
        if !providers.is_empty() && layout.free_slots() <= uncovered.len() {
            return Ok(providers);
        }
    }

    let in_area = in_area(&fitting, target);
    if !in_area.is_empty() {
        return Ok(in_area);
    }

    if !fitting.is_empty() {
        debug!(
            "no {target} exercise fits station {}, relaxing area",
            Station::letter(station)
        );
        return Ok(fitting);
    }

    if blocked.is_empty() {
        return Err(Bottleneck::Area(target));
    }

    Err(most_frequent(
        blocked
            .into_iter()
            .map(|(equipment, count)| (Bottleneck::Equipment(equipment), count))
            .collect(),
    ))
}

fn in_area<'a>(exercises: &[&'a Exercise], area: Area) -> Vec<&'a Exercise> {
    exercises.iter().copied().filter(|e| e.area == area).collect()
}

pub(crate) fn most_frequent(bottlenecks: BTreeMap<Bottleneck, u32>) -> Bottleneck {
    bottlenecks
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map_or(Bottleneck::Exercises, |(bottleneck, _)| bottleneck)
}

/// Partially filled stations with their equipment accounting.
#[derive(Debug, Clone)]
pub(crate) struct Layout<'a> {
    inventory: &'a Inventory,
    execution: Execution,
    targets: Vec<Area>,
    slots: Vec<Vec<Option<&'a Exercise>>>,
    footprints: Vec<Demand>,
    usage: Demand,
    selected: BTreeSet<ExerciseID>,
    excluded: BTreeSet<ExerciseID>,
}

impl<'a> Layout<'a> {
    fn new(inventory: &'a Inventory, constraints: &Constraints) -> Self {
        let targets = constraints.targets();
        Self {
            inventory,
            execution: constraints.execution,
            slots: vec![vec![None; constraints.steps_per_station as usize]; targets.len()],
            footprints: vec![Demand::default(); targets.len()],
            targets,
            usage: Demand::default(),
            selected: BTreeSet::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// Layout of a plan with the given (station, step) positions vacated.
    ///
    /// The exercises at vacated positions are excluded from further selection.
    pub(crate) fn from_plan(
        inventory: &'a Inventory,
        catalog: &'a Catalog,
        plan: &WorkoutPlan,
        vacated: &BTreeSet<(usize, usize)>,
    ) -> Result<Self, ExerciseID> {
        let mut layout = Self {
            inventory,
            execution: plan.constraints.execution,
            targets: plan.stations.iter().map(|s| s.area).collect(),
            slots: plan
                .stations
                .iter()
                .map(|s| vec![None; s.exercises.len()])
                .collect(),
            footprints: vec![Demand::default(); plan.stations.len()],
            usage: Demand::default(),
            selected: BTreeSet::new(),
            excluded: BTreeSet::new(),
        };

        for (station, s) in plan.stations.iter().enumerate() {
            for (position, id) in s.exercises.iter().enumerate() {
                if vacated.contains(&(station, position)) {
                    layout.excluded.insert(*id);
                } else {
                    layout.place(station, position, catalog.get(*id).ok_or(*id)?);
                }
            }
        }

        Ok(layout)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn free_position(&self, station: usize) -> Option<usize> {
        self.slots[station].iter().position(Option::is_none)
    }

    fn free_slots(&self) -> usize {
        self.slots.iter().flatten().filter(|s| s.is_none()).count()
    }

    fn open_stations(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|s| self.free_position(*s).is_some())
    }

    fn is_open(&self, id: ExerciseID) -> bool {
        !self.selected.contains(&id) && !self.excluded.contains(&id)
    }

    /// Required equipment not used by any placed exercise.
    pub(crate) fn uncovered<'r>(&self, required: &'r BTreeSet<EquipmentID>) -> Vec<&'r EquipmentID> {
        required
            .iter()
            .filter(|e| self.usage.get(e) == 0)
            .collect()
    }

    /// Check whether adding the exercise to the station keeps the round within the inventory.
    fn fits(&self, station: usize, exercise: &Exercise) -> Result<(), EquipmentID> {
        let footprint = &self.footprints[station];
        exercise
            .equipment
            .iter()
            .find(|(id, demand)| {
                let current = footprint.get(id);
                self.usage.get(id) - current + self.execution.combine_count(current, **demand)
                    > self.inventory.count(id)
            })
            .map_or(Ok(()), |(id, _)| Err(id.clone()))
    }

    fn place(&mut self, station: usize, position: usize, exercise: &'a Exercise) {
        self.slots[station][position] = Some(exercise);
        self.footprints[station] = self
            .execution
            .combine(&self.footprints[station], &exercise.equipment);
        self.usage = self
            .footprints
            .iter()
            .fold(Demand::default(), |usage, footprint| usage + footprint);
        self.selected.insert(exercise.id);
    }

    /// Place a required exercise into the first open station of its own area, or else the
    /// first open station it fits.
    fn place_required(&mut self, exercise: &'a Exercise) -> Result<(), Bottleneck> {
        let (matching, others): (Vec<usize>, Vec<usize>) = self
            .open_stations()
            .partition(|s| self.targets[*s] == exercise.area);

        let mut blocked = None;
        for station in matching.into_iter().chain(others) {
            match self.fits(station, exercise) {
                Ok(()) => {
                    if let Some(position) = self.free_position(station) {
                        self.place(station, position, exercise);
                        return Ok(());
                    }
                }
                Err(equipment) => {
                    if blocked.is_none() {
                        blocked = Some(equipment);
                    }
                }
            }
        }

        Err(blocked.map_or(Bottleneck::Area(exercise.area), Bottleneck::Equipment))
    }

    pub(crate) fn station(&self, index: usize) -> Station {
        Station {
            area: self.targets[index],
            exercises: self.slots[index].iter().flatten().map(|e| e.id).collect(),
            footprint: self.footprints[index].clone(),
        }
    }

    pub(crate) fn exercise_at(&self, station: usize, position: usize) -> Option<ExerciseID> {
        self.slots[station][position].map(|e| e.id)
    }

    fn into_stations(self) -> Vec<Station> {
        (0..self.len()).map(|i| self.station(i)).collect()
    }
}
