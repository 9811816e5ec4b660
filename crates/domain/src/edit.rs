use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    EditError, EditRecord, EquipmentID, ExerciseID, Generator, InfeasibleError, WorkoutPlan,
    generator::{Layout, most_frequent},
};

impl Generator<'_> {
    /// Replace exercises of an existing plan.
    ///
    /// Only the slots of the replaced exercises change. The replaced exercises are not
    /// considered as their own replacements. Equipment that must be used and was only
    /// covered by replaced exercises has to be covered by the replacements.
    pub fn edit(
        &self,
        plan: &WorkoutPlan,
        replace: &[ExerciseID],
        seed: Option<u64>,
    ) -> Result<WorkoutPlan, EditError> {
        if replace.is_empty() {
            return Err(EditError::NothingToReplace);
        }

        let vacated = replace
            .iter()
            .map(|id| plan.locate(*id).ok_or(EditError::UnknownExercise(*id)))
            .collect::<Result<BTreeSet<_>, _>>()?;

        let base = Layout::from_plan(self.inventory, self.catalog, plan, &vacated)
            .map_err(EditError::UnknownExercise)?;

        let footprint = plan.footprint();
        let required = base
            .uncovered(&plan.constraints.must_use_equipment)
            .into_iter()
            .filter(|e| footprint.get(e) > 0)
            .cloned()
            .collect::<BTreeSet<EquipmentID>>();

        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pool = self.catalog.feasible(self.inventory);
        let constraints = &plan.constraints;
        let mut bottlenecks = BTreeMap::new();

        for attempt in 1..=constraints.max_attempts {
            let mut layout = base.clone();
            match self.fill(
                &mut layout,
                &pool,
                &required,
                constraints.use_history,
                &mut rng,
            ) {
                Ok(()) => {
                    let replacements = vacated
                        .iter()
                        .filter_map(|(station, position)| {
                            let old = plan.stations[*station].exercises[*position];
                            layout
                                .exercise_at(*station, *position)
                                .map(|new| (old, new))
                        })
                        .collect::<Vec<_>>();
                    let stations = plan
                        .stations
                        .iter()
                        .enumerate()
                        .map(|(i, station)| {
                            if vacated.iter().any(|(s, _)| *s == i) {
                                layout.station(i)
                            } else {
                                station.clone()
                            }
                        })
                        .collect();
                    info!(
                        "replaced {} exercises in {attempt} attempts (seed {seed})",
                        replacements.len()
                    );
                    let mut edits = plan.edits.clone();
                    edits.push(EditRecord { seed, replacements });
                    return Ok(WorkoutPlan {
                        stations,
                        edits,
                        ..plan.clone()
                    });
                }
                Err(bottleneck) => {
                    debug!("edit attempt {attempt} aborted: {bottleneck}");
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
}
