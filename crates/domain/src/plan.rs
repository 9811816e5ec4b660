use chrono::NaiveDateTime;

use crate::{ActiveRestMode, Area, Constraints, Demand, ExerciseID, ReadError, WriteError};

pub trait PlanRepository {
    fn read_last_plan(&self) -> Result<WorkoutPlan, ReadError>;
    fn write_last_plan(&self, plan: &WorkoutPlan) -> Result<(), WriteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    pub stations: Vec<Station>,
    pub active_rest: ActiveRest,
    /// The constraints the plan was generated from, including all required exercises.
    pub constraints: Constraints,
    pub seed: u64,
    pub attempts: u32,
    pub created: NaiveDateTime,
    pub edits: Vec<EditRecord>,
}

impl WorkoutPlan {
    /// All station exercises in station order.
    #[must_use]
    pub fn exercise_ids(&self) -> Vec<ExerciseID> {
        self.stations
            .iter()
            .flat_map(|s| s.exercises.iter().copied())
            .collect()
    }

    #[must_use]
    pub fn contains(&self, id: ExerciseID) -> bool {
        self.locate(id).is_some()
    }

    /// Station index and step index of an exercise.
    #[must_use]
    pub fn locate(&self, id: ExerciseID) -> Option<(usize, usize)> {
        self.stations.iter().enumerate().find_map(|(i, s)| {
            s.exercises
                .iter()
                .position(|e| *e == id)
                .map(|position| (i, position))
        })
    }

    /// Equipment occupied while all stations of a round are in use.
    #[must_use]
    pub fn footprint(&self) -> Demand {
        self.stations
            .iter()
            .fold(Demand::default(), |footprint, s| footprint + &s.footprint)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub area: Area,
    pub exercises: Vec<ExerciseID>,
    pub footprint: Demand,
}

impl Station {
    /// Display label of the station at the given index (A, B, ..., Z, AA, AB, ...).
    #[must_use]
    pub fn letter(index: usize) -> String {
        let mut letters = vec![];
        let mut n = index + 1;
        while n > 0 {
            let remainder = (n - 1) % 26;
            letters.push(char::from(b'A' + u8::try_from(remainder).unwrap_or_default()));
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ActiveRest {
    /// The resolved mode, never `Auto`.
    pub mode: ActiveRestMode,
    pub exercises: Vec<ExerciseID>,
    /// Filling of the rest periods between the steps of a station.
    pub schedule: Vec<Option<ExerciseID>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    pub seed: u64,
    pub replacements: Vec<(ExerciseID, ExerciseID)>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data::{GOBLET_SQUAT, KB_PRESS, KB_SWING, SLAM_BALL, plan};

    use super::*;

    #[test]
    fn test_workout_plan_exercise_ids() {
        assert_eq!(plan().exercise_ids().len(), 6);
        assert_eq!(plan().exercise_ids()[0], KB_PRESS.id);
    }

    #[rstest]
    #[case(KB_PRESS.id, Some((0, 0)))]
    #[case(GOBLET_SQUAT.id, Some((1, 0)))]
    #[case(SLAM_BALL.id, Some((2, 1)))]
    #[case(KB_SWING.id, None)]
    fn test_workout_plan_locate(
        #[case] id: ExerciseID,
        #[case] expected: Option<(usize, usize)>,
    ) {
        assert_eq!(plan().locate(id), expected);
        assert_eq!(plan().contains(id), expected.is_some());
    }

    #[test]
    fn test_workout_plan_footprint() {
        let footprint = plan().footprint();
        assert_eq!(footprint.get(&"kb16".into()), 2);
        assert_eq!(footprint.get(&"slam_ball".into()), 1);
        assert_eq!(footprint.get(&"box".into()), 0);
        assert_eq!(footprint.len(), 2);
    }

    #[rstest]
    #[case(0, "A")]
    #[case(1, "B")]
    #[case(25, "Z")]
    #[case(26, "AA")]
    #[case(27, "AB")]
    #[case(52, "BA")]
    fn test_station_letter(#[case] index: usize, #[case] expected: &str) {
        assert_eq!(Station::letter(index), expected);
    }
}
