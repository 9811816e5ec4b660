use std::collections::{BTreeMap, VecDeque};

use chrono::{Local, NaiveDateTime};

use crate::{ExerciseID, ReadError, WorkoutPlan, WriteError};

pub trait HistoryRepository {
    fn read_history(&self) -> Result<HistoryTracker, ReadError>;
    fn write_history(&self, history: &HistoryTracker) -> Result<(), WriteError>;
}

/// Usage of exercises in accepted workouts.
///
/// The tracker is only read while a plan is generated. It must be updated
/// with [`HistoryTracker::record_usage`] after a plan has been accepted, so
/// that discarded plans do not affect the variety of later workouts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HistoryTracker {
    sessions: VecDeque<Session>,
    usage: BTreeMap<ExerciseID, u32>,
    total_workouts: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub date: NaiveDateTime,
    pub title: String,
    pub exercises: Vec<ExerciseID>,
}

impl HistoryTracker {
    pub const MAX_SESSIONS: usize = 10;

    const RECENT_SESSIONS: usize = 2;
    const MODERATELY_RECENT_SESSIONS: usize = 5;

    #[must_use]
    pub fn new(
        sessions: impl IntoIterator<Item = Session>,
        usage: BTreeMap<ExerciseID, u32>,
        total_workouts: u32,
    ) -> Self {
        let mut sessions = sessions.into_iter().collect::<VecDeque<_>>();
        while sessions.len() > Self::MAX_SESSIONS {
            sessions.pop_front();
        }
        Self {
            sessions,
            usage,
            total_workouts,
        }
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    #[must_use]
    pub fn usage(&self) -> &BTreeMap<ExerciseID, u32> {
        &self.usage
    }

    #[must_use]
    pub fn usage_count(&self, id: ExerciseID) -> u32 {
        self.usage.get(&id).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn total_workouts(&self) -> u32 {
        self.total_workouts
    }

    #[must_use]
    pub fn last_session_date(&self) -> Option<NaiveDateTime> {
        self.sessions.back().map(|s| s.date)
    }

    /// Selection weight of an exercise.
    ///
    /// The weight decreases with recency and with the number of past uses,
    /// but never drops to zero.
    #[must_use]
    pub fn bias_weight(&self, id: ExerciseID) -> f64 {
        if self.used_within(Self::RECENT_SESSIONS, id) {
            return 0.1;
        }

        if self.used_within(Self::MODERATELY_RECENT_SESSIONS, id) {
            return 0.5;
        }

        match self.usage_count(id) {
            0 => 1.5,
            1 => 1.2,
            _ => 1.0,
        }
    }

    pub fn record_usage(&mut self, plan: &WorkoutPlan) {
        self.record_session(
            Local::now().naive_local(),
            plan.constraints.title.clone(),
            plan.exercise_ids(),
        );
    }

    pub fn record_session(
        &mut self,
        date: NaiveDateTime,
        title: String,
        exercises: Vec<ExerciseID>,
    ) {
        for id in &exercises {
            *self.usage.entry(*id).or_default() += 1;
        }
        self.sessions.push_back(Session {
            date,
            title,
            exercises,
        });
        while self.sessions.len() > Self::MAX_SESSIONS {
            self.sessions.pop_front();
        }
        self.total_workouts += 1;
    }

    #[must_use]
    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            total_workouts: self.total_workouts,
            sessions_tracked: self.sessions.len(),
            unique_exercises_used: self.usage.len(),
            last_workout_date: self.last_session_date(),
            last_workout_exercises: self.sessions.back().map_or(0, |s| s.exercises.len()),
        }
    }

    fn used_within(&self, last_sessions: usize, id: ExerciseID) -> bool {
        self.sessions
            .iter()
            .rev()
            .take(last_sessions)
            .any(|s| s.exercises.contains(&id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySummary {
    pub total_workouts: u32,
    pub sessions_tracked: usize,
    pub unique_exercises_used: usize,
    pub last_workout_date: Option<NaiveDateTime>,
    pub last_workout_exercises: usize,
}
