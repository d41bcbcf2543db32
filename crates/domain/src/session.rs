//! Live logging of a workout.
//!
//! A [`WorkoutSession`] is created from a [`WorkoutTemplate`] and mutated through
//! [`WorkoutSession::apply`] (or the equivalent direct methods) as the user works through the
//! sets. Invalid operations are ignored rather than treated as errors, so that the caller can
//! simply disable the corresponding controls. [`WorkoutSession::finish`] consumes the session and
//! yields a [`SessionSummary`] to be stored.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Duration, Utc};

use crate::{
    CreateError, ExercisePrescription, RPE, ReadError, Reps, RestTimer, Sets, TickOutcome, Weight,
    WorkoutTemplate,
};

#[allow(async_fn_in_trait)]
pub trait SessionSummaryService {
    async fn get_session_summaries(&self) -> Result<Vec<SessionSummary>, ReadError>;
    async fn create_session_summary(
        &self,
        summary: SessionSummary,
    ) -> Result<SessionSummary, CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionSummaryRepository {
    async fn read_session_summaries(&self) -> Result<Vec<SessionSummary>, ReadError>;
    async fn create_session_summary(
        &self,
        summary: SessionSummary,
    ) -> Result<SessionSummary, CreateError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Duration of the rest period started after completing a set.
    pub rest_seconds: u32,
    /// Copy the values of a completed set into the following set.
    pub carry_forward: bool,
}

impl SessionConfig {
    pub const DEFAULT_REST_SECONDS: u32 = 90;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rest_seconds: Self::DEFAULT_REST_SECONDS,
            carry_forward: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    workout: WorkoutTemplate,
    exercise_sessions: Vec<ExerciseSession>,
    current_exercise_idx: usize,
    start_time: DateTime<Utc>,
    rest_timer: RestTimer,
    notes: String,
    config: SessionConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    ToggleSet {
        exercise_idx: usize,
        set_idx: usize,
    },
    UpdateSet {
        exercise_idx: usize,
        set_idx: usize,
        field: SetField,
    },
    SetSetNotes {
        exercise_idx: usize,
        set_idx: usize,
        notes: String,
    },
    AddSet {
        exercise_idx: usize,
    },
    RemoveSet {
        exercise_idx: usize,
    },
    ApplyToRemaining {
        exercise_idx: usize,
        set_idx: usize,
    },
    AdvanceExercise,
    SetExerciseNotes {
        exercise_idx: usize,
        notes: String,
    },
    SetNotes(String),
    StartRest,
    PauseRest,
    ResumeRest,
    SkipRest,
    AddRestTime(u32),
    Tick,
}

/// Raw input for a numeric field of a set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetField {
    /// Values below one are raised to one.
    Reps(i64),
    /// Negative values are raised to zero.
    Weight(f32),
    /// Values outside 1 to 10 are rejected.
    Rpe(i64),
}

/// Effect of an action on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
    RestStarted(u32),
    RestFinished,
}

impl From<bool> for Transition {
    fn from(applied: bool) -> Self {
        if applied {
            Transition::Applied
        } else {
            Transition::Ignored
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    AllSetsComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed_sets: usize,
    pub total_sets: usize,
}

impl Progress {
    #[must_use]
    pub fn ratio(&self) -> f32 {
        if self.total_sets == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.completed_sets as f32 / self.total_sets as f32;
        ratio
    }
}

/// Position of the current exercise, displayed as "Exercise 2 of 5".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExercisePosition {
    pub number: usize,
    pub total: usize,
}

impl fmt::Display for ExercisePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exercise {} of {}", self.number, self.total)
    }
}

/// The action offered by the main button of the session screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryAction {
    CompleteSet {
        exercise_idx: usize,
        set_idx: usize,
        total_sets: usize,
    },
    StartNextExercise {
        exercise_idx: usize,
        name: String,
    },
    FinishWorkout,
}

impl fmt::Display for PrimaryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryAction::CompleteSet {
                set_idx,
                total_sets,
                ..
            } => write!(f, "Complete Set {} of {total_sets}", set_idx + 1),
            PrimaryAction::StartNextExercise { name, .. } => write!(f, "Next: {name}"),
            PrimaryAction::FinishWorkout => write!(f, "Finish Workout"),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Workout contains no exercises")]
    EmptyWorkout,
    #[error("Exercise must have at least one set")]
    NoSets,
    #[error("Set at position {position} is numbered {set_number}")]
    SetNumber { position: usize, set_number: usize },
}

impl WorkoutSession {
    pub fn start(workout: WorkoutTemplate, config: SessionConfig) -> Result<Self, SessionError> {
        Self::start_at(workout, config, Utc::now())
    }

    pub fn start_at(
        workout: WorkoutTemplate,
        config: SessionConfig,
        start_time: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if workout.exercises.is_empty() {
            return Err(SessionError::EmptyWorkout);
        }

        let exercise_sessions = workout
            .exercises
            .iter()
            .enumerate()
            .map(|(idx, exercise)| ExerciseSession::new(idx, exercise.clone()))
            .collect();

        Ok(Self {
            workout,
            exercise_sessions,
            current_exercise_idx: 0,
            start_time,
            rest_timer: RestTimer::Inactive,
            notes: String::new(),
            config,
        })
    }

    #[must_use]
    pub fn workout(&self) -> &WorkoutTemplate {
        &self.workout
    }

    #[must_use]
    pub fn exercise_sessions(&self) -> &[ExerciseSession] {
        &self.exercise_sessions
    }

    #[must_use]
    pub fn exercise_session(&self, exercise_idx: usize) -> Option<&ExerciseSession> {
        self.exercise_sessions.get(exercise_idx)
    }

    #[must_use]
    pub fn current_exercise_idx(&self) -> usize {
        self.current_exercise_idx
    }

    #[must_use]
    pub fn current_exercise(&self) -> &ExerciseSession {
        &self.exercise_sessions[self.current_exercise_idx]
    }

    #[must_use]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    #[must_use]
    pub fn rest_timer(&self) -> RestTimer {
        self.rest_timer
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn apply(&mut self, action: SessionAction) -> Transition {
        match action {
            SessionAction::ToggleSet {
                exercise_idx,
                set_idx,
            } => self.toggle_set(exercise_idx, set_idx),
            SessionAction::UpdateSet {
                exercise_idx,
                set_idx,
                field,
            } => self.update_set(exercise_idx, set_idx, field),
            SessionAction::SetSetNotes {
                exercise_idx,
                set_idx,
                notes,
            } => self.set_set_notes(exercise_idx, set_idx, &notes),
            SessionAction::AddSet { exercise_idx } => self.add_set(exercise_idx),
            SessionAction::RemoveSet { exercise_idx } => self.remove_set(exercise_idx),
            SessionAction::ApplyToRemaining {
                exercise_idx,
                set_idx,
            } => self.apply_to_remaining(exercise_idx, set_idx),
            SessionAction::AdvanceExercise => self.advance_exercise(),
            SessionAction::SetExerciseNotes {
                exercise_idx,
                notes,
            } => self.set_exercise_notes(exercise_idx, notes),
            SessionAction::SetNotes(notes) => self.set_notes(notes),
            SessionAction::StartRest => self.start_rest(),
            SessionAction::PauseRest => self.rest_timer.pause().into(),
            SessionAction::ResumeRest => self.rest_timer.resume().into(),
            SessionAction::SkipRest => self.rest_timer.skip().into(),
            SessionAction::AddRestTime(seconds) => self.rest_timer.add_time(seconds).into(),
            SessionAction::Tick => self.tick(),
        }
    }

    /// Marks a set as completed or not completed.
    ///
    /// Completing a set starts the rest timer and, if enabled, copies the reps and weight into
    /// the next set unless that set is already completed. Marking a set as not completed has no
    /// further effects.
    pub fn toggle_set(&mut self, exercise_idx: usize, set_idx: usize) -> Transition {
        let carry_forward = self.config.carry_forward;
        let Some(exercise) = self.exercise_sessions.get_mut(exercise_idx) else {
            return Transition::Ignored;
        };
        let Some(set) = exercise.sets.get_mut(set_idx) else {
            return Transition::Ignored;
        };

        set.completed = !set.completed;

        if !set.completed {
            return Transition::Applied;
        }

        let (reps, weight) = (set.reps, set.weight);

        if let Some(next) = exercise
            .sets
            .get_mut(set_idx + 1)
            .filter(|s| carry_forward && !s.completed)
        {
            next.reps = reps;
            next.weight = weight;
        }

        self.start_rest()
    }

    pub fn update_set(&mut self, exercise_idx: usize, set_idx: usize, field: SetField) -> Transition {
        let Some(set) = self.set_mut(exercise_idx, set_idx) else {
            return Transition::Ignored;
        };

        match field {
            SetField::Reps(reps) => set.reps = Reps::clamped(reps),
            SetField::Weight(weight) => set.weight = Some(Weight::clamped(weight)),
            SetField::Rpe(rpe) => match RPE::try_from(rpe) {
                Ok(rpe) => set.rpe = Some(rpe),
                Err(_) => return Transition::Ignored,
            },
        }

        Transition::Applied
    }

    pub fn set_set_notes(&mut self, exercise_idx: usize, set_idx: usize, notes: &str) -> Transition {
        let Some(set) = self.set_mut(exercise_idx, set_idx) else {
            return Transition::Ignored;
        };

        let notes = notes.trim();
        set.notes = if notes.is_empty() {
            None
        } else {
            Some(notes.to_string())
        };

        Transition::Applied
    }

    /// Appends a set with the values of the last set.
    pub fn add_set(&mut self, exercise_idx: usize) -> Transition {
        let Some(exercise) = self.exercise_sessions.get_mut(exercise_idx) else {
            return Transition::Ignored;
        };

        if exercise.sets.len() >= Sets::MAX as usize {
            return Transition::Ignored;
        }

        let (reps, weight) = exercise.sets.last().map_or(
            (exercise.exercise.reps, exercise.exercise.weight),
            |s| (s.reps, s.weight),
        );

        exercise.sets.push(CompletedSet {
            set_number: exercise.sets.len() + 1,
            reps,
            weight,
            rpe: None,
            completed: false,
            notes: None,
        });

        Transition::Applied
    }

    /// Removes the last set, unless it is the only one.
    ///
    /// The caller should ask for confirmation if [`WorkoutSession::last_set_completed`] is true.
    pub fn remove_set(&mut self, exercise_idx: usize) -> Transition {
        let Some(exercise) = self.exercise_sessions.get_mut(exercise_idx) else {
            return Transition::Ignored;
        };

        if exercise.sets.len() <= 1 {
            return Transition::Ignored;
        }

        exercise.sets.pop();

        Transition::Applied
    }

    /// Copies the reps and weight of a set into all following sets that are not completed yet.
    pub fn apply_to_remaining(&mut self, exercise_idx: usize, set_idx: usize) -> Transition {
        let Some(exercise) = self.exercise_sessions.get_mut(exercise_idx) else {
            return Transition::Ignored;
        };
        let Some(set) = exercise.sets.get(set_idx) else {
            return Transition::Ignored;
        };

        let (reps, weight) = (set.reps, set.weight);

        for remaining in exercise.sets.iter_mut().skip(set_idx + 1) {
            if !remaining.completed {
                remaining.reps = reps;
                remaining.weight = weight;
            }
        }

        Transition::Applied
    }

    /// Moves to the next exercise. Ignored at the last exercise, where the workout should be
    /// finished instead.
    pub fn advance_exercise(&mut self) -> Transition {
        if self.current_exercise_idx + 1 >= self.exercise_sessions.len() {
            return Transition::Ignored;
        }

        self.current_exercise_idx += 1;

        Transition::Applied
    }

    pub fn set_exercise_notes(&mut self, exercise_idx: usize, notes: String) -> Transition {
        let Some(exercise) = self.exercise_sessions.get_mut(exercise_idx) else {
            return Transition::Ignored;
        };

        exercise.notes = notes;

        Transition::Applied
    }

    pub fn set_notes(&mut self, notes: String) -> Transition {
        self.notes = notes;

        Transition::Applied
    }

    pub fn start_rest(&mut self) -> Transition {
        self.rest_timer.start(self.config.rest_seconds);

        match self.rest_timer.remaining() {
            Some(seconds) => Transition::RestStarted(seconds),
            None => Transition::Applied,
        }
    }

    /// Advances the rest timer by one second.
    pub fn tick(&mut self) -> Transition {
        match self.rest_timer.tick() {
            TickOutcome::Idle => Transition::Ignored,
            TickOutcome::Running(_) => Transition::Applied,
            TickOutcome::Finished => Transition::RestFinished,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.exercise_sessions.iter().all(ExerciseSession::is_complete) {
            SessionStatus::AllSetsComplete
        } else {
            SessionStatus::InProgress
        }
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            completed_sets: self
                .exercise_sessions
                .iter()
                .map(ExerciseSession::num_completed_sets)
                .sum(),
            total_sets: self.exercise_sessions.iter().map(|e| e.sets.len()).sum(),
        }
    }

    #[must_use]
    pub fn position(&self) -> ExercisePosition {
        ExercisePosition {
            number: self.current_exercise_idx + 1,
            total: self.exercise_sessions.len(),
        }
    }

    /// Determines the main action for the current exercise.
    ///
    /// The focused set defaults to the first incomplete set of the current exercise.
    #[must_use]
    pub fn primary_action(&self, focused_set: Option<usize>) -> PrimaryAction {
        let current = self.current_exercise();
        let set_idx = focused_set
            .filter(|idx| *idx < current.sets.len())
            .or_else(|| current.first_incomplete_set());

        if let Some(set_idx) = set_idx.filter(|idx| !current.sets[*idx].completed) {
            return PrimaryAction::CompleteSet {
                exercise_idx: self.current_exercise_idx,
                set_idx,
                total_sets: current.sets.len(),
            };
        }

        match self.exercise_sessions.get(self.current_exercise_idx + 1) {
            Some(next) => PrimaryAction::StartNextExercise {
                exercise_idx: next.exercise_idx,
                name: next.exercise.name.to_string(),
            },
            None => PrimaryAction::FinishWorkout,
        }
    }

    /// Whether removing the last set of the exercise would discard logged data.
    #[must_use]
    pub fn last_set_completed(&self, exercise_idx: usize) -> bool {
        self.exercise_sessions
            .get(exercise_idx)
            .and_then(|e| e.sets.last())
            .is_some_and(|s| s.completed)
    }

    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.start_time).max(Duration::zero())
    }

    /// The workout template updated with the logged sets.
    ///
    /// For each exercise with at least one completed set, the number of sets is taken from the
    /// session and reps and weight from the last completed set.
    #[must_use]
    pub fn logged_template(&self) -> WorkoutTemplate {
        WorkoutTemplate {
            exercises: self
                .exercise_sessions
                .iter()
                .map(ExerciseSession::logged_prescription)
                .collect(),
            ..self.workout.clone()
        }
    }

    #[must_use]
    pub fn finish(self) -> SessionSummary {
        self.finish_at(Utc::now())
    }

    #[must_use]
    pub fn finish_at(self, end_time: DateTime<Utc>) -> SessionSummary {
        let total_time = self.elapsed(end_time);
        let total_sets = self.progress().completed_sets;
        let total_volume = self.exercise_sessions.iter().map(ExerciseSession::volume).sum();
        let exercise_notes = self
            .exercise_sessions
            .iter()
            .filter(|e| !e.notes.trim().is_empty())
            .map(|e| (e.exercise_idx, e.notes.trim().to_string()))
            .collect();

        SessionSummary {
            workout: self.workout,
            exercise_sessions: self.exercise_sessions,
            start_time: self.start_time,
            end_time,
            total_time,
            total_sets,
            total_volume,
            notes: self.notes.trim().to_string(),
            exercise_notes,
        }
    }

    fn set_mut(&mut self, exercise_idx: usize, set_idx: usize) -> Option<&mut CompletedSet> {
        self.exercise_sessions
            .get_mut(exercise_idx)
            .and_then(|e| e.sets.get_mut(set_idx))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSession {
    pub exercise_idx: usize,
    pub exercise: ExercisePrescription,
    pub notes: String,
    sets: Vec<CompletedSet>,
}

impl ExerciseSession {
    #[must_use]
    pub fn new(exercise_idx: usize, exercise: ExercisePrescription) -> Self {
        let sets = (1..=exercise.sets.count())
            .map(|set_number| CompletedSet {
                set_number,
                reps: exercise.reps,
                weight: exercise.weight,
                rpe: None,
                completed: false,
                notes: None,
            })
            .collect();
        Self {
            exercise_idx,
            exercise,
            notes: String::new(),
            sets,
        }
    }

    /// Restores a logged exercise, e.g. from a stored summary.
    ///
    /// The sets must be numbered consecutively from one.
    pub fn from_logged(
        exercise_idx: usize,
        exercise: ExercisePrescription,
        sets: Vec<CompletedSet>,
        notes: String,
    ) -> Result<Self, SessionError> {
        if sets.is_empty() {
            return Err(SessionError::NoSets);
        }

        if let Some((position, set)) = sets
            .iter()
            .enumerate()
            .find(|(idx, set)| set.set_number != idx + 1)
        {
            return Err(SessionError::SetNumber {
                position: position + 1,
                set_number: set.set_number,
            });
        }

        Ok(Self {
            exercise_idx,
            exercise,
            notes,
            sets,
        })
    }

    #[must_use]
    pub fn sets(&self) -> &[CompletedSet] {
        &self.sets
    }

    #[must_use]
    pub fn num_completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sets.iter().all(|s| s.completed)
    }

    #[must_use]
    pub fn first_incomplete_set(&self) -> Option<usize> {
        self.sets.iter().position(|s| !s.completed)
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(CompletedSet::volume).sum()
    }

    fn logged_prescription(&self) -> ExercisePrescription {
        let Some(last_completed) = self.sets.iter().rev().find(|s| s.completed) else {
            return self.exercise.clone();
        };

        ExercisePrescription {
            sets: u32::try_from(self.sets.len())
                .ok()
                .and_then(|n| Sets::new(n).ok())
                .unwrap_or(self.exercise.sets),
            reps: last_completed.reps,
            weight: last_completed.weight,
            ..self.exercise.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSet {
    /// One-based position of the set.
    pub set_number: usize,
    pub reps: Reps,
    pub weight: Option<Weight>,
    pub rpe: Option<RPE>,
    pub completed: bool,
    pub notes: Option<String>,
}

impl CompletedSet {
    /// Reps times weight of a completed set. Bodyweight sets have no volume.
    #[must_use]
    pub fn volume(&self) -> f32 {
        match self.weight {
            Some(weight) if self.completed && !weight.is_bodyweight() => self.reps * weight,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub workout: WorkoutTemplate,
    pub exercise_sessions: Vec<ExerciseSession>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_time: Duration,
    pub total_sets: usize,
    pub total_volume: f32,
    pub notes: String,
    /// Non-empty exercise notes by exercise index.
    pub exercise_notes: BTreeMap<usize, String>,
}

impl SessionSummary {
    #[must_use]
    pub fn avg_rpe(&self) -> Option<f32> {
        let values = self
            .exercise_sessions
            .iter()
            .flat_map(|e| e.sets.iter())
            .filter(|s| s.completed)
            .filter_map(|s| s.rpe)
            .collect::<Vec<_>>();
        RPE::avg(&values)
    }
}

/// Formats a duration as minutes and seconds, e.g. "05:07".
#[must_use]
pub fn format_clock(duration: Duration) -> String {
    let seconds = duration.num_seconds().max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
