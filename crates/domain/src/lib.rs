#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod generator;
mod grouping;
mod measure;
mod name;
mod rest_timer;
mod service;
mod session;
mod workout;

pub use error::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
};
pub use exercise::{
    CatalogStats, ExerciseFilter, ExerciseID, ExerciseRecord, ExerciseRepository, ExerciseService,
};
pub use generator::{Difficulty, Focus, Preferences, generate_workout};
pub use grouping::{ExerciseGroup, VARIATION_KEYWORDS, base_name, group_exercises};
pub use measure::{RPE, RPEError, Reps, RepsError, Sets, SetsError, Weight, WeightError};
pub use name::{Name, NameError};
pub use rest_timer::{RestTimer, TickOutcome};
pub use service::Service;
pub use session::{
    CompletedSet, ExercisePosition, ExerciseSession, PrimaryAction, Progress, SessionAction,
    SessionConfig, SessionError, SessionStatus, SessionSummary, SessionSummaryRepository,
    SessionSummaryService, SetField, Transition, WorkoutSession, format_clock,
};
pub use workout::{
    ExercisePrescription, PrescriptionError, Workout, WorkoutID, WorkoutRepository,
    WorkoutService, WorkoutTemplate, weekday_name, weekly_plan, workout_for_day,
};
