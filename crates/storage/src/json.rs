//! JSON representation of the exercise dataset, saved workouts and session summaries.
//!
//! Field names follow the camel case convention of the dataset.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc, Weekday};
use liftlog_domain as domain;
use uuid::Uuid;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub primary_muscle_group: String,
    #[serde(default)]
    pub sub_muscles: Vec<String>,
    #[serde(default)]
    pub secondary_muscle_groups: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub movement_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl From<&domain::ExerciseRecord> for Exercise {
    fn from(value: &domain::ExerciseRecord) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            aliases: value.aliases.clone(),
            description: value.description.clone(),
            primary_muscle_group: value.primary_muscle_group.clone(),
            sub_muscles: value.sub_muscles.clone(),
            secondary_muscle_groups: value.secondary_muscle_groups.clone(),
            equipment: value.equipment.clone(),
            movement_patterns: value.movement_patterns.clone(),
            difficulty: value.difficulty.clone(),
        }
    }
}

impl From<Exercise> for domain::ExerciseRecord {
    fn from(value: Exercise) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            aliases: value.aliases,
            description: value.description,
            primary_muscle_group: value.primary_muscle_group,
            sub_muscles: value.sub_muscles,
            secondary_muscle_groups: value.secondary_muscle_groups,
            equipment: value.equipment,
            movement_patterns: value.movement_patterns,
            difficulty: value.difficulty,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    #[serde(flatten)]
    pub template: WorkoutTemplate,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            template: WorkoutTemplate::from(&value.template),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = WorkoutError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            template: domain::WorkoutTemplate::try_from(value.template)?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    pub exercises: Vec<ExercisePrescription>,
}

impl From<&domain::WorkoutTemplate> for WorkoutTemplate {
    fn from(value: &domain::WorkoutTemplate) -> Self {
        Self {
            name: value.name.to_string(),
            day: value.day.map(|d| domain::weekday_name(d).to_string()),
            exercises: value
                .exercises
                .iter()
                .map(ExercisePrescription::from)
                .collect(),
        }
    }
}

impl TryFrom<WorkoutTemplate> for domain::WorkoutTemplate {
    type Error = WorkoutError;

    fn try_from(value: WorkoutTemplate) -> Result<Self, Self::Error> {
        let day = match value.day {
            Some(day) => Some(
                day.parse::<Weekday>()
                    .map_err(|_| WorkoutError::InvalidDay(day))?,
            ),
            None => None,
        };
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            day,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExercisePrescription::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WorkoutError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error("invalid day: {0}")]
    InvalidDay(String),
    #[error(transparent)]
    InvalidPrescription(#[from] domain::PrescriptionError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExercisePrescription {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&domain::ExercisePrescription> for ExercisePrescription {
    fn from(value: &domain::ExercisePrescription) -> Self {
        Self {
            name: value.name.to_string(),
            sets: u32::from(value.sets),
            reps: u32::from(value.reps),
            weight: value.weight.map(f32::from),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<ExercisePrescription> for domain::ExercisePrescription {
    type Error = domain::PrescriptionError;

    fn try_from(value: ExercisePrescription) -> Result<Self, Self::Error> {
        let prescription = domain::ExercisePrescription::new(
            domain::Name::new(&value.name)?,
            domain::Sets::new(value.sets)?,
            domain::Reps::new(value.reps)?,
            value.weight.map(domain::Weight::new).transpose()?,
        );
        Ok(match value.notes {
            Some(notes) => prescription.with_notes(&notes),
            None => prescription,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub workout: WorkoutTemplate,
    pub exercise_sessions: Vec<ExerciseSession>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Seconds
    pub total_time: i64,
    pub total_sets: usize,
    pub total_volume: f32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exercise_notes: BTreeMap<usize, String>,
}

impl From<&domain::SessionSummary> for SessionSummary {
    fn from(value: &domain::SessionSummary) -> Self {
        Self {
            workout: WorkoutTemplate::from(&value.workout),
            exercise_sessions: value
                .exercise_sessions
                .iter()
                .map(ExerciseSession::from)
                .collect(),
            start_time: value.start_time,
            end_time: value.end_time,
            total_time: value.total_time.num_seconds(),
            total_sets: value.total_sets,
            total_volume: value.total_volume,
            notes: value.notes.clone(),
            exercise_notes: value.exercise_notes.clone(),
        }
    }
}

impl TryFrom<SessionSummary> for domain::SessionSummary {
    type Error = SessionSummaryError;

    fn try_from(value: SessionSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            workout: domain::WorkoutTemplate::try_from(value.workout)?,
            exercise_sessions: value
                .exercise_sessions
                .into_iter()
                .map(domain::ExerciseSession::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            start_time: value.start_time,
            end_time: value.end_time,
            total_time: Duration::seconds(value.total_time),
            total_sets: value.total_sets,
            total_volume: value.total_volume,
            notes: value.notes,
            exercise_notes: value.exercise_notes,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SessionSummaryError {
    #[error(transparent)]
    InvalidWorkout(#[from] WorkoutError),
    #[error(transparent)]
    InvalidPrescription(#[from] domain::PrescriptionError),
    #[error(transparent)]
    InvalidSession(#[from] domain::SessionError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
    #[error(transparent)]
    InvalidRPE(#[from] domain::RPEError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSession {
    pub exercise_index: usize,
    pub exercise: ExercisePrescription,
    pub completed_sets: Vec<CompletedSet>,
    #[serde(default)]
    pub notes: String,
}

impl From<&domain::ExerciseSession> for ExerciseSession {
    fn from(value: &domain::ExerciseSession) -> Self {
        Self {
            exercise_index: value.exercise_idx,
            exercise: ExercisePrescription::from(&value.exercise),
            completed_sets: value.sets().iter().map(CompletedSet::from).collect(),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<ExerciseSession> for domain::ExerciseSession {
    type Error = SessionSummaryError;

    fn try_from(value: ExerciseSession) -> Result<Self, Self::Error> {
        Ok(domain::ExerciseSession::from_logged(
            value.exercise_index,
            domain::ExercisePrescription::try_from(value.exercise)?,
            value
                .completed_sets
                .into_iter()
                .map(domain::CompletedSet::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            value.notes,
        )?)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSet {
    pub set_number: usize,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<u8>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&domain::CompletedSet> for CompletedSet {
    fn from(value: &domain::CompletedSet) -> Self {
        Self {
            set_number: value.set_number,
            reps: u32::from(value.reps),
            weight: value.weight.map(f32::from),
            rpe: value.rpe.map(u8::from),
            completed: value.completed,
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<CompletedSet> for domain::CompletedSet {
    type Error = SessionSummaryError;

    fn try_from(value: CompletedSet) -> Result<Self, Self::Error> {
        Ok(Self {
            set_number: value.set_number,
            reps: domain::Reps::new(value.reps)?,
            weight: value.weight.map(domain::Weight::new).transpose()?,
            rpe: value.rpe.map(domain::RPE::new).transpose()?,
            completed: value.completed,
            notes: value.notes,
        })
    }
}
