use chrono::Weekday;
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Name, NameError, Preferences, ReadError, Reps, RepsError, Sets,
    SetsError, UpdateError, ValidationError, Weight, WeightError, generate_workout,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, template: WorkoutTemplate) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        self.get_workouts()
            .await?
            .into_iter()
            .find(|w| w.id == id)
            .ok_or(ReadError::NotFound)
    }

    async fn get_weekly_plan(&self) -> Result<Vec<Workout>, ReadError> {
        Ok(weekly_plan(self.get_workouts().await?))
    }

    async fn get_workout_for_day(&self, day: Weekday) -> Result<Option<Workout>, ReadError> {
        Ok(workout_for_day(&self.get_workouts().await?, day).cloned())
    }

    async fn generate_workout(
        &self,
        day: Option<Weekday>,
        preferences: &Preferences,
    ) -> Result<Workout, CreateError> {
        let template =
            generate_workout(day, preferences).map_err(|err| CreateError::Other(err.into()))?;
        self.create_workout(template).await
    }

    async fn validate_workout_name(
        &self,
        name: &str,
        id: WorkoutID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_workouts().await {
                Ok(workouts) => {
                    if workouts
                        .iter()
                        .all(|w| w.id == id || !w.template.name.eq_ignore_case(name.as_str()))
                    {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, template: WorkoutTemplate) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub template: WorkoutTemplate,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutTemplate {
    pub name: Name,
    pub day: Option<Weekday>,
    pub exercises: Vec<ExercisePrescription>,
}

impl WorkoutTemplate {
    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.count()).sum()
    }
}

/// The planned sets, reps and weight of an exercise.
///
/// A missing weight denotes a bodyweight exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePrescription {
    pub name: Name,
    pub sets: Sets,
    pub reps: Reps,
    pub weight: Option<Weight>,
    pub notes: Option<String>,
}

impl ExercisePrescription {
    #[must_use]
    pub fn new(name: Name, sets: Sets, reps: Reps, weight: Option<Weight>) -> Self {
        Self {
            name,
            sets,
            reps,
            weight,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        let notes = notes.trim();
        self.notes = if notes.is_empty() {
            None
        } else {
            Some(notes.to_string())
        };
        self
    }

    /// Creates a prescription from form input. An empty weight denotes a bodyweight exercise.
    pub fn parse(
        name: &str,
        sets: &str,
        reps: &str,
        weight: &str,
    ) -> Result<Self, PrescriptionError> {
        let weight = if weight.trim().is_empty() {
            None
        } else {
            Some(Weight::try_from(weight)?)
        };
        Ok(Self::new(
            Name::new(name)?,
            Sets::try_from(sets)?,
            Reps::try_from(reps)?,
            weight,
        ))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PrescriptionError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Sets(#[from] SetsError),
    #[error(transparent)]
    Reps(#[from] RepsError),
    #[error(transparent)]
    Weight(#[from] WeightError),
}

/// Orders workouts from Monday to Sunday, followed by workouts without a day.
#[must_use]
pub fn weekly_plan(mut workouts: Vec<Workout>) -> Vec<Workout> {
    workouts.sort_by_key(|w| w.template.day.map_or(7, |d| d.num_days_from_monday()));
    workouts
}

#[must_use]
pub fn workout_for_day(workouts: &[Workout], day: Weekday) -> Option<&Workout> {
    workouts.iter().find(|w| w.template.day == Some(day))
}

#[must_use]
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
