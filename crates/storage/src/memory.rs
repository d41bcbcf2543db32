//! In-memory storage
//!
//! The exercise dataset is loaded once and never modified. Workouts and session summaries are
//! kept in their JSON representation, so every read goes through the same validation as loading
//! a dataset.

use std::cell::{Cell, RefCell};

use anyhow::{Context, bail};
use liftlog_domain as domain;
use log::{debug, info};
use uuid::Uuid;

use crate::json;

#[derive(Debug, Default)]
pub struct InMemory {
    exercises: Vec<domain::ExerciseRecord>,
    workouts: RefCell<Vec<json::Workout>>,
    session_summaries: RefCell<Vec<json::SessionSummary>>,
    available: Cell<bool>,
}

impl InMemory {
    #[must_use]
    pub fn new(exercises: Vec<domain::ExerciseRecord>) -> Self {
        Self {
            exercises,
            available: Cell::new(true),
            ..Self::default()
        }
    }

    /// Loads the exercise dataset and the saved workouts.
    pub fn from_json(exercises: &str, workouts: &str) -> anyhow::Result<Self> {
        let exercises = serde_json::from_str::<Vec<json::Exercise>>(exercises)
            .context("failed to parse exercises")?
            .into_iter()
            .map(domain::ExerciseRecord::from)
            .collect::<Vec<_>>();

        let mut ids = std::collections::HashSet::new();
        for exercise in &exercises {
            if !ids.insert(&exercise.id) {
                bail!("duplicate exercise ID {}", exercise.id);
            }
        }

        let workouts = serde_json::from_str::<Vec<json::Workout>>(workouts)
            .context("failed to parse workouts")?;

        for workout in &workouts {
            domain::Workout::try_from(workout.clone())
                .with_context(|| format!("invalid workout {}", workout.id))?;
        }

        info!(
            "loaded {} exercises and {} workouts",
            exercises.len(),
            workouts.len()
        );

        Ok(Self {
            exercises,
            workouts: RefCell::new(workouts),
            session_summaries: RefCell::new(vec![]),
            available: Cell::new(true),
        })
    }

    /// Simulates a lost connection to the underlying storage.
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    pub fn export_session_summaries(&self) -> anyhow::Result<String> {
        serde_json::to_string(&*self.session_summaries.borrow())
            .context("failed to serialize session summaries")
    }

    fn check_available(&self) -> Result<(), domain::StorageError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(domain::StorageError::NoConnection)
        }
    }

    fn name_taken(&self, name: &domain::Name, id: Uuid) -> bool {
        self.workouts
            .borrow()
            .iter()
            .any(|w| w.id != id && name.eq_ignore_case(&w.template.name))
    }
}

impl domain::ExerciseRepository for InMemory {
    async fn read_exercises(&self) -> Result<Vec<domain::ExerciseRecord>, domain::ReadError> {
        self.check_available()?;
        Ok(self.exercises.clone())
    }
}

impl domain::WorkoutRepository for InMemory {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.check_available()?;
        self.workouts
            .borrow()
            .iter()
            .cloned()
            .map(|w| domain::Workout::try_from(w).map_err(|err| domain::ReadError::Other(err.into())))
            .collect()
    }

    async fn create_workout(
        &self,
        template: domain::WorkoutTemplate,
    ) -> Result<domain::Workout, domain::CreateError> {
        self.check_available()?;
        if self.name_taken(&template.name, Uuid::nil()) {
            return Err(domain::CreateError::Conflict);
        }
        let workout = domain::Workout {
            id: Uuid::new_v4().into(),
            template,
        };
        self.workouts.borrow_mut().push(json::Workout::from(&workout));
        debug!("created workout {}", *workout.id);
        Ok(workout)
    }

    async fn replace_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        self.check_available()?;
        if self.name_taken(&workout.template.name, *workout.id) {
            return Err(domain::UpdateError::Conflict);
        }
        let mut workouts = self.workouts.borrow_mut();
        let Some(stored) = workouts.iter_mut().find(|w| w.id == *workout.id) else {
            return Err(domain::UpdateError::NotFound);
        };
        *stored = json::Workout::from(&workout);
        Ok(workout)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.check_available()?;
        let mut workouts = self.workouts.borrow_mut();
        let Some(idx) = workouts.iter().position(|w| w.id == *id) else {
            return Err(domain::DeleteError::NotFound);
        };
        workouts.remove(idx);
        Ok(id)
    }
}

impl domain::SessionSummaryRepository for InMemory {
    async fn read_session_summaries(
        &self,
    ) -> Result<Vec<domain::SessionSummary>, domain::ReadError> {
        self.check_available()?;
        self.session_summaries
            .borrow()
            .iter()
            .cloned()
            .map(|s| {
                domain::SessionSummary::try_from(s)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    async fn create_session_summary(
        &self,
        summary: domain::SessionSummary,
    ) -> Result<domain::SessionSummary, domain::CreateError> {
        self.check_available()?;
        self.session_summaries
            .borrow_mut()
            .push(json::SessionSummary::from(&summary));
        Ok(summary)
    }
}
