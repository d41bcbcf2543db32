use log::{debug, error};

use crate::{
    CreateError, DeleteError, ExerciseRecord, ExerciseRepository, ExerciseService, ReadError,
    SessionSummary, SessionSummaryRepository, SessionSummaryService, UpdateError, Workout,
    WorkoutID, WorkoutRepository, WorkoutService, WorkoutTemplate,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<ExerciseRecord>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn create_workout(&self, template: WorkoutTemplate) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(template),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout(workout),
            UpdateError,
            "replace",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: SessionSummaryRepository> SessionSummaryService for Service<R> {
    async fn get_session_summaries(&self) -> Result<Vec<SessionSummary>, ReadError> {
        log_on_error!(
            self.repository.read_session_summaries(),
            ReadError,
            "get",
            "session summaries"
        )
    }

    async fn create_session_summary(
        &self,
        summary: SessionSummary,
    ) -> Result<SessionSummary, CreateError> {
        log_on_error!(
            self.repository.create_session_summary(summary),
            CreateError,
            "create",
            "session summary"
        )
    }
}
