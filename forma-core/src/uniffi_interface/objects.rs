use std::sync::Arc;

use crate::discard::DiscardState;
use crate::models;
use crate::session::{WorkoutSnapshot as CoreSnapshot, format_volume};
use crate::status::WorkoutStatus;

#[derive(uniffi::Object)]
pub struct ExerciseSet {
    pub id: String,
    pub previous: String,
    pub weight: String,
    pub reps: String,
    pub completed: bool,
}

#[uniffi::export]
impl ExerciseSet {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn previous(&self) -> String {
        self.previous.clone()
    }

    fn weight(&self) -> String {
        self.weight.clone()
    }

    fn reps(&self) -> String {
        self.reps.clone()
    }

    fn completed(&self) -> bool {
        self.completed
    }
}

impl From<models::ExerciseSet> for ExerciseSet {
    fn from(s: models::ExerciseSet) -> Self {
        ExerciseSet {
            id: s.id,
            previous: s.previous,
            weight: s.weight,
            reps: s.reps,
            completed: s.completed,
        }
    }
}

#[derive(uniffi::Object)]
pub struct WorkoutExercise {
    pub name: String,
    pub muscle: String,
    pub comment: Option<String>,
    pub sets: Vec<Arc<ExerciseSet>>,
}

#[uniffi::export]
impl WorkoutExercise {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn muscle(&self) -> String {
        self.muscle.clone()
    }

    fn comment(&self) -> Option<String> {
        self.comment.clone()
    }

    fn sets(&self) -> Vec<Arc<ExerciseSet>> {
        self.sets.clone()
    }

    /// The remove control is only offered while more than one set exists.
    fn can_remove_sets(&self) -> bool {
        self.sets.len() > 1
    }
}

impl From<models::WorkoutExercise> for WorkoutExercise {
    fn from(e: models::WorkoutExercise) -> Self {
        WorkoutExercise {
            name: e.name,
            muscle: e.muscle,
            comment: e.comment,
            sets: e
                .sets
                .into_iter()
                .map(|s| Arc::new(ExerciseSet::from(s)))
                .collect(),
        }
    }
}

#[derive(uniffi::Record)]
pub struct WorkoutSnapshot {
    pub name: String,
    pub elapsed_seconds: u64,
    pub duration_label: String,
    pub timer_running: bool,
    pub total_volume: f64,
    pub total_volume_label: String,
    pub total_sets: u32,
    pub completed_sets: u32,
    pub exercises: Vec<Arc<WorkoutExercise>>,
    pub status: WorkoutStatus,
    pub discard_state: DiscardState,
}

impl From<CoreSnapshot> for WorkoutSnapshot {
    fn from(s: CoreSnapshot) -> Self {
        WorkoutSnapshot {
            name: s.name,
            elapsed_seconds: s.elapsed_seconds,
            duration_label: s.duration_label,
            timer_running: s.timer_running,
            total_volume: s.total_volume,
            total_volume_label: format_volume(s.total_volume),
            total_sets: s.total_sets as u32,
            completed_sets: s.completed_sets as u32,
            exercises: s
                .exercises
                .into_iter()
                .map(|e| Arc::new(WorkoutExercise::from(e)))
                .collect(),
            status: s.status,
            discard_state: s.discard_state,
        }
    }
}
