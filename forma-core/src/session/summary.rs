//! Derived totals and the read-only snapshot handed to front-ends.

use crate::discard::DiscardState;
use crate::models::{ExerciseSet, WorkoutExercise};
use crate::session::{Session, WorkoutState};
use crate::status::WorkoutStatus;
use serde::Serialize;

impl WorkoutState {
    /// Sum of weight x reps over every set. Non-numeric fields count as zero.
    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(WorkoutExercise::volume).sum()
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn completed_sets(&self) -> usize {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .filter(|s: &&ExerciseSet| s.completed)
            .count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutSnapshot {
    pub name: String,
    pub elapsed_seconds: u64,
    pub duration_label: String,
    pub timer_running: bool,
    pub total_volume: f64,
    pub total_sets: usize,
    pub completed_sets: usize,
    pub exercises: Vec<WorkoutExercise>,
    pub status: WorkoutStatus,
    pub discard_state: DiscardState,
}

impl Session {
    pub async fn snapshot(&self) -> WorkoutSnapshot {
        let state = self.state.lock().await;
        let discard_state = self.discard.lock().await.state();
        let elapsed = state.timer().elapsed();
        WorkoutSnapshot {
            name: state.name().to_string(),
            elapsed_seconds: elapsed,
            duration_label: format_duration(elapsed),
            timer_running: state.timer().is_running(),
            total_volume: state.total_volume(),
            total_sets: state.total_sets(),
            completed_sets: state.completed_sets(),
            exercises: state.exercises().to_vec(),
            status: state.status(),
            discard_state,
        }
    }

    pub async fn total_volume(&self) -> f64 {
        self.state.lock().await.total_volume()
    }

    pub async fn total_sets(&self) -> usize {
        self.state.lock().await.total_sets()
    }
}

/// `1h 2mins 3s`, `2mins 3s` or `3s`; larger units only once they are non-zero.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}mins {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}mins {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// At most one decimal, none when the value is whole.
pub fn format_volume(volume: f64) -> String {
    let rounded = (volume * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}
