use crate::config::SessionConfig;
use crate::models::WorkoutExercise;
use crate::status::WorkoutStatus;
use crate::timer::DurationTimer;

#[derive(Debug, Clone)]
pub struct WorkoutState {
    pub(crate) name: String,
    pub(crate) default_name: String,
    pub(crate) exercises: Vec<WorkoutExercise>,
    pub(crate) timer: DurationTimer,
    pub(crate) timer_autostart: bool,
}

impl WorkoutState {
    pub fn new(config: &SessionConfig) -> Self {
        WorkoutState {
            name: config.default_workout_name.clone(),
            default_name: config.default_workout_name.clone(),
            exercises: Vec::new(),
            timer: DurationTimer::new(config.start_timer_running),
            timer_autostart: config.start_timer_running,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exercises(&self) -> &[WorkoutExercise] {
        &self.exercises
    }

    pub fn exercise(&self, name: &str) -> Option<&WorkoutExercise> {
        self.exercises.iter().find(|e| e.name == name)
    }

    pub(crate) fn exercise_mut(&mut self, name: &str) -> Option<&mut WorkoutExercise> {
        self.exercises.iter_mut().find(|e| e.name == name)
    }

    pub fn timer(&self) -> &DurationTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut DurationTimer {
        &mut self.timer
    }

    /// A workout exists as soon as it holds at least one exercise.
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn status(&self) -> WorkoutStatus {
        if self.is_empty() {
            WorkoutStatus::idle()
        } else {
            WorkoutStatus::active(&self.name)
        }
    }
}
