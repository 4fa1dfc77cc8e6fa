use crate::models::{BaseExercise, SetField};
use crate::modifications::Modification;
use crate::session::Session;
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// Addresses a set either by its id or by its 1-based position within the
/// exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetRef {
    Position(usize),
    Id(String),
}

/// Every user action on a workout, in a serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    AddExercises {
        exercises: Vec<BaseExercise>,
    },
    Handoff {
        payload: String,
    },
    SetWeight {
        exercise: String,
        set: SetRef,
        value: String,
    },
    SetReps {
        exercise: String,
        set: SetRef,
        value: String,
    },
    SetCompleted {
        exercise: String,
        set: SetRef,
        value: bool,
    },
    AddSet {
        exercise: String,
    },
    RemoveSet {
        exercise: String,
        set: SetRef,
    },
    Comment {
        exercise: String,
        text: String,
    },
    Rename {
        name: String,
    },
    ToggleTimer,
    PauseTimer,
    ResumeTimer,
    Tick {
        #[serde(default = "one")]
        count: u32,
    },
    RequestDiscard,
    CancelDiscard,
    ConfirmDiscard,
}

fn one() -> u32 {
    1
}

impl Session {
    pub async fn apply(&self, command: Command) -> Result<Vec<Modification>> {
        debug!("Applying command {:?}", command);
        match command {
            Command::AddExercises { exercises } => Ok(self.add_exercises(exercises).await),
            Command::Handoff { payload } => Ok(self.add_exercises_from_json(&payload).await),
            Command::SetWeight {
                exercise,
                set,
                value,
            } => self.set_field_by_ref(&exercise, &set, SetField::Weight(value)).await,
            Command::SetReps {
                exercise,
                set,
                value,
            } => self.set_field_by_ref(&exercise, &set, SetField::Reps(value)).await,
            Command::SetCompleted {
                exercise,
                set,
                value,
            } => self.set_field_by_ref(&exercise, &set, SetField::Completed(value)).await,
            Command::AddSet { exercise } => Ok(self.add_set(&exercise).await),
            Command::RemoveSet { exercise, set } => match self.resolve_set_id(&exercise, &set).await {
                Some(set_id) => Ok(self.remove_set(&exercise, &set_id).await),
                None => Ok(vec![]),
            },
            Command::Comment { exercise, text } => Ok(self.set_comment(&exercise, &text).await),
            Command::Rename { name } => Ok(self.rename(&name).await),
            Command::ToggleTimer => {
                self.toggle_timer().await;
                Ok(vec![])
            }
            Command::PauseTimer => {
                self.pause_timer().await;
                Ok(vec![])
            }
            Command::ResumeTimer => {
                self.resume_timer().await;
                Ok(vec![])
            }
            Command::Tick { count } => {
                for _ in 0..count {
                    self.tick().await;
                }
                Ok(vec![])
            }
            Command::RequestDiscard => {
                self.request_discard().await?;
                Ok(vec![])
            }
            Command::CancelDiscard => {
                self.cancel_discard().await?;
                Ok(vec![])
            }
            Command::ConfirmDiscard => self.confirm_discard().await,
        }
    }

    pub async fn resolve_set_id(&self, exercise_name: &str, set: &SetRef) -> Option<String> {
        let state = self.state.lock().await;
        let exercise = state.exercise(exercise_name)?;
        match set {
            SetRef::Id(id) => exercise.find_set(id).map(|s| s.id.clone()),
            SetRef::Position(idx) if *idx > 0 && *idx <= exercise.sets.len() => {
                Some(exercise.sets[idx - 1].id.clone())
            }
            SetRef::Position(_) => None,
        }
    }

    async fn set_field_by_ref(
        &self,
        exercise_name: &str,
        set: &SetRef,
        field: SetField,
    ) -> Result<Vec<Modification>> {
        match self.resolve_set_id(exercise_name, set).await {
            Some(set_id) => Ok(self.set_field(exercise_name, &set_id, field).await),
            None => {
                debug!("No set {:?} in {}", set, exercise_name);
                Ok(vec![])
            }
        }
    }
}
