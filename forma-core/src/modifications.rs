use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Modification {
    pub modification_type: ModificationType,
    pub exercise_name: Option<String>,
    pub set_id: Option<String>,
    pub set_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum ModificationType {
    ExerciseAdded,
    SetAdded,
    SetModified,
    SetRemoved,
    CommentChanged,
    WorkoutRenamed,
    WorkoutDiscarded,
}

impl Modification {
    pub fn exercise(modification_type: ModificationType, exercise_name: &str) -> Self {
        Modification {
            modification_type,
            exercise_name: Some(exercise_name.to_string()),
            set_id: None,
            set_ids: vec![],
        }
    }

    pub fn set(modification_type: ModificationType, exercise_name: &str, set_id: &str) -> Self {
        Modification {
            modification_type,
            exercise_name: Some(exercise_name.to_string()),
            set_id: Some(set_id.to_string()),
            set_ids: vec![set_id.to_string()],
        }
    }

    pub fn workout(modification_type: ModificationType) -> Self {
        Modification {
            modification_type,
            exercise_name: None,
            set_id: None,
            set_ids: vec![],
        }
    }
}
