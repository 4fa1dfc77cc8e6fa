use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Placeholder shown for a set with no recorded previous performance.
pub const NO_PREVIOUS: &str = "-";

/// An exercise as offered by the search view: just a name and its muscle group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseExercise {
    pub name: String,
    #[serde(alias = "muscleGroup")]
    pub muscle: String,
}

impl BaseExercise {
    pub fn new(name: impl Into<String>, muscle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            muscle: muscle.into(),
        }
    }
}

// Set models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: String,
    pub previous: String,
    pub weight: String,
    pub reps: String,
    pub completed: bool,
}

impl ExerciseSet {
    pub fn empty() -> Self {
        Self::prefilled(String::new(), String::new())
    }

    pub fn prefilled(weight: String, reps: String) -> Self {
        let mut set = ExerciseSet {
            id: Uuid::new_v4().to_string(),
            previous: NO_PREVIOUS.to_string(),
            weight,
            reps,
            completed: false,
        };
        set.completed = set.derived_completed();
        set
    }

    /// A set counts as completed once both weight and reps hold something.
    pub fn derived_completed(&self) -> bool {
        !self.weight.trim().is_empty() && !self.reps.trim().is_empty()
    }

    pub fn weight_value(&self) -> f64 {
        parse_numeric(&self.weight)
    }

    pub fn reps_value(&self) -> f64 {
        parse_numeric(&self.reps)
    }

    pub fn volume(&self) -> f64 {
        self.weight_value() * self.reps_value()
    }
}

impl fmt::Display for ExerciseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weight = if self.weight.trim().is_empty() {
            NO_PREVIOUS
        } else {
            self.weight.trim()
        };
        let reps = if self.reps.trim().is_empty() {
            NO_PREVIOUS
        } else {
            self.reps.trim()
        };
        let mark = if self.completed { " ✓" } else { "" };
        write!(f, "{}kg x {} reps{}", weight, reps, mark)
    }
}

/// Text fields hold whatever the user typed; anything that is not a finite
/// number counts as zero.
fn parse_numeric(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// Exercise models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub name: String,
    pub muscle: String,
    pub sets: Vec<ExerciseSet>,
    pub comment: Option<String>,
}

impl WorkoutExercise {
    pub fn from_base(base: BaseExercise) -> Self {
        WorkoutExercise {
            name: base.name,
            muscle: base.muscle,
            sets: vec![ExerciseSet::empty()],
            comment: None,
        }
    }

    pub fn find_set(&self, set_id: &str) -> Option<&ExerciseSet> {
        self.sets.iter().find(|s| s.id == set_id)
    }

    pub fn find_set_mut(&mut self, set_id: &str) -> Option<&mut ExerciseSet> {
        self.sets.iter_mut().find(|s| s.id == set_id)
    }

    pub fn volume(&self) -> f64 {
        self.sets.iter().map(ExerciseSet::volume).sum()
    }
}

/// A single field of a set the user can edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SetField {
    Weight(String),
    Reps(String),
    Completed(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn toggle(self) -> Self {
        match self {
            WeightUnit::Kg => WeightUnit::Lbs,
            WeightUnit::Lbs => WeightUnit::Kg,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lbs => write!(f, "lbs"),
        }
    }
}
