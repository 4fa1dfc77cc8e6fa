//! The one-shot payload the exercise search view hands back to the session:
//! a JSON array of `{"name": ..., "muscle": ...}` objects.

use crate::models::BaseExercise;
use anyhow::Result;
use log::{debug, warn};

pub fn decode(payload: &str) -> Result<Vec<BaseExercise>> {
    let parsed: Vec<BaseExercise> = serde_json::from_str(payload)
        .map_err(|e| anyhow::anyhow!("Failed to parse exercise handoff payload: {}", e))?;

    let exercises: Vec<BaseExercise> = parsed
        .into_iter()
        .filter_map(|e| {
            let name = e.name.trim();
            if name.is_empty() {
                warn!("Dropping handoff entry with an empty name");
                return None;
            }
            Some(BaseExercise::new(name, e.muscle.trim()))
        })
        .collect();
    debug!("Decoded {} exercises from handoff payload", exercises.len());
    Ok(exercises)
}

pub fn encode(exercises: &[BaseExercise]) -> Result<String> {
    Ok(serde_json::to_string(exercises)?)
}

/// Exercises picked in the search view, in the order they were picked.
#[derive(Debug, Default, Clone)]
pub struct ExerciseSelection {
    selected: Vec<BaseExercise>,
}

impl ExerciseSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the exercise, or deselect it if a same-named one is already
    /// selected. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, exercise: BaseExercise) -> bool {
        if let Some(pos) = self.selected.iter().position(|e| e.name == exercise.name) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(exercise);
            true
        }
    }

    /// Select the exercise unless a same-named one is already selected.
    /// Blank names are never selected.
    pub fn select(&mut self, exercise: BaseExercise) -> bool {
        let name = exercise.name.trim();
        if name.is_empty() || self.is_selected(name) {
            return false;
        }
        self.selected.push(BaseExercise::new(name, exercise.muscle.trim()));
        true
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn exercises(&self) -> &[BaseExercise] {
        &self.selected
    }

    /// Nothing is handed off when nothing was picked.
    pub fn to_payload(&self) -> Result<Option<String>> {
        if self.selected.is_empty() {
            return Ok(None);
        }
        encode(&self.selected).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_search_payload() {
        let payload = r#"[{"name":"Leg Press","muscle":"Legs"},{"name":"Cable Shrugs","muscle":"Trapezius"}]"#;
        let exercises = decode(payload).unwrap();
        assert_eq!(
            exercises,
            vec![
                BaseExercise::new("Leg Press", "Legs"),
                BaseExercise::new("Cable Shrugs", "Trapezius"),
            ]
        );
    }

    #[test]
    fn accepts_muscle_group_key_and_skips_blank_names() {
        let payload = r#"[{"name":"  Hack Squats ","muscleGroup":"Legs"},{"name":"   ","muscle":"Abs"}]"#;
        let exercises = decode(payload).unwrap();
        assert_eq!(exercises, vec![BaseExercise::new("Hack Squats", "Legs")]);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"name":"Leg Press"}"#).is_err());
    }

    #[test]
    fn selection_toggles_by_name() {
        let mut selection = ExerciseSelection::new();
        assert!(selection.to_payload().unwrap().is_none());
        assert!(selection.toggle(BaseExercise::new("Leg Press", "Legs")));
        assert!(selection.toggle(BaseExercise::new("Rope Pushdown", "Triceps")));
        assert!(!selection.toggle(BaseExercise::new("Leg Press", "Legs")));
        assert!(!selection.is_selected("Leg Press"));
        assert_eq!(selection.len(), 1);

        let payload = selection.to_payload().unwrap().unwrap();
        assert_eq!(decode(&payload).unwrap(), selection.exercises());
    }

    #[test]
    fn select_keeps_first_and_ignores_blank() {
        let mut selection = ExerciseSelection::new();
        assert!(selection.select(BaseExercise::new(" Leg Press ", "Legs")));
        assert!(!selection.select(BaseExercise::new("Leg Press", "Quads")));
        assert!(!selection.select(BaseExercise::new("  ", "Abs")));
        assert_eq!(selection.exercises(), [BaseExercise::new("Leg Press", "Legs")]);
    }
}
