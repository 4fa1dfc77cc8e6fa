use crate::handoff::ExerciseSelection;
use crate::models::BaseExercise;
use crate::uniffi_interface::errors::FormaError;
use std::sync::{Arc, Mutex, MutexGuard};

/// Selection state of the exercise search view.
#[derive(Debug, uniffi::Object)]
pub struct ExercisePicker {
    selection: Mutex<ExerciseSelection>,
}

impl ExercisePicker {
    fn lock(&self) -> MutexGuard<'_, ExerciseSelection> {
        self.selection.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[uniffi::export]
impl ExercisePicker {
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(ExercisePicker {
            selection: Mutex::new(ExerciseSelection::new()),
        })
    }

    /// Returns whether the exercise is selected afterwards.
    pub fn toggle(&self, name: String, muscle: String) -> bool {
        self.lock().toggle(BaseExercise::new(name, muscle))
    }

    pub fn is_selected(&self, name: String) -> bool {
        self.lock().is_selected(&name)
    }

    pub fn selected_count(&self) -> u32 {
        self.lock().len() as u32
    }

    pub fn selected_names(&self) -> Vec<String> {
        self.lock().exercises().iter().map(|e| e.name.clone()).collect()
    }

    /// Payload for the tracking screen, or nothing when no exercise is picked.
    pub fn payload(&self) -> Result<Option<String>, FormaError> {
        Ok(self.lock().to_payload()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff;

    #[test]
    fn picker_builds_handoff_payload() {
        let picker = ExercisePicker::new();
        assert!(picker.payload().unwrap().is_none());
        assert!(picker.toggle("Leg Press".into(), "Legs".into()));
        assert!(picker.toggle("Cable Shrugs".into(), "Trapezius".into()));
        assert!(!picker.toggle("Leg Press".into(), "Legs".into()));
        assert_eq!(picker.selected_names(), ["Cable Shrugs"]);

        let payload = picker.payload().unwrap().unwrap();
        let decoded = handoff::decode(&payload).unwrap();
        assert_eq!(decoded, [BaseExercise::new("Cable Shrugs", "Trapezius")]);
    }
}
