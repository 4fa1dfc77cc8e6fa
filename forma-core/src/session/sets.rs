use crate::models::{ExerciseSet, SetField};
use crate::modifications::{Modification, ModificationType};
use crate::session::{Session, WorkoutState};
use log::{debug, warn};

impl WorkoutState {
    /// Replace one field of a set. Unknown exercises or sets are ignored.
    ///
    /// `completed` always follows weight and reps: editing either re-derives
    /// it, and an explicit completed value that disagrees is dropped.
    pub fn set_field(
        &mut self,
        exercise_name: &str,
        set_id: &str,
        field: SetField,
    ) -> Vec<Modification> {
        let Some(set) = self
            .exercise_mut(exercise_name)
            .and_then(|e| e.find_set_mut(set_id))
        else {
            debug!("set_field: no set {} in {}", set_id, exercise_name);
            return vec![];
        };

        let before = set.clone();
        match field {
            SetField::Weight(value) => set.weight = value,
            SetField::Reps(value) => set.reps = value,
            SetField::Completed(value) => {
                if value != set.derived_completed() {
                    debug!(
                        "Ignoring completed={} for set {}: weight/reps say otherwise",
                        value, set_id
                    );
                }
            }
        }
        set.completed = set.derived_completed();

        if *set == before {
            return vec![];
        }
        vec![Modification::set(
            ModificationType::SetModified,
            exercise_name,
            set_id,
        )]
    }

    /// Append a set that starts with the weight and reps of the last one.
    pub fn add_set(&mut self, exercise_name: &str) -> Vec<Modification> {
        let Some(exercise) = self.exercise_mut(exercise_name) else {
            debug!("add_set: no exercise {}", exercise_name);
            return vec![];
        };

        let set = match exercise.sets.last() {
            Some(last) => ExerciseSet::prefilled(last.weight.clone(), last.reps.clone()),
            None => ExerciseSet::empty(),
        };
        let set_id = set.id.clone();
        exercise.sets.push(set);
        debug!("Added set {} to {}", set_id, exercise_name);

        vec![Modification::set(
            ModificationType::SetAdded,
            exercise_name,
            &set_id,
        )]
    }

    /// Remove a set. The last remaining set of an exercise stays.
    pub fn remove_set(&mut self, exercise_name: &str, set_id: &str) -> Vec<Modification> {
        let Some(exercise) = self.exercise_mut(exercise_name) else {
            debug!("remove_set: no exercise {}", exercise_name);
            return vec![];
        };
        let Some(pos) = exercise.sets.iter().position(|s| s.id == set_id) else {
            debug!("remove_set: no set {} in {}", set_id, exercise_name);
            return vec![];
        };
        if exercise.sets.len() == 1 {
            warn!(
                "Refusing to remove the only set of {}; exercises keep at least one set",
                exercise_name
            );
            return vec![];
        }

        exercise.sets.remove(pos);
        vec![Modification::set(
            ModificationType::SetRemoved,
            exercise_name,
            set_id,
        )]
    }
}

impl Session {
    pub async fn set_field(
        &self,
        exercise_name: &str,
        set_id: &str,
        field: SetField,
    ) -> Vec<Modification> {
        self.mutate(|s| s.set_field(exercise_name, set_id, field))
            .await
    }

    pub async fn set_weight(&self, exercise_name: &str, set_id: &str, value: &str) -> Vec<Modification> {
        self.set_field(exercise_name, set_id, SetField::Weight(value.to_string()))
            .await
    }

    pub async fn set_reps(&self, exercise_name: &str, set_id: &str, value: &str) -> Vec<Modification> {
        self.set_field(exercise_name, set_id, SetField::Reps(value.to_string()))
            .await
    }

    pub async fn add_set(&self, exercise_name: &str) -> Vec<Modification> {
        self.mutate(|s| s.add_set(exercise_name)).await
    }

    pub async fn remove_set(&self, exercise_name: &str, set_id: &str) -> Vec<Modification> {
        self.mutate(|s| s.remove_set(exercise_name, set_id)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SessionConfig;
    use crate::models::{BaseExercise, SetField};
    use crate::modifications::ModificationType;
    use crate::session::WorkoutState;

    fn state_with(names: &[&str]) -> WorkoutState {
        let mut state = WorkoutState::new(&SessionConfig::default());
        state.add_exercises(names.iter().map(|n| BaseExercise::new(*n, "Legs")));
        state
    }

    fn first_set_id(state: &WorkoutState, exercise: &str) -> String {
        state.exercise(exercise).unwrap().sets[0].id.clone()
    }

    #[test]
    fn set_field_updates_one_field_and_derives_completed() {
        let mut state = state_with(&["Leg Press"]);
        let id = first_set_id(&state, "Leg Press");

        let mods = state.set_field("Leg Press", &id, SetField::Weight("100".into()));
        assert_eq!(mods[0].modification_type, ModificationType::SetModified);
        let set = &state.exercise("Leg Press").unwrap().sets[0];
        assert_eq!(set.weight, "100");
        assert!(set.reps.is_empty());
        assert!(!set.completed);

        state.set_field("Leg Press", &id, SetField::Reps("12".into()));
        assert!(state.exercise("Leg Press").unwrap().sets[0].completed);

        state.set_field("Leg Press", &id, SetField::Reps("".into()));
        assert!(!state.exercise("Leg Press").unwrap().sets[0].completed);
    }

    #[test]
    fn explicit_completed_cannot_contradict_fields() {
        let mut state = state_with(&["Leg Press"]);
        let id = first_set_id(&state, "Leg Press");
        let mods = state.set_field("Leg Press", &id, SetField::Completed(true));
        assert!(mods.is_empty());
        assert!(!state.exercise("Leg Press").unwrap().sets[0].completed);
    }

    #[test]
    fn set_field_on_unknown_target_is_a_no_op() {
        let mut state = state_with(&["Leg Press"]);
        let before = state.exercises().to_vec();
        assert!(state.set_field("Hack Squats", "x", SetField::Weight("1".into())).is_empty());
        assert!(state.set_field("Leg Press", "missing", SetField::Weight("1".into())).is_empty());
        assert_eq!(state.exercises(), before.as_slice());
    }

    #[test]
    fn add_set_copies_previous_weight_and_reps() {
        let mut state = state_with(&["Leg Press"]);
        let id = first_set_id(&state, "Leg Press");
        state.set_field("Leg Press", &id, SetField::Weight("20".into()));
        state.set_field("Leg Press", &id, SetField::Reps("8".into()));

        let mods = state.add_set("Leg Press");
        assert_eq!(mods[0].modification_type, ModificationType::SetAdded);
        let sets = &state.exercise("Leg Press").unwrap().sets;
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[1].weight, "20");
        assert_eq!(sets[1].reps, "8");
        assert_ne!(sets[1].id, sets[0].id);
        assert_eq!(mods[0].set_id.as_deref(), Some(sets[1].id.as_str()));
    }

    #[test]
    fn add_set_after_empty_set_is_empty() {
        let mut state = state_with(&["Leg Press"]);
        state.add_set("Leg Press");
        let sets = &state.exercise("Leg Press").unwrap().sets;
        assert!(sets[1].weight.is_empty() && sets[1].reps.is_empty());
        assert!(state.add_set("Unknown").is_empty());
    }

    #[test]
    fn last_set_cannot_be_removed() {
        let mut state = state_with(&["Leg Press"]);
        let id = first_set_id(&state, "Leg Press");
        assert!(state.remove_set("Leg Press", &id).is_empty());
        assert_eq!(state.total_sets(), 1);

        state.add_set("Leg Press");
        let mods = state.remove_set("Leg Press", &id);
        assert_eq!(mods[0].modification_type, ModificationType::SetRemoved);
        let sets = &state.exercise("Leg Press").unwrap().sets;
        assert_eq!(sets.len(), 1);
        assert_ne!(sets[0].id, id);
    }
}
