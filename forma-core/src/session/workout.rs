//! Workout-level operations: exercises, comments, naming, timer and discard.

use crate::discard::DiscardState;
use crate::handoff;
use crate::models::{BaseExercise, WorkoutExercise};
use crate::modifications::{Modification, ModificationType};
use crate::session::{Session, WorkoutState};
use anyhow::{Result, bail};
use log::{debug, info, warn};

impl WorkoutState {
    /// Append each candidate whose trimmed name is not already in the
    /// workout. The first occurrence of a name wins, including within
    /// `candidates`. Blank names are skipped.
    pub fn add_exercises<I>(&mut self, candidates: I) -> Vec<Modification>
    where
        I: IntoIterator<Item = BaseExercise>,
    {
        let mut modifications = Vec::new();
        for candidate in candidates {
            let name = candidate.name.trim();
            if name.is_empty() {
                warn!("Skipping exercise with an empty name");
                continue;
            }
            if self.exercise(name).is_some() {
                debug!("Skipping duplicate exercise {}", name);
                continue;
            }
            let exercise = WorkoutExercise::from_base(BaseExercise::new(name, candidate.muscle.trim()));
            let mut modification =
                Modification::exercise(ModificationType::ExerciseAdded, &exercise.name);
            modification.set_ids = exercise.sets.iter().map(|s| s.id.clone()).collect();
            modification.set_id = modification.set_ids.first().cloned();
            debug!("Added exercise {} ({})", exercise.name, exercise.muscle);
            self.exercises.push(exercise);
            modifications.push(modification);
        }
        modifications
    }

    /// Blank comments clear the existing one.
    pub fn set_comment(&mut self, exercise_name: &str, text: &str) -> Vec<Modification> {
        let Some(exercise) = self.exercise_mut(exercise_name) else {
            debug!("set_comment: no exercise {}", exercise_name);
            return vec![];
        };
        let text = text.trim();
        let comment = (!text.is_empty()).then(|| text.to_string());
        if exercise.comment == comment {
            return vec![];
        }
        exercise.comment = comment;
        vec![Modification::exercise(
            ModificationType::CommentChanged,
            exercise_name,
        )]
    }

    /// Blank names fall back to the default workout name.
    pub fn rename(&mut self, name: &str) -> Vec<Modification> {
        let name = name.trim();
        let name = if name.is_empty() {
            self.default_name.clone()
        } else {
            name.to_string()
        };
        if self.name == name {
            return vec![];
        }
        debug!("Workout renamed: {} -> {}", self.name, name);
        self.name = name;
        vec![Modification::workout(ModificationType::WorkoutRenamed)]
    }

    /// Drop every exercise, zero the duration and restore the default name.
    pub fn clear(&mut self) -> Vec<Modification> {
        self.exercises.clear();
        self.timer.reset(self.timer_autostart);
        self.name = self.default_name.clone();
        vec![Modification::workout(ModificationType::WorkoutDiscarded)]
    }
}

impl Session {
    pub async fn add_exercises(&self, candidates: Vec<BaseExercise>) -> Vec<Modification> {
        if candidates.is_empty() {
            return vec![];
        }
        self.mutate(|s| s.add_exercises(candidates)).await
    }

    /// Add the exercises picked in the search view. A payload that fails to
    /// parse is logged and adds nothing.
    pub async fn add_exercises_from_json(&self, payload: &str) -> Vec<Modification> {
        match handoff::decode(payload) {
            Ok(exercises) => self.add_exercises(exercises).await,
            Err(e) => {
                warn!("Ignoring exercise handoff: {}", e);
                vec![]
            }
        }
    }

    pub async fn set_comment(&self, exercise_name: &str, text: &str) -> Vec<Modification> {
        self.mutate(|s| s.set_comment(exercise_name, text)).await
    }

    pub async fn rename(&self, name: &str) -> Vec<Modification> {
        self.mutate(|s| s.rename(name)).await
    }

    pub async fn tick(&self) -> u64 {
        let mut state = self.state.lock().await;
        state.timer.tick();
        state.timer.elapsed()
    }

    pub async fn toggle_timer(&self) -> bool {
        let running = self.state.lock().await.timer.toggle();
        debug!("Timer {}", if running { "resumed" } else { "paused" });
        running
    }

    pub async fn pause_timer(&self) {
        self.state.lock().await.timer.pause();
    }

    pub async fn resume_timer(&self) {
        self.state.lock().await.timer.resume();
    }

    pub async fn request_discard(&self) -> Result<DiscardState> {
        let state = self.state.lock().await;
        if state.is_empty() {
            bail!("No workout in progress to discard");
        }
        self.discard.lock().await.request()
    }

    pub async fn cancel_discard(&self) -> Result<DiscardState> {
        let _state = self.state.lock().await;
        self.discard.lock().await.cancel()
    }

    /// Finish a requested discard: the workout is cleared and the shared
    /// status goes back to idle.
    pub async fn confirm_discard(&self) -> Result<Vec<Modification>> {
        let mut state = self.state.lock().await;
        self.discard.lock().await.confirm()?;
        let modifications = state.clear();
        self.status.publish(state.status());
        info!("Workout discarded");
        Ok(modifications)
    }

    /// Clear the workout without going through confirmation.
    pub async fn discard(&self) -> Vec<Modification> {
        let modifications = self.mutate(|s| s.clear()).await;
        info!("Workout discarded");
        modifications
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SessionConfig;
    use crate::discard::DiscardState;
    use crate::models::BaseExercise;
    use crate::modifications::ModificationType;
    use crate::session::{Session, WorkoutState};

    fn leg_press() -> BaseExercise {
        BaseExercise::new("Leg Press", "Legs")
    }

    #[test]
    fn duplicate_names_are_filtered() {
        let mut state = WorkoutState::new(&SessionConfig::default());
        let mods = state.add_exercises(vec![leg_press(), leg_press()]);
        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].modification_type, ModificationType::ExerciseAdded);
        assert_eq!(state.exercises().len(), 1);

        let exercise = &state.exercises()[0];
        assert_eq!(exercise.name, "Leg Press");
        assert_eq!(exercise.sets.len(), 1);
        assert!(exercise.sets[0].weight.is_empty());
        assert!(exercise.sets[0].reps.is_empty());
        assert!(!exercise.sets[0].completed);

        assert!(state.add_exercises(vec![leg_press()]).is_empty());
        assert!(state.add_exercises(Vec::new()).is_empty());
    }

    #[test]
    fn names_stay_unique_across_batches() {
        let mut state = WorkoutState::new(&SessionConfig::default());
        let batches = [
            vec!["Leg Press", "Hack Squats"],
            vec!["Hack Squats", "Rope Pushdown", "Leg Press"],
            vec!["Rope Pushdown", "Rope Pushdown", "Cable Shrugs"],
        ];
        for batch in batches {
            state.add_exercises(batch.into_iter().map(|n| BaseExercise::new(n, "Any")));
            let mut names: Vec<_> = state.exercises().iter().map(|e| e.name.clone()).collect();
            let total = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), total);
        }
        let order: Vec<_> = state.exercises().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, ["Leg Press", "Hack Squats", "Rope Pushdown", "Cable Shrugs"]);
    }

    #[test]
    fn blank_names_are_skipped_and_names_are_trimmed() {
        let mut state = WorkoutState::new(&SessionConfig::default());
        assert!(state.add_exercises(vec![BaseExercise::new("", "Other")]).is_empty());
        assert!(state.add_exercises(vec![BaseExercise::new("   ", "Other")]).is_empty());
        assert!(state.is_empty());

        let mods = state.add_exercises(vec![
            BaseExercise::new(" Leg Press", " Legs "),
            BaseExercise::new("Leg Press", "Legs"),
            BaseExercise::new("Leg Press  ", "Legs"),
        ]);
        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].exercise_name.as_deref(), Some("Leg Press"));
        let exercise = state.exercise("Leg Press").unwrap();
        assert_eq!(exercise.muscle, "Legs");
        assert_eq!(state.exercises().len(), 1);
    }

    #[tokio::test]
    async fn blank_exercise_does_not_start_a_workout() {
        let session = Session::default();
        assert!(session.add_exercises(vec![BaseExercise::new("", "Other")]).await.is_empty());
        assert!(!session.status().in_progress);
        assert!(session.state().await.is_empty());
    }

    #[test]
    fn comments_are_trimmed_and_blank_clears() {
        let mut state = WorkoutState::new(&SessionConfig::default());
        state.add_exercises(vec![leg_press()]);
        assert_eq!(state.set_comment("Leg Press", "  seat 4 ").len(), 1);
        assert_eq!(state.exercise("Leg Press").unwrap().comment.as_deref(), Some("seat 4"));
        assert!(state.set_comment("Leg Press", "seat 4").is_empty());
        state.set_comment("Leg Press", "   ");
        assert!(state.exercise("Leg Press").unwrap().comment.is_none());
        assert!(state.set_comment("Nope", "x").is_empty());
    }

    #[test]
    fn blank_rename_restores_default() {
        let mut state = WorkoutState::new(&SessionConfig::default());
        state.rename(" Push Day ");
        assert_eq!(state.name(), "Push Day");
        state.rename("   ");
        assert_eq!(state.name(), "Track Workout");
    }

    #[tokio::test]
    async fn status_follows_empty_and_non_empty() {
        let session = Session::default();
        let mut status = session.subscribe_status();
        assert!(!status.current().in_progress);

        session.rename("Leg Day").await;
        assert!(!session.status().in_progress);

        session.add_exercises(vec![leg_press()]).await;
        let seen = status.changed().await.unwrap();
        assert!(seen.in_progress);
        assert_eq!(seen.display_name.as_deref(), Some("Leg Day"));

        session.discard().await;
        let seen = status.changed().await.unwrap();
        assert!(!seen.in_progress);
        assert_eq!(seen.display_name, None);
    }

    #[tokio::test]
    async fn bad_handoff_payload_adds_nothing() {
        let session = Session::default();
        assert!(session.add_exercises_from_json("{oops").await.is_empty());
        assert!(session.state().await.is_empty());

        let mods = session
            .add_exercises_from_json(r#"[{"name":"Leg Press","muscle":"Legs"},{"name":"Leg Press","muscle":"Legs"}]"#)
            .await;
        assert_eq!(mods.len(), 1);
        assert_eq!(session.state().await.exercises().len(), 1);
    }

    #[tokio::test]
    async fn discard_flow_requires_confirmation() {
        let session = Session::default();
        assert!(session.request_discard().await.is_err());

        session.add_exercises(vec![leg_press()]).await;
        session.tick().await;
        assert!(session.confirm_discard().await.is_err());

        assert_eq!(session.request_discard().await.unwrap(), DiscardState::Confirming);
        assert_eq!(session.cancel_discard().await.unwrap(), DiscardState::Idle);
        assert_eq!(session.state().await.exercises().len(), 1);

        session.request_discard().await.unwrap();
        let mods = session.confirm_discard().await.unwrap();
        assert_eq!(mods[0].modification_type, ModificationType::WorkoutDiscarded);
        assert_eq!(session.discard_state().await, DiscardState::Discarded);

        let state = session.state().await;
        assert!(state.is_empty());
        assert_eq!(state.timer().elapsed(), 0);
        assert_eq!(state.total_sets(), 0);
        assert_eq!(state.total_volume(), 0.0);
        drop(state);
        assert!(!session.status().in_progress);
    }

    #[tokio::test]
    async fn new_workout_after_discard_gets_fresh_flow() {
        let session = Session::default();
        session.add_exercises(vec![leg_press()]).await;
        session.request_discard().await.unwrap();
        session.confirm_discard().await.unwrap();

        session.add_exercises(vec![leg_press()]).await;
        assert_eq!(session.discard_state().await, DiscardState::Idle);
        assert!(session.request_discard().await.is_ok());
    }
}
