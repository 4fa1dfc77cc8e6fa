use crate::config::SessionConfig;
use crate::discard::DiscardState;
use crate::models::{BaseExercise, SetField};
use crate::modifications::Modification;
use crate::session::Session;
use crate::status::WorkoutStatus;
use crate::uniffi_interface::errors::FormaError;
use crate::uniffi_interface::objects::WorkoutSnapshot;
use log::*;
use std::sync::Arc;

#[uniffi::export]
pub fn create_session() -> std::result::Result<Arc<Session>, FormaError> {
    let config = SessionConfig::from_env()?;
    debug!("Creating session with {:?}", config);
    Ok(Arc::new(Session::new(config)))
}

/// Start the duration ticker on the shared runtime.
#[uniffi::export]
pub fn start_workout_timer(session: Arc<Session>) {
    let rt = crate::runtime::global_runtime();
    let _guard = rt.enter();
    session.start_ticker();
}

#[uniffi::export]
pub fn stop_workout_timer(session: &Session) -> bool {
    session.stop_ticker()
}

#[uniffi::export]
pub async fn toggle_timer(session: Arc<Session>) -> bool {
    session.toggle_timer().await
}

#[uniffi::export]
pub async fn add_exercise(session: Arc<Session>, name: String, muscle: String) -> Vec<Modification> {
    session
        .add_exercises(vec![BaseExercise::new(name, muscle)])
        .await
}

#[uniffi::export]
pub async fn add_exercises_from_json(session: Arc<Session>, payload: String) -> Vec<Modification> {
    debug!("Adding exercises from handoff: {}", payload);
    session.add_exercises_from_json(&payload).await
}

#[uniffi::export]
pub async fn set_weight(
    session: Arc<Session>,
    exercise_name: String,
    set_id: String,
    value: String,
) -> Vec<Modification> {
    session.set_weight(&exercise_name, &set_id, &value).await
}

#[uniffi::export]
pub async fn set_reps(
    session: Arc<Session>,
    exercise_name: String,
    set_id: String,
    value: String,
) -> Vec<Modification> {
    session.set_reps(&exercise_name, &set_id, &value).await
}

#[uniffi::export]
pub async fn set_completed(
    session: Arc<Session>,
    exercise_name: String,
    set_id: String,
    completed: bool,
) -> Vec<Modification> {
    session
        .set_field(&exercise_name, &set_id, SetField::Completed(completed))
        .await
}

#[uniffi::export]
pub async fn add_set(session: Arc<Session>, exercise_name: String) -> Vec<Modification> {
    session.add_set(&exercise_name).await
}

#[uniffi::export]
pub async fn remove_set(session: Arc<Session>, exercise_name: String, set_id: String) -> Vec<Modification> {
    session.remove_set(&exercise_name, &set_id).await
}

#[uniffi::export]
pub async fn set_exercise_comment(
    session: Arc<Session>,
    exercise_name: String,
    comment: String,
) -> Vec<Modification> {
    session.set_comment(&exercise_name, &comment).await
}

#[uniffi::export]
pub async fn rename_workout(session: Arc<Session>, name: String) -> Vec<Modification> {
    session.rename(&name).await
}

#[uniffi::export]
pub async fn request_discard(session: Arc<Session>) -> std::result::Result<DiscardState, FormaError> {
    Ok(session.request_discard().await?)
}

#[uniffi::export]
pub async fn cancel_discard(session: Arc<Session>) -> std::result::Result<DiscardState, FormaError> {
    Ok(session.cancel_discard().await?)
}

#[uniffi::export]
pub async fn confirm_discard(
    session: Arc<Session>,
) -> std::result::Result<Vec<Modification>, FormaError> {
    Ok(session.confirm_discard().await?)
}

#[uniffi::export]
pub fn get_workout_status(session: &Session) -> WorkoutStatus {
    session.status()
}

#[uniffi::export]
pub async fn get_workout_snapshot(session: Arc<Session>) -> WorkoutSnapshot {
    session.snapshot().await.into()
}

/// Implemented by navigation chrome that shows the resume/discard affordance.
#[uniffi::export(with_foreign)]
pub trait WorkoutStatusListener: Send + Sync {
    fn on_status_changed(&self, status: WorkoutStatus);
}

/// Push every status change to `listener` until the session is dropped.
#[uniffi::export]
pub fn watch_workout_status(session: &Session, listener: Arc<dyn WorkoutStatusListener>) {
    let mut subscriber = session.subscribe_status();
    listener.on_status_changed(subscriber.current());
    crate::runtime::global_runtime().spawn(async move {
        while let Some(status) = subscriber.changed().await {
            listener.on_status_changed(status);
        }
        debug!("Status publisher gone, listener detached");
    });
}
