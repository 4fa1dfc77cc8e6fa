pub mod errors;
pub mod logging;
pub mod objects;
pub mod onboarding;
pub mod search;
pub mod session;

use crate::handoff;
use crate::models::BaseExercise;
use crate::uniffi_interface::errors::FormaError;

/// Encode the exercises picked in the search view for the tracking screen.
#[uniffi::export]
fn encode_exercise_handoff(
    names: Vec<String>,
    muscles: Vec<String>,
) -> std::result::Result<String, FormaError> {
    if names.len() != muscles.len() {
        return Err(FormaError::from("names and muscles must have the same length"));
    }
    let exercises: Vec<BaseExercise> = names
        .into_iter()
        .zip(muscles)
        .map(|(name, muscle)| BaseExercise::new(name, muscle))
        .collect();
    Ok(handoff::encode(&exercises)?)
}

#[uniffi::export]
fn format_workout_duration(total_seconds: u64) -> String {
    crate::session::format_duration(total_seconds)
}
