//! Session module for tracking the workout in progress.
//!
//! [`WorkoutState`] holds the exercises, sets and duration counter of one
//! workout and implements every mutation synchronously. [`Session`] wraps it
//! for shared use: it serializes mutations, keeps the shared workout status
//! up to date, owns the discard confirmation flow and drives the ticker.

mod commands;
mod session;
mod sets;
mod state;
mod summary;
mod workout;

pub use commands::{Command, SetRef};
pub use session::Session;
pub use state::WorkoutState;
pub use summary::{WorkoutSnapshot, format_duration, format_volume};
