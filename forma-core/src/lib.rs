pub mod config;
pub mod discard;
pub mod handoff;
pub mod logging;
pub mod models;
pub mod modifications;
pub mod profile;
pub mod runtime;
pub mod session;
pub mod status;
pub mod timer;

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
#[cfg(feature = "uniffi")]
pub mod uniffi_interface;
