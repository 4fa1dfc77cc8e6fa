//! Confirmation step in front of discarding a workout.

use anyhow::{Result, bail};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum DiscardState {
    #[default]
    Idle,
    Confirming,
    Discarded,
}

#[derive(Debug, Default)]
pub struct DiscardFlow {
    state: DiscardState,
}

impl DiscardFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DiscardState {
        self.state
    }

    /// Ask for confirmation. Asking twice keeps the prompt open.
    pub fn request(&mut self) -> Result<DiscardState> {
        match self.state {
            DiscardState::Idle | DiscardState::Confirming => {
                self.state = DiscardState::Confirming;
                debug!("Discard requested, awaiting confirmation");
                Ok(self.state)
            }
            DiscardState::Discarded => bail!("Workout already discarded"),
        }
    }

    pub fn cancel(&mut self) -> Result<DiscardState> {
        match self.state {
            DiscardState::Confirming => {
                self.state = DiscardState::Idle;
                debug!("Discard cancelled");
                Ok(self.state)
            }
            other => bail!("No discard pending (state: {:?})", other),
        }
    }

    pub fn confirm(&mut self) -> Result<DiscardState> {
        match self.state {
            DiscardState::Confirming => {
                self.state = DiscardState::Discarded;
                debug!("Discard confirmed");
                Ok(self.state)
            }
            other => bail!("Discard must be requested before confirming (state: {:?})", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_cancel_returns_to_idle() {
        let mut flow = DiscardFlow::new();
        assert_eq!(flow.request().unwrap(), DiscardState::Confirming);
        assert_eq!(flow.request().unwrap(), DiscardState::Confirming);
        assert_eq!(flow.cancel().unwrap(), DiscardState::Idle);
    }

    #[test]
    fn confirm_is_terminal() {
        let mut flow = DiscardFlow::new();
        flow.request().unwrap();
        assert_eq!(flow.confirm().unwrap(), DiscardState::Discarded);
        assert!(flow.request().is_err());
        assert!(flow.cancel().is_err());
        assert!(flow.confirm().is_err());
        assert_eq!(flow.state(), DiscardState::Discarded);
    }

    #[test]
    fn confirm_without_request_is_rejected() {
        let mut flow = DiscardFlow::new();
        assert!(flow.confirm().is_err());
        assert!(flow.cancel().is_err());
        assert_eq!(flow.state(), DiscardState::Idle);
    }
}
