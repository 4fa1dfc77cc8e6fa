use crate::config::SessionConfig;
use crate::discard::{DiscardFlow, DiscardState};
use crate::modifications::Modification;
use crate::session::WorkoutState;
use crate::status::{StatusPublisher, StatusSubscriber, WorkoutStatus};
use crate::timer::Ticker;
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

#[cfg_attr(feature = "uniffi", derive(uniffi::Object))]
pub struct Session {
    pub(crate) state: Mutex<WorkoutState>,
    pub(crate) discard: Mutex<DiscardFlow>,
    pub(crate) status: StatusPublisher,
    pub(crate) config: SessionConfig,
    ticker: std::sync::Mutex<Option<Ticker>>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: Mutex::new(WorkoutState::new(&config)),
            discard: Mutex::new(DiscardFlow::new()),
            status: StatusPublisher::new(),
            config,
            ticker: std::sync::Mutex::new(None),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn subscribe_status(&self) -> StatusSubscriber {
        self.status.subscribe()
    }

    pub fn status(&self) -> WorkoutStatus {
        self.status.current()
    }

    pub async fn discard_state(&self) -> DiscardState {
        self.discard.lock().await.state()
    }

    /// Copy of the current state. Mutations go through the session.
    pub async fn state(&self) -> WorkoutState {
        self.state.lock().await.clone()
    }

    /// Run one mutation against the state and republish the status.
    pub(crate) async fn mutate<F>(&self, f: F) -> Vec<Modification>
    where
        F: FnOnce(&mut WorkoutState) -> Vec<Modification>,
    {
        let mut state = self.state.lock().await;
        let was_empty = state.is_empty();
        let modifications = f(&mut state);

        if was_empty && !state.is_empty() {
            debug!("Workout started: {}", state.name());
            *self.discard.lock().await = DiscardFlow::new();
        }
        self.status.publish(state.status());
        modifications
    }

    /// Start ticking the duration counter on the current tokio runtime.
    /// Replaces any ticker already running.
    pub fn start_ticker(self: &Arc<Self>) {
        let ticker = Ticker::spawn(self, self.config.tick_interval);
        let mut slot = self.ticker.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(ticker);
        debug!("Ticker started every {:?}", self.config.tick_interval);
    }

    pub fn stop_ticker(&self) -> bool {
        let mut slot = self.ticker.lock().unwrap_or_else(|e| e.into_inner());
        match slot.take() {
            Some(ticker) => {
                ticker.stop();
                debug!("Ticker stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_ticking(&self) -> bool {
        let slot = self.ticker.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
