//! Workout duration counter and the background task that drives it.

use crate::session::Session;
use log::debug;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationTimer {
    elapsed: u64,
    running: bool,
}

impl DurationTimer {
    pub fn new(running: bool) -> Self {
        DurationTimer {
            elapsed: 0,
            running,
        }
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by one tick. Returns whether the counter moved.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed += 1;
        }
        self.running
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Back to zero. The running flag is left as configured by the caller.
    pub fn reset(&mut self, running: bool) {
        self.elapsed = 0;
        self.running = running;
    }
}

/// Handle to the ticking task. Dropping it stops the task.
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn onto the current tokio runtime. The task only holds a weak
    /// reference and exits on its own once the session is gone.
    pub fn spawn(session: &Arc<Session>, period: Duration) -> Self {
        let weak: Weak<Session> = Arc::downgrade(session);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(session) = weak.upgrade() else {
                    debug!("Session dropped, ticker exiting");
                    break;
                };
                session.tick().await;
            }
        });
        Ticker { handle }
    }

    pub fn stop(self) {
        drop(self);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_running() {
        let mut timer = DurationTimer::new(true);
        assert!(timer.tick());
        assert!(timer.tick());
        timer.pause();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed(), 2);
        timer.resume();
        timer.tick();
        assert_eq!(timer.elapsed(), 3);
    }

    #[test]
    fn toggle_flips_and_reset_zeroes() {
        let mut timer = DurationTimer::new(false);
        assert!(timer.toggle());
        timer.tick();
        assert!(!timer.toggle());
        timer.reset(true);
        assert_eq!(timer.elapsed(), 0);
        assert!(timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_drives_session_until_dropped() {
        let session = Arc::new(Session::default());
        let ticker = Ticker::spawn(&session, Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(session.snapshot().await.elapsed_seconds, 3);

        session.pause_timer().await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(session.snapshot().await.elapsed_seconds, 3);

        session.resume_timer().await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(session.snapshot().await.elapsed_seconds, 4);

        drop(ticker);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.snapshot().await.elapsed_seconds, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_exits_when_session_is_gone() {
        let session = Arc::new(Session::default());
        let ticker = Ticker::spawn(&session, Duration::from_secs(1));
        drop(session);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn session_owns_its_ticker() {
        let session = Arc::new(Session::default());
        session.start_ticker();
        assert!(session.is_ticking());
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(session.stop_ticker());
        assert!(!session.stop_ticker());
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(session.snapshot().await.elapsed_seconds, 2);
    }
}
