//! Workout-in-progress status shared with everything outside the tracking
//! screen. One publisher (the session), any number of subscribers.

use log::debug;
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct WorkoutStatus {
    pub in_progress: bool,
    pub display_name: Option<String>,
}

impl WorkoutStatus {
    pub fn idle() -> Self {
        WorkoutStatus::default()
    }

    pub fn active(display_name: &str) -> Self {
        WorkoutStatus {
            in_progress: true,
            display_name: Some(display_name.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct StatusPublisher {
    tx: watch::Sender<WorkoutStatus>,
}

impl StatusPublisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(WorkoutStatus::idle());
        StatusPublisher { tx }
    }

    /// Store the new status, notifying subscribers only when it differs.
    pub fn publish(&self, status: WorkoutStatus) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            debug!("Workout status changed: {:?} -> {:?}", current, status);
            *current = status;
            true
        })
    }

    pub fn current(&self) -> WorkoutStatus {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> StatusSubscriber {
        StatusSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct StatusSubscriber {
    rx: watch::Receiver<WorkoutStatus>,
}

impl StatusSubscriber {
    pub fn current(&self) -> WorkoutStatus {
        self.rx.borrow().clone()
    }

    /// Wait for the next change. Returns `None` once the publisher is gone.
    pub async fn changed(&mut self) -> Option<WorkoutStatus> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_ignores_repeats() {
        let publisher = StatusPublisher::new();
        assert!(!publisher.publish(WorkoutStatus::idle()));
        assert!(publisher.publish(WorkoutStatus::active("Push Day")));
        assert!(!publisher.publish(WorkoutStatus::active("Push Day")));
        assert!(publisher.publish(WorkoutStatus::active("Pull Day")));
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let publisher = StatusPublisher::new();
        let mut first = publisher.subscribe();
        let second = publisher.subscribe();

        publisher.publish(WorkoutStatus::active("Leg Day"));
        let seen = first.changed().await.unwrap();
        assert!(seen.in_progress);
        assert_eq!(seen.display_name.as_deref(), Some("Leg Day"));
        assert_eq!(second.current(), seen);
    }

    #[tokio::test]
    async fn changed_ends_when_publisher_drops() {
        let publisher = StatusPublisher::new();
        let mut sub = publisher.subscribe();
        drop(publisher);
        assert!(sub.changed().await.is_none());
    }
}
