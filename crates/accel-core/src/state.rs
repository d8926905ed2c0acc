//! Shared cross-component state.

use std::sync::Arc;

use tokio::sync::watch;

/// Visibility of the hardware-mismatch notification.
///
/// Cloning yields another handle onto the same flag. Whatever detects a
/// mismatch calls [`raise`](Self::raise); validation calls
/// [`clear`](Self::clear); the UI observes through [`subscribe`](Self::subscribe).
#[derive(Debug, Clone)]
pub struct NotificationState {
    visible: Arc<watch::Sender<bool>>,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self::new(false)
    }
}

impl NotificationState {
    pub fn new(visible: bool) -> Self {
        let (sender, _) = watch::channel(visible);
        Self {
            visible: Arc::new(sender),
        }
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    /// Show the notification. Returns true if it was hidden before.
    pub fn raise(&self) -> bool {
        self.set(true)
    }

    /// Hide the notification. Returns true if it was visible before.
    pub fn clear(&self) -> bool {
        self.set(false)
    }

    /// Receiver that wakes whenever visibility changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    fn set(&self, visible: bool) -> bool {
        self.visible.send_if_modified(|current| {
            if *current == visible {
                false
            } else {
                *current = visible;
                true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_and_clear_report_transitions() {
        let state = NotificationState::default();
        assert!(!state.is_visible());
        assert!(state.raise());
        assert!(!state.raise());
        assert!(state.is_visible());
        assert!(state.clear());
        assert!(!state.clear());
    }

    #[test]
    fn clones_share_the_flag() {
        let state = NotificationState::new(true);
        let other = state.clone();
        other.clear();
        assert!(!state.is_visible());
    }

    #[tokio::test]
    async fn subscribers_only_see_real_changes() {
        let state = NotificationState::new(true);
        let mut receiver = state.subscribe();

        state.raise();
        assert!(!receiver.has_changed().unwrap());

        state.clear();
        assert!(receiver.has_changed().unwrap());
        receiver.changed().await.unwrap();
        assert!(!*receiver.borrow_and_update());
    }
}
