//! Capabilities provided by the chat client that hosts the scheduler:
//! feedback signals and yes/no confirmation before destructive actions.

use async_trait::async_trait;

/// Outcome signals. Failures are reported by the caller, not as a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
}

/// Implementations must be best-effort: a failed signal is never an error
/// for the operation that triggered it.
#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn notify(&self, kind: NotificationKind);

    /// Returns true when the operator approved the action.
    async fn confirm(&self, message: &str) -> bool;

    async fn selection_changed(&self);
}

/// Bridge for environments without a host client (tests, background jobs).
#[derive(Debug, Clone, Copy)]
pub struct NoopBridge {
    approve: bool,
}

impl NoopBridge {
    pub fn approving() -> Self {
        Self { approve: true }
    }

    pub fn declining() -> Self {
        Self { approve: false }
    }
}

impl Default for NoopBridge {
    fn default() -> Self {
        Self::approving()
    }
}

#[async_trait]
impl HostBridge for NoopBridge {
    async fn notify(&self, _kind: NotificationKind) {}

    async fn confirm(&self, message: &str) -> bool {
        tracing::debug!("Auto-answering confirmation '{}' with {}", message, self.approve);
        self.approve
    }

    async fn selection_changed(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_bridge_answers_confirmations() {
        assert!(tokio_test::block_on(NoopBridge::default().confirm("Delete?")));
        assert!(!tokio_test::block_on(NoopBridge::declining().confirm("Delete?")));
    }

    #[test]
    fn test_notification_kinds_are_success_and_warning() {
        let names: Vec<&str> = [NotificationKind::Success, NotificationKind::Warning]
            .iter()
            .map(|kind| match kind {
                NotificationKind::Success => "success",
                NotificationKind::Warning => "warning",
            })
            .collect();
        assert_eq!(names, vec!["success", "warning"]);
    }
}
