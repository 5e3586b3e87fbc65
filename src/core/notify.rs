use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::domain::model::{Notification, NotificationKind};

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Queue of transient notifications. Each one is visible for `ttl` after it
/// is raised and then dismissed on the next read.
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    queue: VecDeque<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            queue: VecDeque::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.raise_at(NotificationKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.raise_at(NotificationKind::Error, message, Instant::now());
    }

    pub fn raise_at(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match kind {
            NotificationKind::Success => tracing::info!("✅ {}", message),
            NotificationKind::Error => tracing::warn!("❌ {}", message),
        }
        self.queue.push_back(Notification {
            kind,
            message,
            raised_at: now,
        });
    }

    /// Dismisses expired notifications and returns the ones still showing.
    pub fn active(&mut self, now: Instant) -> Vec<Notification> {
        // raised_at is non-decreasing along the queue
        while let Some(front) = self.queue.front() {
            if now.saturating_duration_since(front.raised_at) >= self.ttl {
                self.queue.pop_front();
            } else {
                break;
            }
        }
        self.queue.iter().cloned().collect()
    }

    /// Removes and returns everything raised so far, expired or not.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.queue.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_dismiss_after_ttl() {
        let mut notifier = Notifier::default();
        let start = Instant::now();
        notifier.raise_at(NotificationKind::Success, "Grade added", start);
        notifier.raise_at(
            NotificationKind::Error,
            "Failed to save grade",
            start + Duration::from_secs(2),
        );

        assert_eq!(notifier.active(start + Duration::from_millis(2999)).len(), 2);

        let remaining = notifier.active(start + Duration::from_secs(3));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, NotificationKind::Error);

        assert!(notifier.active(start + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_drain_and_last() {
        let mut notifier = Notifier::new(Duration::from_millis(10));
        notifier.success("one");
        notifier.error("two");

        assert_eq!(notifier.last().unwrap().message, "two");
        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.last().is_none());
    }
}
