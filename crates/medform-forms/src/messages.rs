//! One-time notifications (toasts) raised by the engine.
//!
//! The engine queues a success notification after a save or delete and an
//! error notification when submission is blocked by validation. The host
//! drains the queue and presents the messages however it likes. Messages are
//! consumed when read. Hosts queue other levels with [`Notifications::push`].

use serde::{Deserialize, Serialize};

/// The severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NotificationLevel {
    /// Informational message.
    Info = 20,
    /// Success notification (e.g., "Record created successfully").
    Success = 25,
    /// Warning that requires attention.
    Warning = 30,
    /// Error message indicating a failure.
    Error = 40,
}

impl NotificationLevel {
    /// Returns the tag used by hosts to pick a toast style.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A single notification with a level and text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The severity level.
    pub level: NotificationLevel,
    /// The message text.
    pub text: String,
}

impl Notification {
    /// Creates a new notification.
    pub fn new(level: NotificationLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Queue of pending notifications.
///
/// # Examples
///
/// ```
/// use medform_forms::messages::{Notifications, NotificationLevel};
///
/// let mut queue = Notifications::new();
/// queue.success("Record created successfully");
///
/// let drained = queue.drain();
/// assert_eq!(drained.len(), 1);
/// assert_eq!(drained[0].level, NotificationLevel::Success);
/// assert!(queue.drain().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification.
    pub fn push(&mut self, level: NotificationLevel, text: &str) {
        tracing::debug!(level = %level, text, "notification queued");
        self.pending.push(Notification::new(level, text));
    }

    /// Queues a success-level notification.
    pub fn success(&mut self, text: &str) {
        self.push(NotificationLevel::Success, text);
    }

    /// Queues an error-level notification.
    pub fn error(&mut self, text: &str) {
        self.push(NotificationLevel::Error, text);
    }

    /// Drains and returns all pending notifications.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Returns the pending notifications without consuming them.
    pub fn peek(&self) -> &[Notification] {
        &self.pending
    }

    /// Returns the number of pending notifications.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_tag_and_ordering() {
        assert_eq!(NotificationLevel::Success.tag(), "success");
        assert_eq!(NotificationLevel::Error.to_string(), "error");
        assert!(NotificationLevel::Info < NotificationLevel::Success);
        assert!(NotificationLevel::Warning < NotificationLevel::Error);
    }

    #[test]
    fn test_queue_order_and_drain() {
        let mut queue = Notifications::new();
        queue.push(NotificationLevel::Info, "Loading");
        queue.push(NotificationLevel::Warning, "Slot almost full");
        queue.error("Please correct the highlighted fields");
        assert_eq!(queue.len(), 3);

        let drained = queue.drain();
        assert_eq!(drained[0].level, NotificationLevel::Info);
        assert_eq!(drained[1].level, NotificationLevel::Warning);
        assert_eq!(drained[2].to_string(), "Please correct the highlighted fields");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_success_and_error_levels() {
        let mut queue = Notifications::new();
        queue.success("Saved");
        queue.error("Blocked");
        let levels: Vec<_> = queue.drain().into_iter().map(|note| note.level).collect();
        assert_eq!(levels, vec![NotificationLevel::Success, NotificationLevel::Error]);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut queue = Notifications::new();
        queue.success("Saved");
        assert_eq!(queue.peek().len(), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_notification_serialization() {
        let note = Notification::new(NotificationLevel::Success, "Saved!");
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("\"text\":\"Saved!\""));
        assert!(json.contains("\"level\":\"Success\""));
    }
}
