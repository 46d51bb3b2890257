//! Notification center for board events
//!
//! Collects notifications emitted by the board controller so the
//! presentation layer can render them, with the unread tracking and
//! kind-based filtering the notification panel expects.

use shared::models::Notification;
use shared::types::NotificationKind;
use uuid::Uuid;

use super::board::BoardObserver;

/// In-memory store of emitted notifications, newest first
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification at the front of the feed
    pub fn push(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
    }

    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Mark one notification read; returns false if the ID is unknown
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    pub fn of_kind(&self, kind: NotificationKind) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| n.kind == kind).collect()
    }
}

impl BoardObserver for NotificationCenter {
    fn on_notify(&mut self, title: &str, message: &str, kind: NotificationKind) {
        self.push(Notification::new(title, message, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_unread_count() {
        let mut center = NotificationCenter::new();
        center.on_notify("Order Approved", "Order ORD-1001 approved", NotificationKind::Success);
        center.on_notify("Move Blocked", "destination at capacity", NotificationKind::Error);

        assert_eq!(center.all().len(), 2);
        assert_eq!(center.latest().unwrap().title, "Move Blocked");
        assert_eq!(center.unread_count(), 2);
    }

    #[test]
    fn test_mark_read() {
        let mut center = NotificationCenter::new();
        center.on_notify("Route Started", "Truck departed", NotificationKind::Success);
        let id = center.latest().unwrap().id;

        assert!(center.mark_read(id));
        assert_eq!(center.unread_count(), 0);
        assert!(!center.mark_read(Uuid::new_v4()));
    }

    #[test]
    fn test_filter_by_kind() {
        let mut center = NotificationCenter::new();
        center.on_notify("Container Moved", "KEG-1 moved", NotificationKind::Success);
        center.on_notify("Move Warning", "not yet delivered", NotificationKind::Warning);
        center.on_notify("Container Moved", "KEG-2 moved", NotificationKind::Success);

        assert_eq!(center.of_kind(NotificationKind::Success).len(), 2);
        assert_eq!(center.of_kind(NotificationKind::Error).len(), 0);
        center.mark_all_read();
        assert_eq!(center.unread_count(), 0);
    }
}
