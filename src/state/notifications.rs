// src/state/notifications.rs
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

/// Banner stack, newest first. Nothing is merged or suppressed.
#[derive(Debug, Default)]
pub struct Notifications {
    stack: VecDeque<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.notify_at(message, kind, Instant::now())
    }

    pub fn notify_at(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) -> u64 {
        let message = message.into();
        match kind {
            NotificationKind::Error => tracing::warn!("Notification: {}", message),
            _ => tracing::info!("Notification: {}", message),
        }

        let id = self.next_id;
        self.next_id += 1;
        self.stack.push_front(Notification {
            id,
            message,
            kind,
            expires_at: now + AUTO_DISMISS_AFTER,
        });
        id
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Error)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Success)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Info)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.stack.retain(|n| n.id != id);
    }

    /// Drops expired banners and returns when the next one is due, so the
    /// caller can schedule a repaint.
    pub fn expire(&mut self, now: Instant) -> Option<Instant> {
        self.stack.retain(|n| n.expires_at > now);
        self.stack.iter().map(|n| n.expires_at).min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.stack.iter()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    #[cfg(test)]
    pub fn messages(&self) -> Vec<String> {
        self.stack.iter().map(|n| n.message.clone()).collect()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notification> {
        self.stack.front()
    }
}
