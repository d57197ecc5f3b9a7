// ============================================================================
// src/notify/mod.rs - Fire-and-forget user notifications
// ============================================================================
//
// The session reports load completion, filter changes, quick-filter actions
// and exports through a `Notifier`. `ToastLog` keeps them in memory until
// their display duration runs out; `NullNotifier` drops them.
//
// ============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl Toast {
    pub fn new(
        kind: NotificationKind,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at,
            duration,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        match chrono::Duration::from_std(self.duration) {
            Ok(d) => self.created_at + d,
            Err(_) => DateTime::<Utc>::MAX_UTC,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

/// Receiver of dashboard notifications
pub trait Notifier: Send {
    fn notify(&mut self, toast: Toast);

    /// Notifications still on screen, oldest first
    fn active(&self) -> &[Toast] {
        &[]
    }

    /// Drop notifications whose duration has elapsed
    fn prune_expired(&mut self, _now: DateTime<Utc>) {}
}

#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, toast: Toast) {
        tracing::trace!(kind = %toast.kind, message = %toast.message, "notification dropped");
    }
}

/// In-memory toast stack
#[derive(Debug, Default)]
pub struct ToastLog {
    toasts: Vec<Toast>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Remove one notification early, as when the user dismisses it.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }
}

impl Notifier for ToastLog {
    fn notify(&mut self, toast: Toast) {
        match toast.kind {
            NotificationKind::Error => tracing::warn!(message = %toast.message, "notification"),
            _ => tracing::info!(kind = %toast.kind, message = %toast.message, "notification"),
        }
        self.toasts.push(toast);
    }

    fn active(&self) -> &[Toast] {
        &self.toasts
    }

    fn prune_expired(&mut self, now: DateTime<Utc>) {
        self.toasts.retain(|t| !t.is_expired(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, seconds).unwrap()
    }

    #[test]
    fn test_toast_log_keeps_order_and_prunes() {
        let mut log = ToastLog::new();
        log.notify(Toast::new(NotificationKind::Success, "loaded", at(0), DEFAULT_TOAST_DURATION));
        log.notify(Toast::new(NotificationKind::Info, "filtered", at(2), DEFAULT_TOAST_DURATION));

        let messages: Vec<&str> = log.active().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, ["loaded", "filtered"]);

        log.prune_expired(at(3));
        assert_eq!(log.len(), 1);
        assert_eq!(log.active()[0].message, "filtered");

        log.prune_expired(at(5));
        assert!(log.is_empty());
    }

    #[test]
    fn test_unique_ids_and_dismiss() {
        let mut log = ToastLog::new();
        let a = Toast::new(NotificationKind::Warning, "a", at(0), DEFAULT_TOAST_DURATION);
        let b = Toast::new(NotificationKind::Warning, "b", at(0), DEFAULT_TOAST_DURATION);
        assert_ne!(a.id, b.id);

        let id = a.id;
        log.notify(a);
        log.notify(b);
        assert!(log.dismiss(id));
        assert!(!log.dismiss(id));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_null_notifier_keeps_nothing() {
        let mut notifier = NullNotifier;
        notifier.notify(Toast::new(NotificationKind::Error, "x", at(0), DEFAULT_TOAST_DURATION));
        assert!(notifier.active().is_empty());
    }

    #[test]
    fn test_serializes_duration_as_millis() {
        let toast = Toast::new(NotificationKind::Info, "hi", at(0), DEFAULT_TOAST_DURATION);
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["duration"], 3000);
        assert_eq!(json["kind"], "info");
    }
}
