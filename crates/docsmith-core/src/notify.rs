//! Transient notifications shown in the status bar.

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    /// A TTL too large for chrono never expires.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl_seconds: u64) -> bool {
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds);
        match ttl {
            Some(ttl) => now - self.created_at >= ttl,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_follows_ttl() {
        let toast = Toast::success("done");
        assert!(!toast.is_expired(toast.created_at, 3));
        assert!(!toast.is_expired(toast.created_at + TimeDelta::seconds(2), 3));
        assert!(toast.is_expired(toast.created_at + TimeDelta::seconds(3), 3));
    }

    #[test]
    fn huge_ttl_never_expires() {
        let toast = Toast::info("sticky");
        let later = toast.created_at + TimeDelta::days(365);
        assert!(!toast.is_expired(later, 10_000_000_000_000_000));
        assert!(!toast.is_expired(later, u64::MAX));
    }
}
