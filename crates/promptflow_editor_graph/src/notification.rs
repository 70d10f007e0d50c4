// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transient, auto-dismissing user notifications.
//!
//! At most one notification is displayed at a time. Showing a notification
//! schedules its dismissal; the owner drives time forward by calling
//! [`Notifier::expire`] with the current instant.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default time a notification stays visible
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Action completed
    #[default]
    Success,
    /// Action refused
    Error,
}

/// Identifies one `show` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationToken(u64);

/// A message displayed to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text shown
    pub message: String,
    /// Severity
    pub kind: NotificationKind,
    /// Token of the `show` call that produced it
    pub token: NotificationToken,
}

/// Which notification a due dismissal clears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissPolicy {
    /// Only the notification the timer was scheduled for
    #[default]
    Latest,
    /// Whatever is displayed when any timer fires, so an older timer may
    /// cut a newer notification short
    Any,
}

/// Holder of the current notification and its pending dismissals
#[derive(Debug)]
pub struct Notifier {
    current: Option<Notification>,
    pending: VecDeque<(Instant, NotificationToken)>,
    next_token: u64,
    timeout: Duration,
    policy: DismissPolicy,
}

impl Notifier {
    /// Create a notifier
    pub fn new(timeout: Duration, policy: DismissPolicy) -> Self {
        Self {
            current: None,
            pending: VecDeque::new(),
            next_token: 0,
            timeout,
            policy,
        }
    }

    /// Display a notification, replacing the current one
    pub fn show(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) -> NotificationToken {
        self.next_token += 1;
        let token = NotificationToken(self.next_token);
        let notification = Notification {
            message: message.into(),
            kind,
            token,
        };

        match kind {
            NotificationKind::Success => tracing::info!("{}", notification.message),
            NotificationKind::Error => tracing::warn!("{}", notification.message),
        }

        self.current = Some(notification);
        let deadline = now + self.timeout;
        let at = self.pending.partition_point(|(due, _)| *due <= deadline);
        self.pending.insert(at, (deadline, token));
        token
    }

    /// Apply every dismissal due at `now`
    pub fn expire(&mut self, now: Instant) {
        while let Some(&(deadline, token)) = self.pending.front() {
            if deadline > now {
                break;
            }
            self.pending.pop_front();

            let clears = match (&self.current, self.policy) {
                (None, _) => false,
                (Some(_), DismissPolicy::Any) => true,
                (Some(current), DismissPolicy::Latest) => current.token == token,
            };
            if clears {
                tracing::debug!("Dismissed notification {:?}", token);
                self.current = None;
            }
        }
    }

    /// The notification currently displayed
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Number of dismissals not yet applied
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DismissPolicy::default())
    }
}
