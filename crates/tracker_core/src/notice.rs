use std::fmt;
use std::time::Duration;

use tracker_logging::tracker_debug;

use crate::Effect;

/// How long a notification stays attached unless dismissed or replaced.
pub const ALERT_LIFETIME: Duration = Duration::from_millis(5_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one inserted notification so a late expiry cannot remove its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertToken(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub token: AlertToken,
    pub message: String,
    pub severity: Severity,
}

/// Single-occupancy notification region.
///
/// Showing a notification evicts the current one (cancelling its expiry)
/// before inserting. Without a host container nothing is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationSlot {
    host_present: bool,
    current: Option<Notification>,
    issued: u64,
}

impl NotificationSlot {
    pub fn new(host_present: bool) -> Self {
        Self {
            host_present,
            ..Self::default()
        }
    }

    /// Empty slot for a freshly loaded page. Token numbering continues so an
    /// expiry left over from the previous page never matches a new notification.
    pub fn for_new_page(&self, host_present: bool) -> Self {
        Self {
            host_present,
            current: None,
            issued: self.issued,
        }
    }

    pub fn host_present(&self) -> bool {
        self.host_present
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if let Some(evicted) = self.current.take() {
            effects.push(Effect::CancelAlertExpiry {
                token: evicted.token,
            });
        }

        let message = message.into();
        if !self.host_present {
            tracker_debug!("No notification host; dropping {} alert: {}", severity, message);
            return effects;
        }

        self.issued += 1;
        let token = AlertToken(self.issued);
        self.current = Some(Notification {
            token,
            message,
            severity,
        });
        effects.push(Effect::ScheduleAlertExpiry {
            token,
            after: ALERT_LIFETIME,
        });
        effects
    }

    /// Manual dismissal. Returns the cancellation for the pending expiry, if any.
    pub fn dismiss(&mut self) -> Vec<Effect> {
        match self.current.take() {
            Some(dismissed) => vec![Effect::CancelAlertExpiry {
                token: dismissed.token,
            }],
            None => Vec::new(),
        }
    }

    /// Expiry timer fired. Only removes the notification the timer was set for.
    pub fn expire(&mut self, token: AlertToken) -> bool {
        match &self.current {
            Some(current) if current.token == token => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
