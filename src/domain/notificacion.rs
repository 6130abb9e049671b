//! Notification preference records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ConvenioId;

/// Delivery channel for agreement notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationChannel {
    Push,
    Email,
}

impl NotificationChannel {
    /// Column name backing this channel in `notificaciones_config`.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Push => "push_notifications",
            Self::Email => "email_notifications",
        }
    }
}

/// A stored per-agreement notification configuration row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificacionConfig {
    pub id: String,
    pub convenio_id: ConvenioId,
    pub push_notifications: bool,
    pub email_notifications: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

impl NotificacionConfig {
    /// Read one channel's flag.
    pub fn channel(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::Push => self.push_notifications,
            NotificationChannel::Email => self.email_notifications,
        }
    }

    /// The effective preferences carried by this row.
    pub fn prefs(&self) -> NotificacionPrefs {
        NotificacionPrefs {
            push: self.push_notifications,
            email: self.email_notifications,
        }
    }
}

/// Effective notification preferences for one agreement.
///
/// An agreement with no stored row has both channels off; defaults never
/// invent a stored row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificacionPrefs {
    pub push: bool,
    pub email: bool,
}

impl NotificacionPrefs {
    /// Read one channel's flag.
    pub fn channel(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::Push => self.push,
            NotificationChannel::Email => self.email,
        }
    }
}
