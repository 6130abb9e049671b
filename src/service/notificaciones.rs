//! Per-agreement notification preferences.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{ConvenioId, NotificacionPrefs, NotificationChannel};
use crate::error::{Result, ValidationError};
use crate::store::RecordStore;

/// Manages `notificaciones_config` rows and email registration.
pub struct Notificaciones {
    store: Arc<dyn RecordStore>,
}

impl Notificaciones {
    /// Create a preferences service backed by `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Effective preferences for one agreement.
    ///
    /// An agreement with no stored row gets the default (both channels off);
    /// no row is created by reading.
    pub async fn prefs_for(&self, convenio_id: &ConvenioId) -> Result<NotificacionPrefs> {
        let row = self.store.notificacion_config(convenio_id).await?;
        Ok(row.map(|r| r.prefs()).unwrap_or_default())
    }

    /// Effective preferences for a set of agreements, defaults included for
    /// ids without a stored row.
    pub async fn prefs_for_all(
        &self,
        convenio_ids: &[ConvenioId],
    ) -> Result<HashMap<ConvenioId, NotificacionPrefs>> {
        let mut prefs: HashMap<ConvenioId, NotificacionPrefs> = convenio_ids
            .iter()
            .map(|id| (id.clone(), NotificacionPrefs::default()))
            .collect();
        if convenio_ids.is_empty() {
            return Ok(prefs);
        }
        for row in self.store.notificacion_configs(convenio_ids).await? {
            prefs.insert(row.convenio_id.clone(), row.prefs());
        }
        Ok(prefs)
    }

    /// Flip one channel for one agreement and return the resulting
    /// preferences.
    ///
    /// An existing row is updated in place; a missing row is inserted with
    /// the toggled channel set and the other defaulted off. Either way the
    /// returned state reflects the store only after the write succeeded.
    pub async fn toggle(
        &self,
        convenio_id: &ConvenioId,
        channel: NotificationChannel,
    ) -> Result<NotificacionPrefs> {
        match self.store.notificacion_config(convenio_id).await? {
            Some(row) => {
                let enabled = !row.channel(channel);
                self.store
                    .set_notificacion_channel(&row.id, channel, enabled)
                    .await?;
                let mut prefs = row.prefs();
                match channel {
                    NotificationChannel::Push => prefs.push = enabled,
                    NotificationChannel::Email => prefs.email = enabled,
                }
                debug!(convenio_id = %convenio_id, channel = channel.column(), enabled, "notification channel updated");
                Ok(prefs)
            }
            None => {
                let row = self
                    .store
                    .insert_notificacion_config(convenio_id, channel, true)
                    .await?;
                debug!(convenio_id = %convenio_id, channel = channel.column(), "notification config created");
                Ok(row.prefs())
            }
        }
    }

    /// Register an email address for notification delivery.
    ///
    /// The address shape is validated before any remote call; malformed
    /// input fails with [`ValidationError`] and writes nothing.
    pub async fn register_email(&self, email: &str) -> Result<()> {
        validate_email(email)?;
        self.store.register_notification_email(email).await?;
        debug!("notification email registered");
        Ok(())
    }

    /// Opaque global notification settings row, if present.
    pub async fn global_settings(&self) -> Result<Option<serde_json::Value>> {
        Ok(self.store.global_notification_settings().await?)
    }

    /// Write the opaque global notification settings row.
    pub async fn update_global_settings(&self, settings: &serde_json::Value) -> Result<()> {
        Ok(self
            .store
            .update_global_notification_settings(settings)
            .await?)
    }
}

/// Shape check for notification email addresses.
///
/// Deliberately shallow: one `@`, a non-empty local part, and a domain with
/// a dot. Deliverability is the mail provider's problem.
fn validate_email(input: &str) -> std::result::Result<(), ValidationError> {
    let invalid = |reason: &'static str| ValidationError::InvalidEmail {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty address"));
    }
    let (local, domain) = trimmed
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;
    if local.is_empty() {
        return Err(invalid("empty local part"));
    }
    if domain.contains('@') {
        return Err(invalid("more than one '@'"));
    }
    if domain.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.')
    {
        return Err(invalid("malformed domain"));
    }
    if trimmed.contains(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    Ok(())
}
