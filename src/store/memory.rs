//! In-memory store implementation for testing.
//!
//! Behaves like the remote store for the flows this crate drives, with
//! injectable failures so callers can exercise the no-optimistic-mutation
//! discipline.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{RecordStore, StoreResult};
use crate::domain::{
    Convenio, ConvenioId, NotificacionConfig, NotificationChannel, Publicacion, PublicacionId,
};
use crate::error::PersistenceError;

#[derive(Debug, Default)]
struct Inner {
    convenios: Vec<Convenio>,
    suscripciones: HashSet<ConvenioId>,
    publicaciones: Vec<Publicacion>,
    configs: Vec<NotificacionConfig>,
    emails: Vec<String>,
    global_settings: Option<serde_json::Value>,
}

/// In-memory store for testing purposes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with agreement records.
    pub fn with_convenios(convenios: Vec<Convenio>) -> Self {
        let store = Self::new();
        store.inner.write().convenios = convenios;
        store
    }

    /// Seed one agreement record.
    pub fn insert_convenio(&self, convenio: Convenio) {
        self.inner.write().convenios.push(convenio);
    }

    /// Seed one publication row.
    pub fn insert_publicacion(&self, publicacion: Publicacion) {
        self.inner.write().publicaciones.push(publicacion);
    }

    /// Make every subsequent call fail with a connection error until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored subscription rows (test inspection).
    pub fn subscription_count(&self) -> usize {
        self.inner.read().suscripciones.len()
    }

    /// Registered notification emails (test inspection).
    pub fn registered_emails(&self) -> Vec<String> {
        self.inner.read().emails.clone()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Connection(
                "injected store failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_convenios(&self) -> StoreResult<Vec<Convenio>> {
        self.check_available()?;
        let mut rows = self.inner.read().convenios.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn convenios_by_ids(&self, ids: &[ConvenioId]) -> StoreResult<Vec<Convenio>> {
        self.check_available()?;
        let wanted: HashSet<&ConvenioId> = ids.iter().collect();
        Ok(self
            .inner
            .read()
            .convenios
            .iter()
            .filter(|c| wanted.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn list_subscription_ids(&self) -> StoreResult<Vec<ConvenioId>> {
        self.check_available()?;
        Ok(self.inner.read().suscripciones.iter().cloned().collect())
    }

    async fn insert_subscription(&self, convenio_id: &ConvenioId) -> StoreResult<()> {
        self.check_available()?;
        self.inner.write().suscripciones.insert(convenio_id.clone());
        Ok(())
    }

    async fn delete_subscription(&self, convenio_id: &ConvenioId) -> StoreResult<()> {
        self.check_available()?;
        self.inner.write().suscripciones.remove(convenio_id);
        Ok(())
    }

    async fn publicaciones_for(
        &self,
        convenio_ids: &[ConvenioId],
    ) -> StoreResult<Vec<Publicacion>> {
        self.check_available()?;
        let wanted: HashSet<&ConvenioId> = convenio_ids.iter().collect();
        let mut rows: Vec<Publicacion> = self
            .inner
            .read()
            .publicaciones
            .iter()
            .filter(|p| wanted.contains(&p.convenio_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.fecha_publicacion.cmp(&a.fecha_publicacion));
        Ok(rows)
    }

    async fn recent_publicaciones(
        &self,
        convenio_id: &ConvenioId,
        limit: usize,
    ) -> StoreResult<Vec<Publicacion>> {
        let mut rows = self
            .publicaciones_for(std::slice::from_ref(convenio_id))
            .await?;
        rows.truncate(limit);
        Ok(rows)
    }

    async fn mark_publicacion_vista(&self, id: &PublicacionId) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.write();
        if let Some(row) = inner.publicaciones.iter_mut().find(|p| &p.id == id) {
            row.visto = true;
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn notificacion_config(
        &self,
        convenio_id: &ConvenioId,
    ) -> StoreResult<Option<NotificacionConfig>> {
        self.check_available()?;
        Ok(self
            .inner
            .read()
            .configs
            .iter()
            .find(|c| &c.convenio_id == convenio_id)
            .cloned())
    }

    async fn notificacion_configs(
        &self,
        convenio_ids: &[ConvenioId],
    ) -> StoreResult<Vec<NotificacionConfig>> {
        self.check_available()?;
        let wanted: HashSet<&ConvenioId> = convenio_ids.iter().collect();
        Ok(self
            .inner
            .read()
            .configs
            .iter()
            .filter(|c| wanted.contains(&c.convenio_id))
            .cloned()
            .collect())
    }

    async fn insert_notificacion_config(
        &self,
        convenio_id: &ConvenioId,
        channel: NotificationChannel,
        enabled: bool,
    ) -> StoreResult<NotificacionConfig> {
        self.check_available()?;
        let now = Utc::now();
        let row = NotificacionConfig {
            id: Uuid::new_v4().to_string(),
            convenio_id: convenio_id.clone(),
            push_notifications: channel == NotificationChannel::Push && enabled,
            email_notifications: channel == NotificationChannel::Email && enabled,
            creado_en: now,
            actualizado_en: now,
        };
        self.inner.write().configs.push(row.clone());
        Ok(row)
    }

    async fn set_notificacion_channel(
        &self,
        config_id: &str,
        channel: NotificationChannel,
        enabled: bool,
    ) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.write();
        // A PATCH matching zero rows succeeds remotely; mirror that.
        if let Some(row) = inner.configs.iter_mut().find(|c| c.id == config_id) {
            match channel {
                NotificationChannel::Push => row.push_notifications = enabled,
                NotificationChannel::Email => row.email_notifications = enabled,
            }
            row.actualizado_en = Utc::now();
        }
        Ok(())
    }

    async fn register_notification_email(&self, email: &str) -> StoreResult<()> {
        self.check_available()?;
        self.inner.write().emails.push(email.to_string());
        Ok(())
    }

    async fn global_notification_settings(&self) -> StoreResult<Option<serde_json::Value>> {
        self.check_available()?;
        Ok(self.inner.read().global_settings.clone())
    }

    async fn update_global_notification_settings(
        &self,
        settings: &serde_json::Value,
    ) -> StoreResult<()> {
        self.check_available()?;
        self.inner.write().global_settings = Some(settings.clone());
        Ok(())
    }
}
