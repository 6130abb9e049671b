//! Persistence boundary against the managed record store.
//!
//! [`RecordStore`] is the only seam through which this layer touches remote
//! data. Every method is a single network round trip with no transaction or
//! retry guarantee; failures surface once as
//! [`PersistenceError`](crate::error::PersistenceError) and are never retried
//! here.

mod rest;

#[cfg(any(test, feature = "testkit"))]
mod memory;

pub use rest::RestStore;

#[cfg(any(test, feature = "testkit"))]
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::domain::{
    Convenio, ConvenioId, NotificacionConfig, NotificationChannel, Publicacion, PublicacionId,
};
use crate::error::PersistenceError;

/// Result alias for store operations.
pub type StoreResult<T> = std::result::Result<T, PersistenceError>;

/// Logical table names owned by the remote store.
pub mod tables {
    pub const CONVENIOS: &str = "convenios_colectivos";
    pub const SUSCRIPCIONES: &str = "convenio_suscripciones";
    pub const PUBLICACIONES: &str = "convenio_publicaciones";
    pub const NOTIFICACIONES_CONFIG: &str = "notificaciones_config";
    pub const NOTIFICATION_EMAILS: &str = "notification_emails";
    pub const GLOBAL_NOTIFICATION_SETTINGS: &str = "global_notification_settings";
}

/// Typed access to the remote record store.
///
/// Implementations must be `Send + Sync` so one handle can be shared across
/// the session's async calls. The REST implementation is [`RestStore`]; tests
/// use the in-memory `MemoryStore` behind the `testkit` feature.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Full scan of `convenios_colectivos`, newest first by creation time.
    async fn list_convenios(&self) -> StoreResult<Vec<Convenio>>;

    /// Fetch agreements by id list. Order follows the store's response.
    async fn convenios_by_ids(&self, ids: &[ConvenioId]) -> StoreResult<Vec<Convenio>>;

    /// List every subscribed agreement id (the `convenio_id` column).
    async fn list_subscription_ids(&self) -> StoreResult<Vec<ConvenioId>>;

    /// Insert one subscription row for `convenio_id`.
    async fn insert_subscription(&self, convenio_id: &ConvenioId) -> StoreResult<()>;

    /// Delete the subscription row keyed by `convenio_id`.
    async fn delete_subscription(&self, convenio_id: &ConvenioId) -> StoreResult<()>;

    /// Publications for any of `convenio_ids`, newest publication date first.
    async fn publicaciones_for(
        &self,
        convenio_ids: &[ConvenioId],
    ) -> StoreResult<Vec<Publicacion>>;

    /// The most recent publications for one agreement, bounded by `limit`.
    async fn recent_publicaciones(
        &self,
        convenio_id: &ConvenioId,
        limit: usize,
    ) -> StoreResult<Vec<Publicacion>>;

    /// Mark one publication as viewed.
    async fn mark_publicacion_vista(&self, id: &PublicacionId) -> StoreResult<()>;

    /// Notification config row for one agreement, if any.
    async fn notificacion_config(
        &self,
        convenio_id: &ConvenioId,
    ) -> StoreResult<Option<NotificacionConfig>>;

    /// Notification config rows for any of `convenio_ids`.
    async fn notificacion_configs(
        &self,
        convenio_ids: &[ConvenioId],
    ) -> StoreResult<Vec<NotificacionConfig>>;

    /// Insert a fresh config row with `channel` set to `enabled` and the
    /// other channel off, returning the stored row.
    async fn insert_notificacion_config(
        &self,
        convenio_id: &ConvenioId,
        channel: NotificationChannel,
        enabled: bool,
    ) -> StoreResult<NotificacionConfig>;

    /// Update one channel column on an existing config row.
    async fn set_notificacion_channel(
        &self,
        config_id: &str,
        channel: NotificationChannel,
        enabled: bool,
    ) -> StoreResult<()>;

    /// Register an email address for notification delivery.
    async fn register_notification_email(&self, email: &str) -> StoreResult<()>;

    /// Read the opaque global notification settings row, if present.
    async fn global_notification_settings(&self) -> StoreResult<Option<serde_json::Value>>;

    /// Write the opaque global notification settings row.
    async fn update_global_notification_settings(
        &self,
        settings: &serde_json::Value,
    ) -> StoreResult<()>;
}
