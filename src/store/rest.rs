//! PostgREST-style implementation of [`RecordStore`].
//!
//! Speaks the managed backend's REST query surface: `select`/`order` query
//! parameters, `eq.`/`in.` column filters, JSON bodies for writes, and
//! `apikey` + bearer auth headers. Each call is one round trip; timeouts are
//! whatever the transport defaults to.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::{tables, RecordStore, StoreResult};
use crate::config::StoreConfig;
use crate::domain::{
    Convenio, ConvenioId, NotificacionConfig, NotificationChannel, Publicacion, PublicacionId,
};
use crate::error::PersistenceError;

/// REST client for the managed record store.
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(serde::Deserialize)]
struct SubscriptionRow {
    convenio_id: ConvenioId,
}

impl RestStore {
    /// Create a store client from connection settings.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, method: Method, table: &'static str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// `in.(...)` filter value with each element quoted, so ids containing
    /// commas survive.
    fn in_filter(ids: &[ConvenioId]) -> String {
        let quoted: Vec<String> = ids.iter().map(|id| format!("\"{}\"", id.as_str())).collect();
        format!("in.({})", quoted.join(","))
    }

    async fn rows<T: DeserializeOwned>(
        table: &'static str,
        response: Response,
    ) -> StoreResult<Vec<T>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::UnexpectedStatus { table, status, body });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Decode { table, source })
    }

    async fn expect_success(table: &'static str, response: Response) -> StoreResult<()> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::UnexpectedStatus { table, status, body });
        }
        Ok(())
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, String)],
    ) -> StoreResult<Vec<T>> {
        debug!(table, "store select");
        let response = self
            .request(Method::GET, table)
            .query(query)
            .send()
            .await?;
        Self::rows(table, response).await
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn list_convenios(&self) -> StoreResult<Vec<Convenio>> {
        self.select(
            tables::CONVENIOS,
            &[
                ("select", "*".into()),
                ("order", "created_at.desc".into()),
            ],
        )
        .await
    }

    async fn convenios_by_ids(&self, ids: &[ConvenioId]) -> StoreResult<Vec<Convenio>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select(
            tables::CONVENIOS,
            &[("select", "*".into()), ("id", Self::in_filter(ids))],
        )
        .await
    }

    async fn list_subscription_ids(&self) -> StoreResult<Vec<ConvenioId>> {
        let rows: Vec<SubscriptionRow> = self
            .select(tables::SUSCRIPCIONES, &[("select", "convenio_id".into())])
            .await?;
        Ok(rows.into_iter().map(|r| r.convenio_id).collect())
    }

    async fn insert_subscription(&self, convenio_id: &ConvenioId) -> StoreResult<()> {
        debug!(convenio_id = %convenio_id, "store insert subscription");
        let response = self
            .request(Method::POST, tables::SUSCRIPCIONES)
            .json(&json!({ "convenio_id": convenio_id }))
            .send()
            .await?;
        Self::expect_success(tables::SUSCRIPCIONES, response).await
    }

    async fn delete_subscription(&self, convenio_id: &ConvenioId) -> StoreResult<()> {
        debug!(convenio_id = %convenio_id, "store delete subscription");
        let response = self
            .request(Method::DELETE, tables::SUSCRIPCIONES)
            .query(&[("convenio_id", format!("eq.{convenio_id}"))])
            .send()
            .await?;
        Self::expect_success(tables::SUSCRIPCIONES, response).await
    }

    async fn publicaciones_for(
        &self,
        convenio_ids: &[ConvenioId],
    ) -> StoreResult<Vec<Publicacion>> {
        if convenio_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select(
            tables::PUBLICACIONES,
            &[
                ("select", "*".into()),
                ("convenio_id", Self::in_filter(convenio_ids)),
                ("order", "fecha_publicacion.desc".into()),
            ],
        )
        .await
    }

    async fn recent_publicaciones(
        &self,
        convenio_id: &ConvenioId,
        limit: usize,
    ) -> StoreResult<Vec<Publicacion>> {
        self.select(
            tables::PUBLICACIONES,
            &[
                ("select", "*".into()),
                ("convenio_id", format!("eq.{convenio_id}")),
                ("order", "fecha_publicacion.desc".into()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn mark_publicacion_vista(&self, id: &PublicacionId) -> StoreResult<()> {
        debug!(publicacion_id = %id, "store mark publication viewed");
        let response = self
            .request(Method::PATCH, tables::PUBLICACIONES)
            .query(&[("id", format!("eq.{id}"))])
            .json(&json!({ "visto": true }))
            .send()
            .await?;
        Self::expect_success(tables::PUBLICACIONES, response).await
    }

    async fn notificacion_config(
        &self,
        convenio_id: &ConvenioId,
    ) -> StoreResult<Option<NotificacionConfig>> {
        let rows: Vec<NotificacionConfig> = self
            .select(
                tables::NOTIFICACIONES_CONFIG,
                &[
                    ("select", "*".into()),
                    ("convenio_id", format!("eq.{convenio_id}")),
                    ("limit", "1".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn notificacion_configs(
        &self,
        convenio_ids: &[ConvenioId],
    ) -> StoreResult<Vec<NotificacionConfig>> {
        if convenio_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select(
            tables::NOTIFICACIONES_CONFIG,
            &[
                ("select", "*".into()),
                ("convenio_id", Self::in_filter(convenio_ids)),
            ],
        )
        .await
    }

    async fn insert_notificacion_config(
        &self,
        convenio_id: &ConvenioId,
        channel: NotificationChannel,
        enabled: bool,
    ) -> StoreResult<NotificacionConfig> {
        debug!(convenio_id = %convenio_id, channel = channel.column(), enabled, "store insert notification config");
        let body = json!({
            "convenio_id": convenio_id,
            "push_notifications": channel == NotificationChannel::Push && enabled,
            "email_notifications": channel == NotificationChannel::Email && enabled,
        });
        let response = self
            .request(Method::POST, tables::NOTIFICACIONES_CONFIG)
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        let rows: Vec<NotificacionConfig> =
            Self::rows(tables::NOTIFICACIONES_CONFIG, response).await?;
        rows.into_iter()
            .next()
            .ok_or(PersistenceError::MissingReturnedRow {
                table: tables::NOTIFICACIONES_CONFIG,
            })
    }

    async fn set_notificacion_channel(
        &self,
        config_id: &str,
        channel: NotificationChannel,
        enabled: bool,
    ) -> StoreResult<()> {
        debug!(config_id, channel = channel.column(), enabled, "store update notification config");
        let mut body = serde_json::Map::new();
        body.insert(channel.column().to_string(), serde_json::Value::Bool(enabled));
        let response = self
            .request(Method::PATCH, tables::NOTIFICACIONES_CONFIG)
            .query(&[("id", format!("eq.{config_id}"))])
            .json(&body)
            .send()
            .await?;
        Self::expect_success(tables::NOTIFICACIONES_CONFIG, response).await
    }

    async fn register_notification_email(&self, email: &str) -> StoreResult<()> {
        debug!("store register notification email");
        let response = self
            .request(Method::POST, tables::NOTIFICATION_EMAILS)
            .json(&json!({ "email": email }))
            .send()
            .await?;
        Self::expect_success(tables::NOTIFICATION_EMAILS, response).await
    }

    async fn global_notification_settings(&self) -> StoreResult<Option<serde_json::Value>> {
        let rows: Vec<serde_json::Value> = self
            .select(
                tables::GLOBAL_NOTIFICATION_SETTINGS,
                &[("select", "*".into()), ("limit", "1".into())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn update_global_notification_settings(
        &self,
        settings: &serde_json::Value,
    ) -> StoreResult<()> {
        let response = self
            .request(Method::POST, tables::GLOBAL_NOTIFICATION_SETTINGS)
            .header("Prefer", "resolution=merge-duplicates")
            .json(settings)
            .send()
            .await?;
        Self::expect_success(tables::GLOBAL_NOTIFICATION_SETTINGS, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_filter_quotes_every_id() {
        let ids = vec![ConvenioId::from("a"), ConvenioId::from("b,c")];
        assert_eq!(RestStore::in_filter(&ids), "in.(\"a\",\"b,c\")");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let store = RestStore::new(&StoreConfig {
            url: "https://example.supabase.co/".into(),
            api_key: "k".into(),
        });
        assert_eq!(store.base_url, "https://example.supabase.co");
    }
}
