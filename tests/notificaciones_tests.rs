//! Notification preference flows.

use std::sync::Arc;

use convenios::domain::{ConvenioId, NotificationChannel};
use convenios::error::{Error, ValidationError};
use convenios::service::Notificaciones;
use convenios::store::MemoryStore;
use serde_json::json;

fn id(s: &str) -> ConvenioId {
    ConvenioId::from(s)
}

#[tokio::test]
async fn missing_row_yields_defaults_without_creating_one() {
    let store = Arc::new(MemoryStore::new());
    let service = Notificaciones::new(store.clone());

    let prefs = service.prefs_for(&id("metal")).await.unwrap();
    assert!(!prefs.push);
    assert!(!prefs.email);

    // Reading must not have created a row.
    let again = service.prefs_for(&id("metal")).await.unwrap();
    assert_eq!(again, prefs);
}

#[tokio::test]
async fn first_toggle_creates_a_row_with_only_that_channel() {
    let store = Arc::new(MemoryStore::new());
    let service = Notificaciones::new(store);

    let prefs = service
        .toggle(&id("metal"), NotificationChannel::Push)
        .await
        .unwrap();
    assert!(prefs.push);
    assert!(!prefs.email);
}

#[tokio::test]
async fn later_toggles_update_the_existing_row() {
    let store = Arc::new(MemoryStore::new());
    let service = Notificaciones::new(store);

    service
        .toggle(&id("metal"), NotificationChannel::Push)
        .await
        .unwrap();
    let prefs = service
        .toggle(&id("metal"), NotificationChannel::Email)
        .await
        .unwrap();
    assert!(prefs.push);
    assert!(prefs.email);

    // Toggling push again turns it back off, leaving email untouched.
    let prefs = service
        .toggle(&id("metal"), NotificationChannel::Push)
        .await
        .unwrap();
    assert!(!prefs.push);
    assert!(prefs.email);
}

#[tokio::test]
async fn prefs_for_all_defaults_unconfigured_ids() {
    let store = Arc::new(MemoryStore::new());
    let service = Notificaciones::new(store);

    service
        .toggle(&id("metal"), NotificationChannel::Email)
        .await
        .unwrap();

    let prefs = service
        .prefs_for_all(&[id("metal"), id("comercio")])
        .await
        .unwrap();
    assert_eq!(prefs.len(), 2);
    assert!(prefs[&id("metal")].email);
    assert!(!prefs[&id("comercio")].email);
}

#[tokio::test]
async fn failed_toggle_surfaces_and_stores_nothing() {
    let store = Arc::new(MemoryStore::new());
    let service = Notificaciones::new(store.clone());

    store.set_failing(true);
    assert!(service
        .toggle(&id("metal"), NotificationChannel::Push)
        .await
        .is_err());

    store.set_failing(false);
    let prefs = service.prefs_for(&id("metal")).await.unwrap();
    assert!(!prefs.push);
}

#[tokio::test]
async fn malformed_email_is_rejected_before_any_write() {
    let store = Arc::new(MemoryStore::new());
    // A failing store proves validation happens first.
    store.set_failing(true);
    let service = Notificaciones::new(store.clone());

    let err = service.register_email("not-an-email").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidEmail { .. })
    ));
    assert!(store.registered_emails().is_empty());
}

#[tokio::test]
async fn valid_email_is_registered() {
    let store = Arc::new(MemoryStore::new());
    let service = Notificaciones::new(store.clone());

    service.register_email("user@example.com").await.unwrap();
    assert_eq!(store.registered_emails(), ["user@example.com"]);
}

#[tokio::test]
async fn global_settings_round_trip_opaquely() {
    let store = Arc::new(MemoryStore::new());
    let service = Notificaciones::new(store);

    assert!(service.global_settings().await.unwrap().is_none());

    let settings = json!({ "digest": "weekly", "quiet_hours": [22, 8] });
    service.update_global_settings(&settings).await.unwrap();
    assert_eq!(service.global_settings().await.unwrap(), Some(settings));
}
