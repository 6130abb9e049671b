//! Publication feed behavior.

use std::sync::Arc;

use chrono::NaiveDate;
use convenios::domain::{ConvenioId, PublicacionId, VistoFilter};
use convenios::service::Publicaciones;
use convenios::store::MemoryStore;
use convenios::testkit::domain::publicacion;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_publicacion(publicacion("p1", "metal", date(2024, 1, 10)));
    store.insert_publicacion(publicacion("p2", "metal", date(2024, 3, 5)));
    store.insert_publicacion(publicacion("p3", "comercio", date(2024, 2, 1)));
    store.insert_publicacion(publicacion("p4", "otros", date(2024, 4, 1)));
    store
}

#[tokio::test]
async fn feed_covers_requested_ids_newest_first() {
    let store = seeded_store();
    let feed = Publicaciones::new(store);

    let rows = feed
        .for_convenios(&[ConvenioId::from("metal"), ConvenioId::from("comercio")])
        .await
        .unwrap();

    let ids: Vec<&str> = rows.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p2", "p3", "p1"]);
}

#[tokio::test]
async fn empty_id_set_never_reaches_the_store() {
    let store = seeded_store();
    // A failing store proves the call short-circuits locally.
    store.set_failing(true);
    let feed = Publicaciones::new(store);

    let rows = feed.for_convenios(&[]).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn recent_listing_is_bounded() {
    let store = seeded_store();
    let feed = Publicaciones::new(store);

    let rows = feed
        .recent_for(&ConvenioId::from("metal"), 1)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id.as_str(), "p2");
}

#[tokio::test]
async fn mark_visto_updates_the_stored_row() {
    let store = seeded_store();
    let feed = Publicaciones::new(store);

    feed.mark_visto(&PublicacionId::from("p1")).await.unwrap();

    let rows = feed
        .for_convenios(&[ConvenioId::from("metal")])
        .await
        .unwrap();
    let p1 = rows.iter().find(|p| p.id.as_str() == "p1").unwrap();
    assert!(p1.visto);

    let unread = VistoFilter::NoVistas.apply(&rows);
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].id.as_str(), "p2");
}

#[tokio::test]
async fn failed_mark_visto_surfaces_and_changes_nothing() {
    let store = seeded_store();
    let feed = Publicaciones::new(store.clone());

    store.set_failing(true);
    assert!(feed.mark_visto(&PublicacionId::from("p1")).await.is_err());

    store.set_failing(false);
    let rows = feed
        .for_convenios(&[ConvenioId::from("metal")])
        .await
        .unwrap();
    assert!(rows.iter().all(|p| !p.visto));
}
