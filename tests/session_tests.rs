//! End-to-end session behavior against the in-memory store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use convenios::domain::{Ambito, ConvenioId, Estado};
use convenios::store::MemoryStore;
use convenios::testkit::domain::convenio;
use convenios::ConveniosSession;

fn seeded_store() -> Arc<MemoryStore> {
    let t = |d: u32| Utc.with_ymd_and_hms(2024, 3, d, 10, 0, 0).unwrap();
    Arc::new(MemoryStore::with_convenios(vec![
        convenio("metal", "Convenio del Metal")
            .sector("Metal")
            .ambito(Ambito::Provincial)
            .created_at(t(1))
            .build(),
        convenio("comercio", "Convenio de Comercio")
            .sector("Retail")
            .ambito(Ambito::Nacional)
            .estado(Estado::Derogado)
            .created_at(t(2))
            .build(),
        convenio("hosteleria", "Convenio de Hostelería")
            .ambito(Ambito::Autonomico)
            .created_at(t(3))
            .build(),
    ]))
}

#[tokio::test]
async fn start_loads_records_newest_first() {
    let session = ConveniosSession::start(seeded_store()).await.unwrap();

    let ids: Vec<String> = session
        .convenios()
        .iter()
        .map(|c| c.id.to_string())
        .collect();
    assert_eq!(ids, ["hosteleria", "comercio", "metal"]);
}

#[tokio::test]
async fn stats_follow_the_record_cache() {
    let session = ConveniosSession::start(seeded_store()).await.unwrap();

    let stats = session.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.vigentes, 2);
    assert_eq!(stats.por_sector.len(), 2);
    assert_eq!(stats.por_sector["Metal"], 1);
}

#[tokio::test]
async fn refresh_recomputes_stats_for_new_records() {
    let store = seeded_store();
    let session = ConveniosSession::start(store.clone()).await.unwrap();
    assert_eq!(session.stats().total, 3);

    store.insert_convenio(
        convenio("nuevo", "Convenio Nuevo")
            .sector("Metal")
            .build(),
    );
    session.refresh_convenios().await.unwrap();

    let stats = session.stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.por_sector["Metal"], 2);
}

#[tokio::test]
async fn filter_narrows_without_touching_the_cache() {
    let session = ConveniosSession::start(seeded_store()).await.unwrap();

    session.set_search("RETAIL");
    let filtered = session.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id.as_str(), "comercio");

    // The cache itself is untouched.
    assert_eq!(session.convenios().len(), 3);

    session.clear_filter();
    assert_eq!(session.filtered().len(), 3);
}

#[tokio::test]
async fn filter_dimensions_are_conjunctive() {
    let session = ConveniosSession::start(seeded_store()).await.unwrap();

    session.set_search("convenio");
    session.set_ambito(Some(Ambito::Nacional));
    session.set_estado(Some(Estado::Vigente));
    assert!(session.filtered().is_empty());

    session.set_estado(Some(Estado::Derogado));
    let filtered = session.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id.as_str(), "comercio");
}

#[tokio::test]
async fn comparador_resolves_cached_records_in_selection_order() {
    let session = ConveniosSession::start(seeded_store()).await.unwrap();

    session.toggle_comparador(ConvenioId::from("comercio"));
    session.toggle_comparador(ConvenioId::from("metal"));
    assert!(session.is_in_comparador(&ConvenioId::from("metal")));

    let selected: Vec<String> = session
        .comparador_convenios()
        .iter()
        .map(|c| c.id.to_string())
        .collect();
    assert_eq!(selected, ["comercio", "metal"]);
}

#[tokio::test]
async fn comparador_skips_ids_missing_from_the_cache() {
    let session = ConveniosSession::start(seeded_store()).await.unwrap();

    session.toggle_comparador(ConvenioId::from("metal"));
    session.toggle_comparador(ConvenioId::from("desconocido"));

    assert_eq!(session.comparador_len(), 2);
    assert_eq!(session.comparador_convenios().len(), 1);
}

#[tokio::test]
async fn comparador_capacity_holds_through_the_session() {
    let session = ConveniosSession::start(seeded_store()).await.unwrap();

    for id in ["x", "y", "z", "w"] {
        session.toggle_comparador(ConvenioId::from(id));
    }
    assert_eq!(session.comparador_len(), 3);
    assert!(session.is_in_comparador(&ConvenioId::from("w")));
    assert!(!session.is_in_comparador(&ConvenioId::from("x")));
}
