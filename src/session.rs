//! Dashboard session - the coordination layer over all state slices.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::domain::{Ambito, Convenio, ConvenioFilter, ConvenioId, ConvenioStats, Estado};
use crate::error::Result;
use crate::state::{Comparador, SubscriptionChange, Subscriptions};
use crate::store::RecordStore;

/// One user's dashboard session.
///
/// Explicitly constructed and passed by reference to whatever renders it;
/// there is no ambient global. Owns the record cache, the active filter, the
/// derived statistics, the subscription set and the comparison set. Each
/// slice sits behind its own lock, so subscription toggles, comparator
/// toggles and filter changes interleave freely without contending.
///
/// Dropping the session drops the comparison set with it; subscriptions
/// survive in the store.
pub struct ConveniosSession {
    store: Arc<dyn RecordStore>,
    convenios: RwLock<Vec<Convenio>>,
    filter: RwLock<ConvenioFilter>,
    stats: RwLock<ConvenioStats>,
    subscriptions: Subscriptions,
    comparador: Mutex<Comparador>,
}

impl ConveniosSession {
    /// Create a session with empty caches. Prefer [`start`](Self::start)
    /// outside of tests.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store: store.clone(),
            convenios: RwLock::new(Vec::new()),
            filter: RwLock::new(ConvenioFilter::default()),
            stats: RwLock::new(ConvenioStats::default()),
            subscriptions: Subscriptions::new(store),
            comparador: Mutex::new(Comparador::new()),
        }
    }

    /// Create a session and load its initial state: the full agreement list
    /// and the remote subscription set.
    pub async fn start(store: Arc<dyn RecordStore>) -> Result<Self> {
        let session = Self::new(store);
        session.refresh_convenios().await?;
        session.subscriptions.refresh().await?;
        info!(
            convenios = session.convenios.read().len(),
            subscriptions = session.subscriptions.count(),
            "session started"
        );
        Ok(session)
    }

    /// Re-fetch the agreement list (newest first) and recompute statistics.
    pub async fn refresh_convenios(&self) -> Result<()> {
        let records = self.store.list_convenios().await?;
        debug!(count = records.len(), "convenios fetched");
        *self.stats.write() = ConvenioStats::compute_now(&records);
        *self.convenios.write() = records;
        Ok(())
    }

    /// Snapshot of the full record cache, store order.
    pub fn convenios(&self) -> Vec<Convenio> {
        self.convenios.read().clone()
    }

    /// Look up one cached agreement by id.
    pub fn convenio(&self, id: &ConvenioId) -> Option<Convenio> {
        self.convenios.read().iter().find(|c| &c.id == id).cloned()
    }

    /// The record cache narrowed by the active filter, order preserved.
    pub fn filtered(&self) -> Vec<Convenio> {
        let filter = self.filter.read().clone();
        filter.apply(&self.convenios.read())
    }

    /// Current derived statistics.
    pub fn stats(&self) -> ConvenioStats {
        self.stats.read().clone()
    }

    /// Current filter selection.
    pub fn filter(&self) -> ConvenioFilter {
        self.filter.read().clone()
    }

    /// Set the free-text search term.
    pub fn set_search(&self, term: impl Into<String>) {
        self.filter.write().search = term.into();
    }

    /// Constrain (or clear) the scope-level dimension.
    pub fn set_ambito(&self, ambito: Option<Ambito>) {
        self.filter.write().ambito = ambito;
    }

    /// Constrain (or clear) the status dimension.
    pub fn set_estado(&self, estado: Option<Estado>) {
        self.filter.write().estado = estado;
    }

    /// Clear every filter dimension.
    pub fn clear_filter(&self) {
        *self.filter.write() = ConvenioFilter::default();
    }

    /// Subscription membership, O(1) against the local set.
    pub fn is_subscribed(&self, id: &ConvenioId) -> bool {
        self.subscriptions.is_subscribed(id)
    }

    /// Toggle a subscription through the store. See
    /// [`Subscriptions::toggle`] for the failure contract.
    pub async fn toggle_subscription(&self, id: &ConvenioId) -> Result<SubscriptionChange> {
        self.subscriptions.toggle(id).await
    }

    /// Reconcile the local subscription set with the remote listing.
    pub async fn refresh_subscriptions(&self) -> Result<()> {
        self.subscriptions.refresh().await
    }

    /// The subscription state slice.
    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    /// Comparison-set membership, local only.
    pub fn is_in_comparador(&self, id: &ConvenioId) -> bool {
        self.comparador.lock().contains(id)
    }

    /// Toggle an agreement in the local comparison set.
    pub fn toggle_comparador(&self, id: ConvenioId) {
        self.comparador.lock().toggle(id);
    }

    /// Cached records currently selected for comparison, oldest selection
    /// first. Ids whose record is no longer cached are skipped.
    pub fn comparador_convenios(&self) -> Vec<Convenio> {
        let comparador = self.comparador.lock();
        let convenios = self.convenios.read();
        comparador
            .ids()
            .filter_map(|id| convenios.iter().find(|c| &c.id == id).cloned())
            .collect()
    }

    /// Number of agreements selected for comparison.
    pub fn comparador_len(&self) -> usize {
        self.comparador.lock().len()
    }
}
