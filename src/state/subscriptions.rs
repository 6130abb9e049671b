//! Remotely persisted subscription state.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::ConvenioId;
use crate::error::Result;
use crate::store::RecordStore;

/// Outcome of a subscription toggle that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionChange {
    Subscribed,
    Unsubscribed,
}

/// Tracks which agreements the user has opted into.
///
/// The in-memory set mirrors the `convenio_suscripciones` table and is the
/// source for O(1) membership checks. Mutations follow a confirmed-only
/// discipline: the local set changes after the remote write succeeds, never
/// before, so a failed call leaves membership exactly as it was.
pub struct Subscriptions {
    store: Arc<dyn RecordStore>,
    ids: RwLock<HashSet<ConvenioId>>,
}

impl Subscriptions {
    /// Create an empty manager backed by `store`. Call
    /// [`refresh`](Self::refresh) to seed it from the remote listing.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            ids: RwLock::new(HashSet::new()),
        }
    }

    /// O(1) membership check against the current in-memory set.
    pub fn is_subscribed(&self, id: &ConvenioId) -> bool {
        self.ids.read().contains(id)
    }

    /// Number of subscribed agreements.
    pub fn count(&self) -> usize {
        self.ids.read().len()
    }

    /// Snapshot of the subscribed id set.
    pub fn subscribed_ids(&self) -> Vec<ConvenioId> {
        self.ids.read().iter().cloned().collect()
    }

    /// Toggle the subscription for one agreement.
    ///
    /// Exactly one remote write per call, no batching and no retry. On
    /// failure the error propagates once and the local set is untouched; the
    /// action simply appears not to have happened. Two in-flight toggles for
    /// the same id are not serialized here; the second commit wins.
    pub async fn toggle(&self, id: &ConvenioId) -> Result<SubscriptionChange> {
        let currently_subscribed = self.is_subscribed(id);

        if currently_subscribed {
            if let Err(e) = self.store.delete_subscription(id).await {
                warn!(convenio_id = %id, error = %e, "unsubscribe failed, keeping local state");
                return Err(e.into());
            }
            self.ids.write().remove(id);
            debug!(convenio_id = %id, "unsubscribed");
            Ok(SubscriptionChange::Unsubscribed)
        } else {
            if let Err(e) = self.store.insert_subscription(id).await {
                warn!(convenio_id = %id, error = %e, "subscribe failed, keeping local state");
                return Err(e.into());
            }
            self.ids.write().insert(id.clone());
            debug!(convenio_id = %id, "subscribed");
            Ok(SubscriptionChange::Subscribed)
        }
    }

    /// Replace the whole local set with the remote listing.
    ///
    /// Used at session start and to reconcile drift afterwards.
    pub async fn refresh(&self) -> Result<()> {
        let remote = self.store.list_subscription_ids().await?;
        let count = remote.len();
        *self.ids.write() = remote.into_iter().collect();
        debug!(count, "subscriptions refreshed");
        Ok(())
    }
}
