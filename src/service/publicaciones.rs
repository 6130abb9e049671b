//! Publication feed for tracked agreements.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{ConvenioId, Publicacion, PublicacionId};
use crate::error::Result;
use crate::store::RecordStore;

/// Read/annotate access to `convenio_publicaciones`.
pub struct Publicaciones {
    store: Arc<dyn RecordStore>,
}

impl Publicaciones {
    /// Create a feed service backed by `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Publications for any of `convenio_ids`, newest publication date
    /// first. An empty id set yields an empty feed without a remote call.
    pub async fn for_convenios(&self, convenio_ids: &[ConvenioId]) -> Result<Vec<Publicacion>> {
        if convenio_ids.is_empty() {
            return Ok(Vec::new());
        }
        let feed = self.store.publicaciones_for(convenio_ids).await?;
        debug!(count = feed.len(), "publication feed fetched");
        Ok(feed)
    }

    /// The most recent publications for one agreement, bounded by `limit`.
    pub async fn recent_for(
        &self,
        convenio_id: &ConvenioId,
        limit: usize,
    ) -> Result<Vec<Publicacion>> {
        Ok(self.store.recent_publicaciones(convenio_id, limit).await?)
    }

    /// Mark one publication as viewed.
    ///
    /// The remote row is updated first; on failure the error surfaces and
    /// nothing changes locally for the caller to re-render.
    pub async fn mark_visto(&self, id: &PublicacionId) -> Result<()> {
        self.store.mark_publicacion_vista(id).await?;
        debug!(publicacion_id = %id, "publication marked viewed");
        Ok(())
    }
}
