//! Publication records attached to agreements.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ConvenioId, PublicacionId};

/// Kind of publication attached to an agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoPublicacion {
    TablasSalariales,
    Revision,
    Modificacion,
    Actualizacion,
}

/// An official publication (salary table update, revision, ...) for one
/// agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publicacion {
    pub id: PublicacionId,
    pub convenio_id: ConvenioId,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub tipo: TipoPublicacion,
    pub fecha_publicacion: NaiveDate,
    pub url: Option<String>,
    pub visto: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Feed filter over the viewed flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VistoFilter {
    /// Everything, viewed or not.
    #[default]
    Todas,
    /// Only publications not yet viewed.
    NoVistas,
    /// Only publications already viewed.
    Vistas,
}

impl VistoFilter {
    /// Whether a publication passes this filter.
    pub fn matches(&self, publicacion: &Publicacion) -> bool {
        match self {
            Self::Todas => true,
            Self::NoVistas => !publicacion.visto,
            Self::Vistas => publicacion.visto,
        }
    }

    /// Filter a feed, preserving order.
    pub fn apply(&self, feed: &[Publicacion]) -> Vec<Publicacion> {
        feed.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}
