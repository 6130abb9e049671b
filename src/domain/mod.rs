//! Store-agnostic domain types and pure logic.
//!
//! Everything in this module is a total function over well-typed input:
//! filtering and statistics never touch the network and never fail.

mod convenio;
mod filter;
mod id;
mod notificacion;
mod publicacion;
mod stats;

pub use convenio::{Ambito, Convenio, DatosConvenio, Estado, TablaSalarialRow};
pub use filter::ConvenioFilter;
pub use id::{ConvenioId, PublicacionId};
pub use notificacion::{NotificacionConfig, NotificacionPrefs, NotificationChannel};
pub use publicacion::{Publicacion, TipoPublicacion, VistoFilter};
pub use stats::ConvenioStats;
