//! Session-scoped state managers.
//!
//! Each state slice is mutated only through its own manager: the
//! subscription set persists through the remote store, the comparison set is
//! purely local and dies with the session.

mod comparador;
mod subscriptions;

pub use comparador::{Comparador, COMPARADOR_CAPACITY};
pub use subscriptions::{SubscriptionChange, Subscriptions};
