//! Convenios - state and coordination layer for a collective labor
//! agreement dashboard.
//!
//! This crate is the engine behind a dashboard that browses, filters,
//! compares, and tracks collective labor agreements ("convenios
//! colectivos"). Records live in a managed remote store; everything here is
//! client-side coordination: caching, filtering, derived statistics, and the
//! two user-owned state slices (subscriptions and the comparison set).
//!
//! # Architecture
//!
//! - [`domain`] - Store-agnostic types and pure logic: the agreement record,
//!   the conjunctive [`ConvenioFilter`](domain::ConvenioFilter), and the
//!   derived [`ConvenioStats`](domain::ConvenioStats). Total functions,
//!   never touch the network.
//! - [`store`] - The persistence boundary: the [`RecordStore`](store::RecordStore)
//!   trait and its PostgREST implementation. One round trip per call, no
//!   retries, no transactions.
//! - [`state`] - Session state slices: the remotely persisted
//!   [`Subscriptions`](state::Subscriptions) set (confirmed-after-write
//!   discipline) and the bounded local [`Comparador`](state::Comparador).
//! - [`session`] - [`ConveniosSession`], the explicitly constructed object
//!   that wires the slices together and orchestrates fetch → filter →
//!   stats.
//! - [`service`] - Auxiliary flows: the publication feed and notification
//!   preferences.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use convenios::config::Config;
//! use convenios::store::RestStore;
//! use convenios::ConveniosSession;
//!
//! # async fn run() -> convenios::Result<()> {
//! let config = Config::from_env()?;
//! config.init_logging();
//!
//! let store = Arc::new(RestStore::new(&config.store));
//! let session = ConveniosSession::start(store).await?;
//!
//! session.set_search("metal");
//! for convenio in session.filtered() {
//!     println!("{} ({})", convenio.nombre, convenio.ambito.as_str());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `testkit` - Expose the in-memory store and record builders for
//!   integration tests.

pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod session;
pub mod state;
pub mod store;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, Result};
pub use session::ConveniosSession;
