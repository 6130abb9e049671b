//! Multi-criterion filtering over the agreement list.
//!
//! [`ConvenioFilter`] is the dashboard's search state: a free-text term plus
//! optional exact-match scope and status constraints. Filtering is a pure,
//! order-preserving function of its inputs.

use super::convenio::{Ambito, Convenio, Estado};

/// Conjunctive filter over agreements.
///
/// An empty search term or a `None` constraint means "no constraint" for that
/// dimension. The search term matches case-insensitively against name, code,
/// and sector; a record missing its code or sector simply cannot match on
/// that field, it is not excluded outright.
///
/// # Example
///
/// ```
/// use convenios::domain::{Ambito, ConvenioFilter};
///
/// let filter = ConvenioFilter {
///     search: "metal".into(),
///     ambito: Some(Ambito::Provincial),
///     estado: None,
/// };
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvenioFilter {
    /// Case-insensitive substring matched against nombre, codigo and sector.
    pub search: String,
    /// Exact scope-level constraint.
    pub ambito: Option<Ambito>,
    /// Exact status constraint.
    pub estado: Option<Estado>,
}

impl ConvenioFilter {
    /// Whether every dimension is unconstrained.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.ambito.is_none() && self.estado.is_none()
    }

    /// Check whether a single agreement passes all constraints.
    pub fn matches(&self, convenio: &Convenio) -> bool {
        if !self.search.is_empty() {
            let term = self.search.to_lowercase();
            let hit = convenio.nombre.to_lowercase().contains(&term)
                || field_contains(convenio.codigo.as_deref(), &term)
                || field_contains(convenio.sector.as_deref(), &term);
            if !hit {
                return false;
            }
        }

        if let Some(ambito) = self.ambito {
            if convenio.ambito != ambito {
                return false;
            }
        }

        if let Some(estado) = self.estado {
            if convenio.estado != estado {
                return false;
            }
        }

        true
    }

    /// Filter a record list, preserving the input order.
    ///
    /// The result is always a subset of `records`; re-running with the same
    /// inputs selects the same elements.
    pub fn apply(&self, records: &[Convenio]) -> Vec<Convenio> {
        records.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}

fn field_contains(field: Option<&str>, term: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(term))
}
