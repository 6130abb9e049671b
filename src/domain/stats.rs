//! Summary statistics derived from the agreement list.

use std::collections::HashMap;

use chrono::{DateTime, Months, Utc};

use super::convenio::{Convenio, Estado};

/// Aggregate counts over the current record list.
///
/// Recomputed from scratch whenever the underlying list changes; never
/// persisted and carries no hidden state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvenioStats {
    /// Total number of records.
    pub total: usize,
    /// Records with status vigente.
    pub vigentes: usize,
    /// Count per observed sector; sectors never seen get no entry.
    pub por_sector: HashMap<String, usize>,
    /// Records whose validity end falls strictly after `now` and at most
    /// three calendar months later.
    pub proximos_vencer: usize,
}

impl ConvenioStats {
    /// Compute statistics for `records` as seen at `now`.
    ///
    /// The expiry horizon is `now` plus three calendar months with year
    /// carry (chrono clamps the day on short months), not a fixed 90-day
    /// window. Missing sectors and dates are skipped, never an error.
    pub fn compute(records: &[Convenio], now: DateTime<Utc>) -> Self {
        let vigentes = records
            .iter()
            .filter(|c| c.estado == Estado::Vigente)
            .count();

        let mut por_sector: HashMap<String, usize> = HashMap::new();
        for convenio in records {
            if let Some(sector) = &convenio.sector {
                *por_sector.entry(sector.clone()).or_insert(0) += 1;
            }
        }

        let today = now.date_naive();
        let proximos_vencer = match today.checked_add_months(Months::new(3)) {
            Some(horizon) => records
                .iter()
                .filter(|c| {
                    c.fecha_vigencia_fin
                        .is_some_and(|end| end > today && end <= horizon)
                })
                .count(),
            None => 0,
        };

        Self {
            total: records.len(),
            vigentes,
            por_sector,
            proximos_vencer,
        }
    }

    /// Compute statistics against the current wall clock.
    pub fn compute_now(records: &[Convenio]) -> Self {
        Self::compute(records, Utc::now())
    }
}
