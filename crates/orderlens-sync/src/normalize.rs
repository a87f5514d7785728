//! Conversion of raw upstream orders into [`NormalizedOrder`] records.
//!
//! Normalization never drops a record. A field that cannot be parsed is
//! replaced by its default and counted as degraded; the count is reported in
//! the sync summary while individual occurrences are only logged.

use orderlens_core::{NormalizedOrder, UNKNOWN_RESTAURANT};

use crate::parse::{parse_order_cost, parse_order_date_checked};
use crate::types::RawOrder;

/// Which fields of a record fell back to a default because the source value
/// was present but unusable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Degradation {
    pub date: bool,
    pub cost: bool,
}

impl Degradation {
    #[must_use]
    pub fn any(self) -> bool {
        self.date || self.cost
    }
}

/// The result of normalizing a page run's worth of raw orders.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub orders: Vec<NormalizedOrder>,
    /// Number of records with at least one degraded field.
    pub degraded: usize,
}

/// Normalizes one raw order and reports which fields degraded.
#[must_use]
pub fn normalize_order(raw: &RawOrder) -> (NormalizedOrder, Degradation) {
    let mut degradation = Degradation::default();

    let (order_date, date_degraded) = parse_order_date_checked(raw.order_date.as_deref());
    degradation.date = date_degraded;

    // NaN from a malformed string, or a negative/non-finite number sent as-is.
    let parsed_cost = parse_order_cost(raw.total_cost.as_ref());
    let total_cost = if parsed_cost.is_finite() && parsed_cost >= 0.0 {
        parsed_cost
    } else {
        tracing::warn!(raw = ?raw.total_cost, "unusable order cost; using 0");
        degradation.cost = true;
        0.0
    };

    let restaurant_name = raw
        .restaurant_name
        .clone()
        .unwrap_or_else(|| UNKNOWN_RESTAURANT.to_owned());

    (
        NormalizedOrder {
            order_date,
            total_cost,
            restaurant_name,
        },
        degradation,
    )
}

/// Normalizes every raw order, preserving order and count.
#[must_use]
pub fn normalize_orders(raws: &[RawOrder]) -> NormalizedBatch {
    let mut batch = NormalizedBatch {
        orders: Vec::with_capacity(raws.len()),
        degraded: 0,
    };

    for raw in raws {
        let (order, degradation) = normalize_order(raw);
        if degradation.any() {
            batch.degraded += 1;
        }
        batch.orders.push(order);
    }

    if batch.degraded > 0 {
        tracing::info!(
            degraded = batch.degraded,
            total = batch.orders.len(),
            "some orders were normalized with default values"
        );
    }

    batch
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
