use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name used when an upstream order carries no restaurant info.
pub const UNKNOWN_RESTAURANT: &str = "Unknown Restaurant";

/// An order from the upstream history endpoint, normalized into a fixed
/// schema with safe defaults.
///
/// Every field is always populated: unparseable dates collapse to the Unix
/// epoch and unparseable costs to `0.0`, so grouping code never has to branch
/// on absence. There is no identity key; a collection may hold duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOrder {
    pub order_date: DateTime<Utc>,
    /// Major currency units, always finite and non-negative.
    pub total_cost: f64,
    pub restaurant_name: String,
}

impl NormalizedOrder {
    /// Returns `true` if the order date fell back to the epoch default.
    #[must_use]
    pub fn has_epoch_date(&self) -> bool {
        self.order_date == DateTime::<Utc>::UNIX_EPOCH
    }
}

/// A full synced order collection paired with the moment the sync completed.
///
/// The pair is the unit of replacement: it is persisted in one write and
/// swapped in memory as one value, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    #[serde(rename = "orderCollection")]
    pub orders: Vec<NormalizedOrder>,
    pub last_updated: DateTime<Utc>,
}

impl OrderSnapshot {
    #[must_use]
    pub fn new(orders: Vec<NormalizedOrder>, last_updated: DateTime<Utc>) -> Self {
        Self {
            orders,
            last_updated,
        }
    }

    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}
