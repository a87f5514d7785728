use std::collections::BTreeMap;

use chrono::{DateTime, Local, Timelike, Utc};
use orderlens_core::NormalizedOrder;
use serde::Serialize;

/// Order count and spend for one restaurant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RestaurantTotal {
    pub count: u32,
    pub spent: f64,
}

/// Summary statistics over an order collection.
///
/// Derived on demand and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub total_spent: f64,
    pub order_count: usize,
    /// `total_spent / order_count`, or 0 for an empty collection.
    pub average_order_value: f64,
    /// Spend per local calendar month, keyed `YYYY-MM` in ascending order.
    pub spending_by_month: BTreeMap<String, f64>,
    /// Order count per local hour of day, index 0 = midnight.
    #[serde(rename = "ordersByHourOfDay")]
    pub orders_by_hour: [u32; 24],
    pub restaurant_totals: BTreeMap<String, RestaurantTotal>,
}

/// Aggregates `orders` into totals and per-month, per-hour and per-restaurant
/// breakdowns.
///
/// A cost that is not a finite number counts as 0. Orders dated at the
/// epoch fallback are grouped like any other, under the epoch's local month
/// and hour.
#[must_use]
pub fn aggregate(orders: &[NormalizedOrder]) -> AggregateReport {
    let mut report = AggregateReport {
        order_count: orders.len(),
        ..AggregateReport::default()
    };

    for order in orders {
        let cost = effective_cost(order.total_cost);
        let local = order.order_date.with_timezone(&Local);

        report.total_spent += cost;
        *report
            .spending_by_month
            .entry(month_key(order.order_date))
            .or_insert(0.0) += cost;

        if let Some(slot) = usize::try_from(local.hour())
            .ok()
            .and_then(|hour| report.orders_by_hour.get_mut(hour))
        {
            *slot += 1;
        }

        let totals = report
            .restaurant_totals
            .entry(order.restaurant_name.clone())
            .or_default();
        totals.count += 1;
        totals.spent += cost;
    }

    if report.order_count > 0 {
        #[allow(clippy::cast_precision_loss)]
        let count = report.order_count as f64;
        report.average_order_value = report.total_spent / count;
    }

    report
}

/// Zero-padded local `YYYY-MM` bucket for `date`.
#[must_use]
pub fn month_key(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m").to_string()
}

fn effective_cost(cost: f64) -> f64 {
    if cost.is_finite() {
        cost
    } else {
        0.0
    }
}
