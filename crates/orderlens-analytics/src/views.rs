//! Ranked and ordered projections of an aggregate report, shaped for
//! display.

use std::cmp::Ordering;

use orderlens_core::NormalizedOrder;
use serde::Serialize;

use crate::aggregate::AggregateReport;

pub const DEFAULT_TOP_RESTAURANTS: usize = 10;
pub const DEFAULT_RECENT_ORDERS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRestaurant {
    /// 1-based position.
    pub rank: usize,
    pub name: String,
    pub count: u32,
    pub spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpend {
    pub month: String,
    pub spent: f64,
}

/// The `n` restaurants with the highest spend, highest first. Equal spend
/// keeps name order.
#[must_use]
pub fn top_restaurants(report: &AggregateReport, n: usize) -> Vec<RankedRestaurant> {
    let mut ranked: Vec<(&String, f64, u32)> = report
        .restaurant_totals
        .iter()
        .map(|(name, total)| (name, total.spent, total.count))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    ranked
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (name, spent, count))| RankedRestaurant {
            rank: i + 1,
            name: name.clone(),
            count,
            spent,
        })
        .collect()
}

/// The `n` most recent orders, newest first.
#[must_use]
pub fn recent_orders(orders: &[NormalizedOrder], n: usize) -> Vec<NormalizedOrder> {
    let mut sorted: Vec<&NormalizedOrder> = orders.iter().collect();
    sorted.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    sorted.into_iter().take(n).cloned().collect()
}

/// Month buckets in ascending key order.
#[must_use]
pub fn monthly_series(report: &AggregateReport) -> Vec<MonthlySpend> {
    report
        .spending_by_month
        .iter()
        .map(|(month, spent)| MonthlySpend {
            month: month.clone(),
            spent: *spent,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::aggregate::aggregate;

    fn order(day: u32, cost: f64, name: &str) -> NormalizedOrder {
        NormalizedOrder {
            order_date: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            total_cost: cost,
            restaurant_name: name.to_owned(),
        }
    }

    #[test]
    fn top_restaurants_sorted_by_spend_descending() {
        let orders = vec![
            order(1, 100.0, "Alpha"),
            order(2, 500.0, "Bravo"),
            order(3, 250.0, "Charlie"),
            order(4, 300.0, "Alpha"),
        ];
        let report = aggregate(&orders);

        let top = top_restaurants(&report, DEFAULT_TOP_RESTAURANTS);

        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bravo", "Alpha", "Charlie"]);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[1].count, 2);
        assert!((top[1].spent - 400.0).abs() < 1e-9);
    }

    #[test]
    fn top_restaurants_truncates_and_breaks_ties_by_name() {
        let orders = vec![
            order(1, 50.0, "Zeta"),
            order(2, 50.0, "Eta"),
            order(3, 10.0, "Theta"),
        ];
        let report = aggregate(&orders);

        let top = top_restaurants(&report, 2);

        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Eta", "Zeta"]);
    }

    #[test]
    fn recent_orders_newest_first() {
        let orders = vec![order(3, 1.0, "A"), order(20, 2.0, "B"), order(11, 3.0, "C")];

        let recent = recent_orders(&orders, 2);

        let names: Vec<&str> = recent.iter().map(|o| o.restaurant_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn recent_orders_puts_epoch_dates_last() {
        let mut undated = order(1, 9.0, "Undated");
        undated.order_date = DateTime::<Utc>::UNIX_EPOCH;
        let orders = vec![undated, order(2, 1.0, "Dated")];

        let recent = recent_orders(&orders, DEFAULT_RECENT_ORDERS);

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].restaurant_name, "Undated");
    }

    #[test]
    fn monthly_series_follows_key_order() {
        let mut report = AggregateReport::default();
        report.spending_by_month.insert("2024-02".to_owned(), 20.0);
        report.spending_by_month.insert("2023-12".to_owned(), 10.0);

        let series = monthly_series(&report);

        let months: Vec<&str> = series.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-02"]);
    }
}
