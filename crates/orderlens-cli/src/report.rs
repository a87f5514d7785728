//! `orderlens report`: spending statistics over the stored snapshot.

use chrono::{DateTime, Local, NaiveDate, Utc};
use orderlens_analytics::{
    aggregate, monthly_series, recent_orders, top_restaurants, AggregateReport, DateWindow,
    MonthlySpend, RangePreset, RankedRestaurant,
};
use orderlens_core::{AppConfig, NormalizedOrder, OrderSnapshot};
use orderlens_store::{JsonFileStore, OrderStore};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportArgs {
    pub range: String,
    /// Custom inclusive day window; overrides `range`.
    pub days: Option<(NaiveDate, NaiveDate)>,
    pub top: usize,
    pub recent: usize,
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportDocument {
    pub range: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub summary: AggregateReport,
    pub top_restaurants: Vec<RankedRestaurant>,
    pub recent_orders: Vec<NormalizedOrder>,
    pub monthly: Vec<MonthlySpend>,
}

/// Loads the stored snapshot and prints a report for the requested window.
///
/// # Errors
///
/// Returns an error if the store cannot be read, the custom window is
/// inverted, or JSON output cannot be encoded.
pub(crate) fn run_report(config: &AppConfig, args: &ReportArgs) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&config.store_path);
    let Some(snapshot) = store.load()? else {
        println!(
            "no synced orders at {}; run `orderlens sync` first",
            config.store_path.display()
        );
        return Ok(());
    };

    let document = build_report(&snapshot, args, Utc::now())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print_text(&document);
    }
    Ok(())
}

/// Filters `snapshot` to the requested window and derives every view.
///
/// # Errors
///
/// Returns an error if a custom window ends before it starts.
pub(crate) fn build_report(
    snapshot: &OrderSnapshot,
    args: &ReportArgs,
    now: DateTime<Utc>,
) -> anyhow::Result<ReportDocument> {
    let (label, window) = match args.days {
        Some((from, to)) => {
            if to < from {
                anyhow::bail!("--to ({to}) is before --from ({from})");
            }
            ("custom".to_owned(), DateWindow::from_days(from, to))
        }
        None => {
            let preset = RangePreset::parse(&args.range);
            (preset.to_string(), preset.resolve(now))
        }
    };

    let orders = window.apply(&snapshot.orders);
    let summary = aggregate(&orders);

    Ok(ReportDocument {
        range: label,
        start: window.start,
        end: window.end,
        last_updated: snapshot.last_updated,
        top_restaurants: top_restaurants(&summary, args.top),
        recent_orders: recent_orders(&orders, args.recent),
        monthly: monthly_series(&summary),
        summary,
    })
}

fn print_text(doc: &ReportDocument) {
    let s = &doc.summary;

    println!(
        "Range: {} ({} to {})",
        doc.range,
        fmt_day(doc.start),
        fmt_day(doc.end)
    );
    println!("Last synced: {}", fmt_timestamp(doc.last_updated));
    println!();
    println!("Total spent:       {}", fmt_money(s.total_spent));
    println!("Orders:            {}", s.order_count);
    println!("Average per order: {}", fmt_money(s.average_order_value));

    if !doc.monthly.is_empty() {
        println!();
        println!("{:<10}SPENT", "MONTH");
        for month in &doc.monthly {
            println!("{:<10}{}", month.month, fmt_money(month.spent));
        }
    }

    if s.order_count > 0 {
        println!();
        println!("{:<8}ORDERS", "HOUR");
        for (hour, count) in s.orders_by_hour.iter().enumerate() {
            if *count > 0 {
                println!("{:<8}{count}", format!("{hour}:00"));
            }
        }
    }

    if !doc.top_restaurants.is_empty() {
        println!();
        println!("{:<5}{:<32}{:>8}  SPENT", "#", "RESTAURANT", "ORDERS");
        for r in &doc.top_restaurants {
            println!(
                "{:<5}{:<32}{:>8}  {}",
                r.rank,
                truncate(&r.name, 30),
                r.count,
                fmt_money(r.spent)
            );
        }
    }

    if !doc.recent_orders.is_empty() {
        println!();
        println!("{:<12}{:<32}COST", "DATE", "RESTAURANT");
        for order in &doc.recent_orders {
            let date = if order.has_epoch_date() {
                "unknown".to_owned()
            } else {
                fmt_day(order.order_date)
            };
            println!(
                "{date:<12}{:<32}{}",
                truncate(&order.restaurant_name, 30),
                fmt_money(order.total_cost)
            );
        }
    }
}

fn fmt_money(amount: f64) -> String {
    format!("₹{amount:.0}")
}

fn fmt_day(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn fmt_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars.saturating_sub(3)).collect::<String>())
    } else {
        text.to_owned()
    }
}
