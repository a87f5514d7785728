//! `orderlens status`: what is stored and when it was synced.

use chrono::{Local, Utc};
use orderlens_core::{AppConfig, OrderSnapshot};
use orderlens_store::{JsonFileStore, OrderStore};

/// Prints the stored snapshot's size and age.
///
/// # Errors
///
/// Returns an error if the store exists but cannot be read or decoded.
pub(crate) fn run_status(config: &AppConfig) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&config.store_path);
    println!("store:    {}", config.store_path.display());
    println!("endpoint: {}", config.orders_endpoint);
    println!(
        "session:  {}",
        if config.session_cookie.is_some() {
            "cookie configured"
        } else {
            "no cookie configured"
        }
    );

    match store.load()? {
        Some(snapshot) => {
            for line in describe(&snapshot) {
                println!("{line}");
            }
        }
        None => println!("never synced; run `orderlens sync`"),
    }
    Ok(())
}

pub(crate) fn describe(snapshot: &OrderSnapshot) -> Vec<String> {
    let age = Utc::now().signed_duration_since(snapshot.last_updated);
    let undated = snapshot.orders.iter().filter(|o| o.has_epoch_date()).count();

    let mut lines = vec![
        format!("orders:   {}", snapshot.order_count()),
        format!(
            "synced:   {} ({} ago)",
            snapshot
                .last_updated
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M"),
            fmt_age(age.num_minutes())
        ),
    ];
    if undated > 0 {
        lines.push(format!("undated:  {undated} order(s) without a readable date"));
    }
    lines
}

fn fmt_age(minutes: i64) -> String {
    match minutes {
        m if m < 1 => "less than a minute".to_owned(),
        m if m < 60 => format!("{m} min"),
        m if m < 60 * 24 => format!("{} h", m / 60),
        m => format!("{} d", m / (60 * 24)),
    }
}
