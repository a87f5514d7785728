//! Spending analytics over a synced order collection.
//!
//! Everything here is a pure function of its inputs. Calendar grouping
//! (month buckets, hour of day, range presets) uses the process-local
//! timezone.

pub mod aggregate;
pub mod range;
pub mod views;

pub use aggregate::{aggregate, AggregateReport, RestaurantTotal};
pub use range::{filter_range, DateWindow, RangePreset};
pub use views::{
    monthly_series, recent_orders, top_restaurants, MonthlySpend, RankedRestaurant,
    DEFAULT_RECENT_ORDERS, DEFAULT_TOP_RESTAURANTS,
};
