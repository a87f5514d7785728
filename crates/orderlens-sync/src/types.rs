//! Upstream order records as they appear in a page payload.
//!
//! Observed order objects carry many fields; only three matter here:
//!
//! - `orderDate`: a display string such as `"June 01, 2024 at 09:22 PM"`.
//! - `totalCost`: usually a currency-formatted string (`"₹1,203.00"`), but
//!   some responses send a bare number.
//! - `resInfo.name`: the restaurant display name. `resInfo` is absent on some
//!   records (cancelled or legacy orders).
//!
//! Records are read leniently from `serde_json::Value`: a field with an
//! unexpected JSON type is treated as absent rather than failing the page.

use serde_json::Value;

/// The cost field in whichever JSON type the upstream sent it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCost {
    Number(f64),
    Text(String),
}

/// An upstream order reduced to the fields normalization reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOrder {
    pub order_date: Option<String>,
    pub total_cost: Option<RawCost>,
    /// `resInfo.name`; `None` when `resInfo` or its `name` is missing.
    pub restaurant_name: Option<String>,
}

impl RawOrder {
    /// Reads an order from one entry of a page payload. Never fails; a
    /// non-object value yields an order with every field absent.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let order_date = value
            .get("orderDate")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let total_cost = match value.get("totalCost") {
            Some(Value::Number(n)) => n.as_f64().map(RawCost::Number),
            Some(Value::String(s)) => Some(RawCost::Text(s.clone())),
            _ => None,
        };

        let restaurant_name = value
            .get("resInfo")
            .and_then(|info| info.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self {
            order_date,
            total_cost,
            restaurant_name,
        }
    }
}
