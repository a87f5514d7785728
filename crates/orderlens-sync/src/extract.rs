//! Locates the order list inside one page payload.
//!
//! The order history endpoint is undocumented and has returned three different
//! layouts over time:
//!
//! 1. `entities.ORDER`: a map of order id → order.
//! 2. `entities.ORDERS`: the same map under a pluralized key.
//! 3. `sections.SECTION_USER_ORDER_HISTORY.entities`: a list of orders, with
//!    an optional sibling `totalPages`.
//!
//! Shapes are checked in that order and the first one present wins, even if
//! it holds no orders. Anything else is [`PageShape::Unrecognized`], which
//! reads as "no orders on this page" rather than an error.

use serde_json::Value;

use crate::types::RawOrder;

const ENTITY_ORDER_PATH: &str = "/entities/ORDER";
const ENTITY_ORDERS_PATH: &str = "/entities/ORDERS";
const SECTION_ENTITIES_PATH: &str = "/sections/SECTION_USER_ORDER_HISTORY/entities";
const SECTION_TOTAL_PAGES_PATH: &str = "/sections/SECTION_USER_ORDER_HISTORY/totalPages";

/// The known payload layouts, each carrying the orders it yielded.
#[derive(Debug, Clone, PartialEq)]
pub enum PageShape {
    EntityOrder(Vec<RawOrder>),
    EntityOrders(Vec<RawOrder>),
    SectionHistory(Vec<RawOrder>),
    Unrecognized,
}

impl PageShape {
    /// Short label for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PageShape::EntityOrder(_) => "entities.ORDER",
            PageShape::EntityOrders(_) => "entities.ORDERS",
            PageShape::SectionHistory(_) => "sections.SECTION_USER_ORDER_HISTORY",
            PageShape::Unrecognized => "unrecognized",
        }
    }

    #[must_use]
    pub fn into_orders(self) -> Vec<RawOrder> {
        match self {
            PageShape::EntityOrder(orders)
            | PageShape::EntityOrders(orders)
            | PageShape::SectionHistory(orders) => orders,
            PageShape::Unrecognized => Vec::new(),
        }
    }
}

/// Classifies `payload` by checking the known shapes in priority order.
#[must_use]
pub fn classify(payload: &Value) -> PageShape {
    if let Some(orders) = payload.pointer(ENTITY_ORDER_PATH).and_then(collect_orders) {
        return PageShape::EntityOrder(orders);
    }
    if let Some(orders) = payload.pointer(ENTITY_ORDERS_PATH).and_then(collect_orders) {
        return PageShape::EntityOrders(orders);
    }
    if let Some(orders) = payload
        .pointer(SECTION_ENTITIES_PATH)
        .and_then(collect_orders)
    {
        return PageShape::SectionHistory(orders);
    }
    PageShape::Unrecognized
}

/// Returns the orders in `payload`, or an empty list if no known shape matches.
#[must_use]
pub fn extract(payload: &Value) -> Vec<RawOrder> {
    classify(payload).into_orders()
}

/// Reads the explicit page count carried by the section layout.
///
/// Only a positive integer counts as a hint; zero, negative, or non-numeric
/// values are ignored.
#[must_use]
pub fn total_pages_hint(payload: &Value) -> Option<u32> {
    let raw = payload.pointer(SECTION_TOTAL_PAGES_PATH)?;
    let total = match raw {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(total).ok().filter(|t| *t > 0)
}

/// Map values (in key order) or list elements; `None` for anything else.
fn collect_orders(container: &Value) -> Option<Vec<RawOrder>> {
    match container {
        Value::Object(map) => Some(map.values().map(RawOrder::from_value).collect()),
        Value::Array(items) => Some(items.iter().map(RawOrder::from_value).collect()),
        _ => None,
    }
}
