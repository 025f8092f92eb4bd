//! Grouping of orders that can travel together.
//!
//! Orders are batched when they share an origin, a destination, and a time
//! window measured in whole hours.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{CargoClass, NodeId};

/// Window used when the caller doesn't give one.
pub const DEFAULT_WINDOW_MINUTES: u32 = 120;

/// When an order was placed, as ISO-8601 with or without an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderTime {
    Offset(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

impl OrderTime {
    /// Hour of day in the timestamp's own offset.
    pub fn hour(&self) -> u32 {
        match self {
            OrderTime::Offset(ts) => ts.hour(),
            OrderTime::Local(ts) => ts.hour(),
        }
    }
}

/// An order waiting to be dispatched.
///
/// Fields that aren't modelled are kept in `extra` and written back out
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    pub origin_id: NodeId,
    pub destination_id: NodeId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_m3: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_class: Option<CargoClass>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_delivery: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<OrderTime>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    pub fn new(origin_id: NodeId, destination_id: NodeId) -> Self {
        Self {
            order_id: None,
            origin_id,
            destination_id,
            weight_kg: None,
            volume_m3: None,
            cargo_class: None,
            required_delivery: None,
            ts: None,
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn placed_at(mut self, ts: NaiveDateTime) -> Self {
        self.ts = Some(OrderTime::Local(ts));
        self
    }

    /// Hour of day the order was placed; 0 when unknown.
    pub fn hour(&self) -> u32 {
        self.ts.as_ref().map_or(0, OrderTime::hour)
    }
}

/// Start hour of the window containing `hour`.
///
/// Windows shorter than an hour are treated as one hour.
pub fn window_start(hour: u32, window_minutes: u32) -> u32 {
    let width = (window_minutes / 60).max(1);
    hour - hour % width
}

/// Group orders by origin, destination and time window.
///
/// Groups come out in the order their first member was seen, and orders
/// keep their input order within a group.
pub fn batch_orders(orders: Vec<Order>, window_minutes: u32) -> Vec<Vec<Order>> {
    let mut batches: IndexMap<(NodeId, NodeId, u32), Vec<Order>> = IndexMap::new();

    for order in orders {
        let key = (
            order.origin_id.clone(),
            order.destination_id.clone(),
            window_start(order.hour(), window_minutes),
        );
        batches.entry(key).or_default().push(order);
    }

    batches.into_values().collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn order_strategy() -> impl Strategy<Value = (usize, usize, Option<u32>)> {
        (0usize..4, 0usize..4, prop::option::of(0u32..24))
    }

    proptest! {
        /// Batching neither drops nor duplicates orders
        #[test]
        fn batching_is_a_partition(
            specs in prop::collection::vec(order_strategy(), 0..40),
            window in 0u32..600,
        ) {
            let orders: Vec<Order> = specs
                .iter()
                .enumerate()
                .map(|(i, &(o, d, hour))| {
                    let order = Order::new(
                        NodeId::parse(&format!("N{o}")).unwrap(),
                        NodeId::parse(&format!("N{d}")).unwrap(),
                    )
                    .with_id(i.to_string());
                    match hour {
                        Some(h) => order.placed_at(
                            chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                                .unwrap()
                                .and_hms_opt(h, 0, 0)
                                .unwrap(),
                        ),
                        None => order,
                    }
                })
                .collect();

            let batches = batch_orders(orders.clone(), window);

            let total: usize = batches.iter().map(Vec::len).sum();
            prop_assert_eq!(total, orders.len());

            for batch in &batches {
                prop_assert!(!batch.is_empty());
                let first = &batch[0];
                for o in batch {
                    prop_assert_eq!(&o.origin_id, &first.origin_id);
                    prop_assert_eq!(&o.destination_id, &first.destination_id);
                    prop_assert_eq!(
                        window_start(o.hour(), window),
                        window_start(first.hour(), window)
                    );
                }

                // Input order is kept within a batch
                let ids: Vec<usize> = batch
                    .iter()
                    .filter_map(|o| o.order_id.as_deref()?.parse().ok())
                    .collect();
                prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
