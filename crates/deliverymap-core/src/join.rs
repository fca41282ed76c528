//! Inner join of orders onto restaurants, and zone/restaurant selection.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::records::{JoinedRecord, OrderRecord, RestaurantRecord};

/// A zone + restaurant pair chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub zone: String,
    pub restaurant: String,
}

impl Selection {
    #[must_use]
    pub fn new(zone: impl Into<String>, restaurant: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            restaurant: restaurant.into(),
        }
    }

    /// Returns `None` until both parts are chosen; blank counts as unchosen.
    #[must_use]
    pub fn from_parts(zone: Option<&str>, restaurant: Option<&str>) -> Option<Self> {
        let zone = zone.filter(|z| !z.trim().is_empty())?;
        let restaurant = restaurant.filter(|r| !r.trim().is_empty())?;
        Some(Self::new(zone, restaurant))
    }

    fn matches(&self, record: &JoinedRecord) -> bool {
        record.restaurant.zone_name == self.zone && record.restaurant.name == self.restaurant
    }
}

/// Inner join on `order.branch_id == restaurant.id`, preserving order-file order.
///
/// Orders with no matching restaurant are dropped. A restaurant id that
/// appears more than once produces one joined record per match.
#[must_use]
pub fn join_records(orders: &[OrderRecord], restaurants: &[RestaurantRecord]) -> Vec<JoinedRecord> {
    let mut by_id: HashMap<&str, Vec<&RestaurantRecord>> = HashMap::new();
    for restaurant in restaurants {
        by_id.entry(restaurant.id.as_str()).or_default().push(restaurant);
    }

    for (id, matches) in &by_id {
        if matches.len() > 1 {
            tracing::warn!(restaurant_id = %id, count = matches.len(), "duplicate restaurant id");
        }
    }

    let mut unmatched = 0_usize;
    let mut joined = Vec::with_capacity(orders.len());
    for order in orders {
        match by_id.get(order.branch_id.as_str()) {
            Some(matches) => joined.extend(matches.iter().map(|restaurant| JoinedRecord {
                order: order.clone(),
                restaurant: (*restaurant).clone(),
            })),
            None => unmatched += 1,
        }
    }

    if unmatched > 0 {
        tracing::debug!(unmatched, "orders without a matching restaurant were dropped");
    }

    joined
}

/// Keep only records whose restaurant matches both selectors exactly.
#[must_use]
pub fn filter_selection(records: &[JoinedRecord], selection: &Selection) -> Vec<JoinedRecord> {
    records
        .iter()
        .filter(|record| selection.matches(record))
        .cloned()
        .collect()
}

/// Distinct zone names, sorted.
#[must_use]
pub fn zones(records: &[JoinedRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.restaurant.zone_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct restaurant names within `zone`, sorted.
#[must_use]
pub fn restaurants_in_zone(records: &[JoinedRecord], zone: &str) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.restaurant.zone_name == zone)
        .map(|r| r.restaurant.name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
