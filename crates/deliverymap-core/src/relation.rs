//! One selection's full computation: filter, route, assemble, aggregate.

use serde::Serialize;

use crate::join::{filter_selection, Selection};
use crate::network::{assemble_network, DeliveryNetwork};
use crate::records::{JoinedRecord, RoutedOrder};
use crate::trend::{aggregate_daily_orders, OrderTrend};

/// Warning shown when a selection matches no records.
pub const NO_DATA_WARNING: &str = "No data available for the selected filters.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationReport {
    pub selection: Selection,
    pub order_count: usize,
    /// `None` when no matched record had valid coordinates on both ends.
    pub network: Option<DeliveryNetwork>,
    pub trend: OrderTrend,
    pub skipped_invalid_coordinates: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelationOutcome {
    NoMatches,
    Ready(Box<RelationReport>),
}

/// Compute distances, splitting off records whose coordinates are unusable.
///
/// Returns the routed orders in input order and the number skipped.
#[must_use]
pub fn route_orders(records: &[JoinedRecord]) -> (Vec<RoutedOrder>, usize) {
    let routed: Vec<RoutedOrder> = records.iter().filter_map(RoutedOrder::from_record).collect();
    let skipped = records.len() - routed.len();
    (routed, skipped)
}

/// Run the whole pipeline for `selection` against the joined dataset.
#[must_use]
pub fn build_relation(records: &[JoinedRecord], selection: &Selection) -> RelationOutcome {
    let filtered = filter_selection(records, selection);
    if filtered.is_empty() {
        tracing::info!(
            zone = %selection.zone,
            restaurant = %selection.restaurant,
            "selection matched no orders"
        );
        return RelationOutcome::NoMatches;
    }

    let (routed, skipped_invalid_coordinates) = route_orders(&filtered);
    if skipped_invalid_coordinates > 0 {
        tracing::warn!(
            skipped = skipped_invalid_coordinates,
            zone = %selection.zone,
            restaurant = %selection.restaurant,
            "orders with invalid coordinates left off the delivery map"
        );
    }

    let network = match assemble_network(&routed) {
        Ok(network) => Some(network),
        Err(e) => {
            tracing::warn!(
                error = %e,
                restaurant = %selection.restaurant,
                "delivery map unavailable"
            );
            None
        }
    };

    let trend = aggregate_daily_orders(&filtered);

    tracing::debug!(
        orders = filtered.len(),
        days = trend.daily.len(),
        "relation computed"
    );

    RelationOutcome::Ready(Box::new(RelationReport {
        selection: selection.clone(),
        order_count: filtered.len(),
        network,
        trend,
        skipped_invalid_coordinates,
    }))
}
