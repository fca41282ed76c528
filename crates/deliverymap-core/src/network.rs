//! Restaurant/delivery node and edge sets for map rendering.

use serde::Serialize;
use thiserror::Error;

use crate::geo::Coordinate;
use crate::records::RoutedOrder;

/// Fixed zoom level for the delivery map.
pub const MAP_ZOOM: u8 = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("no routed orders to assemble into a delivery network")]
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantNode {
    pub position: Coordinate,
    pub name: String,
}

impl RestaurantNode {
    #[must_use]
    pub fn hover_text(&self) -> String {
        format!("Restaurant: {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryNode {
    pub position: Coordinate,
    pub order_id: String,
    /// The order timestamp exactly as it appeared in the export.
    pub order_date: Option<String>,
    pub distance_km: f64,
}

impl DeliveryNode {
    #[must_use]
    pub fn hover_text(&self) -> String {
        format!(
            "Order ID: {}\nDate: {}\nDistance: {:.2} km",
            self.order_id,
            self.order_date.as_deref().unwrap_or("unknown"),
            self.distance_km
        )
    }
}

/// A straight segment from a restaurant to one of its delivery points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub from: Coordinate,
    pub to: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryNetwork {
    pub restaurants: Vec<RestaurantNode>,
    pub deliveries: Vec<DeliveryNode>,
    pub edges: Vec<Edge>,
    pub center: Coordinate,
    pub zoom: u8,
}

/// Assemble restaurant nodes, delivery nodes, and edges from routed orders.
///
/// Restaurant nodes are deduplicated on (latitude, longitude, name) and keep
/// first-seen order. Deliveries and edges are one per input, in input order.
/// The map center is the mean of the restaurant node positions.
///
/// # Errors
///
/// Returns [`NetworkError::NoData`] if `orders` is empty.
pub fn assemble_network(orders: &[RoutedOrder]) -> Result<DeliveryNetwork, NetworkError> {
    if orders.is_empty() {
        return Err(NetworkError::NoData);
    }

    let mut restaurants: Vec<RestaurantNode> = Vec::new();
    let mut deliveries = Vec::with_capacity(orders.len());
    let mut edges = Vec::with_capacity(orders.len());

    for routed in orders {
        let name = &routed.record.restaurant.name;
        let position = routed.restaurant_position;
        let seen = restaurants
            .iter()
            .any(|node| node.position == position && node.name == *name);
        if !seen {
            restaurants.push(RestaurantNode {
                position,
                name: name.clone(),
            });
        }

        deliveries.push(DeliveryNode {
            position: routed.delivery_position,
            order_id: routed.record.order.order_id.clone(),
            order_date: routed.record.order.order_date.clone(),
            distance_km: routed.distance_km,
        });

        edges.push(Edge {
            from: position,
            to: routed.delivery_position,
        });
    }

    if restaurants.len() > 1 {
        tracing::debug!(
            nodes = restaurants.len(),
            "selection spans more than one restaurant coordinate"
        );
    }

    #[allow(clippy::cast_precision_loss)]
    let count = restaurants.len() as f64;
    let center = Coordinate {
        lat: restaurants.iter().map(|n| n.position.lat).sum::<f64>() / count,
        lon: restaurants.iter().map(|n| n.position.lon).sum::<f64>() / count,
    };

    Ok(DeliveryNetwork {
        restaurants,
        deliveries,
        edges,
        center,
        zoom: MAP_ZOOM,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{JoinedRecord, OrderRecord, RestaurantRecord};

    fn routed(
        order_id: &str,
        name: &str,
        restaurant: (f64, f64),
        delivery: (f64, f64),
    ) -> RoutedOrder {
        let record = JoinedRecord {
            order: OrderRecord {
                order_id: order_id.to_string(),
                branch_id: "1".to_string(),
                order_date: Some("2024-01-01 10:00:00".to_string()),
                delivery_latitude: Some(delivery.0),
                delivery_longitude: Some(delivery.1),
            },
            restaurant: RestaurantRecord {
                id: "1".to_string(),
                name: name.to_string(),
                zone_name: "Clifton".to_string(),
                latitude: Some(restaurant.0),
                longitude: Some(restaurant.1),
            },
        };
        RoutedOrder::from_record(&record).expect("valid coordinates")
    }

    #[test]
    fn empty_input_is_no_data() {
        assert_eq!(assemble_network(&[]), Err(NetworkError::NoData));
    }

    #[test]
    fn shared_restaurant_yields_single_node() {
        let origin = (24.8600, 67.0000);
        let orders = vec![
            routed("o1", "Burger Hub", origin, (24.8700, 67.0100)),
            routed("o2", "Burger Hub", origin, (24.8500, 67.0200)),
            routed("o3", "Burger Hub", origin, (24.8800, 66.9900)),
        ];
        let network = assemble_network(&orders).unwrap();
        assert_eq!(network.restaurants.len(), 1);
        assert_eq!(network.deliveries.len(), 3);
        assert_eq!(network.edges.len(), 3);
        assert_eq!(network.center, Coordinate { lat: 24.86, lon: 67.0 });
        assert_eq!(network.zoom, MAP_ZOOM);
    }

    #[test]
    fn edges_connect_restaurant_to_each_delivery() {
        let orders = vec![
            routed("o1", "Burger Hub", (0.0, 0.0), (0.0, 1.0)),
            routed("o2", "Burger Hub", (0.0, 0.0), (1.0, 0.0)),
        ];
        let network = assemble_network(&orders).unwrap();
        for (edge, delivery) in network.edges.iter().zip(&network.deliveries) {
            assert_eq!(edge.from, network.restaurants[0].position);
            assert_eq!(edge.to, delivery.position);
        }
        assert_eq!(network.deliveries[0].distance_km, 111.19);
        assert_eq!(network.deliveries[1].order_id, "o2");
    }

    #[test]
    fn distinct_restaurant_coordinates_are_kept_and_averaged() {
        let orders = vec![
            routed("o1", "Burger Hub", (10.0, 20.0), (10.1, 20.1)),
            routed("o2", "Burger Hub", (12.0, 22.0), (12.1, 22.1)),
            routed("o3", "Burger Hub", (10.0, 20.0), (10.2, 20.2)),
        ];
        let network = assemble_network(&orders).unwrap();
        assert_eq!(network.restaurants.len(), 2);
        assert_eq!(network.center, Coordinate { lat: 11.0, lon: 21.0 });
    }

    #[test]
    fn same_coordinate_different_name_is_a_separate_node() {
        let orders = vec![
            routed("o1", "Burger Hub", (10.0, 20.0), (10.1, 20.1)),
            routed("o2", "Burger Hub Express", (10.0, 20.0), (10.2, 20.2)),
        ];
        let network = assemble_network(&orders).unwrap();
        assert_eq!(network.restaurants.len(), 2);
    }

    #[test]
    fn signed_zero_latitude_is_the_same_restaurant() {
        let orders = vec![
            routed("o1", "Burger Hub", (0.0, 20.0), (0.1, 20.1)),
            routed("o2", "Burger Hub", (-0.0, 20.0), (0.2, 20.2)),
        ];
        let network = assemble_network(&orders).unwrap();
        assert_eq!(network.restaurants.len(), 1);
        assert_eq!(network.deliveries.len(), 2);
    }

    #[test]
    fn hover_distance_keeps_two_decimals() {
        let network =
            assemble_network(&[routed("o5", "Burger Hub", (0.0, 0.0), (0.0, 0.0))]).unwrap();
        assert!(network.deliveries[0].hover_text().ends_with("Distance: 0.00 km"));
    }

    #[test]
    fn assembler_leaves_input_untouched() {
        let orders = vec![routed("o1", "Burger Hub", (0.0, 0.0), (0.0, 1.0))];
        let before = orders.clone();
        let _ = assemble_network(&orders).unwrap();
        assert_eq!(orders, before);
    }

    #[test]
    fn hover_text_carries_order_metadata() {
        let network =
            assemble_network(&[routed("o9", "Burger Hub", (0.0, 0.0), (0.0, 1.0))]).unwrap();
        assert_eq!(network.restaurants[0].hover_text(), "Restaurant: Burger Hub");
        assert_eq!(
            network.deliveries[0].hover_text(),
            "Order ID: o9\nDate: 2024-01-01 10:00:00\nDistance: 111.19 km"
        );
    }
}
