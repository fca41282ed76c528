//! Typed order, restaurant, and joined records.
//!
//! Field renames match the column headers of the source CSV exports.

use serde::{Deserialize, Deserializer};

use crate::geo::{distance_km, Coordinate};

/// One delivered order, as read from the orders export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "OrderId")]
    pub order_id: String,
    #[serde(rename = "BranchId")]
    pub branch_id: String,
    /// Raw timestamp text; parsed leniently by the trend aggregator.
    #[serde(default, deserialize_with = "non_blank_string")]
    pub order_date: Option<String>,
    #[serde(rename = "DeliveryLat", default, deserialize_with = "lenient_f64")]
    pub delivery_latitude: Option<f64>,
    #[serde(rename = "DeliveryLong", default, deserialize_with = "lenient_f64")]
    pub delivery_longitude: Option<f64>,
}

/// One restaurant branch, as read from the restaurants export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RestaurantRecord {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ZoneName")]
    pub zone_name: String,
    #[serde(rename = "Latitude", default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

impl RestaurantRecord {
    #[must_use]
    pub fn position(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

/// An order paired with the restaurant that fulfilled it.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub order: OrderRecord,
    pub restaurant: RestaurantRecord,
}

impl JoinedRecord {
    #[must_use]
    pub fn delivery_position(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.order.delivery_latitude, self.order.delivery_longitude)
    }
}

/// A joined record with valid endpoints and its computed distance.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedOrder {
    pub record: JoinedRecord,
    pub restaurant_position: Coordinate,
    pub delivery_position: Coordinate,
    pub distance_km: f64,
}

impl RoutedOrder {
    /// Returns `None` if either endpoint has a missing or invalid coordinate.
    #[must_use]
    pub fn from_record(record: &JoinedRecord) -> Option<Self> {
        let restaurant_position = record.restaurant.position()?;
        let delivery_position = record.delivery_position()?;
        let distance_km = distance_km(
            restaurant_position.lat,
            restaurant_position.lon,
            delivery_position.lat,
            delivery_position.lon,
        )?;
        Some(Self {
            record: record.clone(),
            restaurant_position,
            delivery_position,
            distance_km,
        })
    }
}

/// Parses a numeric cell, mapping blanks and garbage to `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<f64>().ok()))
}

fn non_blank_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
