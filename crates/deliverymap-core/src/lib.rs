pub mod app_config;
pub mod config;
pub mod geo;
pub mod join;
pub mod network;
pub mod records;
pub mod relation;
pub mod trend;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{
    batch_distance_km, distance_km, haversine_km, round_km, Coordinate, GeoError,
    EARTH_RADIUS_KM, MAX_DISTANCE_KM,
};
pub use join::{filter_selection, join_records, restaurants_in_zone, zones, Selection};
pub use network::{
    assemble_network, DeliveryNetwork, DeliveryNode, Edge, NetworkError, RestaurantNode, MAP_ZOOM,
};
pub use records::{JoinedRecord, OrderRecord, RestaurantRecord, RoutedOrder};
pub use relation::{build_relation, route_orders, RelationOutcome, RelationReport, NO_DATA_WARNING};
pub use trend::{aggregate_daily_orders, parse_order_date, DailyOrderCount, OrderTrend};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
