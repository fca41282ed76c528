use std::path::Path;
use std::sync::Arc;

use deliverymap_core::{
    build_relation, join_records, restaurants_in_zone, zones, AppConfig, JoinedRecord,
    OrderRecord, RelationOutcome, RestaurantRecord, Selection,
};
use serde::Serialize;

use crate::source::{load_orders, load_restaurants};
use crate::DataError;

/// The joined order/restaurant snapshot, loaded once per process.
///
/// Immutable after construction; share it as `Arc<Dataset>` rather than
/// reloading per request.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<JoinedRecord>,
    stats: DatasetStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub orders: usize,
    pub restaurants: usize,
    pub joined: usize,
}

impl Dataset {
    /// Join already-parsed records into a dataset.
    #[must_use]
    pub fn from_records(orders: &[OrderRecord], restaurants: &[RestaurantRecord]) -> Self {
        let records = join_records(orders, restaurants);
        let stats = DatasetStats {
            orders: orders.len(),
            restaurants: restaurants.len(),
            joined: records.len(),
        };
        tracing::info!(
            orders = stats.orders,
            restaurants = stats.restaurants,
            joined = stats.joined,
            "dataset ready"
        );
        Self { records, stats }
    }

    /// Load both exports from disk and join them.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if either file cannot be opened or parsed.
    pub fn load(orders_path: &Path, restaurants_path: &Path) -> Result<Self, DataError> {
        let restaurants = load_restaurants(restaurants_path)?;
        let orders = load_orders(orders_path)?;
        Ok(Self::from_records(&orders, &restaurants))
    }

    /// Load the exports named in `config` into a shareable handle.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if either file cannot be opened or parsed.
    pub fn load_shared(config: &AppConfig) -> Result<Arc<Self>, DataError> {
        Self::load(&config.orders_path, &config.restaurants_path).map(Arc::new)
    }

    #[must_use]
    pub fn records(&self) -> &[JoinedRecord] {
        &self.records
    }

    #[must_use]
    pub fn stats(&self) -> DatasetStats {
        self.stats
    }

    #[must_use]
    pub fn zones(&self) -> Vec<String> {
        zones(&self.records)
    }

    #[must_use]
    pub fn restaurants_in_zone(&self, zone: &str) -> Vec<String> {
        restaurants_in_zone(&self.records, zone)
    }

    #[must_use]
    pub fn relation(&self, selection: &Selection) -> RelationOutcome {
        build_relation(&self.records, selection)
    }
}
