//! CSV readers for the orders and restaurants exports.
//!
//! Columns the record types do not name are ignored, so exports may carry
//! any number of extra (or entirely empty) columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use deliverymap_core::{OrderRecord, RestaurantRecord};
use serde::de::DeserializeOwned;

use crate::DataError;

/// Read order rows from any CSV source.
///
/// # Errors
///
/// Returns [`DataError::Csv`] if a required column is missing or a row is
/// structurally malformed.
pub fn read_orders<R: Read>(reader: R) -> Result<Vec<OrderRecord>, DataError> {
    read_rows(reader, "orders")
}

/// Read restaurant rows from any CSV source.
///
/// # Errors
///
/// Returns [`DataError::Csv`] if a required column is missing or a row is
/// structurally malformed.
pub fn read_restaurants<R: Read>(reader: R) -> Result<Vec<RestaurantRecord>, DataError> {
    read_rows(reader, "restaurants")
}

/// Load the orders export from disk.
///
/// # Errors
///
/// Returns [`DataError::Io`] if the file cannot be opened, or
/// [`DataError::Csv`] if it cannot be parsed.
pub fn load_orders(path: &Path) -> Result<Vec<OrderRecord>, DataError> {
    let orders = read_orders(open(path)?)?;
    tracing::info!(path = %path.display(), rows = orders.len(), "loaded orders");
    Ok(orders)
}

/// Load the restaurants export from disk.
///
/// # Errors
///
/// Returns [`DataError::Io`] if the file cannot be opened, or
/// [`DataError::Csv`] if it cannot be parsed.
pub fn load_restaurants(path: &Path) -> Result<Vec<RestaurantRecord>, DataError> {
    let restaurants = read_restaurants(open(path)?)?;
    tracing::info!(path = %path.display(), rows = restaurants.len(), "loaded restaurants");
    Ok(restaurants)
}

fn open(path: &Path) -> Result<File, DataError> {
    File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn read_rows<R, T>(reader: R, context: &str) -> Result<Vec<T>, DataError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    csv_reader
        .deserialize::<T>()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|e| DataError::Csv {
            context: context.to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_orders_ignoring_extra_columns() {
        let csv = "\
OrderId,BranchId,CustomerName,order_date,DeliveryLat,DeliveryLong,Unused
1001,10,Ali,2024-01-01 11:15:00,24.82,67.04,
1002,10,Sara,,24.80,not-a-number,
";
        let orders = read_orders(csv.as_bytes()).expect("parse orders");
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id, "1001");
        assert_eq!(orders[0].branch_id, "10");
        assert_eq!(orders[0].order_date.as_deref(), Some("2024-01-01 11:15:00"));
        assert_eq!(orders[0].delivery_longitude, Some(67.04));
        assert_eq!(orders[1].order_date, None);
        assert_eq!(orders[1].delivery_latitude, Some(24.80));
        assert_eq!(orders[1].delivery_longitude, None);
    }

    #[test]
    fn reads_restaurants_with_trimmed_cells() {
        let csv = "\
id,Name,ZoneName,Latitude,Longitude,Phone
 10 , Burger Hub ,Clifton, 24.8138 ,67.0300,
";
        let restaurants = read_restaurants(csv.as_bytes()).expect("parse restaurants");
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].id, "10");
        assert_eq!(restaurants[0].name, "Burger Hub");
        assert_eq!(restaurants[0].latitude, Some(24.8138));
    }

    #[test]
    fn missing_coordinate_columns_load_as_none() {
        let csv = "OrderId,BranchId\n1001,10\n";
        let orders = read_orders(csv.as_bytes()).expect("parse orders");
        assert_eq!(orders[0].order_date, None);
        assert_eq!(orders[0].delivery_latitude, None);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "OrderId,order_date\n1001,2024-01-01\n";
        let err = read_orders(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Csv { ref context, .. } if context == "orders"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_orders(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { ref path, .. } if path == "/definitely/not/here.csv"));
    }
}
