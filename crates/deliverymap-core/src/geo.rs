//! Great-circle distance between restaurant and delivery coordinates.
//!
//! Distances use the haversine formula on a spherical Earth. Inputs that are
//! not finite or fall outside the latitude/longitude ranges yield `None`
//! instead of a NaN distance.

use std::f64::consts::PI;

use serde::Serialize;
use thiserror::Error;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Half the circumference: the distance between antipodal points.
pub const MAX_DISTANCE_KM: f64 = PI * EARTH_RADIUS_KM;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeoError {
    #[error("origin columns differ in length: {lats} latitudes vs {lons} longitudes")]
    OriginLengthMismatch { lats: usize, lons: usize },

    #[error("coordinate batches differ in length: {origins} origins vs {destinations} destinations")]
    LengthMismatch { origins: usize, destinations: usize },
}

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Returns `None` unless both values are finite and within range.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Self { lat, lon })
    }

    /// Builds a coordinate from optional parts, as read from a CSV cell.
    #[must_use]
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        Self::new(lat?, lon?)
    }
}

/// Unrounded haversine distance in kilometers.
#[must_use]
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.lon - from.lon).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to 2 decimal places.
#[must_use]
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Distance between two raw coordinate pairs, rounded to 2 decimals.
///
/// Returns `None` when any of the four inputs is invalid.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Option<f64> {
    let from = Coordinate::new(lat1, lon1)?;
    let to = Coordinate::new(lat2, lon2)?;
    Some(round_km(haversine_km(from, to)))
}

/// Pairwise distances over parallel coordinate columns.
///
/// A standalone column API for callers holding plain latitude/longitude
/// vectors; the relation pipeline routes typed records one at a time through
/// [`distance_km`] instead. Each output element depends only on the inputs at
/// the same index.
///
/// # Errors
///
/// Returns [`GeoError::OriginLengthMismatch`] if the origin columns differ in
/// length, or [`GeoError::LengthMismatch`] if the destination columns do not
/// match the origin count.
pub fn batch_distance_km(
    origin_lats: &[f64],
    origin_lons: &[f64],
    dest_lats: &[f64],
    dest_lons: &[f64],
) -> Result<Vec<Option<f64>>, GeoError> {
    let origins = origin_lats.len();
    if origin_lons.len() != origins {
        return Err(GeoError::OriginLengthMismatch {
            lats: origins,
            lons: origin_lons.len(),
        });
    }
    if dest_lats.len() != origins || dest_lons.len() != origins {
        return Err(GeoError::LengthMismatch {
            origins,
            destinations: dest_lats.len().max(dest_lons.len()),
        });
    }

    Ok(origin_lats
        .iter()
        .zip(origin_lons)
        .zip(dest_lats.iter().zip(dest_lons))
        .map(|((&lat1, &lon1), (&lat2, &lon2))| distance_km(lat1, lon1, lat2, lon2))
        .collect())
}
