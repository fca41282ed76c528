use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ZoneRestaurantsData {
    pub zone: String,
    pub restaurants: Vec<String>,
}

pub(super) async fn list_zones(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse {
        data: state.dataset.zones(),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn list_zone_restaurants(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(zone): Path<String>,
) -> Result<Json<ApiResponse<ZoneRestaurantsData>>, ApiError> {
    let restaurants = state.dataset.restaurants_in_zone(&zone);
    if restaurants.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("zone '{zone}' has no restaurants with orders"),
        ));
    }

    Ok(Json(ApiResponse {
        data: ZoneRestaurantsData { zone, restaurants },
        meta: ResponseMeta::new(req_id.0),
    }))
}
