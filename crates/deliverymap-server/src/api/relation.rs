//! The "show relation" endpoint: map layers, summary, and daily trend for
//! one zone + restaurant selection.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use deliverymap_core::{
    Coordinate, DeliveryNetwork, RelationOutcome, RelationReport, Selection, NO_DATA_WARNING,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

const MAP_STYLE: &str = "open-street-map";

const RESTAURANT_STYLE: LayerStyle = LayerStyle {
    symbol: "star",
    size: 14,
    color: "blue",
};

const DELIVERY_STYLE: LayerStyle = LayerStyle {
    symbol: "circle",
    size: 10,
    color: "green",
};

const EDGE_STYLE: LayerStyle = LayerStyle {
    symbol: "line",
    size: 2,
    color: "gray",
};

#[derive(Debug, Deserialize)]
pub(super) struct RelationQuery {
    pub zone: Option<String>,
    pub restaurant: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(super) struct LayerStyle {
    symbol: &'static str,
    size: u8,
    color: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct Marker {
    lat: f64,
    lon: f64,
    hover_text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DeliveryMarker {
    lat: f64,
    lon: f64,
    order_id: String,
    order_date: Option<String>,
    distance_km: f64,
    hover_text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct MarkerLayer<T: Serialize> {
    name: &'static str,
    style: LayerStyle,
    markers: Vec<T>,
}

#[derive(Debug, Serialize)]
pub(super) struct EdgeLayer {
    style: LayerStyle,
    segments: Vec<[Coordinate; 2]>,
}

#[derive(Debug, Serialize)]
pub(super) struct MapView {
    style: &'static str,
    center: Coordinate,
    zoom: u8,
    edges: EdgeLayer,
    restaurants: MarkerLayer<Marker>,
    deliveries: MarkerLayer<DeliveryMarker>,
}

#[derive(Debug, Serialize)]
pub(super) struct RelationSummary {
    zone: String,
    restaurant: String,
    order_count: usize,
    average_daily_orders: f64,
    average_daily_orders_display: String,
    unparsed_dates: usize,
    skipped_invalid_coordinates: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct TrendPoint {
    date: NaiveDate,
    orders: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub(super) enum RelationData {
    Empty {
        warning: &'static str,
    },
    Ready {
        map: Option<MapView>,
        summary: RelationSummary,
        trend: Vec<TrendPoint>,
    },
}

impl From<&DeliveryNetwork> for MapView {
    fn from(network: &DeliveryNetwork) -> Self {
        Self {
            style: MAP_STYLE,
            center: network.center,
            zoom: network.zoom,
            edges: EdgeLayer {
                style: EDGE_STYLE,
                segments: network.edges.iter().map(|e| [e.from, e.to]).collect(),
            },
            restaurants: MarkerLayer {
                name: "Restaurant",
                style: RESTAURANT_STYLE,
                markers: network
                    .restaurants
                    .iter()
                    .map(|node| Marker {
                        lat: node.position.lat,
                        lon: node.position.lon,
                        hover_text: node.hover_text(),
                    })
                    .collect(),
            },
            deliveries: MarkerLayer {
                name: "Delivery",
                style: DELIVERY_STYLE,
                markers: network
                    .deliveries
                    .iter()
                    .map(|node| DeliveryMarker {
                        lat: node.position.lat,
                        lon: node.position.lon,
                        order_id: node.order_id.clone(),
                        order_date: node.order_date.clone(),
                        distance_km: node.distance_km,
                        hover_text: node.hover_text(),
                    })
                    .collect(),
            },
        }
    }
}

impl From<RelationReport> for RelationData {
    fn from(report: RelationReport) -> Self {
        let summary = RelationSummary {
            zone: report.selection.zone,
            restaurant: report.selection.restaurant,
            order_count: report.order_count,
            average_daily_orders: report.trend.average_daily_orders,
            average_daily_orders_display: report.trend.average_display(),
            unparsed_dates: report.trend.unparsed_dates,
            skipped_invalid_coordinates: report.skipped_invalid_coordinates,
        };
        let trend = report
            .trend
            .daily
            .iter()
            .map(|d| TrendPoint {
                date: d.date,
                orders: d.orders,
            })
            .collect();

        RelationData::Ready {
            map: report.network.as_ref().map(MapView::from),
            summary,
            trend,
        }
    }
}

pub(super) async fn get_relation(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RelationQuery>,
) -> Result<Json<ApiResponse<RelationData>>, ApiError> {
    let Some(selection) =
        Selection::from_parts(query.zone.as_deref(), query.restaurant.as_deref())
    else {
        return Err(ApiError::new(
            req_id.0,
            "missing_selection",
            "both zone and restaurant must be selected",
        ));
    };

    let data = match state.dataset.relation(&selection) {
        RelationOutcome::NoMatches => RelationData::Empty {
            warning: NO_DATA_WARNING,
        },
        RelationOutcome::Ready(report) => RelationData::from(*report),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
