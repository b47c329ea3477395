//! `/api/events`
//!
//! Served from the booking listing, the same upstream resource as
//! `/api/appointments`. Kept as its own route so the two can be split if
//! Holded ever exposes events separately.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::Value;

use super::{ApiError, ListQuery, RestState};

pub(super) const LIST: &str = "get_bookings";

pub(super) async fn list(
    State(state): State<RestState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.call(LIST, query.into_arguments()).await?))
}
