//! `/api/appointments` - appointments are Holded bookings.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use tracing::instrument;

use super::validation::check_appointment;
use super::{ApiError, ListQuery, RestState, object_body, with_id};

pub(super) const LIST: &str = "get_bookings";
pub(super) const GET: &str = "get_booking";
pub(super) const CREATE: &str = "create_booking";
pub(super) const UPDATE: &str = "update_booking";
pub(super) const DELETE: &str = "delete_booking";

const ID_FIELD: &str = "bookingId";

pub(super) async fn list(
    State(state): State<RestState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.call(LIST, query.into_arguments()).await?))
}

pub(super) async fn get_one(
    State(state): State<RestState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.find(GET, ID_FIELD, id, "Appointment").await?))
}

#[instrument(skip_all)]
pub(super) async fn create(
    State(state): State<RestState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let body = object_body(body)?;
    state.check(CREATE, &body, check_appointment(&body))?;
    let created = state.call(CREATE, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip_all)]
pub(super) async fn update(
    State(state): State<RestState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let arguments = with_id(object_body(body)?, ID_FIELD, id);
    state.check(UPDATE, &arguments, check_appointment(&arguments))?;
    Ok(Json(state.call(UPDATE, arguments).await?))
}

#[instrument(skip_all)]
pub(super) async fn delete(
    State(state): State<RestState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .call(DELETE, with_id(Default::default(), ID_FIELD, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
