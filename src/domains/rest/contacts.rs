//! `/api/contacts`

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

use super::validation::check_contact;
use super::{ApiError, ListQuery, RestState, object_body};

pub(super) const LIST: &str = "get_contacts";
pub(super) const GET: &str = "get_contact";
pub(super) const CREATE: &str = "create_contact";

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
    Ok(Json(state.find(GET, "contactId", id, "Contact").await?))
}

pub(super) async fn create(
    State(state): State<RestState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let body = object_body(body)?;
    state.check(CREATE, &body, check_contact(&body))?;
    let created = state.call(CREATE, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
