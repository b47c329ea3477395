//! `/api/services`

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::Value;

use super::{ApiError, ListQuery, RestState};

pub(super) const LIST: &str = "get_services";
pub(super) const GET: &str = "get_service";

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
    Ok(Json(state.find(GET, "serviceId", id, "Service").await?))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{app, send};
    use crate::domains::tools::testing::FakeApi;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_list_services() {
        let (app, api) = app(FakeApi::new().reply(Ok(json!([{"id": "s1"}]))));
        let (status, body) = send(app, "GET", "/api/services", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "s1");
        assert_eq!(api.calls()[0].target(), "invoicing/v1/services?page=1");
    }

    #[tokio::test]
    async fn test_missing_service() {
        let (app, _) = app(FakeApi::new().reply(Ok(Value::Null)));
        let (status, body) = send(app, "GET", "/api/services/s404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Service not found");
    }
}
