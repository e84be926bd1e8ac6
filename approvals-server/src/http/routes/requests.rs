//! Request endpoints
//!
//! Each handler performs exactly one store call.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PathId};
use crate::http::server::AppState;
use crate::models::{Request, RequestBody};

/// GET /request - list every request
async fn list_requests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Request>>, ApiError> {
    let requests = state.store.list().await?;
    Ok(Json(requests))
}

/// POST /request - create a request, id returned in `Location`
async fn create_request(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<RequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.store.insert(body).await?;
    tracing::debug!(%id, "Request created");

    Ok((
        StatusCode::CREATED,
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::LOCATION, format!("/request/{id}")),
        ],
    ))
}

/// GET /request/{id} - get a single request
async fn get_request(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<Json<Request>, ApiError> {
    let request = state.store.get(id).await?;
    Ok(Json(request))
}

/// PUT /request/{id} - replace a request wholesale
async fn update_request(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    JsonBody(body): JsonBody<RequestBody>,
) -> Result<StatusCode, ApiError> {
    state.store.replace(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /request/{id} - remove a request
async fn delete_request(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<StatusCode, ApiError> {
    state.store.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Request routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/request", get(list_requests).post(create_request))
        .route(
            "/request/{id}",
            get(get_request).put(update_request).delete(delete_request),
        )
}
