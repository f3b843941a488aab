//! Moth resource handlers
//!
//! Each handler validates its input against the state's schema, then hands
//! the typed request to the store. Writes answer `204 No Content`.

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::Json;
use indexmap::IndexMap;
use serde_json::{json, Value};
use store_object::query_builder::UpdateSet;
use store_object::validation::{parse_id, validate_body, ValidationError};

use crate::error::ApiError;
use crate::query_params::parse_list_query;
use crate::state::AppState;

/// Parse and validate a JSON object body. An empty body is an empty object.
fn parse_body(state: &AppState, body: &Bytes) -> Result<IndexMap<String, Value>, ApiError> {
    let parsed: IndexMap<String, Value> = if body.is_empty() {
        IndexMap::new()
    } else {
        serde_json::from_slice(body)
            .map_err(|err| ValidationError::MalformedBody(err.to_string()))?
    };
    validate_body(&parsed, &state.schema)?;
    Ok(parsed)
}

pub async fn list(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = parse_list_query(query.as_deref(), &state.schema)?;
    let rows = state.store.list(query).await?;
    Ok(Json(rows))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let query = parse_list_query(query.as_deref(), &state.schema)?;

    match state.store.get_by_id(id, query).await? {
        Some(row) => Ok(Json(row)),
        None => Err(ApiError::not_found(
            state.schema.missing_row_message(&id.to_string()),
        )),
    }
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let body = parse_body(&state, &body)?;
    state.store.create(body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let body = parse_body(&state, &body)?;
    state.store.replace(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let updates = UpdateSet::new(parse_body(&state, &body)?)?;
    state.store.patch(id, updates).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let removed = state.store.delete(id).await?;
    tracing::debug!(%id, removed, "delete finished");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.store.health_check().await?;
    Ok(Json(json!({ "status": "ok" })))
}
