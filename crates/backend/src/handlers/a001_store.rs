use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a001_store;

/// GET /api/store
pub async fn list_all(
) -> Result<Json<Vec<contracts::domain::a001_store::aggregate::Store>>, axum::http::StatusCode> {
    match a001_store::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/store/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a001_store::aggregate::Store>, axum::http::StatusCode> {
    if uuid::Uuid::parse_str(&id).is_err() {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match a001_store::service::get_by_id(&id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/store
pub async fn upsert(
    Json(dto): Json<contracts::domain::a001_store::aggregate::StoreDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a001_store::service::update(dto).await
    } else {
        a001_store::service::create(dto).await
    };

    match result {
        Ok(store) => Ok(Json(json!({"id": store.to_string_id()}))),
        Err(e) => {
            tracing::warn!("Store upsert rejected: {}", e);
            Err(axum::http::StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

/// DELETE /api/store/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    if uuid::Uuid::parse_str(&id).is_err() {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match a001_store::service::delete(&id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
