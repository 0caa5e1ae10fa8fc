use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{AccessGranted, AccessRequest};
use serde_json::json;

use crate::domain::a001_store::directory::directory;
use crate::shared::config::get_config;
use crate::system::auth::gate;
use crate::system::session::SqlSessionStore;

/// POST /api/system/auth/login
///
/// A refusal (wrong secret, unknown store code) is 401 with the
/// user-facing message; only infrastructure failures are 500.
pub async fn login(
    Json(request): Json<AccessRequest>,
) -> Result<Json<AccessGranted>, (StatusCode, Json<serde_json::Value>)> {
    let dir = directory().read().await;
    let admin_secret = &get_config().access.admin_secret;

    match gate::authorize(&request, &dir, &SqlSessionStore, admin_secret).await {
        Ok(granted) => Ok(Json(granted)),
        Err(e) if e.is_refusal() => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": e.to_string()})),
        )),
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Erro interno"})),
            ))
        }
    }
}

/// GET /api/system/auth/session
pub async fn session() -> Result<Json<Option<AccessGranted>>, StatusCode> {
    let dir = directory().read().await;
    match gate::resume(&dir, &SqlSessionStore).await {
        Ok(resumed) => Ok(Json(resumed)),
        Err(e) => {
            tracing::error!("Session resume failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/system/auth/logout
pub async fn logout() -> Result<StatusCode, StatusCode> {
    match gate::logout(&SqlSessionStore).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => {
            tracing::error!("Logout failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
