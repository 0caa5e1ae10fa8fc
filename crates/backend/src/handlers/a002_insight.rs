use axum::{extract::Path, Json};
use serde_json::json;

use crate::dashboards::d100_scorecard;
use crate::domain::a002_insight;

/// GET /api/store/:id/insight
///
/// `insight` is null when the advisor is disabled or its single attempt
/// failed; the dashboard renders without it.
pub async fn get_insight(
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    if uuid::Uuid::parse_str(&id).is_err() {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    let card = match d100_scorecard::service::get_scorecard(&id).await {
        Ok(Some(card)) => card,
        Ok(None) => return Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Scorecard build failed for {}: {}", id, e);
            return Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let insight = a002_insight::service::generate(&card).await;
    Ok(Json(json!({"insight": insight})))
}
