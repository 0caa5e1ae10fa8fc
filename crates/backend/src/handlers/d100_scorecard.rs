use axum::{extract::Path, Json};

use crate::dashboards::d100_scorecard;

/// GET /api/store/:id/performance
pub async fn get_scorecard(
    Path(id): Path<String>,
) -> Result<Json<contracts::dashboards::d100_scorecard::StoreScorecard>, axum::http::StatusCode> {
    if uuid::Uuid::parse_str(&id).is_err() {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match d100_scorecard::service::get_scorecard(&id).await {
        Ok(Some(card)) => Ok(Json(card)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Scorecard build failed for {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
