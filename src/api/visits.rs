//! Visitor analytics endpoints: public tracking, admin reporting.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{TrackVisitRequest, Visit, VisitSummary};
use crate::AppState;

/// Query parameters for the visit listing.
#[derive(Debug, Deserialize)]
pub struct VisitListQuery {
    /// Maximum number of rows (default: 100).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Maximum number of visit rows returned per request.
const MAX_VISIT_LIMIT: i64 = 1000;

/// POST /api/track-visit - Record a page visit.
pub async fn track_visit(
    State(state): State<AppState>,
    Json(request): Json<TrackVisitRequest>,
) -> ApiResult<Visit> {
    if request.path.trim().is_empty() {
        return error(AppError::Validation("Path is required".to_string()));
    }

    match state.repo.record_visit(&request).await {
        Ok(visit) => success(visit),
        Err(e) => error(e),
    }
}

/// GET /api/visits - Recent visits, newest first (admin).
pub async fn list_visits(
    State(state): State<AppState>,
    Query(query): Query<VisitListQuery>,
) -> ApiResult<Vec<Visit>> {
    let limit = query.limit.clamp(1, MAX_VISIT_LIMIT);

    match state.repo.list_visits(limit).await {
        Ok(visits) => success(visits),
        Err(e) => error(e),
    }
}

/// GET /api/visits/summary - Visit counts per path, busiest first (admin).
pub async fn visits_summary(State(state): State<AppState>) -> ApiResult<Vec<VisitSummary>> {
    match state.repo.visit_summary().await {
        Ok(summary) => success(summary),
        Err(e) => error(e),
    }
}
