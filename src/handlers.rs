use crate::errors::AppError;
use crate::models::{DailyQuery, DailyReportResponse, RefreshResponse};
use crate::report::{self, DEFAULT_ROLLING_WINDOW};
use crate::state::AppState;
use crate::ui::render_dashboard;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_dashboard())
}

/// Daily report with the rolling sum recomputed for the requested window
/// over the full series.
pub async fn get_daily(
    State(state): State<AppState>,
    Query(query): Query<DailyQuery>,
) -> Result<Json<DailyReportResponse>, AppError> {
    let window = query.window.unwrap_or(DEFAULT_ROLLING_WINDOW);
    if window == 0 {
        return Err(AppError::bad_request("window must be at least 1"));
    }

    let mut rows = state.rows.lock().await.clone();
    report::apply_rolling(&mut rows, window);
    Ok(Json(DailyReportResponse { window, rows }))
}

/// Re-runs the configured source and swaps the report in place. For the
/// remote source this still goes through the same-day cache, so at most one
/// real fetch happens per calendar day.
pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let rows = state.source.fetch().await?;
    let days = rows.len();
    *state.rows.lock().await = rows;
    info!("report refreshed: {days} days");
    Ok(Json(RefreshResponse { days }))
}
