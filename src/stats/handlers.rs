use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use super::{dto::DailyStats, services::summarize};
use crate::{
    dates,
    foods::{dto::DateFilter, repo_types::FoodNutrients},
    profiles::repo_types::UserProfile,
    state::AppState,
};

pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/stats/:user_id", get(get_stats))
}

/// GET /stats/:user_id?date_filter=YYYY-MM-DD (defaults to today)
#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(q): Query<DateFilter>,
) -> Result<Json<DailyStats>, (StatusCode, String)> {
    let date = dates::parse_date_filter(q.date_filter.as_deref())
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid date_filter: {e}")))?
        .unwrap_or_else(dates::today);

    let entries = FoodNutrients::list_for_day(&state.db, &user_id, date)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, %date, "load day entries failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    let profile = UserProfile::find_by_id(&state.db, &user_id)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "load profile failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(summarize(date, &entries, profile.as_ref())))
}
