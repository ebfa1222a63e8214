use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{DateFilter, MessageResponse},
    repo_types::FoodItem,
};
use crate::{dates, state::AppState};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/food", post(log_food))
        // GET takes a user id, DELETE a food id
        .route("/food/:id", get(list_foods).delete(delete_food))
}

#[instrument(skip(state, food), fields(user_id = %food.user_id))]
pub async fn log_food(
    State(state): State<AppState>,
    Json(food): Json<FoodItem>,
) -> Result<Json<FoodItem>, (StatusCode, String)> {
    food.insert(&state.db).await.map_err(|e| {
        error!(error = %e, "log food failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    info!(food_id = %food.id, calories = food.calories, "food logged");
    Ok(Json(food))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(q): Query<DateFilter>,
) -> Result<Json<Vec<FoodItem>>, (StatusCode, String)> {
    let date = dates::parse_date_filter(q.date_filter.as_deref())
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid date_filter: {e}")))?;
    let foods = FoodItem::list_by_user(&state.db, &user_id, date)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "list foods failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let not_found = || (StatusCode::NOT_FOUND, "Food not found".to_string());
    let Ok(id) = Uuid::parse_str(&food_id) else {
        warn!(%food_id, "delete with malformed food id");
        return Err(not_found());
    };
    let deleted = FoodItem::delete(&state.db, id).await.map_err(|e| {
        error!(error = %e, %food_id, "delete food failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    if !deleted {
        return Err(not_found());
    }
    info!(%food_id, "food deleted");
    Ok(Json(MessageResponse {
        message: "Food deleted successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn delete_with_malformed_id_is_not_found() {
        let app = food_routes().with_state(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/food/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_with_bad_date_is_bad_request() {
        let app = food_routes().with_state(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/food/user-001?date_filter=31-12-2024")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn delete_message_serialization() {
        let json = serde_json::to_string(&MessageResponse {
            message: "Food deleted successfully".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"Food deleted successfully"}"#);
    }
}
