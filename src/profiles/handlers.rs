use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use super::repo_types::UserProfile;
use crate::state::AppState;

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", post(create_profile))
        .route("/profile/:user_id", get(get_profile).put(update_profile))
}

#[instrument(skip(state, profile), fields(profile_id = %profile.id))]
pub async fn create_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    profile.insert(&state.db).await.map_err(|e| {
        error!(error = %e, "create profile failed");
        internal(e)
    })?;
    info!("profile created");
    Ok(Json(profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    match UserProfile::find_by_id(&state.db, &user_id).await {
        Ok(Some(p)) => Ok(Json(p)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Profile not found".into())),
        Err(e) => {
            error!(error = %e, %user_id, "get profile failed");
            Err(internal(e))
        }
    }
}

/// PUT /profile/:user_id, inserting the body when nothing matched.
///
/// Every column is overwritten, `id` included: a body without `id` gets a
/// fresh UUID and the row is re-keyed to it.
#[instrument(skip(state, profile))]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    let matched = profile.overwrite(&state.db, &user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "update profile failed");
        internal(e)
    })?;
    if !matched {
        profile.insert(&state.db).await.map_err(|e| {
            error!(error = %e, %user_id, "insert profile on update failed");
            internal(e)
        })?;
        info!(%user_id, "profile created on update");
    } else {
        info!(%user_id, "profile updated");
    }
    Ok(Json(profile))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[test]
    fn update_body_without_id_carries_a_fresh_id() {
        let a: UserProfile = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        let b: UserProfile = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_ne!(a.id, "user-001");
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn update_rejects_non_json_body() {
        let res = profile_routes()
            .with_state(AppState::fake())
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/profile/user-001")
                    .header("content-type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
