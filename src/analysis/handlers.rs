use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::{
    client::AnalysisError,
    dto::AnalyzedFood,
    services::{analyze_food_image, image_content_type},
};
use crate::state::AppState;

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze-food-image", post(analyze_image))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// POST /analyze-food-image (multipart, field `file`)
#[instrument(skip(state, mp))]
pub async fn analyze_image(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<AnalyzedFood>, (StatusCode, String)> {
    let mut upload = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() == Some("file") {
            let content_type = image_content_type(field.content_type()).to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            upload = Some((data, content_type));
            break;
        }
    }
    let Some((data, content_type)) = upload else {
        warn!("analyze request without file");
        return Err((StatusCode::BAD_REQUEST, "file is required".into()));
    };

    match analyze_food_image(&state, data, &content_type).await {
        Ok(food) => {
            info!(food = %food.food_name, calories = food.calories, "image analyzed");
            Ok(Json(food))
        }
        Err(AnalysisError::NotConfigured) => {
            error!("image analysis requested without GOOGLE_API_KEY");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                AnalysisError::NotConfigured.to_string(),
            ))
        }
        Err(e) => {
            error!(error = %e, "Error analyzing food image");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to analyze image: {e}"),
            ))
        }
    }
}
