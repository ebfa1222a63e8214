use bytes::Bytes;
use tracing::{debug, instrument};

use super::{client::AnalysisError, dto::AnalyzedFood, parser::parse_analysis};
use crate::state::AppState;

#[instrument(skip(st, image), fields(bytes = image.len()))]
pub async fn analyze_food_image(
    st: &AppState,
    image: Bytes,
    content_type: &str,
) -> Result<AnalyzedFood, AnalysisError> {
    let reply = st.analyzer.describe_image(image, content_type).await?;
    debug!(reply_len = reply.len(), "model reply received");
    let food = parse_analysis(&reply)?;
    debug!(estimate = %food.to_labeled_text(), "model reply parsed");
    Ok(food)
}

/// Content type to send upstream when the upload does not carry a usable one.
pub fn image_content_type(ct: Option<&str>) -> &str {
    match ct {
        Some(ct) if ct.starts_with("image/") => ct,
        _ => "image/jpeg",
    }
}
