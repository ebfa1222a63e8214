use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DateFilter {
    pub date_filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
