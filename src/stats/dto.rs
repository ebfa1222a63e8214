use serde::{Deserialize, Serialize};
use time::Date;

use crate::dates;

/// A day's totals next to the user's targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    #[serde(with = "dates::iso_date")]
    pub date: Date,
    pub meals_logged: usize,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calorie_target: i32,
    pub protein_target: i32,
    pub carbs_target: i32,
    pub fats_target: i32,
}
