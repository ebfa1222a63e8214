use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::dates;

/// One logged meal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default = "default_serving_size")]
    pub serving_size: String,
    #[serde(with = "dates::iso_date", default = "dates::today")]
    pub date: Date,
    #[serde(default)]
    pub meal_type: MealType,
    #[serde(with = "time::serde::rfc3339", default = "OffsetDateTime::now_utc")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_serving_size() -> String {
    "1 serving".into()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

/// Nutrient columns of a stored entry; NULL means the field was never set.
#[derive(Debug, Clone, Copy, Default, PartialEq, FromRow)]
pub struct FoodNutrients {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

impl From<&FoodItem> for FoodNutrients {
    fn from(f: &FoodItem) -> Self {
        Self {
            calories: Some(f.calories),
            protein: Some(f.protein),
            carbs: Some(f.carbs),
            fats: Some(f.fats),
        }
    }
}
