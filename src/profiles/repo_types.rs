use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub const DEFAULT_CALORIE_TARGET: i32 = 2000;
pub const DEFAULT_PROTEIN_TARGET: i32 = 150;
pub const DEFAULT_CARBS_TARGET: i32 = 250;
pub const DEFAULT_FATS_TARGET: i32 = 65;

/// Profile record. Fields missing from a request body take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_age")]
    pub age: i32,
    #[serde(default = "default_weight")]
    pub weight: f64,                  // kg
    #[serde(default = "default_height")]
    pub height: f64,                  // cm
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default = "default_activity_level")]
    pub activity_level: String,
    #[serde(default = "default_fitness_goal")]
    pub fitness_goal: String,
    #[serde(default = "default_calorie_target")]
    pub daily_calorie_target: i32,
    #[serde(default = "default_protein_target")]
    pub protein_target: i32,
    #[serde(default = "default_carbs_target")]
    pub carbs_target: i32,
    #[serde(default = "default_fats_target")]
    pub fats_target: i32,
    #[serde(with = "time::serde::rfc3339", default = "OffsetDateTime::now_utc")]
    pub created_at: OffsetDateTime,
}

fn new_id() -> String { Uuid::new_v4().to_string() }
fn default_age() -> i32 { 25 }
fn default_weight() -> f64 { 70.0 }
fn default_height() -> f64 { 175.0 }
fn default_gender() -> String { "Male".into() }
fn default_activity_level() -> String { "moderate".into() }
fn default_fitness_goal() -> String { "maintain".into() }
fn default_calorie_target() -> i32 { DEFAULT_CALORIE_TARGET }
fn default_protein_target() -> i32 { DEFAULT_PROTEIN_TARGET }
fn default_carbs_target() -> i32 { DEFAULT_CARBS_TARGET }
fn default_fats_target() -> i32 { DEFAULT_FATS_TARGET }
