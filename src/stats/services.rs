use time::Date;

use super::dto::DailyStats;
use crate::foods::repo_types::FoodNutrients;
use crate::profiles::repo_types::{
    UserProfile, DEFAULT_CALORIE_TARGET, DEFAULT_CARBS_TARGET, DEFAULT_FATS_TARGET,
    DEFAULT_PROTEIN_TARGET,
};

/// Sum one day's entries and attach targets from `profile`, or the defaults.
pub fn summarize(date: Date, entries: &[FoodNutrients], profile: Option<&UserProfile>) -> DailyStats {
    let sum = |field: fn(&FoodNutrients) -> Option<f64>| -> f64 {
        entries.iter().map(|e| field(e).unwrap_or(0.0)).sum()
    };

    let (calorie_target, protein_target, carbs_target, fats_target) = match profile {
        Some(p) => (
            p.daily_calorie_target,
            p.protein_target,
            p.carbs_target,
            p.fats_target,
        ),
        None => (
            DEFAULT_CALORIE_TARGET,
            DEFAULT_PROTEIN_TARGET,
            DEFAULT_CARBS_TARGET,
            DEFAULT_FATS_TARGET,
        ),
    };

    DailyStats {
        date,
        meals_logged: entries.len(),
        calories: sum(|e| e.calories),
        protein: sum(|e| e.protein),
        carbs: sum(|e| e.carbs),
        fats: sum(|e| e.fats),
        calorie_target,
        protein_target,
        carbs_target,
        fats_target,
    }
}
