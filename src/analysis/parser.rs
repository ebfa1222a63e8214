use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::dto::AnalyzedFood;

pub const DEFAULT_FOOD_NAME: &str = "Unknown food";
pub const DEFAULT_DESCRIPTION: &str = "Food analysis completed";

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("malformed value for {field}: {value:?}")]
    MalformedValue { field: &'static str, value: String },
}

/// Parse the model's `Label: value` reply into an [`AnalyzedFood`].
///
/// Absent labels fall back to defaults. A numeric label whose value is not a
/// number fails the whole parse.
pub fn parse_analysis(text: &str) -> Result<AnalyzedFood, ParseError> {
    let mut food_name = None;
    let mut calories = None;
    let mut protein = None;
    let mut carbs = None;
    let mut fats = None;
    let mut description = None;

    for line in text.trim().lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match label.trim().to_lowercase().as_str() {
            "food" => food_name = Some(value.to_string()),
            "calories" => calories = Some(parse_quantity("calories", value, &KCAL_SUFFIX)?),
            "protein" => protein = Some(parse_quantity("protein", value, &GRAM_SUFFIX)?),
            "carbs" => carbs = Some(parse_quantity("carbs", value, &GRAM_SUFFIX)?),
            "fats" => fats = Some(parse_quantity("fats", value, &GRAM_SUFFIX)?),
            "description" => description = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(AnalyzedFood {
        food_name: food_name.unwrap_or_else(|| DEFAULT_FOOD_NAME.to_string()),
        calories: calories.unwrap_or(0.0),
        protein: protein.unwrap_or(0.0),
        carbs: carbs.unwrap_or(0.0),
        fats: fats.unwrap_or(0.0),
        description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
    })
}

lazy_static! {
    static ref KCAL_SUFFIX: Regex = Regex::new(r"(?i)\s*kcal$").unwrap();
    static ref GRAM_SUFFIX: Regex = Regex::new(r"(?i)\s*g$").unwrap();
}

fn parse_quantity(field: &'static str, value: &str, unit: &Regex) -> Result<f64, ParseError> {
    let number = unit.replace(value, "");
    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ParseError::MalformedValue {
            field,
            value: value.to_string(),
        })
}

impl AnalyzedFood {
    /// The six labeled lines the model is asked to produce.
    pub fn to_labeled_text(&self) -> String {
        format!(
            "Food: {}\nCalories: {}kcal\nProtein: {}g\nCarbs: {}g\nFats: {}g\nDescription: {}",
            self.food_name, self.calories, self.protein, self.carbs, self.fats, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLE: &str = "Food: Apple\nCalories: 95kcal\nProtein: 0.5g\nCarbs: 25g\nFats: 0.3g\nDescription: A red apple";

    #[test]
    fn parses_full_reply() {
        let food = parse_analysis(APPLE).expect("parse");
        assert_eq!(
            food,
            AnalyzedFood {
                food_name: "Apple".into(),
                calories: 95.0,
                protein: 0.5,
                carbs: 25.0,
                fats: 0.3,
                description: "A red apple".into(),
            }
        );
    }

    #[test]
    fn missing_fats_defaults_to_zero() {
        let text = "Food: Apple\nCalories: 95kcal\nProtein: 0.5g\nCarbs: 25g\nDescription: A red apple";
        let food = parse_analysis(text).expect("parse");
        assert_eq!(food.fats, 0.0);
        assert_eq!(food.food_name, "Apple");
        assert_eq!(food.calories, 95.0);
        assert_eq!(food.protein, 0.5);
        assert_eq!(food.carbs, 25.0);
        assert_eq!(food.description, "A red apple");
    }

    #[test]
    fn empty_reply_yields_defaults() {
        let food = parse_analysis("").expect("parse");
        assert_eq!(food.food_name, DEFAULT_FOOD_NAME);
        assert_eq!(food.description, DEFAULT_DESCRIPTION);
        assert_eq!(food.calories, 0.0);
        assert_eq!(food.protein, 0.0);
        assert_eq!(food.carbs, 0.0);
        assert_eq!(food.fats, 0.0);
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = parse_analysis("Calories: abc").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedValue {
                field: "calories",
                value: "abc".into(),
            }
        );
    }

    #[test]
    fn malformed_gram_value_is_an_error() {
        let err = parse_analysis("Food: Soup\nProtein: lots").unwrap_err();
        assert!(matches!(err, ParseError::MalformedValue { field: "protein", .. }));
    }

    #[test]
    fn later_duplicate_label_wins() {
        let food = parse_analysis("Calories: 100\nCalories: 250kcal").expect("parse");
        assert_eq!(food.calories, 250.0);
    }

    #[test]
    fn labels_are_case_insensitive_and_trimmed() {
        let food = parse_analysis("  FOOD :  Banana \n calories: 105 KCAL\nPROTEIN:1.3 g").expect("parse");
        assert_eq!(food.food_name, "Banana");
        assert_eq!(food.calories, 105.0);
        assert_eq!(food.protein, 1.3);
    }

    #[test]
    fn unknown_labels_and_plain_lines_are_ignored() {
        let text = "Here is the analysis\nFiber: 4g\nFood: Oatmeal\nCalories: 150";
        let food = parse_analysis(text).expect("parse");
        assert_eq!(food.food_name, "Oatmeal");
        assert_eq!(food.calories, 150.0);
    }

    #[test]
    fn value_keeps_text_after_first_separator() {
        let food = parse_analysis("Description: Ratio 2:1 rice to beans").expect("parse");
        assert_eq!(food.description, "Ratio 2:1 rice to beans");
    }

    #[test]
    fn reparsing_labeled_text_is_stable() {
        let first = parse_analysis(APPLE).expect("parse");
        let second = parse_analysis(&first.to_labeled_text()).expect("reparse");
        assert_eq!(first, second);
    }
}
