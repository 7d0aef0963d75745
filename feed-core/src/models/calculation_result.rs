use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Feed composition returned by `POST /calculate`.
///
/// The shape is fixed by the service contract. Every member tolerates being
/// missing or `null` so a partial payload still renders (as zeros) instead of
/// failing the whole calculation. Day and feeding counts are read as plain
/// numbers, so `90` and `90.0` are both accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationResult {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub daily_feed_amount_kg: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_feed_needed_kg: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub estimated_growth_days: Option<Decimal>,
    #[serde(rename = "estimatedCostUSD", with = "rust_decimal::serde::float_option")]
    pub estimated_cost_usd: Option<Decimal>,
    #[serde(deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(deserialize_with = "null_as_default")]
    pub feeding_schedule: FeedingSchedule,
    #[serde(deserialize_with = "null_as_default")]
    pub nutrient_analysis: NutrientAnalysis,
}

/// One row of the composition. `ingredient_name` is unique within a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ingredient {
    #[serde(deserialize_with = "null_as_default")]
    pub ingredient_name: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub percentage: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub daily_amount_kg: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_amount_kg: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub cost_per_kg: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedingSchedule {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub feedings_per_day: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount_per_feeding_kg: Option<Decimal>,
    #[serde(deserialize_with = "null_as_default")]
    pub feeding_times: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutrientAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub meets_requirements: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub nutritional_notes: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
