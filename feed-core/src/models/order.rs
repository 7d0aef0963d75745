use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::CalculationResult;

/// Body of `POST /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub ingredient_name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_amount_kg: Option<Decimal>,
}

impl OrderRequest {
    /// Projects the ingredient list of a calculation onto order lines,
    /// keeping the ingredient order and dropping every other column.
    pub fn from_result(result: &CalculationResult) -> Self {
        Self {
            items: result
                .ingredients
                .iter()
                .map(|ingredient| OrderItem {
                    ingredient_name: ingredient.ingredient_name.clone(),
                    total_amount_kg: ingredient.total_amount_kg,
                })
                .collect(),
        }
    }
}

/// Returned by `POST /order` on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderConfirmation {
    #[serde(deserialize_with = "string_or_number")]
    pub order_id: String,
    pub supplier: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_cost: Option<Decimal>,
}

/// Order ids are opaque; some services send them as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected order id string or number, got {other}"
        ))),
    }
}
