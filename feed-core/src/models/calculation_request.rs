use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /calculate`.
///
/// Optional members are structurally absent from the serialized payload when
/// `None`; the service distinguishes "not provided" from "provided as zero".
/// Every number goes out exactly as entered. Counts are not forced to be
/// whole or positive; the service owns that judgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub fish_quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_weight_per_fish: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_weight_per_fish: Decimal,
    pub fish_species: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub growth_period_days: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_factors: Option<EnvironmentalFactors>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalFactors {
    #[serde(with = "rust_decimal::serde::float")]
    pub water_temperature_celsius: Decimal,
}

impl CalculationRequest {
    /// Request with only the required members set.
    pub fn new(
        fish_quantity: Decimal,
        current_weight_per_fish: Decimal,
        target_weight_per_fish: Decimal,
        fish_species: impl Into<String>,
    ) -> Self {
        Self {
            fish_quantity,
            current_weight_per_fish,
            target_weight_per_fish,
            fish_species: fish_species.into(),
            growth_period_days: None,
            environmental_factors: None,
        }
    }

    pub fn with_growth_period_days(
        mut self,
        days: Option<Decimal>,
    ) -> Self {
        self.growth_period_days = days;
        self
    }

    /// Sets (or clears) `environmentalFactors.waterTemperatureCelsius`.
    /// The parent object only exists while a temperature is present.
    pub fn with_water_temperature(
        mut self,
        celsius: Option<Decimal>,
    ) -> Self {
        self.environmental_factors = celsius.map(|water_temperature_celsius| EnvironmentalFactors {
            water_temperature_celsius,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn required_only_request_has_exactly_four_keys() {
        let request = CalculationRequest::new(dec!(100), dec!(0.5), dec!(1.25), "catfish");

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "fishQuantity": 100.0,
                "currentWeightPerFish": 0.5,
                "targetWeightPerFish": 1.25,
                "fishSpecies": "catfish",
            })
        );
    }

    #[test]
    fn growth_period_is_emitted_when_present() {
        let request = CalculationRequest::new(dec!(10), dec!(0.5), dec!(1.5), "tilapia")
            .with_growth_period_days(Some(dec!(90)));

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["growthPeriodDays"], json!(90.0));
        assert!(value.get("environmentalFactors").is_none());
    }

    #[test]
    fn water_temperature_is_nested_under_environmental_factors() {
        let request = CalculationRequest::new(dec!(10), dec!(0.5), dec!(1.5), "tilapia")
            .with_water_temperature(Some(dec!(27.5)));

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["environmentalFactors"],
            json!({ "waterTemperatureCelsius": 27.5 })
        );
        assert!(value.get("growthPeriodDays").is_none());
    }

    #[test]
    fn clearing_water_temperature_removes_parent_key() {
        let request = CalculationRequest::new(dec!(10), dec!(0.5), dec!(1.5), "tilapia")
            .with_water_temperature(Some(dec!(20)))
            .with_water_temperature(None);

        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("environmentalFactors").is_none());
        assert!(!value.to_string().contains("null"));
    }

    #[test]
    fn fractional_and_negative_counts_are_sent_as_entered() {
        let request = CalculationRequest::new(dec!(10.5), dec!(0.5), dec!(1.5), "catfish")
            .with_growth_period_days(Some(dec!(-3)));

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["fishQuantity"], json!(10.5));
        assert_eq!(value["growthPeriodDays"], json!(-3.0));
    }
}
