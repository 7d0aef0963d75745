use std::fmt;

use feed_core::CalculationRequest;
use thiserror::Error;

use crate::utils::{
    ParseNumberError, is_blank, parse_decimal, parse_optional_decimal,
};

/// Species selected before the catalog has been consulted.
pub const DEFAULT_SPECIES: &str = "catfish";

/// The named inputs of the calculation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    FishQuantity,
    CurrentWeightPerFish,
    TargetWeightPerFish,
    FishSpecies,
    GrowthPeriodDays,
    WaterTemperatureCelsius,
}

impl FieldName {
    pub fn all() -> &'static [FieldName] {
        &[
            FieldName::FishQuantity,
            FieldName::CurrentWeightPerFish,
            FieldName::TargetWeightPerFish,
            FieldName::FishSpecies,
            FieldName::GrowthPeriodDays,
            FieldName::WaterTemperatureCelsius,
        ]
    }

    /// Wire/form key, e.g. `fishQuantity`.
    pub fn key(&self) -> &'static str {
        match self {
            FieldName::FishQuantity => "fishQuantity",
            FieldName::CurrentWeightPerFish => "currentWeightPerFish",
            FieldName::TargetWeightPerFish => "targetWeightPerFish",
            FieldName::FishSpecies => "fishSpecies",
            FieldName::GrowthPeriodDays => "growthPeriodDays",
            FieldName::WaterTemperatureCelsius => "waterTemperatureCelsius",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldName::FishQuantity => "Fish Quantity",
            FieldName::CurrentWeightPerFish => "Current Weight per Fish (kg)",
            FieldName::TargetWeightPerFish => "Target Weight per Fish (kg)",
            FieldName::FishSpecies => "Fish Species",
            FieldName::GrowthPeriodDays => "Growth Period (days, optional)",
            FieldName::WaterTemperatureCelsius => "Water Temperature (°C, optional)",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            FieldName::GrowthPeriodDays | FieldName::WaterTemperatureCelsius
        )
    }

    /// Accepts the wire key case-insensitively (`fishquantity`, `fishQuantity`).
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for FieldName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Submission gate: required fields are blank, nothing is sent.
    #[error("required fields are empty: {}", join_fields(.0))]
    MissingRequired(Vec<FieldName>),

    #[error("{field} is not a valid number: {source}")]
    InvalidNumber {
        field: FieldName,
        #[source]
        source: ParseNumberError,
    },
}

fn join_fields(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(FieldName::key)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw form values.
///
/// Everything is kept as text so an empty input stays distinguishable from
/// zero until the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFields {
    fish_quantity: String,
    current_weight_per_fish: String,
    target_weight_per_fish: String,
    fish_species: String,
    growth_period_days: String,
    water_temperature_celsius: String,
}

impl Default for InputFields {
    fn default() -> Self {
        Self {
            fish_quantity: String::new(),
            current_weight_per_fish: String::new(),
            target_weight_per_fish: String::new(),
            fish_species: DEFAULT_SPECIES.to_string(),
            growth_period_days: String::new(),
            water_temperature_celsius: String::new(),
        }
    }
}

impl InputFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        field: FieldName,
    ) -> &str {
        match field {
            FieldName::FishQuantity => &self.fish_quantity,
            FieldName::CurrentWeightPerFish => &self.current_weight_per_fish,
            FieldName::TargetWeightPerFish => &self.target_weight_per_fish,
            FieldName::FishSpecies => &self.fish_species,
            FieldName::GrowthPeriodDays => &self.growth_period_days,
            FieldName::WaterTemperatureCelsius => &self.water_temperature_celsius,
        }
    }

    /// Replaces one value; every other field is left as it was.
    pub fn set(
        &mut self,
        field: FieldName,
        value: impl Into<String>,
    ) {
        let slot = match field {
            FieldName::FishQuantity => &mut self.fish_quantity,
            FieldName::CurrentWeightPerFish => &mut self.current_weight_per_fish,
            FieldName::TargetWeightPerFish => &mut self.target_weight_per_fish,
            FieldName::FishSpecies => &mut self.fish_species,
            FieldName::GrowthPeriodDays => &mut self.growth_period_days,
            FieldName::WaterTemperatureCelsius => &mut self.water_temperature_celsius,
        };
        *slot = value.into();
    }

    /// Required fields that are currently blank, in form order.
    pub fn missing_required(&self) -> Vec<FieldName> {
        FieldName::all()
            .iter()
            .copied()
            .filter(|field| field.is_required() && is_blank(self.get(*field)))
            .collect()
    }

    pub fn is_submittable(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Builds the request body.
    ///
    /// Optional members are set only when their field is non-blank. No range
    /// checks happen here; numeric sanity is the service's call.
    pub fn to_request(&self) -> Result<CalculationRequest, InputError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(InputError::MissingRequired(missing));
        }

        let fish_quantity = parse_decimal(&self.fish_quantity)
            .map_err(|source| invalid(FieldName::FishQuantity, source))?;
        let current_weight = parse_decimal(&self.current_weight_per_fish)
            .map_err(|source| invalid(FieldName::CurrentWeightPerFish, source))?;
        let target_weight = parse_decimal(&self.target_weight_per_fish)
            .map_err(|source| invalid(FieldName::TargetWeightPerFish, source))?;
        let growth_period_days = parse_optional_decimal(&self.growth_period_days)
            .map_err(|source| invalid(FieldName::GrowthPeriodDays, source))?;
        let water_temperature = parse_optional_decimal(&self.water_temperature_celsius)
            .map_err(|source| invalid(FieldName::WaterTemperatureCelsius, source))?;

        Ok(CalculationRequest::new(
            fish_quantity,
            current_weight,
            target_weight,
            self.fish_species.trim(),
        )
        .with_growth_period_days(growth_period_days)
        .with_water_temperature(water_temperature))
    }
}

fn invalid(
    field: FieldName,
    source: ParseNumberError,
) -> InputError {
    InputError::InvalidNumber { field, source }
}

impl fmt::Display for InputFields {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for field in FieldName::all() {
            let value = self.get(*field);
            let shown = if is_blank(value) { "—" } else { value };
            writeln!(f, "{:<34} {}", format!("{}:", field.label()), shown)?;
        }
        Ok(())
    }
}
