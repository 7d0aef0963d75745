use std::fmt;

use feed_core::{
    CalculationResult,
    presentation::{format_amount, format_count, join_feeding_times},
};

/// Which indicator the nutrient analysis gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementIndicator {
    Meets,
    Mismatch,
}

impl RequirementIndicator {
    pub fn from_flag(meets_requirements: bool) -> Self {
        if meets_requirements {
            Self::Meets
        } else {
            Self::Mismatch
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Meets => "Meets Requirements",
            Self::Mismatch => "Requirement Mismatch",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Meets => "✔",
            Self::Mismatch => "⚠",
        }
    }
}

/// One formatted line of the ingredient table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRow {
    pub name: String,
    pub percentage: String,
    pub daily_amount_kg: String,
    pub total_amount_kg: String,
    pub cost_per_kg: String,
}

/// Display projection of a [`CalculationResult`]. Holds only formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub daily_feed_kg: String,
    pub total_feed_kg: String,
    pub growth_days: String,
    pub cost_usd: String,
    pub ingredients: Vec<IngredientRow>,
    pub feedings_per_day: String,
    pub amount_per_feeding_kg: String,
    pub feeding_times: String,
    pub indicator: RequirementIndicator,
    pub nutritional_notes: String,
}

impl ResultView {
    pub fn new(result: &CalculationResult) -> Self {
        Self {
            daily_feed_kg: format_amount(result.daily_feed_amount_kg),
            total_feed_kg: format_amount(result.total_feed_needed_kg),
            growth_days: format_count(result.estimated_growth_days),
            cost_usd: format_amount(result.estimated_cost_usd),
            ingredients: result
                .ingredients
                .iter()
                .map(|ingredient| IngredientRow {
                    name: ingredient.ingredient_name.clone(),
                    percentage: format_amount(ingredient.percentage),
                    daily_amount_kg: format_amount(ingredient.daily_amount_kg),
                    total_amount_kg: format_amount(ingredient.total_amount_kg),
                    cost_per_kg: format_amount(ingredient.cost_per_kg),
                })
                .collect(),
            feedings_per_day: format_count(result.feeding_schedule.feedings_per_day),
            amount_per_feeding_kg: format_amount(result.feeding_schedule.amount_per_feeding_kg),
            feeding_times: join_feeding_times(&result.feeding_schedule.feeding_times),
            indicator: RequirementIndicator::from_flag(result.nutrient_analysis.meets_requirements),
            nutritional_notes: result.nutrient_analysis.nutritional_notes.clone(),
        }
    }
}

impl fmt::Display for ResultView {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Calculation Results")?;
        writeln!(f, "===================")?;
        writeln!(f, "Total Daily Feed:          {} kg", self.daily_feed_kg)?;
        writeln!(f, "Total Feed Needed:         {} kg", self.total_feed_kg)?;
        writeln!(f, "Estimated Growth Period:   {} days", self.growth_days)?;
        writeln!(f, "Estimated Total Cost:      ${}", self.cost_usd)?;

        writeln!(f)?;
        writeln!(f, "Ingredient Composition")?;
        writeln!(
            f,
            "{:<24} {:>11} {:>18} {:>18} {:>12}",
            "Ingredient", "Percentage", "Daily Amount (kg)", "Total Amount (kg)", "Cost/kg ($)"
        )?;
        for row in &self.ingredients {
            writeln!(
                f,
                "{:<24} {:>11} {:>18} {:>18} {:>12}",
                row.name,
                format!("{}%", row.percentage),
                row.daily_amount_kg,
                row.total_amount_kg,
                format!("${}", row.cost_per_kg)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Feeding Schedule")?;
        writeln!(f, "  Feedings per Day:    {}", self.feedings_per_day)?;
        writeln!(f, "  Amount per Feeding:  {} kg", self.amount_per_feeding_kg)?;
        writeln!(f, "  Recommended Times:   {}", self.feeding_times)?;

        writeln!(f)?;
        writeln!(f, "Nutrient Analysis")?;
        writeln!(f, "  {} {}", self.indicator.symbol(), self.indicator.label())?;
        if !self.nutritional_notes.is_empty() {
            writeln!(f, "  {}", self.nutritional_notes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use feed_core::{FeedingSchedule, Ingredient, NutrientAnalysis};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> CalculationResult {
        CalculationResult {
            daily_feed_amount_kg: Some(dec!(12.5)),
            total_feed_needed_kg: Some(dec!(1125)),
            estimated_growth_days: Some(dec!(90)),
            estimated_cost_usd: Some(dec!(843.755)),
            ingredients: vec![Ingredient {
                ingredient_name: "Fish Meal".into(),
                percentage: Some(dec!(40)),
                daily_amount_kg: Some(dec!(5)),
                total_amount_kg: Some(dec!(450)),
                cost_per_kg: Some(dec!(1.5)),
            }],
            feeding_schedule: FeedingSchedule {
                feedings_per_day: Some(dec!(3.0)),
                amount_per_feeding_kg: Some(dec!(4.1666)),
                feeding_times: vec!["07:00".into(), "12:00".into(), "17:00".into()],
            },
            nutrient_analysis: NutrientAnalysis {
                meets_requirements: true,
                nutritional_notes: "Protein within range.".into(),
            },
        }
    }

    #[test]
    fn numbers_are_shown_with_two_decimals() {
        let view = ResultView::new(&sample());

        assert_eq!(view.daily_feed_kg, "12.50");
        assert_eq!(view.total_feed_kg, "1125.00");
        assert_eq!(view.cost_usd, "843.76");
        assert_eq!(view.growth_days, "90");
        assert_eq!(view.feedings_per_day, "3");
        assert_eq!(view.amount_per_feeding_kg, "4.17");
        assert_eq!(
            view.ingredients,
            vec![IngredientRow {
                name: "Fish Meal".into(),
                percentage: "40.00".into(),
                daily_amount_kg: "5.00".into(),
                total_amount_kg: "450.00".into(),
                cost_per_kg: "1.50".into(),
            }]
        );
    }

    #[test]
    fn feeding_times_are_joined() {
        assert_eq!(ResultView::new(&sample()).feeding_times, "07:00, 12:00, 17:00");
    }

    #[test]
    fn indicator_follows_meets_requirements_flag() {
        let mut result = sample();
        assert_eq!(ResultView::new(&result).indicator, RequirementIndicator::Meets);

        result.nutrient_analysis.meets_requirements = false;
        let view = ResultView::new(&result);

        assert_eq!(view.indicator, RequirementIndicator::Mismatch);
        assert!(view.to_string().contains("⚠ Requirement Mismatch"));
    }

    #[test]
    fn empty_result_degrades_to_zeros() {
        let view = ResultView::new(&CalculationResult::default());

        assert_eq!(view.daily_feed_kg, "0.00");
        assert_eq!(view.cost_usd, "0.00");
        assert_eq!(view.growth_days, "0");
        assert_eq!(view.feedings_per_day, "0");
        assert!(view.ingredients.is_empty());
        assert_eq!(view.feeding_times, "");
    }

    #[test]
    fn rendering_contains_every_section() {
        let text = ResultView::new(&sample()).to_string();

        assert!(text.contains("Total Daily Feed:          12.50 kg"));
        assert!(text.contains("Estimated Total Cost:      $843.76"));
        assert!(text.contains("Fish Meal"));
        assert!(text.contains("40.00%"));
        assert!(text.contains("$1.50"));
        assert!(text.contains("Recommended Times:   07:00, 12:00, 17:00"));
        assert!(text.contains("✔ Meets Requirements"));
        assert!(text.contains("Protein within range."));
    }
}
