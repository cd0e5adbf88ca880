//! Data models for pricing inputs and derived metrics

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Per-unit costs, quantity and commercial targets supplied by the caller.
///
/// All money fields are per unit except `target_profit`, which is the
/// aggregate across `units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Inputs {
    pub base_cost: f64,
    pub extra_cost: f64,
    pub overhead: f64,
    pub freight: f64,
    pub units: u32,
    pub markup_percent: f64,
    pub margin_percent: f64,
    /// Manual sell price; pins the price regardless of strategy when set
    pub price_override: Option<f64>,
    pub discount_percent: f64,
    pub tax_percent: f64,
    pub target_profit: f64,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            base_cost: 0.0,
            extra_cost: 0.0,
            overhead: 0.0,
            freight: 0.0,
            units: 1,
            markup_percent: 0.0,
            margin_percent: 0.0,
            price_override: None,
            discount_percent: 0.0,
            tax_percent: 0.0,
            target_profit: 0.0,
        }
    }
}

impl Inputs {
    /// A representative wholesale configuration
    pub fn sample() -> Self {
        Self {
            base_cost: 120.0,
            extra_cost: 18.0,
            overhead: 12.0,
            freight: 6.0,
            units: 150,
            markup_percent: 38.0,
            margin_percent: 24.0,
            price_override: None,
            discount_percent: 5.0,
            tax_percent: 8.75,
            target_profit: 25_000.0,
        }
    }

    /// Read a single field as a plain number. An unset override reads as 0.
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::BaseCost => self.base_cost,
            InputField::ExtraCost => self.extra_cost,
            InputField::Overhead => self.overhead,
            InputField::Freight => self.freight,
            InputField::Units => f64::from(self.units),
            InputField::MarkupPercent => self.markup_percent,
            InputField::MarginPercent => self.margin_percent,
            InputField::PriceOverride => self.price_override.unwrap_or(0.0),
            InputField::DiscountPercent => self.discount_percent,
            InputField::TaxPercent => self.tax_percent,
            InputField::TargetProfit => self.target_profit,
        }
    }

    /// Keyed setter used by form-style callers.
    ///
    /// Setting `price_override` to 0 clears the override.
    pub fn set(&mut self, field: InputField, value: f64) -> Result<(), InputError> {
        check_field(field, value)?;

        match field {
            InputField::BaseCost => self.base_cost = value,
            InputField::ExtraCost => self.extra_cost = value,
            InputField::Overhead => self.overhead = value,
            InputField::Freight => self.freight = value,
            InputField::Units => self.units = value as u32,
            InputField::MarkupPercent => self.markup_percent = value,
            InputField::MarginPercent => self.margin_percent = value,
            InputField::PriceOverride => {
                self.price_override = if value > 0.0 { Some(value) } else { None }
            }
            InputField::DiscountPercent => self.discount_percent = value,
            InputField::TaxPercent => self.tax_percent = value,
            InputField::TargetProfit => self.target_profit = value,
        }

        Ok(())
    }

    /// Check every field against the bounds the setter enforces.
    pub fn validate(&self) -> Result<(), InputError> {
        InputField::ALL
            .iter()
            .try_for_each(|&field| check_field(field, self.get(field)))
    }

    /// The override, if it is a usable (positive) price
    pub fn active_override(&self) -> Option<f64> {
        self.price_override.filter(|price| *price > 0.0)
    }
}

fn check_field(field: InputField, value: f64) -> Result<(), InputError> {
    let out_of_range = |expected| InputError::OutOfRange {
        field,
        expected,
        value,
    };

    if !value.is_finite() {
        return Err(out_of_range("a finite number"));
    }

    match field {
        InputField::Units => {
            if value < 1.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
                return Err(out_of_range("a whole number of at least 1"));
            }
        }
        InputField::DiscountPercent => {
            if !(0.0..100.0).contains(&value) {
                return Err(out_of_range("at least 0 and below 100"));
            }
        }
        _ => {
            if value < 0.0 {
                return Err(out_of_range("non-negative"));
            }
        }
    }

    Ok(())
}

/// Names of the editable input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    BaseCost,
    ExtraCost,
    Overhead,
    Freight,
    Units,
    MarkupPercent,
    MarginPercent,
    PriceOverride,
    DiscountPercent,
    TaxPercent,
    TargetProfit,
}

impl InputField {
    pub const ALL: [InputField; 11] = [
        InputField::BaseCost,
        InputField::ExtraCost,
        InputField::Overhead,
        InputField::Freight,
        InputField::Units,
        InputField::MarkupPercent,
        InputField::MarginPercent,
        InputField::PriceOverride,
        InputField::DiscountPercent,
        InputField::TaxPercent,
        InputField::TargetProfit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InputField::BaseCost => "base_cost",
            InputField::ExtraCost => "extra_cost",
            InputField::Overhead => "overhead",
            InputField::Freight => "freight",
            InputField::Units => "units",
            InputField::MarkupPercent => "markup_percent",
            InputField::MarginPercent => "margin_percent",
            InputField::PriceOverride => "price_override",
            InputField::DiscountPercent => "discount_percent",
            InputField::TaxPercent => "tax_percent",
            InputField::TargetProfit => "target_profit",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputField {
    type Err = InputError;

    /// Accepts `base_cost`, `base-cost` and `baseCost`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        InputField::ALL
            .into_iter()
            .find(|field| field.as_str().replace('_', "") == normalized)
            .ok_or_else(|| InputError::UnknownField(s.to_string()))
    }
}

/// Which candidate price is authoritative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Markup,
    Margin,
    Price,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Markup => "markup",
            Strategy::Margin => "margin",
            Strategy::Price => "price",
        })
    }
}

impl FromStr for Strategy {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markup" => Ok(Strategy::Markup),
            "margin" => Ok(Strategy::Margin),
            "price" => Ok(Strategy::Price),
            _ => Err(InputError::UnknownStrategy(s.to_string())),
        }
    }
}

/// The resolution rule that produced `selected_price`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Override,
    Margin,
    Markup,
    MarkupFallback,
    MarginFallback,
    CostFloor,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PriceSource::Override => "manual override",
            PriceSource::Margin => "margin target",
            PriceSource::Markup => "markup target",
            PriceSource::MarkupFallback => "markup (fallback)",
            PriceSource::MarginFallback => "margin (fallback)",
            PriceSource::CostFloor => "cost floor",
        })
    }
}

/// Pricing, profitability and break-even figures for one input snapshot.
///
/// `None` marks a quantity that is undefined at this input point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub effective_cost: f64,
    pub markup_price: Option<f64>,
    pub margin_price: Option<f64>,
    pub selected_price: f64,
    pub price_source: PriceSource,
    pub discounted_price: f64,
    pub tax_amount: f64,
    pub final_customer_price: f64,
    pub profit_per_unit: f64,
    pub achieved_margin: f64,
    pub achieved_markup: f64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    /// List price minus cost, floored at zero
    pub contribution_per_unit: f64,
    pub breakeven_units: Option<u64>,
    pub scenario_details: Vec<ScenarioResult>,
    pub pricing_to_hit_target: Option<f64>,
    pub markup_to_hit_target: Option<f64>,
}

/// One alternative markup positioning
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub label: &'static str,
    /// Percentage points added to the input markup
    pub markup_delta: f64,
    pub price: f64,
    pub discount_adjusted_price: f64,
    pub profit: f64,
    pub margin: f64,
    pub total_profit: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_accept_common_spellings() {
        for raw in ["base_cost", "base-cost", "baseCost", "BASE_COST"] {
            assert_eq!(raw.parse::<InputField>().unwrap(), InputField::BaseCost);
        }
        assert_eq!(
            "priceOverride".parse::<InputField>().unwrap(),
            InputField::PriceOverride
        );
        assert_eq!(
            "shipping".parse::<InputField>(),
            Err(InputError::UnknownField("shipping".to_string()))
        );
    }

    #[test]
    fn setter_and_getter_agree() {
        let mut inputs = Inputs::default();
        for (i, field) in InputField::ALL.into_iter().enumerate() {
            let value = (i + 1) as f64;
            inputs.set(field, value).unwrap();
            assert_eq!(inputs.get(field), value, "{field}");
        }
    }

    #[test]
    fn zero_override_clears_the_pin() {
        let mut inputs = Inputs::sample();
        inputs.set(InputField::PriceOverride, 499.0).unwrap();
        assert_eq!(inputs.price_override, Some(499.0));

        inputs.set(InputField::PriceOverride, 0.0).unwrap();
        assert_eq!(inputs.price_override, None);
        assert_eq!(inputs.active_override(), None);
    }

    #[test]
    fn setter_rejects_bad_values() {
        let mut inputs = Inputs::sample();

        assert!(inputs.set(InputField::BaseCost, -1.0).is_err());
        assert!(inputs.set(InputField::TaxPercent, f64::NAN).is_err());
        assert!(inputs.set(InputField::Units, 0.0).is_err());
        assert!(inputs.set(InputField::Units, 2.5).is_err());
        assert!(inputs.set(InputField::DiscountPercent, 100.0).is_err());

        // A rejected write leaves the snapshot untouched
        assert_eq!(inputs, Inputs::sample());
    }

    #[test]
    fn margin_at_or_above_one_hundred_is_accepted() {
        let mut inputs = Inputs::sample();
        inputs.set(InputField::MarginPercent, 100.0).unwrap();
        inputs.set(InputField::MarginPercent, 140.0).unwrap();
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn validate_flags_out_of_range_fields() {
        let inputs = Inputs {
            units: 0,
            ..Inputs::sample()
        };
        assert!(matches!(
            inputs.validate(),
            Err(InputError::OutOfRange {
                field: InputField::Units,
                ..
            })
        ));
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("Margin".parse::<Strategy>().unwrap(), Strategy::Margin);
        assert_eq!("PRICE".parse::<Strategy>().unwrap(), Strategy::Price);
        assert!("cost-plus".parse::<Strategy>().is_err());
        assert_eq!(
            "override".parse::<Strategy>(),
            Err(InputError::UnknownStrategy("override".to_string()))
        );
    }
}
