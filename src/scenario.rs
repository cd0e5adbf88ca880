//! Alternative markup positionings on the same cost base

use crate::models::{Inputs, ScenarioResult};

/// A named markup offset, in percentage points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioSpec {
    pub label: &'static str,
    pub markup_delta: f64,
}

/// Fixed scenario table; display order is positional
pub const SCENARIOS: [ScenarioSpec; 4] = [
    ScenarioSpec {
        label: "Value Anchor",
        markup_delta: -10.0,
    },
    ScenarioSpec {
        label: "Core",
        markup_delta: 0.0,
    },
    ScenarioSpec {
        label: "Premium",
        markup_delta: 8.0,
    },
    ScenarioSpec {
        label: "Executive",
        markup_delta: 16.0,
    },
];

/// Re-derive price and profit for every scenario in table order.
///
/// Scenarios are pre-tax: the discount applies, tax does not.
pub fn model_scenarios(inputs: &Inputs, effective_cost: f64) -> Vec<ScenarioResult> {
    SCENARIOS
        .iter()
        .map(|spec| model_scenario(spec, inputs, effective_cost))
        .collect()
}

fn model_scenario(spec: &ScenarioSpec, inputs: &Inputs, effective_cost: f64) -> ScenarioResult {
    let scenario_markup = (inputs.markup_percent + spec.markup_delta) / 100.0;
    let price = effective_cost * (1.0 + scenario_markup);
    let discount_adjusted_price = price * (1.0 - inputs.discount_percent / 100.0);
    let profit = discount_adjusted_price - effective_cost;
    let margin = if discount_adjusted_price == 0.0 {
        0.0
    } else {
        profit / discount_adjusted_price
    };

    ScenarioResult {
        label: spec.label,
        markup_delta: spec.markup_delta,
        price,
        discount_adjusted_price,
        profit,
        margin,
        total_profit: profit * f64::from(inputs.units),
    }
}
