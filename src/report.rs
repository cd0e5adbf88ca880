//! Human-readable and JSON renderings of a pricing run

use std::fmt;

use serde::Serialize;

use crate::calculator;
use crate::models::{Inputs, Metrics, ScenarioResult, Strategy};

/// One pricing run: what went in and what came out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub strategy: Strategy,
    pub inputs: Inputs,
    pub metrics: Metrics,
}

impl Report {
    pub fn new(inputs: Inputs, strategy: Strategy) -> Self {
        let metrics = calculator::compute(&inputs, strategy);
        Self {
            strategy,
            inputs,
            metrics,
        }
    }

    pub fn scenarios(&self) -> ScenarioTable<'_> {
        ScenarioTable(&self.metrics.scenario_details)
    }
}

/// Format a currency amount as `$1,234.56`
pub fn currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc() as u64;
    let frac = (cents % 100.0) as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// Format a ratio (0.25) as a percentage (`25.00%`)
pub fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

fn or_na(value: Option<f64>, render: fn(f64) -> String) -> String {
    value.map_or_else(|| "n/a".to_string(), render)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;

        writeln!(f, "=== Pricing Summary ===")?;
        writeln!(
            f,
            "Strategy: {} ({} units)",
            self.strategy, self.inputs.units
        )?;
        writeln!(f)?;

        writeln!(f, "Price:")?;
        writeln!(f, "  Effective cost:     {:>14}", currency(m.effective_cost))?;
        writeln!(f, "  Markup price:       {:>14}", or_na(m.markup_price, currency))?;
        writeln!(f, "  Margin price:       {:>14}", or_na(m.margin_price, currency))?;
        writeln!(
            f,
            "  Selected price:     {:>14}  [{}]",
            currency(m.selected_price),
            m.price_source
        )?;
        writeln!(f, "  Discounted price:   {:>14}", currency(m.discounted_price))?;
        writeln!(f, "  Tax:                {:>14}", currency(m.tax_amount))?;
        writeln!(f, "  Customer pays:      {:>14}", currency(m.final_customer_price))?;
        writeln!(f)?;

        writeln!(f, "Profitability:")?;
        writeln!(f, "  Profit per unit:    {:>14}", currency(m.profit_per_unit))?;
        writeln!(f, "  Achieved margin:    {:>14}", percent(m.achieved_margin))?;
        writeln!(f, "  Achieved markup:    {:>14}", percent(m.achieved_markup))?;
        writeln!(f, "  Total revenue:      {:>14}", currency(m.total_revenue))?;
        writeln!(f, "  Total cost:         {:>14}", currency(m.total_cost))?;
        writeln!(f, "  Total profit:       {:>14}", currency(m.total_profit))?;
        writeln!(f)?;

        writeln!(f, "Target {}:", currency(self.inputs.target_profit))?;
        let breakeven = m
            .breakeven_units
            .map_or_else(|| "n/a".to_string(), |units| units.to_string());
        writeln!(f, "  Break-even units:   {:>14}", breakeven)?;
        writeln!(
            f,
            "  Price to hit:       {:>14}",
            or_na(m.pricing_to_hit_target, currency)
        )?;
        writeln!(
            f,
            "  Markup to hit:      {:>14}",
            or_na(m.markup_to_hit_target, percent)
        )?;
        writeln!(f)?;

        write!(f, "{}", self.scenarios())
    }
}

/// Scenario rows in their fixed order
pub struct ScenarioTable<'a>(pub &'a [ScenarioResult]);

impl fmt::Display for ScenarioTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<14} {:>7} {:>12} {:>12} {:>12} {:>8} {:>14}",
            "Scenario", "Delta", "Price", "Net price", "Profit", "Margin", "Total profit"
        )?;
        writeln!(f, "{}", "-".repeat(85))?;

        for row in self.0 {
            writeln!(
                f,
                "{:<14} {:>+7.1} {:>12} {:>12} {:>12} {:>8} {:>14}",
                row.label,
                row.markup_delta,
                currency(row.price),
                currency(row.discount_adjusted_price),
                currency(row.profit),
                percent(row.margin),
                currency(row.total_profit)
            )?;
        }

        Ok(())
    }
}
