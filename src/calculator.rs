//! Pricing engine: derives prices, profitability and break-even from inputs

use tracing::debug;

use crate::models::{Inputs, Metrics, PriceSource, Strategy};
use crate::scenario::model_scenarios;

/// Compute the full metric set for one input snapshot.
///
/// Never fails. Ill-conditioned quantities come back as `None`, and ratios
/// whose denominator is zero fall back to 0.
pub fn compute(inputs: &Inputs, strategy: Strategy) -> Metrics {
    let effective_cost = inputs.base_cost + inputs.extra_cost + inputs.overhead + inputs.freight;
    let markup_price = markup_price(effective_cost, inputs.markup_percent);
    let margin_price = margin_price(effective_cost, inputs.margin_percent);

    let (selected_price, price_source) =
        resolve_price(inputs, strategy, effective_cost, markup_price, margin_price);

    debug!(
        %strategy,
        %price_source,
        selected_price,
        effective_cost,
        "resolved selling price"
    );

    let discounted_price = selected_price * (1.0 - inputs.discount_percent / 100.0);
    let tax_amount = discounted_price * (inputs.tax_percent / 100.0);
    let final_customer_price = discounted_price + tax_amount;

    let profit_per_unit = discounted_price - effective_cost;
    let achieved_margin = ratio_or_zero(profit_per_unit, discounted_price);
    let achieved_markup = ratio_or_zero(profit_per_unit, effective_cost);

    let units = f64::from(inputs.units);

    // Break-even is measured at list price, before discount
    let contribution_per_unit = if selected_price > effective_cost {
        selected_price - effective_cost
    } else {
        0.0
    };
    let breakeven_units = breakeven_units(inputs.target_profit, contribution_per_unit);

    let pricing_to_hit_target = if inputs.target_profit <= 0.0 || inputs.units == 0 {
        None
    } else {
        Some(effective_cost + inputs.target_profit / units)
    };
    let markup_to_hit_target = pricing_to_hit_target
        .filter(|_| effective_cost > 0.0)
        .map(|price| price / effective_cost - 1.0);

    Metrics {
        effective_cost,
        markup_price,
        margin_price,
        selected_price,
        price_source,
        discounted_price,
        tax_amount,
        final_customer_price,
        profit_per_unit,
        achieved_margin,
        achieved_markup,
        total_revenue: final_customer_price * units,
        total_cost: effective_cost * units,
        total_profit: profit_per_unit * units,
        contribution_per_unit,
        breakeven_units,
        scenario_details: model_scenarios(inputs, effective_cost),
        pricing_to_hit_target,
        markup_to_hit_target,
    }
}

/// Price implied by a markup over cost; undefined without a positive markup
pub fn markup_price(effective_cost: f64, markup_percent: f64) -> Option<f64> {
    (markup_percent > 0.0).then(|| effective_cost * (1.0 + markup_percent / 100.0))
}

/// Price at which `margin_percent` of the sell price is profit.
///
/// Undefined once the margin reaches 100%.
pub fn margin_price(effective_cost: f64, margin_percent: f64) -> Option<f64> {
    (margin_percent < 100.0).then(|| effective_cost / (1.0 - margin_percent / 100.0))
}

/// Pick the authoritative price. Rules are checked in order; first match wins.
fn resolve_price(
    inputs: &Inputs,
    strategy: Strategy,
    effective_cost: f64,
    markup_price: Option<f64>,
    margin_price: Option<f64>,
) -> (f64, PriceSource) {
    // A manual pin beats any strategy
    if let Some(price) = inputs.active_override() {
        return (price, PriceSource::Override);
    }

    if let (Strategy::Margin, Some(price)) = (strategy, margin_price) {
        return (price, PriceSource::Margin);
    }

    if let (Strategy::Markup, Some(price)) = (strategy, markup_price) {
        return (price, PriceSource::Markup);
    }

    // Strategy::Price with no usable override lands in the fallbacks below
    if let Some(price) = markup_price {
        return (price, PriceSource::MarkupFallback);
    }

    if let Some(price) = margin_price {
        return (price, PriceSource::MarginFallback);
    }

    (effective_cost, PriceSource::CostFloor)
}

fn breakeven_units(target_profit: f64, contribution_per_unit: f64) -> Option<u64> {
    if contribution_per_unit <= 0.0 {
        return None;
    }

    // Float-to-int casts saturate, so an enormous ratio pins at u64::MAX
    Some((target_profit / contribution_per_unit).ceil() as u64)
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
