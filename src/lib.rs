//! Pricing calculator
//!
//! Derives sell price, profitability, break-even volume and a set of
//! alternative markup scenarios from per-unit costs and a pricing strategy.
//! The engine is a pure function: one input snapshot in, one metric set out.

pub mod calculator;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scenario;

pub use calculator::compute;
pub use error::InputError;
pub use models::{InputField, Inputs, Metrics, PriceSource, ScenarioResult, Strategy};
