//! Pricing Calculator
//!
//! Command-line front end for the pricing engine.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pricing_calculator::config::PricingFile;
use pricing_calculator::report::Report;
use pricing_calculator::{InputError, InputField, Inputs, Strategy};

#[derive(Parser)]
#[command(name = "pricing-calculator")]
#[command(about = "Markup, margin and break-even pricing calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute prices, profitability and targets
    Calc {
        #[command(flatten)]
        input: InputArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show only the alternative markup scenarios
    Scenarios {
        #[command(flatten)]
        input: InputArgs,

        /// Print the scenarios as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a sample input file (prints to stdout without a path)
    Template {
        /// Destination file
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List the input fields accepted by --set
    Fields,
}

#[derive(Args)]
struct InputArgs {
    /// TOML input file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pricing strategy (markup, margin or price); overrides the file
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Set a single input, e.g. --set base_cost=120 (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(InputField, f64)>,

    /// Start from the sample inputs instead of zeros; a config file overlays them
    #[arg(long)]
    sample: bool,
}

impl InputArgs {
    /// Defaults, then the file, then individual assignments
    fn resolve(&self) -> Result<(Inputs, Strategy)> {
        let base = if self.sample {
            Inputs::sample()
        } else {
            Inputs::default()
        };

        let (mut inputs, mut strategy) = match &self.config {
            Some(path) => {
                let file = PricingFile::load_over(path, &base)?;
                info!(path = %path.display(), sample = self.sample, "loaded input file");
                (file.inputs, file.strategy.unwrap_or_default())
            }
            None => (base, Strategy::default()),
        };

        for &(field, value) in &self.assignments {
            debug!(%field, value, "applying assignment");
            inputs
                .set(field, value)
                .with_context(|| format!("Cannot set {field}"))?;
        }

        if let Some(flag) = self.strategy {
            strategy = flag;
        }

        Ok((inputs, strategy))
    }
}

fn parse_assignment(raw: &str) -> Result<(InputField, f64), InputError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| InputError::MalformedAssignment(raw.to_string()))?;

    let field: InputField = key.parse()?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| InputError::InvalidNumber {
            field,
            value: value.trim().to_string(),
        })?;

    Ok((field, value))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calc { input, json } => {
            let (inputs, strategy) = input.resolve()?;
            let report = Report::new(inputs, strategy);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }

        Commands::Scenarios { input, json } => {
            let (inputs, strategy) = input.resolve()?;
            let report = Report::new(inputs, strategy);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report.metrics.scenario_details)?
                );
            } else {
                println!("{}", report.scenarios());
            }
        }

        Commands::Template { path, force } => {
            let template = PricingFile::template()?;

            match path {
                Some(path) => {
                    if path.exists() && !force {
                        anyhow::bail!(
                            "{} already exists (use --force to overwrite)",
                            path.display()
                        );
                    }
                    fs::write(&path, template)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Template written to: {}", path.display());
                }
                None => print!("{}", template),
            }
        }

        Commands::Fields => {
            let defaults = Inputs::default();
            let sample = Inputs::sample();
            println!("{:<20} {:>12} {:>12}", "Field", "Default", "Sample");
            println!("{}", "-".repeat(46));
            for field in InputField::ALL {
                println!(
                    "{:<20} {:>12} {:>12}",
                    field.as_str(),
                    defaults.get(field),
                    sample.get(field)
                );
            }
        }
    }

    Ok(())
}
