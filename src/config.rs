//! TOML input files

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{Inputs, Strategy};

/// Contents of an input file. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingFile {
    pub strategy: Option<Strategy>,
    pub inputs: Inputs,
}

impl PricingFile {
    /// Read, parse and validate an input file
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_over(path, &Inputs::default())
    }

    /// Like [`PricingFile::load`], with fields missing from the file taken from `base`
    pub fn load_over(path: &Path, base: &Inputs) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let file = Self::parse_over(&content, base)
            .with_context(|| format!("Invalid input file {}", path.display()))?;

        Ok(file)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_over(content, &Inputs::default())
    }

    /// Parse a file whose `[inputs]` table overlays `base` key by key
    pub fn parse_over(content: &str, base: &Inputs) -> Result<Self> {
        let mut doc: toml::Table = toml::from_str(content)?;

        let toml::Value::Table(mut inputs) = toml::Value::try_from(base)? else {
            bail!("inputs did not serialize as a table");
        };

        match doc.remove("inputs") {
            None => {}
            Some(toml::Value::Table(overlay)) => {
                for (key, value) in overlay {
                    inputs.insert(key, value);
                }
            }
            Some(_) => bail!("`inputs` must be a table"),
        }
        doc.insert("inputs".to_string(), toml::Value::Table(inputs));

        let file: PricingFile = toml::Value::Table(doc).try_into()?;
        file.inputs.validate()?;
        Ok(file)
    }

    /// Render the sample configuration as a commented TOML document
    pub fn template() -> Result<String> {
        let sample = PricingFile {
            strategy: Some(Strategy::Markup),
            inputs: Inputs::sample(),
        };

        let body = toml::to_string(&sample).context("Failed to render template")?;

        Ok(format!(
            "# Pricing calculator input file\n\
             # strategy: markup | margin | price\n\
             # price_override pins the sell price for every strategy; omit it to leave unset\n\n\
             {body}"
        ))
    }
}
