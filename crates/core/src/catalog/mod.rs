pub mod builtin;
pub mod source;

use crate::domain::risk::RiskLevel;
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub ticker: String,
    pub name: String,
    pub risk_tier: RiskLevel,
    pub sector: String,
    /// Signed percent change over five years.
    pub five_year_performance: f64,
    #[serde(default)]
    pub description: String,
    /// Tracks a market index rather than a single issuer (index funds, ETFs).
    #[serde(default)]
    pub is_broad_index: bool,
}

/// The fixed candidate universe. Validated once at construction and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    instruments: Vec<Instrument>,
}

impl Catalog {
    pub fn try_from_instruments(instruments: Vec<Instrument>) -> anyhow::Result<Self> {
        let mut seen = BTreeSet::<&str>::new();
        for (idx, item) in instruments.iter().enumerate() {
            validate_instrument(item).with_context(|| format!("invalid catalog entry #{idx}"))?;
            ensure!(
                seen.insert(item.ticker.as_str()),
                "duplicate ticker in catalog: {}",
                item.ticker
            );
        }

        Ok(Self { instruments })
    }

    /// Parses a JSON array of instrument records.
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let instruments: Vec<Instrument> =
            serde_json::from_str(text).context("catalog is not a valid JSON array of instruments")?;
        Self::try_from_instruments(instruments)
    }

    pub fn from_json_value(value: serde_json::Value) -> anyhow::Result<Self> {
        let instruments: Vec<Instrument> = serde_json::from_value(value)
            .context("catalog is not a valid JSON array of instruments")?;
        Self::try_from_instruments(instruments)
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn get(&self, ticker: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.ticker == ticker)
    }
}

fn validate_instrument(item: &Instrument) -> anyhow::Result<()> {
    ensure!(!item.ticker.trim().is_empty(), "ticker must be non-empty");
    ensure!(
        item.ticker.trim() == item.ticker,
        "ticker must not carry surrounding whitespace: {:?}",
        item.ticker
    );
    ensure!(!item.name.trim().is_empty(), "name must be non-empty ({})", item.ticker);
    ensure!(!item.sector.trim().is_empty(), "sector must be non-empty ({})", item.ticker);
    ensure!(
        item.five_year_performance.is_finite(),
        "five_year_performance must be finite ({})",
        item.ticker
    );
    Ok(())
}
