use crate::domain::money::{Money, Percent};
use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Weights applied to each scenario family's annualized benefit when two
/// scenarios of different types are compared.
///
/// The annualized benefit is the money a scenario gains the user per year:
/// interest avoided for debt scenarios, cancelled spend for subscriptions,
/// interest earned for savings. A weight of `1` compares them at face value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonPolicy {
    pub debt_weight: Decimal,
    pub subscription_weight: Decimal,
    pub savings_weight: Decimal,
}

impl Default for ComparisonPolicy {
    fn default() -> Self {
        Self {
            debt_weight: Decimal::ONE,
            subscription_weight: Decimal::ONE,
            savings_weight: Decimal::ONE,
        }
    }
}

/// Tunables for the scenario engine. Every field has a default, so a config
/// file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Horizon cap, in months, for amortization and savings-target searches.
    pub max_months: u32,
    /// Step cap for the required-payment search.
    pub max_search_steps: u32,
    /// Timeline length when a request omits `months`.
    pub default_projection_months: u32,
    /// Savings APY used when a request omits `annual_rate`.
    pub default_savings_rate: Percent,
    /// Largest APR or savings rate accepted as input.
    pub max_apr: Percent,
    /// Largest money amount accepted as input.
    pub max_amount: Money,
    pub comparison: ComparisonPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_months: 600,
            max_search_steps: 64,
            default_projection_months: 12,
            default_savings_rate: Percent::new(dec!(4.5)),
            max_apr: Percent::new(dec!(100)),
            max_amount: Money::new(dec!(1000000000)),
            comparison: ComparisonPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Loads a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
