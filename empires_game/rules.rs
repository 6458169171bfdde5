use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How resource fields turn levels into hourly production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionFormula {
    /// `30 + level * 25`
    #[default]
    Linear,
    /// `2 * level * 1.5^(level - 1)`
    Exponential,
}

/// How several storage buildings of the same kind combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageRule {
    /// The largest single building wins.
    #[default]
    Max,
    /// Capacities add up.
    Sum,
}

/// Tunable knobs of the village economy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EconomyRules {
    pub production: ProductionFormula,
    pub storage: StorageRule,
}

impl FromStr for ProductionFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(ProductionFormula::Linear),
            "exponential" => Ok(ProductionFormula::Exponential),
            other => Err(format!("unknown production formula '{other}'")),
        }
    }
}

impl FromStr for StorageRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(StorageRule::Max),
            "sum" => Ok(StorageRule::Sum),
            other => Err(format!("unknown storage rule '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rules() {
        assert_eq!(
            "Exponential".parse::<ProductionFormula>(),
            Ok(ProductionFormula::Exponential)
        );
        assert_eq!(" linear ".parse::<ProductionFormula>(), Ok(ProductionFormula::Linear));
        assert_eq!("SUM".parse::<StorageRule>(), Ok(StorageRule::Sum));
        assert!("avg".parse::<StorageRule>().is_err());
    }

    #[test]
    fn test_default_rules() {
        let rules = EconomyRules::default();
        assert_eq!(rules.production, ProductionFormula::Linear);
        assert_eq!(rules.storage, StorageRule::Max);
    }
}
