use dotenvy::dotenv;
use std::{env, str::FromStr};
use tracing::warn;

use empires_game::rules::{EconomyRules, ProductionFormula, StorageRule};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;
const DEFAULT_HTTP_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rules: EconomyRules,
    /// Seconds between two economy sweeps.
    pub sweep_interval_secs: u64,
    pub http_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: EconomyRules::default(),
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let production = parse_setting(
            "EMPIRES_PRODUCTION_FORMULA",
            env::var("EMPIRES_PRODUCTION_FORMULA").ok(),
            ProductionFormula::default(),
        );

        let storage = parse_setting(
            "EMPIRES_STORAGE_RULE",
            env::var("EMPIRES_STORAGE_RULE").ok(),
            StorageRule::default(),
        );

        let sweep_interval_secs = parse_setting(
            "EMPIRES_SWEEP_INTERVAL_SECS",
            env::var("EMPIRES_SWEEP_INTERVAL_SECS").ok(),
            DEFAULT_SWEEP_INTERVAL_SECS,
        )
        .clamp(1, 3600);

        let http_port = parse_setting(
            "EMPIRES_HTTP_PORT",
            env::var("EMPIRES_HTTP_PORT").ok(),
            DEFAULT_HTTP_PORT,
        );

        Self {
            rules: EconomyRules {
                production,
                storage,
            },
            sweep_interval_secs,
            http_port,
        }
    }
}

/// Parses a raw env value, keeping `default` when it's missing or invalid.
fn parse_setting<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match raw {
        Some(val) => match val.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(key, value = %val, fallback = ?default, "Invalid setting, using default");
                default
            }
        },
        None => default,
    }
}
