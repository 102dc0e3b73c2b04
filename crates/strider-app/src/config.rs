//! Host runtime settings read from `STRIDER_*` environment variables.

use std::env;

use anyhow::{Context, Result};

use strider_sim::engine::SimConfig;

/// Run length when `STRIDER_TICKS` is unset or unparsable: ten seconds at 60Hz.
pub const DEFAULT_RUN_TICKS: u64 = 600;

/// Simulation config from `STRIDER_CONFIG` (JSON file) and `STRIDER_SEED`.
pub fn sim_config() -> Result<SimConfig> {
    resolve_sim_config(
        env::var("STRIDER_CONFIG").ok().as_deref(),
        env::var("STRIDER_SEED").ok().as_deref(),
    )
}

pub fn run_ticks() -> u64 {
    env::var("STRIDER_TICKS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RUN_TICKS)
}

/// Defaults, then the optional file, then the seed override.
pub fn resolve_sim_config(path: Option<&str>, seed: Option<&str>) -> Result<SimConfig> {
    let mut config = match path {
        Some(path) => {
            SimConfig::from_path(path).with_context(|| format!("loading config from {path}"))?
        }
        None => SimConfig::default(),
    };

    if let Some(seed) = seed {
        config.seed = seed
            .trim()
            .parse()
            .with_context(|| format!("STRIDER_SEED is not a u64: {seed:?}"))?;
    }

    config.validate().context("invalid simulation config")?;
    Ok(config)
}
