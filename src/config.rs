// src/config.rs

//! Configuration loading utilities.
//!
//! Settings are layered: defaults, then the TOML file, then environment
//! variables, then command line overrides.

use std::path::Path;

use crate::error::Result;
use crate::models::Config;

/// Command line settings that win over file and environment values.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub interval_secs: Option<u64>,
}

/// Load the configuration file and apply environment variables.
///
/// Not validated; see [`with_overrides`].
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path)?;
    config.apply_env()?;
    Ok(config)
}

/// Apply command line overrides and validate.
pub fn with_overrides(mut config: Config, overrides: &Overrides) -> Result<Config> {
    if let Some(secs) = overrides.interval_secs {
        config.poll.interval_secs = secs;
    }
    config.validate()?;
    log::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
