//! Loading and writing sweep configuration files
//!
//! Configuration files are YAML. Every field is optional; anything left out
//! takes the built-in default, so an empty file is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use aerosweep_core::{MissingBlockPolicy, SweepConfig, Variant};
use color_eyre::eyre::{WrapErr, bail, eyre};

use crate::util::atomic_write;

pub fn parse_config(yaml: &str) -> color_eyre::Result<SweepConfig> {
    if yaml.trim().is_empty() {
        return Ok(SweepConfig::default());
    }
    serde_saphyr::from_str(yaml).map_err(|e| eyre!("invalid sweep configuration: {e}"))
}

/// Load the configuration at `path`, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> color_eyre::Result<SweepConfig> {
    let Some(path) = path else {
        return Ok(SweepConfig::default());
    };

    let yaml = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let config = parse_config(&yaml).wrap_err_with(|| format!("in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded sweep configuration");
    Ok(config)
}

pub fn default_config_yaml() -> color_eyre::Result<String> {
    serde_saphyr::to_string(&SweepConfig::default())
        .map_err(|e| eyre!("failed to serialize default configuration: {e}"))
}

/// Write the default configuration to `path`
pub fn write_default_config(path: &Path, force: bool) -> color_eyre::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let yaml = default_config_yaml()?;
    atomic_write(path, &yaml).wrap_err_with(|| format!("failed to write {}", path.display()))
}

/// Command-line settings that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub variant: Option<Variant>,
    pub strict: bool,
    pub output_dir: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(&self, config: &mut SweepConfig) {
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if self.strict {
            config.missing_blocks = MissingBlockPolicy::Strict;
        }
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = dir.clone();
        }
    }
}
