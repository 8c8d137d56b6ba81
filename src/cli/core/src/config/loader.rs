/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::PujariConfig;

pub const CONFIG_FILE: &str = "pujari.toml";

/// Walk upward from `start` to find `pujari.toml`, like Cargo.toml discovery
pub fn find_pujari_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_pujari_config(path: &Path) -> Result<PujariConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let mut config: PujariConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.validate().with_context(|| format!("invalid {}", path.display()))?;
  config.normalize();
  Ok(config)
}

/// Resolve `relative` against the directory holding the config file.
pub fn config_relative(config_path: &Path, relative: &str) -> PathBuf {
  let candidate = Path::new(relative);
  if candidate.is_absolute() {
    return candidate.to_path_buf();
  }
  config_path.parent().map_or_else(|| candidate.to_path_buf(), |dir| dir.join(candidate))
}
