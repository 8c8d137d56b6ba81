/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{CONFIG_FILE, config_relative, find_pujari_config, load_pujari_config};
pub use types::{PujariConfig, SourceKind};
