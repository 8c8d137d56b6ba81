/* src/cli/core/src/resolve.rs */

use std::path::Path;

use anyhow::{Result, bail};
use pujari_engine::{NavigationState, state_for_path};
use pujari_injector::{Head, apply};

use crate::config::PujariConfig;
use crate::site::build_effect;

/// Resolved metadata for `path` as pretty JSON, or as rendered head markup.
pub(crate) async fn run_resolve(
  config: &PujariConfig,
  config_path: &Path,
  path: &str,
  html: bool,
) -> Result<String> {
  let Some(nav) = state_for_path(&NavigationState::default(), path) else {
    bail!("no page is served at {path}");
  };
  let effect = build_effect(config, config_path)?;
  let meta = effect.resolve(&nav).await;

  if html {
    let mut head = Head::new();
    apply(&mut head, &meta);
    return Ok(head.render());
  }
  Ok(serde_json::to_string_pretty(&meta)?)
}
