/* src/cli/core/src/serve.rs */

use std::path::Path;

use anyhow::{Context, Result};
use pujari_server_axum::SiteServer;

use crate::config::{PujariConfig, config_relative};
use crate::site::build_effect;

pub(crate) async fn run_serve(config: &PujariConfig, config_path: &Path) -> Result<()> {
  let effect = build_effect(config, config_path)?;
  let mut server = SiteServer::new(effect);

  if let Some(ref template) = config.server.template {
    let path = config_relative(config_path, template);
    let html = std::fs::read_to_string(&path)
      .with_context(|| format!("failed to read template {}", path.display()))?;
    if !html.contains("<!--pujari:content-->") {
      tracing::warn!(template = %path.display(), "template has no <!--pujari:content--> slot");
    }
    server = server.template(html);
  }

  tracing::info!(bind = %config.server.bind, "starting server");
  server.serve(&config.server.bind).await.map_err(|e| anyhow::anyhow!("server error: {e}"))
}
