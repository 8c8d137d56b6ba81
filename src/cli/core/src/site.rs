/* src/cli/core/src/site.rs */

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use pujari_core::{FileSource, MetadataEffect, MetadataSource, RestSource};

use crate::config::{PujariConfig, SourceKind, config_relative};

/// Build the record store named by `[source]`.
pub(crate) fn build_source(
  config: &PujariConfig,
  config_path: &Path,
) -> Result<Arc<dyn MetadataSource>> {
  let source = &config.source;
  match source.kind {
    SourceKind::File => {
      let rel = source.path.as_deref().context("source.path missing")?;
      let path = config_relative(config_path, rel);
      let file = FileSource::load(&path)
        .with_context(|| format!("failed to load content file {}", path.display()))?;
      Ok(Arc::new(file))
    }
    SourceKind::Rest => {
      let url = source.url.as_deref().context("source.url missing")?;
      let rest = RestSource::new(url, source.api_key.clone())?;
      tracing::info!(url, "using REST record store");
      Ok(Arc::new(rest))
    }
  }
}

pub(crate) fn build_effect(config: &PujariConfig, config_path: &Path) -> Result<Arc<MetadataEffect>> {
  let source = build_source(config, config_path)?;
  Ok(Arc::new(MetadataEffect::new(source, config.identity())))
}
