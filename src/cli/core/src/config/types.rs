/* src/cli/core/src/config/types.rs */

use anyhow::{Result, bail};
use pujari_engine::SiteIdentity;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PujariConfig {
  #[serde(default)]
  pub site: SiteSection,
  #[serde(default)]
  pub server: ServerSection,
  pub source: SourceSection,
  #[serde(default)]
  pub log: LogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteSection {
  pub name: Option<String>,
  /// Scheme and host that prefix canonical paths.
  pub origin: Option<String>,
  pub author: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_bind")]
  pub bind: String,
  /// HTML shell, relative to the config file.
  pub template: Option<String>,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { bind: default_bind(), template: None }
  }
}

fn default_bind() -> String {
  "0.0.0.0:3000".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
  File,
  Rest,
}

impl SourceKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::File => "file",
      Self::Rest => "rest",
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
  pub kind: SourceKind,
  /// Content file for `kind = "file"`, relative to the config file.
  pub path: Option<String>,
  /// Base URL for `kind = "rest"`.
  pub url: Option<String>,
  pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSection {
  #[serde(default)]
  pub json: bool,
}

impl PujariConfig {
  pub fn validate(&self) -> Result<()> {
    match self.source.kind {
      SourceKind::File if self.source.path.is_none() => {
        bail!("source.path is required when source.kind = \"file\"")
      }
      SourceKind::Rest if self.source.url.is_none() => {
        bail!("source.url is required when source.kind = \"rest\"")
      }
      _ => {}
    }
    if let Some(ref origin) = self.site.origin {
      if !(origin.starts_with("http://") || origin.starts_with("https://")) {
        bail!("site.origin \"{origin}\" must start with http:// or https://");
      }
    }
    Ok(())
  }

  /// Strip trailing slashes from values that get joined with paths.
  pub fn normalize(&mut self) {
    if let Some(origin) = self.site.origin.as_mut() {
      let trimmed = origin.trim_end_matches('/').len();
      origin.truncate(trimmed);
    }
    if let Some(url) = self.source.url.as_mut() {
      let trimmed = url.trim_end_matches('/').len();
      url.truncate(trimmed);
    }
  }

  pub fn identity(&self) -> SiteIdentity {
    let mut identity = SiteIdentity::default();
    if let Some(ref name) = self.site.name {
      identity.name = name.clone();
    }
    if let Some(ref author) = self.site.author {
      identity.author = author.clone();
    }
    identity.origin = self.site.origin.clone();
    identity
  }
}
