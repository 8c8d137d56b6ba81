/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

use std::sync::Arc;

use pujari_core::MetadataEffect;

/// Re-export pujari-core for convenience
pub use pujari_core;

/// Element id of the hydration script carrying the initial `NavigationState`.
pub const NAV_DATA_ID: &str = "__pujari_nav";

/// Shell used when no template is configured.
pub const DEFAULT_SHELL: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Pandit Rajesh Joshi</title>
</head>
<body>
<div id="root"><!--pujari:content--></div>
</body>
</html>
"#;

/// Route-per-page server. Every route resolves its own metadata and renders
/// it into the shell before responding.
pub struct SiteServer {
  effect: Arc<MetadataEffect>,
  template: String,
}

impl SiteServer {
  pub fn new(effect: Arc<MetadataEffect>) -> Self {
    Self { effect, template: DEFAULT_SHELL.to_string() }
  }

  /// Replace the HTML shell. It should contain `<!--pujari:content-->`.
  pub fn template(mut self, html: impl Into<String>) -> Self {
    self.template = html.into();
    self
  }

  pub fn into_axum_router(self) -> axum::Router {
    handler::build_router(self.effect, self.template)
  }

  pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = self.into_axum_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "pujari server listening");
    axum::serve(listener, router).await?;
    Ok(())
  }
}
