/* src/server/adapter/axum/src/handler/mod.rs */

mod content;
mod metadata;
mod page;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use pujari_core::MetadataEffect;

pub(crate) struct AppState {
  pub effect: Arc<MetadataEffect>,
  pub template: String,
}

pub(crate) fn build_router(effect: Arc<MetadataEffect>, template: String) -> Router {
  let state = Arc::new(AppState { effect, template });

  // Page paths go through `parse_path`, the decoder the client uses.
  // Nothing here touches a navigation store.
  Router::new()
    .route("/_pujari/metadata", get(metadata::handle_root_metadata))
    .route("/_pujari/metadata/{*path}", get(metadata::handle_metadata))
    .fallback(page::handle_path)
    .with_state(state)
}
