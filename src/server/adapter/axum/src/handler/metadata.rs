/* src/server/adapter/axum/src/handler/metadata.rs */

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use pujari_core::SiteError;
use pujari_engine::{EffectiveMetadata, NavigationState, state_for_path};

use super::AppState;
use crate::error::AxumError;

/// Metadata the client runtime would inject for `path`.
pub(super) async fn handle_metadata(
  State(state): State<Arc<AppState>>,
  Path(path): Path<String>,
) -> Result<Json<EffectiveMetadata>, AxumError> {
  resolve_path(&state, &format!("/{path}")).await
}

pub(super) async fn handle_root_metadata(
  State(state): State<Arc<AppState>>,
) -> Result<Json<EffectiveMetadata>, AxumError> {
  resolve_path(&state, "/").await
}

async fn resolve_path(state: &AppState, path: &str) -> Result<Json<EffectiveMetadata>, AxumError> {
  let nav = state_for_path(&NavigationState::default(), path)
    .ok_or_else(|| SiteError::not_found(format!("No page at '{path}'")))?;
  Ok(Json(state.effect.resolve(&nav).await))
}
