/* src/server/engine/wasm/src/lib.rs */

use pujari_engine::{
  EffectiveMetadata, NavigationRequest, NavigationState, PageMetadataRecord, SiteIdentity,
  SiteMetadataDefaults,
};
use wasm_bindgen::prelude::*;

fn state_from(json: &str) -> NavigationState {
  serde_json::from_str(json).unwrap_or_default()
}

fn state_to_json(state: &NavigationState) -> String {
  serde_json::to_string(state).unwrap_or_else(|_| "null".to_string())
}

// --- Navigation ---

/// Apply a navigation request (`"services"` or `{"page":..,"category":..,"blogId":..}`)
/// to a state and return the new state.
#[wasm_bindgen]
pub fn navigate(state_json: &str, request_json: &str) -> String {
  let mut state = state_from(state_json);
  match serde_json::from_str::<NavigationRequest>(request_json) {
    Ok(request) => {
      state.apply(request.into_patch());
      state_to_json(&state)
    }
    Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
  }
}

#[wasm_bindgen]
pub fn canonical_path(state_json: &str) -> String {
  pujari_engine::canonical_path(&state_from(state_json))
}

/// State after a popstate/initial load at `path`, or `null` when the path is not ours.
#[wasm_bindgen]
pub fn state_for_path(state_json: &str, path: &str) -> String {
  match pujari_engine::state_for_path(&state_from(state_json), path) {
    Some(next) => state_to_json(&next),
    None => "null".to_string(),
  }
}

#[wasm_bindgen]
pub fn menu_entries(is_owner: bool) -> String {
  serde_json::to_string(&pujari_engine::menu_entries(is_owner)).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen]
pub fn route_table() -> String {
  let routes: Vec<serde_json::Value> = pujari_engine::route_table()
    .into_iter()
    .map(|(path, page)| serde_json::json!({ "path": path, "page": page }))
    .collect();
  serde_json::to_string(&routes).unwrap_or_else(|_| "[]".to_string())
}

// --- Metadata ---

/// Resolve metadata. `record_json` may be empty or `null` when the page has no record;
/// an empty `origin` keeps canonical URLs path-only.
#[wasm_bindgen]
pub fn resolve_metadata(
  state_json: &str,
  defaults_json: &str,
  record_json: &str,
  site_name: &str,
  author: &str,
  origin: &str,
) -> String {
  let state = state_from(state_json);
  let defaults: SiteMetadataDefaults = serde_json::from_str(defaults_json).unwrap_or_default();
  let record: Option<PageMetadataRecord> = serde_json::from_str(record_json).unwrap_or(None);
  let mut identity = SiteIdentity::default();
  if !site_name.is_empty() {
    identity.name = site_name.to_string();
  }
  if !author.is_empty() {
    identity.author = author.to_string();
  }
  if !origin.is_empty() {
    identity.origin = Some(origin.trim_end_matches('/').to_string());
  }
  let meta = pujari_engine::resolve_metadata(&state, &defaults, record.as_ref(), &identity);
  serde_json::to_string(&meta).unwrap_or_else(|_| "null".to_string())
}

#[wasm_bindgen]
pub fn script_safe_json(json: &str) -> String {
  pujari_engine::script_safe_json(json)
}

// --- Re-exported injector functions ---

/// Rewrite the head of `html`. Invalid metadata JSON leaves the document unchanged.
#[wasm_bindgen]
pub fn inject_metadata(html: &str, meta_json: &str) -> String {
  match serde_json::from_str::<EffectiveMetadata>(meta_json) {
    Ok(meta) => pujari_injector::inject_metadata(html, &meta),
    Err(_) => html.to_string(),
  }
}

#[wasm_bindgen]
pub fn inject_data_script(html: &str, data_id: &str, json: &str) -> String {
  pujari_injector::inject_data_script(html, data_id, json)
}
