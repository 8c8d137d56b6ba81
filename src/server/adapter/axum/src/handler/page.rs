/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use pujari_core::{PageView, select_page};
use pujari_engine::{NavigationState, PageId, PathTarget, parse_path};
use pujari_injector::{fill_slot, inject_data_script, inject_metadata};

use super::AppState;
use super::content::{render_not_found, render_view};
use crate::NAV_DATA_ID;

/// Every page GET goes through the same path decoder the client uses.
pub(super) async fn handle_path(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
  match parse_path(uri.path()) {
    Some(target) => render_target(&state, target).await,
    None => render_not_found_page(&state, uri.path()).await,
  }
}

async fn render_target(state: &AppState, target: PathTarget) -> Response {
  let mut nav = NavigationState::default();
  nav.apply(target.into_patch());

  let posts = match nav.current_page {
    PageId::Blog | PageId::BlogDetail => state.effect.blog_posts().await,
    _ => Vec::new(),
  };
  let view = select_page(&nav, &posts);
  if let PageView::BlogNotFound { slug, .. } = &view {
    tracing::debug!(slug = %slug, "blog post not found");
    // Head describes the listing, not an article that does not exist.
    let mut listing = NavigationState::default();
    listing.apply(PathTarget::Page(PageId::Blog).into_patch());
    return render(state, &listing, &nav, &render_view(&view), StatusCode::NOT_FOUND).await;
  }

  render(state, &nav, &nav, &render_view(&view), StatusCode::OK).await
}

async fn render_not_found_page(state: &AppState, path: &str) -> Response {
  tracing::debug!(path, "no route");
  let home = NavigationState::default();
  render(state, &home, &home, &render_not_found(), StatusCode::NOT_FOUND).await
}

/// `meta_nav` drives the head; `nav` is handed to the client for hydration.
async fn render(
  state: &AppState,
  meta_nav: &NavigationState,
  nav: &NavigationState,
  content: &str,
  status: StatusCode,
) -> Response {
  let meta = state.effect.resolve(meta_nav).await;
  let html = inject_metadata(&state.template, &meta);
  let html = fill_slot(&html, "content", content);
  let nav_json = serde_json::to_string(nav).unwrap_or_default();
  let html = inject_data_script(&html, NAV_DATA_ID, &nav_json);
  (status, Html(html)).into_response()
}
