/* src/server/engine/rust/src/route.rs */

//! Path codec between `NavigationState` and browser paths.
//! Scheme: `/`, `/{page}`, `/blog/{slug}`. Query and fragment are not part of it.

use crate::nav::{NavigationPatch, NavigationState};
use crate::page::PageId;

/// Path the address bar should show for a state.
pub fn canonical_path(state: &NavigationState) -> String {
  match &state.current_page {
    PageId::Home => "/".to_string(),
    PageId::BlogDetail if !state.current_blog_id.is_empty() => {
      format!("/blog/{}", state.current_blog_id)
    }
    page => format!("/{}", page.as_str()),
  }
}

/// What a recognised path points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTarget {
  Page(PageId),
  BlogPost(String),
}

impl PathTarget {
  pub fn into_patch(self) -> NavigationPatch {
    match self {
      Self::Page(page) => NavigationPatch::page(page),
      Self::BlogPost(slug) => NavigationPatch {
        current_page: Some(PageId::BlogDetail),
        current_category: None,
        current_blog_id: Some(slug),
      },
    }
  }
}

/// Parse a browser path. Unrecognised paths yield `None` and must leave state untouched.
pub fn parse_path(path: &str) -> Option<PathTarget> {
  let path = path.split(['?', '#']).next().unwrap_or_default();
  let trimmed = path.trim_start_matches('/').trim_end_matches('/');

  match trimmed {
    "" | "home" => Some(PathTarget::Page(PageId::Home)),
    "admin" => Some(PathTarget::Page(PageId::Admin)),
    _ => match trimmed.strip_prefix("blog/") {
      Some(rest) if !rest.is_empty() => Some(PathTarget::BlogPost(rest.to_string())),
      _ => PageId::routable(trimmed).map(PathTarget::Page),
    },
  }
}

/// State after an external navigation to `path`, or `None` when the path is not ours.
pub fn state_for_path(current: &NavigationState, path: &str) -> Option<NavigationState> {
  let target = parse_path(path)?;
  let mut next = current.clone();
  next.apply(target.into_patch());
  Some(next)
}

/// Every path the site serves, paired with the page it renders.
/// Blog posts are served under the `/blog/{slug}` pattern and are not listed.
pub fn route_table() -> Vec<(String, PageId)> {
  let mut routes = vec![("/".to_string(), PageId::Home), ("/admin".to_string(), PageId::Admin)];
  routes.extend(PageId::ROUTABLE.iter().map(|page| (format!("/{page}"), page.clone())));
  routes
}
