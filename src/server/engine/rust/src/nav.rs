/* src/server/engine/rust/src/nav.rs */

use serde::{Deserialize, Serialize};

use crate::page::PageId;

/// Category filter value meaning "no filter".
pub const DEFAULT_CATEGORY: &str = "all";

/// Logical navigation state shared by the store, URL sync and metadata effect.
///
/// `current_blog_id` is meant to be non-empty only on the blog detail page,
/// but nothing clears it when leaving that page: the last viewed post id
/// survives in storage until another post overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
  pub current_page: PageId,
  pub current_category: String,
  pub current_blog_id: String,
}

impl Default for NavigationState {
  fn default() -> Self {
    Self {
      current_page: PageId::Home,
      current_category: DEFAULT_CATEGORY.to_string(),
      current_blog_id: String::new(),
    }
  }
}

/// Partial update of a `NavigationState`. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationPatch {
  pub current_page: Option<PageId>,
  pub current_category: Option<String>,
  pub current_blog_id: Option<String>,
}

impl NavigationPatch {
  pub fn page(page: PageId) -> Self {
    Self { current_page: Some(page), ..Self::default() }
  }

  pub fn is_empty(&self) -> bool {
    self.current_page.is_none() && self.current_category.is_none() && self.current_blog_id.is_none()
  }
}

impl NavigationState {
  /// Apply a patch in place. Returns whether any field changed.
  pub fn apply(&mut self, patch: NavigationPatch) -> bool {
    let before = self.clone();
    if let Some(page) = patch.current_page {
      self.current_page = page;
    }
    if let Some(category) = patch.current_category {
      self.current_category = category;
    }
    if let Some(blog_id) = patch.current_blog_id {
      self.current_blog_id = blog_id;
    }
    *self != before
  }

  /// Slug under which page metadata is stored: the post slug on blog detail,
  /// the page slug everywhere else.
  pub fn metadata_slug(&self) -> &str {
    match self.current_page {
      PageId::BlogDetail if !self.current_blog_id.is_empty() => &self.current_blog_id,
      _ => self.current_page.as_str(),
    }
  }
}

/// Input accepted by the navigation dispatcher.
///
/// The two variants reset differently: a bare page clears the category
/// filter when leaving services, a contextual request only touches the
/// fields it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavigationRequest {
  Page(PageId),
  WithContext {
    page: PageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, rename = "blogId", skip_serializing_if = "Option::is_none")]
    blog_id: Option<String>,
  },
}

impl NavigationRequest {
  pub fn with_context(page: PageId) -> Self {
    Self::WithContext { page, category: None, blog_id: None }
  }

  pub fn category(self, value: impl Into<String>) -> Self {
    match self {
      Self::Page(page) => Self::WithContext { page, category: Some(value.into()), blog_id: None },
      Self::WithContext { page, blog_id, .. } => {
        Self::WithContext { page, category: Some(value.into()), blog_id }
      }
    }
  }

  pub fn blog_id(self, value: impl Into<String>) -> Self {
    match self {
      Self::Page(page) => Self::WithContext { page, category: None, blog_id: Some(value.into()) },
      Self::WithContext { page, category, .. } => {
        Self::WithContext { page, category, blog_id: Some(value.into()) }
      }
    }
  }

  pub fn target(&self) -> &PageId {
    match self {
      Self::Page(page) | Self::WithContext { page, .. } => page,
    }
  }

  /// The store update this request stands for.
  pub fn into_patch(self) -> NavigationPatch {
    match self {
      Self::Page(page) => {
        let current_category =
          if page == PageId::Services { None } else { Some(DEFAULT_CATEGORY.to_string()) };
        NavigationPatch { current_page: Some(page), current_category, current_blog_id: None }
      }
      Self::WithContext { page, category, blog_id } => NavigationPatch {
        current_page: Some(page),
        current_category: category,
        current_blog_id: blog_id,
      },
    }
  }
}

impl From<PageId> for NavigationRequest {
  fn from(page: PageId) -> Self {
    Self::Page(page)
  }
}

impl From<&str> for NavigationRequest {
  fn from(slug: &str) -> Self {
    Self::Page(PageId::from_slug(slug))
  }
}
